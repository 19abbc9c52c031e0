//! Attach operations: start debug sessions for one replica or a whole service.

use super::output::{write_json, OutputFormat};
use super::ui::{write_header, write_kv, write_mark, Mark};
use crate::client::fetch_service;
use serde::Serialize;
use std::io::Write;
use tye_attach_core::{AttachOutcome, ReplicaAttacher, ServiceDescriptor, SessionMonitor};

#[derive(Debug, Serialize)]
pub struct ReplicaAttachReport {
    pub replica: String,
    #[serde(flatten)]
    pub outcome: AttachOutcome,
}

/// 选择要附加的 replica：指定名称时只取该 replica，否则取全部。
pub async fn attach_replicas(
    attacher: &ReplicaAttacher,
    monitor: &SessionMonitor,
    service: &ServiceDescriptor,
    replica: Option<&str>,
) -> anyhow::Result<Vec<ReplicaAttachReport>> {
    let outcomes = match replica {
        Some(name) => {
            let descriptor = service.replicas.get(name).ok_or_else(|| {
                anyhow::anyhow!("replica not found: {} (service {})", name, service.name())
            })?;
            vec![(
                name.to_string(),
                attacher.attach_to_replica(service, descriptor).await?,
            )]
        }
        None => attacher.attach_to_service(service).await?,
    };

    let mut reports = Vec::with_capacity(outcomes.len());
    for (name, outcome) in outcomes {
        // 记录已启动的 CLR 会话，重复 attach 时跳过
        if outcome.is_started() {
            let has_process = outcome
                .configuration()
                .is_some_and(|c| c.process_id.is_some());
            if let Some(pid) = service.replicas.get(&name).and_then(|r| r.pid) {
                if has_process {
                    monitor.session_started(pid);
                }
            }
        }
        reports.push(ReplicaAttachReport {
            replica: name,
            outcome,
        });
    }
    Ok(reports)
}

/// Attach debuggers to replicas of a service.
///
/// The report goes to `report`; with the print host that stream is stderr so
/// stdout carries session documents only.
#[allow(clippy::too_many_arguments)]
pub async fn attach_service(
    client: &reqwest::Client,
    base: &str,
    attacher: &ReplicaAttacher,
    monitor: &SessionMonitor,
    service_name: &str,
    replica: Option<&str>,
    output: OutputFormat,
    report: &mut dyn Write,
) -> anyhow::Result<()> {
    let service = fetch_service(client, base, service_name).await?;

    match attach_replicas(attacher, monitor, &service, replica).await {
        Ok(reports) => write_report(report, &service, attacher, &reports, output),
        Err(e) => {
            if output == OutputFormat::Table {
                write_mark(report, Mark::Error, &e.to_string())?;
            }
            Err(e)
        }
    }
}

/// 渲染 attach 结果：JSON 数组或表格。
pub fn write_report(
    out: &mut dyn Write,
    service: &ServiceDescriptor,
    attacher: &ReplicaAttacher,
    reports: &[ReplicaAttachReport],
    output: OutputFormat,
) -> anyhow::Result<()> {
    if output == OutputFormat::Json {
        return write_json(out, &reports);
    }

    write_header(out, &format!("🐞 ATTACH: {}", service.name().to_uppercase()))?;
    write_kv(out, "Type", service.service_type.as_str())?;
    if let Some(folder) = attacher.folder() {
        write_kv(out, "Folder", &folder.path.display().to_string())?;
    }
    writeln!(out)?;

    if reports.is_empty() {
        write_mark(out, Mark::Info, "No replicas to attach.")?;
    }
    for report in reports {
        match &report.outcome {
            AttachOutcome::Started { configuration } => write_mark(
                out,
                Mark::Success,
                &format!("{} → {}", report.replica, configuration.name),
            )?,
            AttachOutcome::Declined { configuration } => write_mark(
                out,
                Mark::Warning,
                &format!("{} → host declined '{}'", report.replica, configuration.name),
            )?,
            AttachOutcome::Skipped { reason } => write_mark(
                out,
                Mark::Info,
                &format!("{} skipped: {}", report.replica, reason),
            )?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::SharedBuffer;
    use crate::host::PrintHost;
    use std::sync::Arc;
    use tye_attach_core::{SkipReason, SysinfoProcessTree};

    fn project_service() -> ServiceDescriptor {
        serde_json::from_str(
            r#"{
                "serviceType": "project",
                "description": { "name": "api", "runInfo": { "type": "project" } },
                "replicas": {
                    "api_1": { "name": "api_1", "pid": 1001, "ports": [5000] },
                    "api_2": { "name": "api_2", "ports": [5001] }
                }
            }"#,
        )
        .unwrap()
    }

    fn attacher_with_sessions(monitor: &SessionMonitor, sessions: &SharedBuffer) -> ReplicaAttacher {
        ReplicaAttacher::new(
            Arc::new(monitor.clone()),
            Arc::new(SysinfoProcessTree::new()),
            Arc::new(PrintHost::with_writer(Box::new(sessions.clone()))),
        )
    }

    fn attacher(monitor: &SessionMonitor) -> ReplicaAttacher {
        attacher_with_sessions(monitor, &SharedBuffer::default())
    }

    #[tokio::test]
    async fn second_attach_is_skipped() {
        let monitor = SessionMonitor::new();
        let attacher = attacher(&monitor);
        let service = project_service();

        let first = attach_replicas(&attacher, &monitor, &service, None)
            .await
            .unwrap();
        assert!(first[0].outcome.is_started());
        assert_eq!(
            first[1].outcome,
            AttachOutcome::Skipped {
                reason: SkipReason::NoProcessId
            }
        );
        assert_eq!(monitor.attached_pids(), vec![1001]);

        let second = attach_replicas(&attacher, &monitor, &service, Some("api_1"))
            .await
            .unwrap();
        assert_eq!(
            second[0].outcome,
            AttachOutcome::Skipped {
                reason: SkipReason::AlreadyAttached(1001)
            }
        );
    }

    #[tokio::test]
    async fn unknown_replica_is_an_error() {
        let monitor = SessionMonitor::new();
        let err = attach_replicas(&attacher(&monitor), &monitor, &project_service(), Some("nope"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("replica not found"));
    }

    #[test]
    fn report_flattens_outcome() {
        let report = ReplicaAttachReport {
            replica: "api_2".into(),
            outcome: AttachOutcome::Skipped {
                reason: SkipReason::NoProcessId,
            },
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["replica"], "api_2");
        assert_eq!(value["status"], "skipped");
        assert_eq!(value["reason"]["reason"], "no_process_id");
    }

    #[tokio::test]
    async fn session_stream_holds_only_session_documents() {
        for output in [OutputFormat::Table, OutputFormat::Json] {
            let monitor = SessionMonitor::new();
            let sessions = SharedBuffer::default();
            let attacher = attacher_with_sessions(&monitor, &sessions);
            let service = project_service();

            let reports = attach_replicas(&attacher, &monitor, &service, None)
                .await
                .unwrap();
            let mut report = Vec::new();
            write_report(&mut report, &service, &attacher, &reports, output).unwrap();

            let lines = sessions.lines();
            assert_eq!(lines.len(), 1);
            let doc: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
            assert_eq!(doc["configuration"]["type"], "coreclr");
            assert_eq!(doc["configuration"]["processId"], "1001");

            let report = String::from_utf8(report).unwrap();
            assert!(report.contains("api_1"));
            assert!(report.contains("api_2"));
            assert!(!report.contains(lines[0].as_str()));
        }
    }
}
