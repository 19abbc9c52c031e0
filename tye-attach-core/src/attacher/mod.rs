use crate::config::DebugConfiguration;
use crate::error::Result;
use crate::host::DebugHost;
use crate::models::{
    ReplicaDescriptor, RunInfoType, ServiceDescriptor, ServiceType, WorkspaceFolder,
};
use crate::monitor::AttachTracker;
use crate::process_tree::ProcessTreeReader;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

mod dispatch;
mod dotnet;
mod node;

/// Binding protocol carrying the Node inspector port.
pub const INSPECTOR_PROTOCOL: &str = "inspector";

/// 可调试的运行时种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugRuntime {
    Clr,
    Node,
}

impl DebugRuntime {
    /// function/project 走 CLR；executable + node 走 inspector；其余不可调试。
    pub fn for_service(service: &ServiceDescriptor) -> Option<Self> {
        match service.service_type {
            ServiceType::Function | ServiceType::Project => Some(DebugRuntime::Clr),
            ServiceType::Executable if service.run_info_type() == Some(RunInfoType::Node) => {
                Some(DebugRuntime::Node)
            }
            _ => None,
        }
    }
}

/// 跳过 attach 的原因；均属预期分支，不是错误。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "pid", rename_all = "snake_case")]
pub enum SkipReason {
    NoProcessId,
    AlreadyAttached(u32),
    NoInspectorPort,
    NotDebuggable,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoProcessId => f.write_str("replica has no process id"),
            SkipReason::AlreadyAttached(pid) => write!(f, "process {} is already attached", pid),
            SkipReason::NoInspectorPort => f.write_str("replica has no inspector port"),
            SkipReason::NotDebuggable => f.write_str("service is not debuggable"),
        }
    }
}

/// 单次 attach 的结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttachOutcome {
    Started { configuration: DebugConfiguration },
    Declined { configuration: DebugConfiguration },
    Skipped { reason: SkipReason },
}

impl AttachOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, AttachOutcome::Started { .. })
    }

    pub fn configuration(&self) -> Option<&DebugConfiguration> {
        match self {
            AttachOutcome::Started { configuration }
            | AttachOutcome::Declined { configuration } => Some(configuration),
            AttachOutcome::Skipped { .. } => None,
        }
    }

    fn skipped(reason: SkipReason) -> Self {
        AttachOutcome::Skipped { reason }
    }
}

/// replica 调试附加器：持有注入的 tracker / 进程树 / 调试宿主，每次调用无状态。
#[derive(Clone)]
pub struct ReplicaAttacher {
    tracker: Arc<dyn AttachTracker>,
    processes: Arc<dyn ProcessTreeReader>,
    host: Arc<dyn DebugHost>,
    folder: Option<WorkspaceFolder>,
}

impl std::fmt::Debug for ReplicaAttacher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplicaAttacher")
            .field("folder", &self.folder)
            .finish_non_exhaustive()
    }
}

impl ReplicaAttacher {
    pub fn new(
        tracker: Arc<dyn AttachTracker>,
        processes: Arc<dyn ProcessTreeReader>,
        host: Arc<dyn DebugHost>,
    ) -> Self {
        Self {
            tracker,
            processes,
            host,
            folder: None,
        }
    }

    /// 附带工作区上下文，传给宿主的 start_debugging。
    pub fn with_folder(mut self, folder: Option<WorkspaceFolder>) -> Self {
        self.folder = folder;
        self
    }

    pub fn folder(&self) -> Option<&WorkspaceFolder> {
        self.folder.as_ref()
    }

    /// 调用宿主启动会话，并把返回值映射为 outcome。
    async fn start(&self, configuration: DebugConfiguration) -> Result<AttachOutcome> {
        let started = self
            .host
            .start_debugging(self.folder.as_ref(), &configuration)
            .await?;
        if started {
            info!(session = %configuration.name, adapter = %configuration.adapter, "debug session started");
            Ok(AttachOutcome::Started { configuration })
        } else {
            warn!(session = %configuration.name, "debug host declined session");
            Ok(AttachOutcome::Declined { configuration })
        }
    }
}

fn skip(replica_name: &str, reason: SkipReason) -> AttachOutcome {
    debug!(replica = replica_name, %reason, "skipping attach");
    AttachOutcome::skipped(reason)
}
