//! Service listing with debuggability per replica.

use super::output::{print_json, OutputFormat};
use super::ui::{
    truncate, write_empty, write_header, write_mark, write_section, write_table_header, Mark,
};
use crate::client::fetch_services;
use crossterm::style::Stylize;
use serde::Serialize;
use std::io::{self, Write};
use tye_attach_core::{DebugRuntime, ServiceDescriptor, ServiceType, INSPECTOR_PROTOCOL};

/// 列表输出用的扁平视图。
#[derive(Debug, Serialize)]
pub struct ServiceView {
    pub name: String,
    pub service_type: ServiceType,
    pub runtime: Option<DebugRuntime>,
    pub replicas: Vec<ReplicaView>,
}

#[derive(Debug, Serialize)]
pub struct ReplicaView {
    pub name: String,
    pub pid: Option<u32>,
    pub ports: Vec<u16>,
    pub inspector_port: Option<u16>,
}

impl From<&ServiceDescriptor> for ServiceView {
    fn from(service: &ServiceDescriptor) -> Self {
        let inspector_index = service.binding_index(INSPECTOR_PROTOCOL);
        Self {
            name: service.name().to_string(),
            service_type: service.service_type,
            runtime: DebugRuntime::for_service(service),
            replicas: service
                .replicas
                .values()
                .map(|replica| ReplicaView {
                    name: replica.name.clone(),
                    pid: replica.pid,
                    ports: replica.ports.clone(),
                    inspector_port: inspector_index.and_then(|i| replica.port_at(i)),
                })
                .collect(),
        }
    }
}

fn format_runtime(runtime: Option<DebugRuntime>) -> String {
    match runtime {
        Some(DebugRuntime::Clr) => "● coreclr".green().to_string(),
        Some(DebugRuntime::Node) => "● pwa-node".green().to_string(),
        None => "○ not debuggable".dark_grey().to_string(),
    }
}

/// List services and replicas.
pub async fn list_services(
    client: &reqwest::Client,
    base: &str,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let services = fetch_services(client, base).await?;
    let views: Vec<ServiceView> = services.iter().map(ServiceView::from).collect();

    match output {
        OutputFormat::Json => print_json(&views)?,
        OutputFormat::Table => write_services(&mut io::stdout().lock(), &views)?,
    }
    Ok(())
}

fn write_services(out: &mut dyn Write, views: &[ServiceView]) -> io::Result<()> {
    write_header(out, "📋 SERVICES")?;

    if views.is_empty() {
        return write_empty(out, "No services reported by the orchestrator.");
    }

    let debuggable = views.iter().filter(|v| v.runtime.is_some()).count();
    writeln!(
        out,
        "  Total: {}  |  {} Debuggable",
        views.len().to_string().white().bold(),
        debuggable.to_string().green()
    )?;

    for view in views {
        write_section(
            out,
            &format!(
                "{} ({})  {}",
                view.name,
                view.service_type,
                format_runtime(view.runtime)
            ),
        )?;
        if view.replicas.is_empty() {
            write_empty(out, "No replicas running.")?;
            continue;
        }
        write_table_header(out, &[("REPLICA", 28), ("PID", 8), ("PORTS", 20)])?;
        for replica in &view.replicas {
            let pid = replica
                .pid
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".into());
            let ports = replica
                .ports
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(",");
            writeln!(
                out,
                "  {:<28} {:<8} {:<20}",
                truncate(&replica.name, 28).cyan(),
                pid,
                ports
            )?;
        }
    }
    writeln!(out)?;
    write_mark(out, Mark::Hint, "Use 'attach <service>' to start debug sessions")
}
