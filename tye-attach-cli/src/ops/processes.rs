//! Local process inspection: resolve attach targets and show process trees.

use super::output::{print_json, OutputFormat};
use super::ui::{truncate, write_empty, write_header, write_kv, write_table_header};
use crossterm::style::Stylize;
use serde_json::json;
use std::io::{self, Write};
use tye_attach_core::{
    is_function_worker, resolve_process_id, ProcessTreeReader, ServiceType,
};

/// 解析 replica pid 对应的实际 attach 目标。
pub async fn resolve_pid(
    reader: &dyn ProcessTreeReader,
    pid: u32,
    service_type: ServiceType,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let resolved = resolve_process_id(reader, pid, service_type).await?;
    match output {
        OutputFormat::Json => print_json(&json!({
            "pid": pid,
            "serviceType": service_type,
            "processId": resolved,
        }))?,
        OutputFormat::Table => {
            let mut out = io::stdout().lock();
            write_header(&mut out, "🔎 RESOLVE")?;
            write_kv(&mut out, "Reported", &pid.to_string())?;
            write_kv(&mut out, "Type", service_type.as_str())?;
            write_kv(&mut out, "Attach to", &resolved.as_str().green().to_string())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// 打印进程后代快照，标出 function worker 候选。
pub async fn show_tree(
    reader: &dyn ProcessTreeReader,
    pid: u32,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let nodes = reader.descendants(pid).await?;
    match output {
        OutputFormat::Json => print_json(&nodes)?,
        OutputFormat::Table => {
            let mut out = io::stdout().lock();
            write_header(&mut out, &format!("🌲 PROCESS TREE: {}", pid))?;
            if nodes.is_empty() {
                write_empty(&mut out, "No descendant processes.")?;
                return Ok(());
            }
            write_table_header(&mut out, &[("PID", 8), ("PPID", 8), ("COMMAND", 32)])?;
            for node in &nodes {
                let command = truncate(&node.command, 32);
                let command = if is_function_worker(&node.command) {
                    command.green().to_string()
                } else {
                    command
                };
                writeln!(out, "  {:<8} {:<8} {}", node.pid, node.ppid, command)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
