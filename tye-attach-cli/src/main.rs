mod client;
mod host;
mod ops;

use clap::{Parser, Subcommand};
use host::{HostTarget, HttpHost, PrintHost};
use ops::{attach_service, list_services, resolve_pid, show_tree, OutputFormat};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tye_attach_core::{
    DebugHost, ReplicaAttacher, ServiceType, SessionMonitor, SysinfoProcessTree, WorkspaceFolder,
};

/// Attach debuggers to replicas of a local Tye orchestration session.
#[derive(Parser)]
#[command(
    name = "tye-attach",
    author,
    version,
    about = "Attach debuggers to orchestrated service replicas"
)]
struct Cli {
    /// Orchestrator API base url
    #[arg(long, env = "TYE_API_BASE", default_value = "http://127.0.0.1:8000")]
    api_base: String,

    /// Debug host: `print` or an http(s) endpoint accepting start requests
    #[arg(long, env = "TYE_ATTACH_HOST", default_value = "print")]
    host: HostTarget,

    /// Workspace folder passed to the debug host
    #[arg(long, env = "TYE_ATTACH_FOLDER")]
    folder: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "TYE_ATTACH_TIMEOUT", default_value_t = 10)]
    timeout_secs: u64,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List services, replicas and their debug runtime
    List,
    /// Attach debuggers to a service's replicas
    Attach {
        /// 服务名
        service: String,
        /// 只附加指定 replica
        #[arg(long, short)]
        replica: Option<String>,
    },
    /// Resolve the attachable process id for a replica pid
    Resolve {
        pid: u32,
        #[arg(long, default_value = "function")]
        service_type: ServiceType,
    },
    /// Show descendant processes of a pid
    Tree { pid: u32 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载 .env 文件（如果存在），忽略错误
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();
    let client = client::build_client(Duration::from_secs(cli.timeout_secs))?;
    let processes = Arc::new(SysinfoProcessTree::new());

    match cli.command {
        Commands::List => list_services(&client, &cli.api_base, cli.output).await?,
        Commands::Attach { service, replica } => {
            let monitor = SessionMonitor::new();
            let host: Arc<dyn DebugHost> = match &cli.host {
                HostTarget::Print => Arc::new(PrintHost::new()),
                HostTarget::Http(url) => Arc::new(HttpHost::new(client.clone(), url.clone())),
            };
            debug!(host = ?cli.host, "using debug host");
            let attacher = ReplicaAttacher::new(Arc::new(monitor.clone()), processes, host)
                .with_folder(cli.folder.as_deref().map(workspace_folder));
            // print 宿主独占 stdout，报告改写到 stderr
            let mut report: Box<dyn std::io::Write> = match &cli.host {
                HostTarget::Print => Box::new(std::io::stderr()),
                HostTarget::Http(_) => Box::new(std::io::stdout()),
            };
            attach_service(
                &client,
                &cli.api_base,
                &attacher,
                &monitor,
                &service,
                replica.as_deref(),
                cli.output,
                report.as_mut(),
            )
            .await?
        }
        Commands::Resolve { pid, service_type } => {
            resolve_pid(processes.as_ref(), pid, service_type, cli.output).await?
        }
        Commands::Tree { pid } => show_tree(processes.as_ref(), pid, cli.output).await?,
    }

    Ok(())
}

/// 目录名作为工作区名称。
fn workspace_folder(path: &std::path::Path) -> WorkspaceFolder {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string());
    WorkspaceFolder {
        name,
        path: path.to_path_buf(),
    }
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
