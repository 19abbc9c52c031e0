//! Core library for attaching debuggers to orchestrated service replicas:
//! descriptors, process tree lookup, worker resolution and attach dispatch.

mod attacher;
mod config;
mod error;
mod host;
mod models;
mod monitor;
mod process_tree;
mod resolver;

pub use attacher::{AttachOutcome, DebugRuntime, ReplicaAttacher, SkipReason, INSPECTOR_PROTOCOL};
pub use config::{session_name, DebugConfiguration, DebugRequest, CORECLR_ADAPTER, NODE_ADAPTER};
pub use error::{AttachError, ProcessTreeError, Result};
pub use host::DebugHost;
pub use models::{
    Binding, ReplicaDescriptor, RunInfo, RunInfoType, ServiceDescription, ServiceDescriptor,
    ServiceType, WorkspaceFolder,
};
pub use monitor::{AttachTracker, SessionMonitor};
pub use process_tree::{ProcessNode, ProcessTreeReader, SysinfoProcessTree};
pub use resolver::{find_function_worker, is_function_worker, resolve_process_id};
