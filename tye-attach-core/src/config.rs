use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Debug adapter type for .NET CLR attach.
pub const CORECLR_ADAPTER: &str = "coreclr";
/// Debug adapter type for the Node inspector protocol.
pub const NODE_ADAPTER: &str = "pwa-node";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebugRequest {
    Attach,
}

/// Configuration handed to the debug host to start a session.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DebugConfiguration {
    #[serde(rename = "type")]
    pub adapter: String,
    pub name: String,
    pub request: DebugRequest,
    #[serde(default)]
    pub process_id: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

impl DebugConfiguration {
    /// CLR attach 配置：按 pid 附加。
    pub fn coreclr(replica_name: &str, process_id: String) -> Self {
        Self {
            adapter: CORECLR_ADAPTER.to_string(),
            name: session_name(replica_name),
            request: DebugRequest::Attach,
            process_id: Some(process_id),
            port: None,
        }
    }

    /// Node attach 配置：按 inspector 端口附加。
    pub fn node(replica_name: &str, port: u16) -> Self {
        Self {
            adapter: NODE_ADAPTER.to_string(),
            name: session_name(replica_name),
            request: DebugRequest::Attach,
            process_id: None,
            port: Some(port),
        }
    }
}

pub fn session_name(replica_name: &str) -> String {
    format!("Tye Replica: {}", replica_name)
}
