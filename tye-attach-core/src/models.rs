use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

/// Service type as reported by the orchestrator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Function,
    Project,
    Executable,
    Container,
    External,
    Ingress,
    #[serde(other)]
    Unknown,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Function => "function",
            ServiceType::Project => "project",
            ServiceType::Executable => "executable",
            ServiceType::Container => "container",
            ServiceType::External => "external",
            ServiceType::Ingress => "ingress",
            ServiceType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "function" => Ok(ServiceType::Function),
            "project" => Ok(ServiceType::Project),
            "executable" => Ok(ServiceType::Executable),
            "container" => Ok(ServiceType::Container),
            "external" => Ok(ServiceType::External),
            "ingress" => Ok(ServiceType::Ingress),
            other => Err(format!("unknown service type: {}", other)),
        }
    }
}

/// 运行时标签：executable 服务据此区分 node 与其他运行方式。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunInfoType {
    Node,
    Project,
    Executable,
    Docker,
    Function,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(rename = "type")]
    pub kind: RunInfoType,
}

/// Network binding; its position indexes the replica's port list.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Binding {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub protocol: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescription {
    pub name: String,
    #[serde(default)]
    pub run_info: Option<RunInfo>,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// One running instance of a service.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicaDescriptor {
    pub name: String,
    #[serde(default)]
    pub pid: Option<u32>,
    #[serde(default)]
    pub ports: Vec<u16>,
}

/// Logical service with its replicas, in the orchestrator's wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub service_type: ServiceType,
    pub description: ServiceDescription,
    #[serde(default)]
    pub replicas: BTreeMap<String, ReplicaDescriptor>,
}

impl ServiceDescriptor {
    pub fn name(&self) -> &str {
        &self.description.name
    }

    pub fn run_info_type(&self) -> Option<RunInfoType> {
        self.description.run_info.as_ref().map(|info| info.kind)
    }

    /// 按协议名查找 binding 的下标（首个匹配）。
    pub fn binding_index(&self, protocol: &str) -> Option<usize> {
        self.description
            .bindings
            .iter()
            .position(|binding| binding.protocol.as_deref() == Some(protocol))
    }
}

impl ReplicaDescriptor {
    /// 与 service bindings 按位置对齐的端口。
    pub fn port_at(&self, index: usize) -> Option<u16> {
        self.ports.get(index).copied()
    }
}

/// Optional editor workspace context handed to the debug host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: std::path::PathBuf,
}
