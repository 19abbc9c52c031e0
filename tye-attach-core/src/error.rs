use thiserror::Error;

/// Common result type for attach operations.
pub type Result<T> = std::result::Result<T, AttachError>;

/// 进程树查询失败。
#[derive(Debug, Error)]
pub enum ProcessTreeError {
    #[error("process not found: {0}")]
    ProcessNotFound(u32),
    #[error("process snapshot failed: {0}")]
    Snapshot(String),
}

#[derive(Debug, Error)]
pub enum AttachError {
    #[error(transparent)]
    ProcessTree(#[from] ProcessTreeError),
    #[error("debug host error: {0}")]
    Host(String),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("other error: {0}")]
    Other(String),
}
