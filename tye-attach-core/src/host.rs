use crate::config::DebugConfiguration;
use crate::error::Result;
use crate::models::WorkspaceFolder;
use async_trait::async_trait;

/// Debug host capable of starting an attach session.
///
/// Returns `Ok(false)` when the host declined to start the session; transport or
/// host failures surface as errors and are propagated unchanged by the attacher.
#[async_trait]
pub trait DebugHost: Send + Sync {
    async fn start_debugging(
        &self,
        folder: Option<&WorkspaceFolder>,
        config: &DebugConfiguration,
    ) -> Result<bool>;
}
