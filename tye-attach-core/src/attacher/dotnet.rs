//! CLR attach：function / project 服务。

use super::*;
use crate::resolver::resolve_process_id;

impl ReplicaAttacher {
    /// 按 pid 附加 coreclr 调试器。
    ///
    /// pid 缺失或已附加时直接跳过；`function` 服务会先在进程树中解析实际 worker。
    pub async fn attach_to_dotnet_replica(
        &self,
        service_type: ServiceType,
        replica_name: &str,
        replica_pid: Option<u32>,
    ) -> Result<AttachOutcome> {
        let Some(pid) = replica_pid else {
            return Ok(skip(replica_name, SkipReason::NoProcessId));
        };
        if self.tracker.is_attached(pid) {
            return Ok(skip(replica_name, SkipReason::AlreadyAttached(pid)));
        }

        let process_id = resolve_process_id(self.processes.as_ref(), pid, service_type).await?;
        self.start(DebugConfiguration::coreclr(replica_name, process_id))
            .await
    }
}
