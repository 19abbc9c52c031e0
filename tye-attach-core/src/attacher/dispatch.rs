//! 顶层分发：根据服务类型选择 CLR 或 Node 路径。

use super::*;

impl ReplicaAttacher {
    /// 附加到单个 replica。不可调试的组合静默跳过。
    pub async fn attach_to_replica(
        &self,
        service: &ServiceDescriptor,
        replica: &ReplicaDescriptor,
    ) -> Result<AttachOutcome> {
        match DebugRuntime::for_service(service) {
            Some(DebugRuntime::Clr) => {
                self.attach_to_dotnet_replica(service.service_type, &replica.name, replica.pid)
                    .await
            }
            Some(DebugRuntime::Node) => {
                let inspector_port = service
                    .binding_index(INSPECTOR_PROTOCOL)
                    .and_then(|index| replica.port_at(index));
                self.attach_to_node_replica(&replica.name, inspector_port)
                    .await
            }
            None => Ok(skip(&replica.name, SkipReason::NotDebuggable)),
        }
    }

    /// 依次附加服务的全部 replica（按名称排序），遇到错误立即返回。
    pub async fn attach_to_service(
        &self,
        service: &ServiceDescriptor,
    ) -> Result<Vec<(String, AttachOutcome)>> {
        let mut outcomes = Vec::with_capacity(service.replicas.len());
        for (name, replica) in &service.replicas {
            let outcome = self.attach_to_replica(service, replica).await?;
            outcomes.push((name.clone(), outcome));
        }
        Ok(outcomes)
    }
}
