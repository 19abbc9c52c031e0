use super::*;

impl ReplicaAttacher {
    /// 按 inspector 端口附加 Node 调试器；端口缺失时跳过。
    pub async fn attach_to_node_replica(
        &self,
        replica_name: &str,
        inspector_port: Option<u16>,
    ) -> Result<AttachOutcome> {
        let Some(port) = inspector_port else {
            return Ok(skip(replica_name, SkipReason::NoInspectorPort));
        };
        self.start(DebugConfiguration::node(replica_name, port)).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::config::{DebugRequest, NODE_ADAPTER};

    #[tokio::test]
    async fn builds_node_configuration() {
        let fixture = Fixture::default();
        let outcome = fixture
            .attacher()
            .attach_to_node_replica("web_1", Some(9229))
            .await
            .unwrap();
        assert!(outcome.is_started());

        let sessions = fixture.host.sessions();
        assert_eq!(sessions.len(), 1);
        let config = &sessions[0].1;
        assert_eq!(config.adapter, NODE_ADAPTER);
        assert_eq!(config.request, DebugRequest::Attach);
        assert_eq!(config.name, "Tye Replica: web_1");
        assert_eq!(config.port, Some(9229));
        assert_eq!(config.process_id, None);
    }

    #[tokio::test]
    async fn missing_port_is_a_noop() {
        let fixture = Fixture::default();
        let outcome = fixture
            .attacher()
            .attach_to_node_replica("web_1", None)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            AttachOutcome::Skipped {
                reason: SkipReason::NoInspectorPort
            }
        );
        assert!(fixture.host.sessions().is_empty());
    }
}
