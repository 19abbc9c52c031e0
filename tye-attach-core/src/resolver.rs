//! 运行时解析：把 replica 上报的 pid 换成真正可附加的 pid。

use crate::error::ProcessTreeError;
use crate::models::ServiceType;
use crate::process_tree::{ProcessNode, ProcessTreeReader};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Functions host 或其 .NET worker 的可执行文件名。
static FUNCTION_WORKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(dotnet|func)(\.exe)?$").expect("valid worker pattern"));

pub fn is_function_worker(command: &str) -> bool {
    FUNCTION_WORKER.is_match(command)
}

/// 从列表尾部开始找第一个匹配 worker 名称的进程。
pub fn find_function_worker(processes: &[ProcessNode]) -> Option<&ProcessNode> {
    processes
        .iter()
        .rev()
        .find(|node| is_function_worker(&node.command))
}

/// 返回用于 attach 的 pid 字符串。
///
/// 非 `function` 服务直接返回上报的 pid，不查询进程树。`function` 服务上报的是
/// Functions host 的 pid，isolated worker 会作为其后代进程运行，因此在后代中查找
/// `dotnet`/`func`；找不到时回退到 host 本身。
pub async fn resolve_process_id(
    reader: &dyn ProcessTreeReader,
    pid: u32,
    service_type: ServiceType,
) -> Result<String, ProcessTreeError> {
    if service_type != ServiceType::Function {
        return Ok(pid.to_string());
    }

    let processes = reader.descendants(pid).await?;
    match find_function_worker(&processes) {
        Some(worker) => {
            debug!(host = pid, worker = worker.pid, command = %worker.command, "resolved function worker");
            Ok(worker.pid.to_string())
        }
        None => {
            debug!(host = pid, "no function worker found; using host process");
            Ok(pid.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedTree {
        nodes: Vec<ProcessNode>,
        calls: AtomicUsize,
    }

    impl FixedTree {
        fn new(nodes: Vec<ProcessNode>) -> Self {
            Self {
                nodes,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ProcessTreeReader for FixedTree {
        async fn descendants(&self, _pid: u32) -> Result<Vec<ProcessNode>, ProcessTreeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.nodes.clone())
        }
    }

    struct FailingTree;

    #[async_trait]
    impl ProcessTreeReader for FailingTree {
        async fn descendants(&self, pid: u32) -> Result<Vec<ProcessNode>, ProcessTreeError> {
            Err(ProcessTreeError::ProcessNotFound(pid))
        }
    }

    #[test]
    fn worker_pattern() {
        assert!(is_function_worker("dotnet"));
        assert!(is_function_worker("DOTNET.EXE"));
        assert!(is_function_worker("/usr/bin/func"));
        assert!(is_function_worker("Func.exe"));
        assert!(!is_function_worker("dotnet-watch"));
        assert!(!is_function_worker("func.exe.bak"));
        assert!(!is_function_worker("node"));
        assert!(!is_function_worker(""));
    }

    #[tokio::test]
    async fn function_picks_last_matching_descendant() {
        let tree = FixedTree::new(vec![
            ProcessNode::new(10, 500, "bash"),
            ProcessNode::new(22, 10, "dotnet"),
            ProcessNode::new(31, 22, "myapp"),
        ]);
        let pid = resolve_process_id(&tree, 500, ServiceType::Function)
            .await
            .unwrap();
        assert_eq!(pid, "22");
    }

    #[tokio::test]
    async fn tail_scan_prefers_later_entries() {
        let tree = FixedTree::new(vec![
            ProcessNode::new(11, 500, "func"),
            ProcessNode::new(12, 11, "Dotnet.exe"),
            ProcessNode::new(13, 12, "conhost"),
        ]);
        let pid = resolve_process_id(&tree, 500, ServiceType::Function)
            .await
            .unwrap();
        assert_eq!(pid, "12");
    }

    #[tokio::test]
    async fn function_without_match_falls_back_to_host() {
        let tree = FixedTree::new(vec![
            ProcessNode::new(10, 500, "bash"),
            ProcessNode::new(31, 10, "myapp"),
        ]);
        let pid = resolve_process_id(&tree, 500, ServiceType::Function)
            .await
            .unwrap();
        assert_eq!(pid, "500");
    }

    #[tokio::test]
    async fn project_never_queries_tree() {
        let tree = FixedTree::new(vec![ProcessNode::new(22, 7, "dotnet")]);
        let pid = resolve_process_id(&tree, 7, ServiceType::Project)
            .await
            .unwrap();
        assert_eq!(pid, "7");
        assert_eq!(tree.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn tree_failure_propagates() {
        let err = resolve_process_id(&FailingTree, 9, ServiceType::Function)
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessTreeError::ProcessNotFound(9)));
    }
}
