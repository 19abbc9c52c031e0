//! 进程树读取：给定根 pid，返回其所有后代进程的快照。

use crate::error::ProcessTreeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, System};

/// 进程树中的一个节点（只读快照）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessNode {
    pub pid: u32,
    pub ppid: u32,
    pub command: String,
}

impl ProcessNode {
    pub fn new(pid: u32, ppid: u32, command: impl Into<String>) -> Self {
        Self {
            pid,
            ppid,
            command: command.into(),
        }
    }
}

/// OS 进程树查询能力。返回顺序由实现决定，调用方应按条件查找而不是依赖顺序。
#[async_trait]
pub trait ProcessTreeReader: Send + Sync {
    async fn descendants(&self, pid: u32) -> Result<Vec<ProcessNode>, ProcessTreeError>;
}

/// 基于 sysinfo 的默认实现。
#[derive(Debug, Clone, Copy, Default)]
pub struct SysinfoProcessTree;

impl SysinfoProcessTree {
    pub fn new() -> Self {
        Self
    }

    /// 同步快照：刷新全部进程以获取完整父子关系，再深度优先收集后代（不含根）。
    pub fn snapshot(pid: u32) -> Result<Vec<ProcessNode>, ProcessTreeError> {
        let mut sys = System::new();
        sys.refresh_processes();

        let root = Pid::from(pid as usize);
        if sys.process(root).is_none() {
            return Err(ProcessTreeError::ProcessNotFound(pid));
        }

        let mut result = Vec::new();
        collect_descendants(&sys, root, &mut result);
        Ok(result)
    }
}

#[async_trait]
impl ProcessTreeReader for SysinfoProcessTree {
    async fn descendants(&self, pid: u32) -> Result<Vec<ProcessNode>, ProcessTreeError> {
        // 全量刷新进程表是阻塞操作
        tokio::task::spawn_blocking(move || Self::snapshot(pid))
            .await
            .map_err(|e| ProcessTreeError::Snapshot(e.to_string()))?
    }
}

/// 递归收集 `parent` 的所有后代；同级按 pid 升序，父进程先于子进程。
///
/// Linux 上 sysinfo 把线程也列进进程表（parent 指向所属进程，名称继承进程名），
/// 这里只保留真正的子进程。
fn collect_descendants(sys: &System, parent: Pid, result: &mut Vec<ProcessNode>) {
    let mut children: Vec<(Pid, &sysinfo::Process)> = sys
        .processes()
        .iter()
        .filter(|(_, process)| process.thread_kind().is_none())
        .filter(|(_, process)| process.parent() == Some(parent))
        .map(|(pid, process)| (*pid, process))
        .collect();
    children.sort_by_key(|(pid, _)| pid.as_u32());

    for (child_pid, process) in children {
        result.push(ProcessNode {
            pid: child_pid.as_u32(),
            ppid: parent.as_u32(),
            command: process.name().to_string(),
        });
        collect_descendants(sys, child_pid, result);
    }
}
