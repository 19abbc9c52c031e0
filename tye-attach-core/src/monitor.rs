//! attach 跟踪：记录哪些 pid 已经挂着调试会话。

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// "该 pid 是否已附加调试器" 查询能力。dispatcher 只读不写。
pub trait AttachTracker: Send + Sync {
    fn is_attached(&self, pid: u32) -> bool;
}

/// 进程内的会话监视器，由宿主在会话开始/结束时更新。
#[derive(Debug, Clone, Default)]
pub struct SessionMonitor {
    attached: Arc<Mutex<BTreeSet<u32>>>,
}

impl SessionMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录会话开始；已存在时返回 false。
    pub fn session_started(&self, pid: u32) -> bool {
        self.attached
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(pid)
    }

    /// 记录会话结束；未记录时返回 false。
    pub fn session_terminated(&self, pid: u32) -> bool {
        self.attached
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&pid)
    }

    pub fn attached_pids(&self) -> Vec<u32> {
        self.attached
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .copied()
            .collect()
    }
}

impl AttachTracker for SessionMonitor {
    fn is_attached(&self, pid: u32) -> bool {
        self.attached
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&pid)
    }
}
