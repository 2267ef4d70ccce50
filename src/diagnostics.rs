//! 定义 Logga 的内部诊断与指标。
//!
//! 计数器只在内存中累积，从不写入任何 sink，因此级别过滤与节流丢弃对用户仍然是静默的。

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 内部诊断与指标数据结构。
///
/// 使用原子操作确保线程安全。
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// 创建时间
    start_time: Option<Instant>,

    /// 发布到总线的事件总数
    events_published: AtomicU64,

    /// 默认处理器输出的行数
    lines_rendered: AtomicU64,

    /// 因级别上限而丢弃的事件数
    events_dropped_level: AtomicU64,

    /// 因节流而丢弃的事件数
    events_dropped_throttle: AtomicU64,

    /// sink 写入失败次数
    sink_errors: AtomicU64,
}

/// 诊断数据的快照，用于外部查询。
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsSnapshot {
    pub uptime: Option<Duration>,
    pub events_published: u64,
    pub lines_rendered: u64,
    pub events_dropped_level: u64,
    pub events_dropped_throttle: u64,
    pub sink_errors: u64,
    /// 总丢弃事件数（级别 + 节流）
    pub total_events_dropped: u64,
}

impl Diagnostics {
    /// 创建新的诊断实例。
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    pub fn increment_events_published(&self) {
        self.events_published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_lines_rendered(&self) {
        self.lines_rendered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_events_dropped_level(&self) {
        self.events_dropped_level.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_events_dropped_throttle(&self) {
        self.events_dropped_throttle.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_sink_errors(&self) {
        self.sink_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取诊断数据的快照。
    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        let events_dropped_level = self.events_dropped_level.load(Ordering::Relaxed);
        let events_dropped_throttle = self.events_dropped_throttle.load(Ordering::Relaxed);

        DiagnosticsSnapshot {
            uptime: self.start_time.map(|start| start.elapsed()),
            events_published: self.events_published.load(Ordering::Relaxed),
            lines_rendered: self.lines_rendered.load(Ordering::Relaxed),
            events_dropped_level,
            events_dropped_throttle,
            sink_errors: self.sink_errors.load(Ordering::Relaxed),
            total_events_dropped: events_dropped_level + events_dropped_throttle,
        }
    }

    /// 重置所有计数器（主要用于测试）。
    pub fn reset(&self) {
        self.events_published.store(0, Ordering::Relaxed);
        self.lines_rendered.store(0, Ordering::Relaxed);
        self.events_dropped_level.store(0, Ordering::Relaxed);
        self.events_dropped_throttle.store(0, Ordering::Relaxed);
        self.sink_errors.store(0, Ordering::Relaxed);
    }
}

/// 全局诊断实例。
static GLOBAL_DIAGNOSTICS: Lazy<Arc<Diagnostics>> = Lazy::new(|| Arc::new(Diagnostics::new()));

/// 获取全局诊断实例。
pub fn global_diagnostics() -> Arc<Diagnostics> {
    Arc::clone(&GLOBAL_DIAGNOSTICS)
}

/// 获取全局诊断数据快照
pub fn get_diagnostics() -> DiagnosticsSnapshot {
    GLOBAL_DIAGNOSTICS.snapshot()
}
