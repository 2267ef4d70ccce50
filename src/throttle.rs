//! 节流状态
//!
//! 从事件签名到上次输出时间的进程级映射。签名由模板替换得到，映射没有淘汰，
//! 生命周期与进程相同。

use crate::core::event::LogData;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// 由 `${tag}`、`${level}`、`${message}` 替换得到事件签名
///
/// `${level}` 替换为级别的数值。单次扫描，替换进来的文本不会再被替换。
///
/// 与只替换首个占位符、逐个占位符依次替换的做法不同，这里每个占位符的所有出现都会被替换：
/// `"${tag}-${tag}"` 得到 `db-db` 而不是 `db-${tag}`。常规模板下事件分组相同。
pub fn event_signature(template: &str, data: &LogData) -> String {
    let level = data.level.as_u8().to_string();
    let mut signature = String::with_capacity(template.len() + data.message.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        signature.push_str(&rest[..start]);
        let tail = &rest[start..];
        let (value, skip) = if tail.starts_with("${tag}") {
            (data.tag.as_str(), "${tag}".len())
        } else if tail.starts_with("${level}") {
            (level.as_str(), "${level}".len())
        } else if tail.starts_with("${message}") {
            (data.message.as_str(), "${message}".len())
        } else {
            ("${", 2)
        };
        signature.push_str(value);
        rest = &tail[skip..];
    }
    signature.push_str(rest);
    signature
}

/// 签名到上次输出时间的共享映射
///
/// 克隆共享同一份状态。
#[derive(Debug, Clone, Default)]
pub struct ThrottleState {
    history: Arc<Mutex<HashMap<String, Instant>>>,
}

static GLOBAL_THROTTLE: Lazy<ThrottleState> = Lazy::new(ThrottleState::new);

impl ThrottleState {
    /// 创建空的节流状态
    pub fn new() -> Self {
        Self::default()
    }

    /// 进程级共享的节流状态
    pub fn global() -> Self {
        GLOBAL_THROTTLE.clone()
    }

    /// 判断签名在 `now` 时刻是否允许输出
    ///
    /// 若上次输出距今小于 `duration` 则返回 `false` 且不更新时间；否则记录 `now` 并返回 `true`。
    pub fn check(&self, signature: &str, duration: Duration, now: Instant) -> bool {
        let mut history = self.history();
        if let Some(last) = history.get(signature) {
            if now.saturating_duration_since(*last) < duration {
                return false;
            }
        }
        history.insert(signature.to_string(), now);
        true
    }

    fn history(&self) -> MutexGuard<'_, HashMap<String, Instant>> {
        match self.history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// 已记录的签名数量
    pub fn len(&self) -> usize {
        self.history().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 清空记录（主要用于测试）
    pub fn clear(&self) {
        self.history().clear();
    }
}
