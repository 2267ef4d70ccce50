//! 处理器过滤包装
//!
//! [`FilterOptions`] 中所有已设置的条件以 AND 组合，按固定顺序求值并在第一个失败处短路：
//!
//! 1. `tags`：事件标签不在集合中则拒绝
//! 2. `max_level`：事件级别数值大于上限则拒绝
//! 3. `message_regex`：消息不匹配则拒绝（非锚定搜索）
//! 4. `func`：自定义谓词返回 `false` 则拒绝

use crate::core::bus::Handler;
use crate::core::event::LogData;
use crate::core::level::LogLevel;
use crate::error::Result;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&LogData) -> bool + Send + Sync>;

/// 注册处理器时附加的过滤条件
#[derive(Clone, Default)]
pub struct FilterOptions {
    tags: Option<Vec<String>>,
    max_level: Option<LogLevel>,
    message_regex: Option<Regex>,
    func: Option<Predicate>,
}

impl fmt::Debug for FilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOptions")
            .field("tags", &self.tags)
            .field("max_level", &self.max_level)
            .field("message_regex", &self.message_regex.as_ref().map(Regex::as_str))
            .field("func", &self.func.is_some())
            .finish()
    }
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 只接受这些标签
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// 只接受不比 `level` 更轻微的事件
    pub fn max_level(mut self, level: LogLevel) -> Self {
        self.max_level = Some(level);
        self
    }

    /// 只接受消息匹配 `regex` 的事件
    pub fn message_regex(mut self, regex: Regex) -> Self {
        self.message_regex = Some(regex);
        self
    }

    /// 编译 `pattern` 并作为消息过滤条件
    pub fn message_pattern(self, pattern: &str) -> Result<Self> {
        Ok(self.message_regex(Regex::new(pattern)?))
    }

    /// 自定义谓词
    pub fn func<F>(mut self, func: F) -> Self
    where
        F: Fn(&LogData) -> bool + Send + Sync + 'static,
    {
        self.func = Some(Arc::new(func));
        self
    }

    /// 是否没有设置任何条件
    pub fn is_empty(&self) -> bool {
        self.tags.is_none()
            && self.max_level.is_none()
            && self.message_regex.is_none()
            && self.func.is_none()
    }

    /// 事件是否通过全部条件
    pub fn accepts(&self, data: &LogData) -> bool {
        if let Some(tags) = &self.tags {
            if !tags.iter().any(|t| *t == data.tag) {
                return false;
            }
        }
        if let Some(max_level) = self.max_level {
            if data.level > max_level {
                return false;
            }
        }
        if let Some(regex) = &self.message_regex {
            if !regex.is_match(&data.message) {
                return false;
            }
        }
        if let Some(func) = &self.func {
            if !func(data) {
                return false;
            }
        }
        true
    }

    /// 用过滤条件包装 `handler`
    ///
    /// 条件为空时原样返回 `handler`，否则返回新的包装处理器。
    pub fn wrap(self, handler: Handler) -> Handler {
        if self.is_empty() {
            return handler;
        }
        Handler::new(move |data: &LogData| {
            if self.accepts(data) {
                handler.call(data);
            }
        })
    }
}
