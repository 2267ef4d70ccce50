//! 记录器工厂
//!
//! [`Logger`] 绑定一个标签，四个级别方法各自构造 [`LogData`] 并发布到总线。

use crate::core::bus::{global_bus, EventBus};
use crate::core::event::{LogData, LogEvent};
use crate::core::level::LogLevel;

/// 绑定标签的记录器
///
/// 除标签与所发布的总线外不持有任何可变状态，可自由克隆。
#[derive(Debug, Clone)]
pub struct Logger {
    tag: String,
    bus: EventBus,
}

impl Logger {
    /// 创建发布到全局总线的记录器
    pub fn new<T: Into<String>>(tag: T) -> Self {
        Self::with_bus(tag, global_bus().clone())
    }

    /// 创建发布到指定总线的记录器
    pub fn with_bus<T: Into<String>>(tag: T, bus: EventBus) -> Self {
        Self {
            tag: tag.into(),
            bus,
        }
    }

    /// 记录器标签
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// 以指定级别发布事件
    pub fn log<E: Into<LogEvent>>(&self, level: LogLevel, event: E) {
        let data: LogData = event.into().into_data(&self.tag, level);
        self.bus.publish(&data);
    }

    pub fn error<E: Into<LogEvent>>(&self, event: E) {
        self.log(LogLevel::Error, event)
    }

    pub fn warn<E: Into<LogEvent>>(&self, event: E) {
        self.log(LogLevel::Warn, event)
    }

    pub fn info<E: Into<LogEvent>>(&self, event: E) {
        self.log(LogLevel::Info, event)
    }

    pub fn debug<E: Into<LogEvent>>(&self, event: E) {
        self.log(LogLevel::Debug, event)
    }
}

/// 获取绑定 `tag` 的全局记录器
pub fn get_logger<T: Into<String>>(tag: T) -> Logger {
    Logger::new(tag)
}
