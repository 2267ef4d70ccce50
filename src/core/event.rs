//! Logga 事件定义
//!
//! 此模块定义了生产者输入 [`LogEvent`] 与在总线上传递的记录 [`LogData`]。

use crate::core::level::LogLevel;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;

/// 生产者在调用点提供的日志输入
///
/// 纯文本消息或带可选消息与堆栈的结构化对象，在发布前统一规范化为 [`LogData`]。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// 纯文本消息
    Plain(String),
    /// 结构化消息
    Structured {
        message: Option<String>,
        stack: Option<String>,
    },
}

impl LogEvent {
    /// 创建只带消息的结构化事件
    pub fn structured<S: Into<String>>(message: S) -> Self {
        LogEvent::Structured {
            message: Some(message.into()),
            stack: None,
        }
    }

    /// 附加堆栈文本
    pub fn with_stack<S: Into<String>>(self, stack: S) -> Self {
        let message = match self {
            LogEvent::Plain(message) => Some(message),
            LogEvent::Structured { message, .. } => message,
        };
        LogEvent::Structured {
            message,
            stack: Some(stack.into()),
        }
    }

    /// 由错误值构造事件
    ///
    /// 消息取错误的 `Display`；若存在 `source()` 链，则每个原因占一行 `Caused by:` 作为堆栈。
    pub fn from_error(error: &dyn StdError) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(format!("Caused by: {}", cause));
            source = cause.source();
        }
        LogEvent::Structured {
            message: Some(error.to_string()),
            stack: if causes.is_empty() {
                None
            } else {
                Some(causes.join("\n"))
            },
        }
    }

    /// 规范化为总线记录，缺失的消息变为空字符串
    pub fn into_data(self, tag: &str, level: LogLevel) -> LogData {
        let (message, stack) = match self {
            LogEvent::Plain(message) => (message, None),
            LogEvent::Structured { message, stack } => (message.unwrap_or_default(), stack),
        };
        LogData {
            tag: tag.to_string(),
            level,
            message,
            stack,
        }
    }
}

impl From<&str> for LogEvent {
    fn from(message: &str) -> Self {
        LogEvent::Plain(message.to_string())
    }
}

impl From<String> for LogEvent {
    fn from(message: String) -> Self {
        LogEvent::Plain(message)
    }
}

impl From<&String> for LogEvent {
    fn from(message: &String) -> Self {
        LogEvent::Plain(message.clone())
    }
}

/// 在总线上传递的日志记录
///
/// 每次 `error/warn/info/debug` 调用构造一次，之后不可变；核心不保留它。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogData {
    /// 记录器标签
    pub tag: String,
    /// 日志级别
    pub level: LogLevel,
    /// 日志消息，总是存在（可能为空字符串）
    pub message: String,
    /// 仅当生产者显式提供时存在
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl LogData {
    /// 创建新的日志记录
    pub fn new<T: Into<String>, M: Into<String>>(tag: T, level: LogLevel, message: M) -> Self {
        Self {
            tag: tag.into(),
            level,
            message: message.into(),
            stack: None,
        }
    }

    /// 设置堆栈
    pub fn with_stack<S: Into<String>>(mut self, stack: S) -> Self {
        self.stack = Some(stack.into());
        self
    }
}
