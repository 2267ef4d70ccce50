//! 日志级别定义
//!
//! 级别数值随严重程度降低而递增：`error=0, warn=1, info=2, debug=3`。
//! 数值越小越严重，过滤时以"数值大于上限即丢弃"的方式比较。

use crate::error::{LoggaError, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// 按数值顺序排列的全部级别
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// 级别的数值
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// 级别的表格下标，用于查找 emoji 与颜色
    pub fn index(self) -> usize {
        self as usize
    }

    /// 小写名称
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// 大写并左对齐补齐到 5 个字符的标签
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN ",
            LogLevel::Info => "INFO ",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// `self` 是否不比 `ceiling` 更轻微，即能通过以 `ceiling` 为上限的过滤
    pub fn within(self, ceiling: LogLevel) -> bool {
        self <= ceiling
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = LoggaError;

    fn try_from(value: u8) -> Result<Self> {
        LogLevel::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| LoggaError::invalid_level(value.to_string()))
    }
}

impl FromStr for LogLevel {
    type Err = LoggaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => match other.parse::<u8>() {
                Ok(n) => LogLevel::try_from(n),
                Err(_) => Err(LoggaError::invalid_level(s)),
            },
        }
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => LogLevel::Error,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::INFO => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct LevelVisitor;

        impl Visitor<'_> for LevelVisitor {
            type Value = LogLevel;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a level number 0-3 or a level name")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<LogLevel, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(|n| LogLevel::try_from(n).ok())
                    .ok_or_else(|| E::custom(format!("invalid log level {}", v)))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<LogLevel, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("invalid log level {}", v)))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<LogLevel, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(LevelVisitor)
    }
}
