//! 定义 Logga 默认处理器的配置结构体。
//!
//! 配置可以直接构造，也可以通过 serde 从嵌入应用自己的配置中反序列化；
//! Logga 本身不解析任何配置文件。缺失或无法解析的字段一律取默认值，
//! 后者记录一条 `logga::config` 警告；未知字段被忽略。

use crate::core::level::LogLevel;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;

// --- 辅助函数，用于提供配置项的默认值 ---
fn default_max_level() -> LogLevel {
    LogLevel::Info
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}
fn default_signature() -> String {
    String::new()
}
fn default_duration_ms() -> u64 {
    1000
}

// --- 宽松反序列化：字段值无效时回退到默认值 ---
fn lenient<'de, D, T>(deserializer: D, field: &str, default: fn() -> T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            tracing::warn!(target: "logga::config", "ignoring option {}: {}", field, e);
            Ok(default())
        }
    }
}

fn lenient_max_level<'de, D: Deserializer<'de>>(d: D) -> Result<LogLevel, D::Error> {
    lenient(d, "max_level", default_max_level)
}
fn lenient_throttle<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ThrottleOptions>, D::Error> {
    lenient(d, "throttle", || None)
}
fn lenient_show_stack<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    lenient(d, "show_stack", default_false)
}
fn lenient_exit_on_error<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    lenient(d, "exit_on_error", default_true)
}
fn lenient_fast_time<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    lenient(d, "fast_time", default_false)
}
fn lenient_signature<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    lenient(d, "throttle.signature", default_signature)
}
fn lenient_duration_ms<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    lenient(d, "throttle.duration_ms", default_duration_ms)
}

/// 节流配置
///
/// 签名模板中的 `${tag}`、`${level}`、`${message}` 会被事件字段替换，
/// 同一签名在 `duration_ms` 内只输出一次。
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ThrottleOptions {
    /// 签名模板，默认为空（所有事件共享同一签名）
    #[serde(default = "default_signature", deserialize_with = "lenient_signature")]
    pub signature: String,
    /// 同一签名两次输出之间的最小间隔（毫秒）
    #[serde(
        default = "default_duration_ms",
        deserialize_with = "lenient_duration_ms",
        alias = "duration"
    )]
    pub duration_ms: u64,
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            signature: default_signature(),
            duration_ms: default_duration_ms(),
        }
    }
}

impl ThrottleOptions {
    pub fn new<S: Into<String>>(signature: S, duration_ms: u64) -> Self {
        Self {
            signature: signature.into(),
            duration_ms,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// 默认处理器配置
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DefaultHandlerOptions {
    /// 丢弃数值大于此级别的事件
    #[serde(
        default = "default_max_level",
        deserialize_with = "lenient_max_level",
        alias = "maxLevel",
        alias = "level"
    )]
    pub max_level: LogLevel,
    /// 节流配置；为 `None` 时不节流
    #[serde(default, deserialize_with = "lenient_throttle")]
    pub throttle: Option<ThrottleOptions>,
    /// 人类可读输出中是否附加堆栈
    #[serde(
        default = "default_false",
        deserialize_with = "lenient_show_stack",
        alias = "showStack"
    )]
    pub show_stack: bool,
    /// 输出 error 级别事件后是否终止进程
    #[serde(
        default = "default_true",
        deserialize_with = "lenient_exit_on_error",
        alias = "exitOnError"
    )]
    pub exit_on_error: bool,
    /// 机器可读输出中使用毫秒时间戳代替 ISO-8601 字符串
    #[serde(
        default = "default_false",
        deserialize_with = "lenient_fast_time",
        alias = "fastTime"
    )]
    pub fast_time: bool,
}

impl Default for DefaultHandlerOptions {
    fn default() -> Self {
        Self {
            max_level: default_max_level(),
            throttle: None,
            show_stack: default_false(),
            exit_on_error: default_true(),
            fast_time: default_false(),
        }
    }
}

impl DefaultHandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_level(mut self, level: LogLevel) -> Self {
        self.max_level = level;
        self
    }

    pub fn throttle(mut self, throttle: ThrottleOptions) -> Self {
        self.throttle = Some(throttle);
        self
    }

    pub fn show_stack(mut self, show: bool) -> Self {
        self.show_stack = show;
        self
    }

    pub fn exit_on_error(mut self, exit: bool) -> Self {
        self.exit_on_error = exit;
        self
    }

    pub fn fast_time(mut self, fast: bool) -> Self {
        self.fast_time = fast;
        self
    }

    /// 从 JSON 文本反序列化
    ///
    /// 只有文本本身不是合法的 JSON 对象时才返回错误；单个字段的问题回退到默认值。
    pub fn from_json(text: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
