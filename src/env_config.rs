//! 环境变量配置模块
//!
//! 从 `LOGGA_*` 环境变量读取默认处理器配置。无法解析的值被忽略并保留默认值。

use crate::config::{DefaultHandlerOptions, ThrottleOptions};
use crate::core::level::LogLevel;
use crate::error::{LoggaError, Result};
use std::env;

pub const ENV_MAX_LEVEL: &str = "LOGGA_MAX_LEVEL";
pub const ENV_SHOW_STACK: &str = "LOGGA_SHOW_STACK";
pub const ENV_EXIT_ON_ERROR: &str = "LOGGA_EXIT_ON_ERROR";
pub const ENV_FAST_TIME: &str = "LOGGA_FAST_TIME";
pub const ENV_THROTTLE_SIGNATURE: &str = "LOGGA_THROTTLE_SIGNATURE";
pub const ENV_THROTTLE_DURATION_MS: &str = "LOGGA_THROTTLE_DURATION_MS";

/// 环境变量配置管理器
pub struct EnvConfig;

impl EnvConfig {
    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|s| !s.trim().is_empty())
    }

    fn parse_flag(name: &str, value: &str) -> Result<bool> {
        match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(LoggaError::config(format!("{}={:?} is not a boolean", name, value))),
        }
    }

    fn parse_duration_ms(value: &str) -> Result<u64> {
        value.trim().parse().map_err(|e| {
            LoggaError::config(format!("{}={:?}: {}", ENV_THROTTLE_DURATION_MS, value, e))
        })
    }

    fn warn_ignored<T>(result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(target: "logga::config", "ignoring environment value: {}", e);
                None
            }
        }
    }

    fn flag(name: &str) -> Option<bool> {
        let value = Self::var(name)?;
        Self::warn_ignored(Self::parse_flag(name, &value))
    }

    /// 读取级别上限
    pub fn max_level() -> Option<LogLevel> {
        let value = Self::var(ENV_MAX_LEVEL)?;
        Self::warn_ignored(value.parse())
    }

    pub fn show_stack() -> Option<bool> {
        Self::flag(ENV_SHOW_STACK)
    }

    pub fn exit_on_error() -> Option<bool> {
        Self::flag(ENV_EXIT_ON_ERROR)
    }

    pub fn fast_time() -> Option<bool> {
        Self::flag(ENV_FAST_TIME)
    }

    /// 读取节流配置；两个变量都未设置时返回 `None`
    pub fn throttle() -> Option<ThrottleOptions> {
        let signature = Self::var(ENV_THROTTLE_SIGNATURE);
        let duration_ms = Self::var(ENV_THROTTLE_DURATION_MS)
            .and_then(|v| Self::warn_ignored(Self::parse_duration_ms(&v)));
        if signature.is_none() && duration_ms.is_none() {
            return None;
        }
        let defaults = ThrottleOptions::default();
        Some(ThrottleOptions {
            signature: signature.unwrap_or(defaults.signature),
            duration_ms: duration_ms.unwrap_or(defaults.duration_ms),
        })
    }

    /// 在 `base` 之上应用环境变量
    pub fn apply(base: DefaultHandlerOptions) -> DefaultHandlerOptions {
        DefaultHandlerOptions {
            max_level: Self::max_level().unwrap_or(base.max_level),
            throttle: Self::throttle().or(base.throttle),
            show_stack: Self::show_stack().unwrap_or(base.show_stack),
            exit_on_error: Self::exit_on_error().unwrap_or(base.exit_on_error),
            fast_time: Self::fast_time().unwrap_or(base.fast_time),
        }
    }
}

impl DefaultHandlerOptions {
    /// 默认配置叠加 `LOGGA_*` 环境变量
    pub fn from_env() -> Self {
        EnvConfig::apply(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // 环境变量是进程级状态，串行化这些测试
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear() {
        for name in [
            ENV_MAX_LEVEL,
            ENV_SHOW_STACK,
            ENV_EXIT_ON_ERROR,
            ENV_FAST_TIME,
            ENV_THROTTLE_SIGNATURE,
            ENV_THROTTLE_DURATION_MS,
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn test_env_overrides() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear();
        env::set_var(ENV_MAX_LEVEL, "debug");
        env::set_var(ENV_EXIT_ON_ERROR, "false");
        env::set_var(ENV_THROTTLE_SIGNATURE, "${tag}");

        let options = DefaultHandlerOptions::from_env();
        assert_eq!(options.max_level, LogLevel::Debug);
        assert!(!options.exit_on_error);
        assert_eq!(
            options.throttle,
            Some(ThrottleOptions::new("${tag}", 1000))
        );
        clear();
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear();
        env::set_var(ENV_MAX_LEVEL, "loud");
        env::set_var(ENV_SHOW_STACK, "maybe");
        env::set_var(ENV_THROTTLE_DURATION_MS, "soon");

        let options = DefaultHandlerOptions::from_env();
        assert_eq!(options.max_level, LogLevel::Info);
        assert!(!options.show_stack);
        // 签名与时长都无效或缺失时不启用节流
        assert!(options.throttle.is_none());
        clear();
    }

    #[test]
    fn test_parse_errors_are_config_errors() {
        assert!(EnvConfig::parse_flag(ENV_FAST_TIME, " On ").unwrap());
        let err = EnvConfig::parse_flag(ENV_FAST_TIME, "maybe").unwrap_err();
        assert_eq!(err.category(), "config");
        assert_eq!(EnvConfig::parse_duration_ms(" 250 ").unwrap(), 250);
        assert!(EnvConfig::parse_duration_ms("-1").is_err());
    }

    #[test]
    fn test_unset_environment_is_default() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear();
        assert_eq!(DefaultHandlerOptions::from_env(), DefaultHandlerOptions::default());
    }
}
