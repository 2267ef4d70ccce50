//! Error types for Logga
//!
//! This module defines the error types used by the fallible configuration paths
//! of Logga. The logging hot path itself never returns errors: malformed
//! producer input degrades to an empty message and sink failures are counted
//! instead of propagated.

use thiserror::Error;

/// Main error type for Logga operations
#[derive(Error, Debug)]
pub enum LoggaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Invalid message filter pattern
    #[error("Invalid message pattern: {source}")]
    InvalidPattern {
        #[from]
        source: regex::Error,
    },

    /// I/O errors (sink writes)
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    /// Sink-related errors
    #[error("Sink error: {0}")]
    SinkError(String),
}

/// Result type alias for Logga operations
pub type Result<T> = std::result::Result<T, LoggaError>;

impl LoggaError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a new invalid level error
    pub fn invalid_level<S: Into<String>>(msg: S) -> Self {
        Self::InvalidLogLevel(msg.into())
    }

    /// Create a new sink error
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        Self::SinkError(msg.into())
    }

    /// Get the error category for logging purposes
    pub fn category(&self) -> &'static str {
        match self {
            Self::ConfigError(_) | Self::InvalidLogLevel(_) | Self::InvalidPattern { .. } => {
                "config"
            }
            Self::IoError { .. } => "io",
            Self::SerializationError { .. } => "serialization",
            Self::SinkError(_) => "sink",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let config_err = LoggaError::config("Invalid configuration");
        assert!(matches!(config_err, LoggaError::ConfigError(_)));
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Invalid configuration"
        );

        let level_err = LoggaError::invalid_level("loud");
        assert_eq!(level_err.to_string(), "Invalid log level: loud");
    }

    #[test]
    fn test_error_from_conversions() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let logga_error: LoggaError = io_error.into();
        assert!(matches!(logga_error, LoggaError::IoError { .. }));
        assert!(logga_error.to_string().contains("pipe closed"));

        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json").unwrap_err();
        let logga_error: LoggaError = json_error.into();
        assert!(matches!(
            logga_error,
            LoggaError::SerializationError { .. }
        ));

        let regex_error = regex::Regex::new("(unclosed").unwrap_err();
        let logga_error: LoggaError = regex_error.into();
        assert!(matches!(logga_error, LoggaError::InvalidPattern { .. }));
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(LoggaError::config("test").category(), "config");
        assert_eq!(LoggaError::invalid_level("test").category(), "config");
        assert_eq!(LoggaError::sink("test").category(), "sink");
        let io_error: LoggaError = io::Error::new(io::ErrorKind::Other, "x").into();
        assert_eq!(io_error.category(), "io");
    }

    #[test]
    fn test_unicode_error_message() {
        let unicode_msg = "配置错误: 无效的参数 🚫";
        let err = LoggaError::config(unicode_msg);
        assert!(err.to_string().contains(unicode_msg));
    }

    #[test]
    fn test_error_debug_format() {
        let err = LoggaError::sink("test error");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("SinkError"));
        assert!(debug_str.contains("test error"));
    }
}
