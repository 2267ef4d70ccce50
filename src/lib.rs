//! Logga - 进程内结构化日志事件总线
//!
//! 应用通过标签获取记录器并发出分级事件；任意数量独立注册的处理器同步接收每个事件。
//! 全局总线在首次使用时自动注册默认处理器，无需任何设置即可看到输出：
//! 输出到终端时为带 emoji 和颜色的可读行，重定向时为每行一个 JSON 对象。
//!
//! # 快速开始
//!
//! ```rust
//! use logga::get_logger;
//!
//! let log = get_logger("example");
//! log.info("Everything is just fine.");
//! log.warn("Oh, oh, not so much.");
//! ```
//!
//! # 自定义处理器
//!
//! ```rust
//! use logga::{add_filtered_handler, remove_handler, FilterOptions, Handler, LogLevel};
//!
//! let handler = add_filtered_handler(
//!     Handler::new(|data| println!("{} {}", data.tag, data.message)),
//!     FilterOptions::new().tags(["db"]).max_level(LogLevel::Warn),
//! );
//!
//! // 返回的是包装后的处理器，用它来移除这一订阅
//! remove_handler(&handler);
//! ```
//!
//! # 替换默认处理器
//!
//! ```rust
//! use logga::{default_handler, replace_handlers, DefaultHandlerOptions, Handler, ThrottleOptions};
//!
//! let options = DefaultHandlerOptions::new()
//!     .throttle(ThrottleOptions::new("${tag}:${message}", 500))
//!     .exit_on_error(false);
//! replace_handlers(Handler::new(move |data| default_handler(data, Some(&options))));
//! ```

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod env_config;
pub mod error;
pub mod sinks;
pub mod throttle;

// 重新导出主要类型
pub use config::{DefaultHandlerOptions, ThrottleOptions};
pub use diagnostics::{get_diagnostics, DiagnosticsSnapshot};
pub use env_config::EnvConfig;
pub use error::{LoggaError, Result};
pub use throttle::ThrottleState;

// 重新导出核心功能
pub use core::bus::{global_bus, EventBus, Handler};
pub use core::event::{LogData, LogEvent};
pub use core::filter::FilterOptions;
pub use core::layers::BusLayer;
pub use core::level::LogLevel;
pub use core::logger::{get_logger, Logger};
pub use sinks::default_handler::{default_handler, DefaultHandler};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 在全局总线上注册处理器并原样返回
pub fn add_handler(handler: Handler) -> Handler {
    global_bus().add_handler(handler)
}

/// 在全局总线上注册带过滤条件的处理器
///
/// 过滤条件为空时返回 `handler` 本身，否则返回包装后的处理器；移除时必须使用返回值。
pub fn add_filtered_handler(handler: Handler, filter: FilterOptions) -> Handler {
    global_bus().add_filtered_handler(handler, filter)
}

/// 移除全局总线上 `handler` 的第一个注册
pub fn remove_handler(handler: &Handler) -> bool {
    global_bus().remove_handler(handler)
}

/// 移除全局总线上的所有处理器
pub fn remove_handlers() {
    global_bus().remove_handlers()
}

/// [`remove_handlers`] 的别名
pub fn remove_all_handlers() {
    global_bus().remove_all_handlers()
}

/// 以 `handler` 原子地替换全局总线上的所有处理器
pub fn replace_handlers(handler: Handler) -> Handler {
    global_bus().replace_handlers(handler)
}

/// 全局总线上当前注册的处理器快照
pub fn handlers() -> Vec<Handler> {
    global_bus().handlers()
}
