//! Logga 核心模块
//!
//! 本模块包含 Logga 的核心组件：事件模型、级别、事件总线、记录器工厂、处理器过滤包装，
//! 以及与 `tracing` 对接的处理层。

pub mod bus;
pub mod event;
pub mod filter;
pub mod layers;
pub mod level;
pub mod logger;

// 重新导出核心类型
pub use bus::{global_bus, EventBus, Handler};
pub use event::{LogData, LogEvent};
pub use filter::FilterOptions;
pub use layers::BusLayer;
pub use level::LogLevel;
pub use logger::{get_logger, Logger};
