//! Logga 处理层模块
//!
//! 此模块包含与 `tracing` 生态对接的处理层。

pub mod bus_bridge;

pub use bus_bridge::BusLayer;
