//! Logga Sinks 模块
//!
//! 默认处理器及其宿主能力：输出目标（stderr、无装饰控制台、内存）与进程终止。

pub mod default_handler;
pub mod exit;
pub mod format;
pub mod memory;
pub mod stderr;
pub mod traits;

// 重新导出主要类型
pub use default_handler::{default_handler, DefaultHandler, Disposition, ERROR_EXIT_CODE};
pub use exit::{NoExit, ProcessExit, RecordedExit};
pub use memory::MemorySink;
pub use stderr::{PlainConsoleSink, StderrSink};
pub use traits::{ExitCapability, RenderMode, SinkCapability};
