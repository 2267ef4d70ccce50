//! Logga Sink Traits
//!
//! 默认处理器通过两个窄接口与宿主环境交互，而不是在核心中做运行时探测：
//!
//! - [`SinkCapability`]：输出目标，决定输出格式（交互式终端 / 重定向流）并写入行
//! - [`ExitCapability`]：终止进程的能力，没有进程抽象的宿主使用空实现
//!
//! # 使用示例
//!
//! ```rust
//! use logga::sinks::traits::SinkCapability;
//! use std::io;
//! use std::sync::Mutex;
//!
//! #[derive(Debug, Default)]
//! struct LineCollector {
//!     lines: Mutex<Vec<String>>,
//! }
//!
//! impl SinkCapability for LineCollector {
//!     fn is_interactive(&self) -> bool {
//!         false
//!     }
//!
//!     fn write_line(&self, line: &str) -> io::Result<()> {
//!         self.lines.lock().unwrap().push(line.to_string());
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "line_collector"
//!     }
//! }
//! ```

use std::fmt::Debug;
use std::io;

/// 输出目标能力
pub trait SinkCapability: Send + Sync + Debug {
    /// 是否为交互式终端
    ///
    /// 每次渲染都会调用，实现不应缓存结果。
    fn is_interactive(&self) -> bool;

    /// 是否支持 ANSI 颜色与 emoji 装饰
    ///
    /// 没有进程抽象的宿主（例如只有通用控制台函数）返回 `false`，
    /// 此时人类可读输出退化为 `LABEL tag message`。
    fn supports_ansi(&self) -> bool {
        true
    }

    /// 写入一行，实现负责追加换行
    fn write_line(&self, line: &str) -> io::Result<()>;

    /// 获取 sink 的名称，用于日志和调试目的
    fn name(&self) -> &'static str;
}

/// 进程终止能力
pub trait ExitCapability: Send + Sync + Debug {
    /// 以 `code` 终止进程；不支持的宿主为空操作
    fn exit(&self, code: i32);
}

/// 渲染模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// 单行 JSON，供机器消费
    Json,
    /// emoji + 颜色，供人阅读
    Pretty,
    /// 无颜色的 `LABEL tag message`
    Plain,
}

impl RenderMode {
    /// 根据 sink 当前状态选择渲染模式
    pub fn select(sink: &dyn SinkCapability) -> Self {
        if !sink.supports_ansi() {
            RenderMode::Plain
        } else if sink.is_interactive() {
            RenderMode::Pretty
        } else {
            RenderMode::Json
        }
    }
}
