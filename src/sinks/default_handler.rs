//! 默认处理器
//!
//! 开箱即用的内置处理器，按以下严格顺序处理每个事件：
//!
//! 1. 级别门：级别数值大于 `max_level` 时直接返回
//! 2. 节流门：按签名查找上次输出时间，窗口内的事件被静默丢弃
//! 3. 渲染：非交互式输出为单行 JSON，交互式终端输出 emoji + 颜色，
//!    不支持装饰的宿主输出 `LABEL tag message`
//! 4. 写入 sink
//! 5. 致命门：`exit_on_error` 且级别为 error 时以非零状态终止进程
//!
//! # 使用示例
//!
//! ```rust
//! use logga::{replace_handlers, default_handler, DefaultHandlerOptions, Handler, LogLevel};
//!
//! let options = DefaultHandlerOptions::new()
//!     .max_level(LogLevel::Debug)
//!     .exit_on_error(false);
//! replace_handlers(Handler::new(move |data| default_handler(data, Some(&options))));
//! ```

use crate::config::DefaultHandlerOptions;
use crate::core::bus::Handler;
use crate::core::event::LogData;
use crate::core::level::LogLevel;
use crate::diagnostics::{global_diagnostics, Diagnostics};
use crate::sinks::exit::ProcessExit;
use crate::sinks::format::{format_json, format_plain, format_pretty, Timestamp};
use crate::sinks::stderr::StderrSink;
use crate::sinks::traits::{ExitCapability, RenderMode, SinkCapability};
use crate::throttle::{event_signature, ThrottleState};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

/// 致命门使用的退出状态
pub const ERROR_EXIT_CODE: i32 = 1;

/// 单个事件的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// 被级别门丢弃
    LevelFiltered,
    /// 被节流门丢弃
    Throttled,
    /// 已写入 sink
    Written,
    /// 已渲染但写入失败
    WriteFailed,
}

/// 内置的渲染与节流处理器
///
/// 默认使用进程 stderr、进程退出和进程级共享的节流状态；三者均可替换。
#[derive(Debug, Clone)]
pub struct DefaultHandler {
    options: DefaultHandlerOptions,
    sink: Arc<dyn SinkCapability>,
    exit: Arc<dyn ExitCapability>,
    throttle: ThrottleState,
    diagnostics: Arc<Diagnostics>,
}

impl Default for DefaultHandler {
    fn default() -> Self {
        Self::new(DefaultHandlerOptions::default())
    }
}

impl DefaultHandler {
    /// 创建默认处理器
    pub fn new(options: DefaultHandlerOptions) -> Self {
        Self {
            options,
            sink: Arc::new(StderrSink::new()),
            exit: Arc::new(ProcessExit),
            throttle: ThrottleState::global(),
            diagnostics: global_diagnostics(),
        }
    }

    /// 替换输出目标
    pub fn with_sink<S: SinkCapability + 'static>(mut self, sink: S) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// 替换进程终止能力
    pub fn with_exit<E: ExitCapability + 'static>(mut self, exit: E) -> Self {
        self.exit = Arc::new(exit);
        self
    }

    /// 使用独立的节流状态
    pub fn with_throttle_state(mut self, throttle: ThrottleState) -> Self {
        self.throttle = throttle;
        self
    }

    /// 使用独立的诊断计数器
    pub fn with_diagnostics(mut self, diagnostics: Arc<Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn options(&self) -> &DefaultHandlerOptions {
        &self.options
    }

    /// 处理一个事件
    pub fn handle(&self, data: &LogData) -> Disposition {
        self.handle_at(data, Instant::now(), Utc::now())
    }

    /// 以给定的单调时刻（节流）和墙钟时间（输出）处理一个事件
    pub fn handle_at(&self, data: &LogData, now: Instant, time: DateTime<Utc>) -> Disposition {
        if data.level > self.options.max_level {
            self.diagnostics.increment_events_dropped_level();
            return Disposition::LevelFiltered;
        }

        if let Some(throttle) = &self.options.throttle {
            let signature = event_signature(&throttle.signature, data);
            if !self.throttle.check(&signature, throttle.duration(), now) {
                self.diagnostics.increment_events_dropped_throttle();
                return Disposition::Throttled;
            }
        }

        let entry = self.render(data, RenderMode::select(self.sink.as_ref()), time);
        let disposition = match self.sink.write_line(&entry) {
            Ok(()) => {
                self.diagnostics.increment_lines_rendered();
                Disposition::Written
            }
            Err(e) => {
                self.diagnostics.increment_sink_errors();
                tracing::warn!(
                    target: "logga::sink",
                    "failed to write to {} sink: {}",
                    self.sink.name(),
                    e
                );
                Disposition::WriteFailed
            }
        };

        if self.options.exit_on_error && data.level == LogLevel::Error {
            self.exit.exit(ERROR_EXIT_CODE);
        }

        disposition
    }

    /// 按渲染模式生成输出行（不含结尾换行）
    pub fn render(&self, data: &LogData, mode: RenderMode, time: DateTime<Utc>) -> String {
        let show_stack = self.options.show_stack;
        match mode {
            RenderMode::Json => {
                match format_json(data, Timestamp::new(time, self.options.fast_time)) {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::warn!(target: "logga::sink", "falling back to plain output: {}", e);
                        format_plain(data, show_stack)
                    }
                }
            }
            RenderMode::Pretty => format_pretty(data, show_stack),
            RenderMode::Plain => format_plain(data, show_stack),
        }
    }

    /// 转换为可注册到总线的处理器
    pub fn into_handler(self) -> Handler {
        Handler::new(move |data: &LogData| {
            self.handle(data);
        })
    }
}

/// 使用进程 stderr、进程退出与共享节流状态处理一个事件
///
/// 既是全局总线的隐式兜底处理器，也可以在自定义处理器中显式调用。
pub fn default_handler(data: &LogData, options: Option<&DefaultHandlerOptions>) {
    DefaultHandler::new(options.cloned().unwrap_or_default()).handle(data);
}
