//! 标准错误输出 Sink
//!
//! 进程宿主下的默认输出目标。是否为交互式终端在每次渲染时重新检测，不做缓存。

use crate::sinks::traits::SinkCapability;
use std::io::{self, IsTerminal, Write};

/// A sink that writes rendered lines to the process stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl StderrSink {
    pub fn new() -> Self {
        Self
    }
}

impl SinkCapability for StderrSink {
    fn is_interactive(&self) -> bool {
        io::stderr().is_terminal()
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(line.as_bytes())?;
        stderr.write_all(b"\n")?;
        stderr.flush()
    }

    fn name(&self) -> &'static str {
        "stderr"
    }
}

/// A sink for hosts without a process abstraction
///
/// Never interactive and never decorated: output is always the plain
/// `LABEL tag message` form, written through the generic console error stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainConsoleSink;

impl PlainConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl SinkCapability for PlainConsoleSink {
    fn is_interactive(&self) -> bool {
        false
    }

    fn supports_ansi(&self) -> bool {
        false
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        writeln!(io::stderr(), "{}", line)
    }

    fn name(&self) -> &'static str {
        "plain_console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::traits::RenderMode;

    #[test]
    fn test_stderr_sink_detection_matches_stream() {
        let sink = StderrSink::new();
        assert_eq!(sink.is_interactive(), io::stderr().is_terminal());
        assert!(sink.supports_ansi());
        assert_eq!(sink.name(), "stderr");
    }

    #[test]
    fn test_stderr_sink_write() {
        assert!(StderrSink::new().write_line("stderr sink test line").is_ok());
    }

    #[test]
    fn test_plain_console_sink_is_plain() {
        let sink = PlainConsoleSink::new();
        assert_eq!(RenderMode::select(&sink), RenderMode::Plain);
        assert!(sink.write_line("plain console test line").is_ok());
    }
}
