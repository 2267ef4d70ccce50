//! 内存 Sink
//!
//! 将渲染后的行保存在内存中，可配置为交互式或非交互式，用于测试和嵌入场景。

use crate::sinks::traits::SinkCapability;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A sink that captures rendered lines in memory
///
/// Clones share the captured lines.
#[derive(Debug, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
    interactive: Arc<AtomicBool>,
    ansi: bool,
    fail_writes: Arc<AtomicBool>,
}

impl MemorySink {
    /// Creates a capturing sink that behaves like a redirected stream
    pub fn new() -> Self {
        Self::with_interactive(false)
    }

    /// Creates a capturing sink with a fixed interactivity
    pub fn with_interactive(interactive: bool) -> Self {
        Self {
            lines: Arc::new(Mutex::new(Vec::new())),
            interactive: Arc::new(AtomicBool::new(interactive)),
            ansi: true,
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a capturing sink that behaves like a host without ANSI support
    pub fn plain() -> Self {
        Self {
            ansi: false,
            ..Self::new()
        }
    }

    /// Switches interactivity, observed by the next render
    pub fn set_interactive(&self, interactive: bool) {
        self.interactive.store(interactive, Ordering::SeqCst);
    }

    /// Makes subsequent writes fail with `BrokenPipe`
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Captured lines, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns the captured lines
    pub fn take(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|mut l| std::mem::take(&mut *l))
            .unwrap_or_default()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl SinkCapability for MemorySink {
    fn is_interactive(&self) -> bool {
        self.interactive.load(Ordering::SeqCst)
    }

    fn supports_ansi(&self) -> bool {
        self.ansi
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "memory sink closed"));
        }
        let mut lines = self
            .lines
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "memory sink poisoned"))?;
        lines.push(line.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
