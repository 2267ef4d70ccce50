//! 进程终止能力的宿主实现

use crate::sinks::traits::ExitCapability;
use std::sync::{Arc, Mutex};

/// Terminates the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExit;

impl ExitCapability for ProcessExit {
    fn exit(&self, code: i32) {
        std::process::exit(code)
    }
}

/// For hosts without a process to terminate; does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExit;

impl ExitCapability for NoExit {
    fn exit(&self, _code: i32) {}
}

/// Records requested exit codes instead of exiting
///
/// Clones share the recorded codes.
#[derive(Debug, Clone, Default)]
pub struct RecordedExit {
    codes: Arc<Mutex<Vec<i32>>>,
}

impl RecordedExit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit codes requested so far
    pub fn codes(&self) -> Vec<i32> {
        self.codes.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ExitCapability for RecordedExit {
    fn exit(&self, code: i32) {
        if let Ok(mut codes) = self.codes.lock() {
            codes.push(code);
        }
    }
}
