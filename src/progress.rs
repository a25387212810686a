//! Human-readable progress reporting for long-running commands.

use std::cell::RefCell;

/// Receives progress lines from workflow commands.
pub trait Progress {
    /// A step is about to run.
    fn step(&self, message: &str);
    /// Something the operator must act on.
    fn warn(&self, message: &str);
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl Progress for SilentProgress {
    fn step(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}
}

/// Keeps progress lines in memory, warnings prefixed with `warning: `.
#[derive(Debug, Default)]
pub struct RecordedProgress {
    lines: RefCell<Vec<String>>,
}

impl RecordedProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Progress for RecordedProgress {
    fn step(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.lines.borrow_mut().push(format!("warning: {}", message));
    }
}
