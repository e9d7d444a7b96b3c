//! Soft diagnostics raised by coercion and assignment.
//!
//! Warnings are values, not log lines: the runtime hands them to its
//! [`WarningSink`], which prints, captures or drops them.

use std::fmt;

use parking_lot::Mutex;

/// A recoverable condition worth telling the user about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// An undefined value was used as a string or number.
    Uninitialized { op: &'static str },
    /// A string without a clean leading numeral was used as a number.
    NonNumeric { text: String },
    /// A list with an odd number of elements was assigned to a hash.
    OddHashAssignment,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Uninitialized { op } => write!(f, "Use of uninitialized value in {op}"),
            Warning::NonNumeric { text } => write!(f, "Argument \"{text}\" isn't numeric"),
            Warning::OddHashAssignment => f.write_str("Odd number of elements in hash assignment"),
        }
    }
}

/// Sink that records warnings for later inspection.
#[derive(Default)]
pub struct BufferWarningSink {
    buffer: Mutex<Vec<Warning>>,
}

impl BufferWarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, warning: Warning) {
        self.buffer.lock().push(warning);
    }

    /// Everything reported so far, oldest first.
    pub fn captured(&self) -> Vec<Warning> {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Destination for warnings, dispatched by enum.
#[derive(Default)]
pub enum WarningSink {
    /// Writes each warning to stderr (default).
    #[default]
    Stderr,
    /// Captures warnings (tests, embedding hosts).
    Buffer(BufferWarningSink),
    /// Drops everything.
    Silent,
}

impl WarningSink {
    /// A fresh capturing sink.
    pub fn buffer() -> Self {
        WarningSink::Buffer(BufferWarningSink::new())
    }

    pub fn report(&self, warning: Warning) {
        match self {
            Self::Stderr => eprintln!("{warning}"),
            Self::Buffer(sink) => sink.report(warning),
            Self::Silent => {}
        }
    }

    /// Captured warnings; empty for sinks that do not capture.
    pub fn captured(&self) -> Vec<Warning> {
        match self {
            Self::Buffer(sink) => sink.captured(),
            Self::Stderr | Self::Silent => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(sink) = self {
            sink.clear();
        }
    }
}

impl fmt::Debug for WarningSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stderr => f.write_str("Stderr"),
            Self::Buffer(_) => f.write_str("Buffer"),
            Self::Silent => f.write_str("Silent"),
        }
    }
}
