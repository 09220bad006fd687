//! The [`LogSink`] a reporter writes its diagnostics to.

use std::{cell::RefCell, rc::Rc, sync::Arc};
use tracing::{error, info, warn};

/// Severity of a reporter log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Verbose trace, only emitted when verbose output is enabled.
    Info,
    /// Ignored configuration.
    Warning,
    /// A failed or empty polling cycle.
    Error,
}

/// Receives the reporter's log lines.
pub trait LogSink {
    /// Writes one line.
    fn log(&self, severity: Severity, message: &str);

    /// Writes an info line.
    fn info(&self, message: &str) {
        self.log(Severity::Info, message)
    }

    /// Writes a warning line.
    fn warning(&self, message: &str) {
        self.log(Severity::Warning, message)
    }

    /// Writes an error line.
    fn error(&self, message: &str) {
        self.log(Severity::Error, message)
    }
}

impl<L: LogSink + ?Sized> LogSink for &L {
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message)
    }
}

impl<L: LogSink + ?Sized> LogSink for Box<L> {
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message)
    }
}

impl<L: LogSink + ?Sized> LogSink for Rc<L> {
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message)
    }
}

impl<L: LogSink + ?Sized> LogSink for Arc<L> {
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message)
    }
}

/// Forwards log lines to [`tracing`] under the `stackstat::reporter` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!(target: "stackstat::reporter", "{message}"),
            Severity::Warning => warn!(target: "stackstat::reporter", "{message}"),
            Severity::Error => error!(target: "stackstat::reporter", "{message}"),
        }
    }
}

/// Keeps log lines in memory, for hosts that forward them in batches.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: RefCell<Vec<(Severity, String)>>,
}

impl MemoryLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every line written so far, oldest first.
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.borrow().clone()
    }

    /// Returns the messages written with `severity`, oldest first.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Number of lines written with `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries.borrow().iter().filter(|(s, _)| *s == severity).count()
    }

    /// Removes and returns every line written so far.
    pub fn take(&self) -> Vec<(Severity, String)> {
        self.entries.take()
    }
}

impl LogSink for MemoryLog {
    fn log(&self, severity: Severity, message: &str) {
        self.entries.borrow_mut().push((severity, message.to_string()));
    }
}
