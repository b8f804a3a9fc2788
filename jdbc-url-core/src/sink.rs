//! Log sinks for parse diagnostics.
//!
//! The parser never logs through a global logger directly. It owns a
//! [`ParseLog`] and reports warnings (a connect string without a scheme) and
//! errors (a connect string the URL parser rejected) through it.
//!
//! ```rust
//! use jdbc_url_core::{ConnectStringParser, RecordingLog};
//!
//! let log = RecordingLog::new();
//! let parser = ConnectStringParser::with_log(&log);
//!
//! assert_eq!(parser.port("jdbc://host:notaport/db"), -1);
//! assert_eq!(log.errors().len(), 1);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, warn};

/// Receiver for parse diagnostics.
pub trait ParseLog: Send + Sync {
    /// Report a recoverable oddity in a connect string.
    fn warn(&self, connect_string: &str, message: &str);

    /// Report a connect string that could not be parsed.
    fn error(&self, connect_string: &str, message: &str);
}

impl<L: ParseLog + ?Sized> ParseLog for &L {
    fn warn(&self, connect_string: &str, message: &str) {
        (**self).warn(connect_string, message)
    }

    fn error(&self, connect_string: &str, message: &str) {
        (**self).error(connect_string, message)
    }
}

impl<L: ParseLog + ?Sized> ParseLog for Arc<L> {
    fn warn(&self, connect_string: &str, message: &str) {
        (**self).warn(connect_string, message)
    }

    fn error(&self, connect_string: &str, message: &str) {
        (**self).error(connect_string, message)
    }
}

/// Default sink that forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl ParseLog for TracingLog {
    fn warn(&self, connect_string: &str, message: &str) {
        warn!(connect_string = %connect_string, "{}", message);
    }

    fn error(&self, connect_string: &str, message: &str) {
        error!(connect_string = %connect_string, "{}", message);
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLog;

impl ParseLog for NoopLog {
    fn warn(&self, _connect_string: &str, _message: &str) {}

    fn error(&self, _connect_string: &str, _message: &str) {}
}

/// Severity of a recorded entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Warning.
    Warn,
    /// Error.
    Error,
}

/// A single recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity.
    pub level: LogLevel,
    /// The connect string the diagnostic refers to.
    pub connect_string: String,
    /// Human readable message.
    pub message: String,
}

/// Sink that keeps every entry in memory.
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLog {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries in the order they were logged.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    /// Entries logged at warning level.
    pub fn warnings(&self) -> Vec<LogEntry> {
        self.with_level(LogLevel::Warn)
    }

    /// Entries logged at error level.
    pub fn errors(&self) -> Vec<LogEntry> {
        self.with_level(LogLevel::Error)
    }

    /// Check if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop all recorded entries.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn with_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .lock()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    fn push(&self, level: LogLevel, connect_string: &str, message: &str) {
        self.entries.lock().push(LogEntry {
            level,
            connect_string: connect_string.to_string(),
            message: message.to_string(),
        });
    }
}

impl ParseLog for RecordingLog {
    fn warn(&self, connect_string: &str, message: &str) {
        self.push(LogLevel::Warn, connect_string, message);
    }

    fn error(&self, connect_string: &str, message: &str) {
        self.push(LogLevel::Error, connect_string, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_log_levels() {
        let log = RecordingLog::new();
        log.warn("a", "first");
        log.error("b", "second");
        log.warn("c", "third");

        assert_eq!(log.entries().len(), 3);
        assert_eq!(log.warnings().len(), 2);
        assert_eq!(log.errors().len(), 1);
        assert_eq!(log.errors()[0].connect_string, "b");
        assert_eq!(log.errors()[0].message, "second");
    }

    #[test]
    fn test_recording_log_clear() {
        let log = RecordingLog::new();
        assert!(log.is_empty());
        log.error("x", "boom");
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_shared_sink() {
        let log = Arc::new(RecordingLog::new());
        let shared = Arc::clone(&log);
        shared.warn("x", "via arc");
        (&*log).error("y", "via ref");

        assert_eq!(log.entries().len(), 2);
    }

    #[test]
    fn test_noop_and_tracing_do_not_panic() {
        NoopLog.warn("x", "ignored");
        NoopLog.error("x", "ignored");
        TracingLog.warn("x", "forwarded");
        TracingLog.error("x", "forwarded");
    }
}
