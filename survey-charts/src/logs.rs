//! Run progress.
//!
//! Each event of a run is printed and sent to subscribers, so callers
//! embedding the pipeline (and tests) can follow it. Stages, details and
//! completion messages go to stdout; warnings and the fatal error go to
//! stderr. Completion messages are printed bare, exactly as written.

use once_cell::sync::Lazy;
use tokio::sync::broadcast;

/// Kind of progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Start of a pipeline stage (read, group, render)
    Stage,
    /// Counts and per-group progress under a stage
    Detail,
    /// A completion message
    Done,
    Warning,
    /// The error that ends the run
    Error,
}

/// A single progress event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }

    /// The line printed for this entry.
    pub fn line(&self) -> String {
        match self.level {
            LogLevel::Stage | LogLevel::Done => self.message.clone(),
            LogLevel::Detail => format!("   {}", self.message),
            LogLevel::Warning => format!("⚠️  {}", self.message),
            LogLevel::Error => format!("❌ Error: {}", self.message),
        }
    }

    /// Whether the line belongs on stderr.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self.level, LogLevel::Warning | LogLevel::Error)
    }
}

/// Process-wide progress log
pub static PROGRESS: Lazy<ProgressLog> = Lazy::new(ProgressLog::new);

/// Prints progress events and forwards them to subscribers
pub struct ProgressLog {
    sender: broadcast::Sender<LogEntry>,
}

impl ProgressLog {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    pub fn log(&self, entry: LogEntry) {
        if entry.is_diagnostic() {
            eprintln!("{}", entry.line());
        } else {
            println!("{}", entry.line());
        }

        // No receivers is fine
        let _ = self.sender.send(entry);
    }

    /// Get a receiver for entries logged from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for ProgressLog {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_stage(msg: impl Into<String>) {
    PROGRESS.log(LogEntry::new(LogLevel::Stage, msg));
}

pub fn log_detail(msg: impl Into<String>) {
    PROGRESS.log(LogEntry::new(LogLevel::Detail, msg));
}

/// Progress line of the `index`-th (1-based) of `total` groups.
pub fn log_group(index: usize, total: usize, key: &str) {
    log_detail(format!("[{}/{}] {}", index, total, key));
}

pub fn log_done(msg: impl Into<String>) {
    PROGRESS.log(LogEntry::new(LogLevel::Done, msg));
}

pub fn log_warning(msg: impl Into<String>) {
    PROGRESS.log(LogEntry::new(LogLevel::Warning, msg));
}

pub fn log_error(msg: impl Into<String>) {
    PROGRESS.log(LogEntry::new(LogLevel::Error, msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let done = LogEntry::new(LogLevel::Done, "Charts generated.");
        assert_eq!(done.line(), "Charts generated.");
        assert!(!done.is_diagnostic());

        assert_eq!(LogEntry::new(LogLevel::Detail, "[1/2] a | b").line(), "   [1/2] a | b");

        let error = LogEntry::new(LogLevel::Error, "cannot read data.xlsx");
        assert_eq!(error.line(), "❌ Error: cannot read data.xlsx");
        assert!(error.is_diagnostic());
        assert!(LogEntry::new(LogLevel::Warning, "empty").is_diagnostic());
    }

    #[test]
    fn test_subscriber_receives_entries() {
        let log = ProgressLog::new();
        let mut rx = log.subscribe();

        log.log(LogEntry::new(LogLevel::Done, "done"));
        log.log(LogEntry::new(LogLevel::Error, "boom"));

        let first = rx.try_recv().unwrap();
        assert_eq!(first.level, LogLevel::Done);
        assert_eq!(first.message, "done");
        assert_eq!(rx.try_recv().unwrap().level, LogLevel::Error);
    }

    #[test]
    fn test_log_without_subscribers() {
        ProgressLog::default().log(LogEntry::new(LogLevel::Warning, "nobody listens"));
    }
}
