//! Pluggable logging for offscreen targets
//!
//! Messages go through a process-wide `Logger`, colored stderr output by
//! default. ERROR entries carry the file and line they were raised from.

use chrono::{DateTime, Local};
use colored::*;
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;

/// Receives every log entry; install with `set_logger`
pub trait Logger: Send + Sync {
    fn log(&self, entry: &LogEntry);
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub severity: LogSeverity,
    pub timestamp: SystemTime,
    /// Emitting component, e.g. "offscreen::ImageTarget"
    pub source: String,
    pub message: String,
    /// `(file, line)` of the call site, ERROR entries only
    pub location: Option<(&'static str, u32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-bind chatter (cheap path, slot updates)
    Trace,
    /// Object creation, rebuilds and deletions
    Debug,
    /// Handles left behind on teardown
    Warn,
    Error,
}

impl LogSeverity {
    fn label(self) -> ColoredString {
        match self {
            LogSeverity::Trace => "trace".dimmed(),
            LogSeverity::Debug => "debug".blue(),
            LogSeverity::Warn => "warn".yellow().bold(),
            LogSeverity::Error => "error".red().bold(),
        }
    }
}

/// Writes `HH:MM:SS.mmm level source: message` to stderr
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let time: DateTime<Local> = entry.timestamp.into();
        let mut line = format!(
            "{} {:>5} {}: {}",
            time.format("%H:%M:%S%.3f"),
            entry.severity.label(),
            entry.source.as_str().cyan(),
            entry.message
        );
        if let Some((file, at)) = entry.location {
            line.push_str(&format!(" [{}:{}]", file, at));
        }
        eprintln!("{}", line);
    }
}

static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
    if let Ok(mut lock) = logger().write() {
        *lock = Box::new(logger_impl);
    }
}

/// Go back to `DefaultLogger`
pub fn reset_logger() {
    set_logger(DefaultLogger);
}

/// Hand an entry to the installed logger (called by the logging macros)
pub fn log(
    severity: LogSeverity,
    source: &str,
    message: String,
    location: Option<(&'static str, u32)>,
) {
    if let Ok(lock) = logger().read() {
        lock.log(&LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            location,
        });
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! offscreen_log {
    ($severity:ident, $location:expr, $source:expr, $($arg:tt)*) => {
        $crate::log::log(
            $crate::log::LogSeverity::$severity,
            $source,
            format!($($arg)*),
            $location,
        )
    };
}

#[macro_export]
macro_rules! offscreen_trace {
    ($source:expr, $($arg:tt)*) => { $crate::offscreen_log!(Trace, None, $source, $($arg)*) };
}

/// `offscreen_debug!("offscreen::ImageTarget", "Built {}", fbo)`
#[macro_export]
macro_rules! offscreen_debug {
    ($source:expr, $($arg:tt)*) => { $crate::offscreen_log!(Debug, None, $source, $($arg)*) };
}

#[macro_export]
macro_rules! offscreen_warn {
    ($source:expr, $($arg:tt)*) => { $crate::offscreen_log!(Warn, None, $source, $($arg)*) };
}

/// Like the others, plus the call site's file and line
#[macro_export]
macro_rules! offscreen_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::offscreen_log!(Error, Some((file!(), line!())), $source, $($arg)*)
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
