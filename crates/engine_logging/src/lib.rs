#![deny(missing_docs)]
//! Shared logging utilities for the scout workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a minimal test initializer for the global logger and an in-memory capture
//! logger for tests that assert on emitted levels.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]);
}

/// A logged line as seen by [`CaptureLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    /// Severity of the record.
    pub level: Level,
    /// Fully formatted message.
    pub message: String,
}

/// Logger that keeps every record in memory.
///
/// Installed process-wide by [`capture_for_tests`]. Tests in the same binary
/// share it, so assertions should filter on something unique to the test
/// (a URL, a title) via [`CaptureLogger::records_containing`].
pub struct CaptureLogger {
    records: Mutex<Vec<CapturedRecord>>,
}

static CAPTURE: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

impl CaptureLogger {
    /// Returns all captured records whose message contains `needle`.
    pub fn records_containing(&self, needle: &str) -> Vec<CapturedRecord> {
        match self.records.lock() {
            Ok(records) => records
                .iter()
                .filter(|r| r.message.contains(needle))
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Returns the levels of all records mentioning `needle`, in emission order.
    pub fn levels_for(&self, needle: &str) -> Vec<Level> {
        self.records_containing(needle)
            .into_iter()
            .map(|r| r.level)
            .collect()
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut records) = self.records.lock() {
            records.push(CapturedRecord {
                level: record.level(),
                message: record.args().to_string(),
            });
        }
    }

    fn flush(&self) {}
}

/// Installs the in-memory capture logger and returns a handle to it.
///
/// If a different logger was installed first the handle stays empty, so a test
/// binary should use either this or [`initialize_for_tests`], not both.
pub fn capture_for_tests() -> &'static CaptureLogger {
    if log::set_logger(&CAPTURE).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
    &CAPTURE
}
