// src/util/log.rs

//! Logger Utility - leveled diagnostics for a TUI, one sink per severity
use std::fmt::Debug;
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, OnceLock};
use chrono::{SecondsFormat, Utc};

static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Global logger instance
pub static LOGGER: LazyLock<Logger> = LazyLock::new(|| {
    let log_dir = LOG_DIR.get().cloned().unwrap_or_else(|| PathBuf::from("./logs"));
    Logger::new(&log_dir).unwrap_or_else(|_| Logger::discarding())
});

/// Point the global logger at `dir`. Only effective before the first record
/// is written.
pub fn set_log_dir(dir: impl Into<PathBuf>) {
    let _ = LOG_DIR.set(dir.into());
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
        }
    }

    fn filename(&self) -> &str {
        match self {
            LogLevel::Error => "error.log",
            LogLevel::Warn => "warn.log",
            LogLevel::Info => "info.log",
        }
    }
}

type Sink = Mutex<Box<dyn Write + Send>>;

/// Logger that routes each severity to its own sink
pub struct Logger {
    error_sink: Sink,
    warn_sink: Sink,
    info_sink: Sink,
}

impl Logger {
    /// Create a logger appending to `info.log`, `warn.log` and `error.log`
    /// inside `log_dir`.
    pub fn new(log_dir: impl AsRef<Path>) -> io::Result<Self> {
        let log_dir = log_dir.as_ref();
        create_dir_all(log_dir)?;

        let open = |level: LogLevel| -> io::Result<File> {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_dir.join(level.filename()))
        };

        Ok(Self::with_sinks(
            open(LogLevel::Info)?,
            open(LogLevel::Warn)?,
            open(LogLevel::Error)?,
        ))
    }

    pub fn with_sinks(
        info: impl Write + Send + 'static,
        warn: impl Write + Send + 'static,
        error: impl Write + Send + 'static,
    ) -> Self {
        Self {
            error_sink: Mutex::new(Box::new(error)),
            warn_sink: Mutex::new(Box::new(warn)),
            info_sink: Mutex::new(Box::new(info)),
        }
    }

    /// Used when the log directory is unusable.
    pub fn discarding() -> Self {
        Self::with_sinks(io::sink(), io::sink(), io::sink())
    }

    /// `[LEVEL] <timestamp>: <message> <aux>...`
    pub fn format_record(level: LogLevel, message: &str, args: &[&dyn Debug]) -> String {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut line = format!("[{}] {}: {}", level.as_str(), timestamp, message);
        for arg in args {
            line.push_str(&format!(" {:?}", arg));
        }
        line.push('\n');
        line
    }

    fn write_log(&self, level: LogLevel, message: &str, args: &[&dyn Debug]) {
        let formatted = Self::format_record(level, message, args);

        let sink = match level {
            LogLevel::Error => &self.error_sink,
            LogLevel::Warn => &self.warn_sink,
            LogLevel::Info => &self.info_sink,
        };

        if let Ok(mut sink) = sink.lock() {
            let _ = sink.write_all(formatted.as_bytes());
            let _ = sink.flush();
        }
    }

    pub fn error(&self, message: &str, args: &[&dyn Debug]) {
        self.write_log(LogLevel::Error, message, args);
    }

    pub fn warn(&self, message: &str, args: &[&dyn Debug]) {
        self.write_log(LogLevel::Warn, message, args);
    }

    pub fn info(&self, message: &str, args: &[&dyn Debug]) {
        self.write_log(LogLevel::Info, message, args);
    }
}

/// Convenience macro for error logging with formatting
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.error(&message, &[]);
    }};
}

/// Convenience macro for warning logging with formatting
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.warn(&message, &[]);
    }};
}

/// Convenience macro for info logging with formatting
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.info(&message, &[]);
    }};
}
