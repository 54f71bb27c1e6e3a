/// Structured logging for the weather statistics service
///
/// Provides leveled logging tagged with the component and, where relevant,
/// the file being processed. Supports both console output and append-to-file
/// logging for long batch loads.

use chrono::Utc;
use serde::Deserialize;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::model::IngestError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Ingest,
    Store,
    Report,
    Config,
    System,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Ingest => write!(f, "INGEST"),
            Component::Store => write!(f, "STORE"),
            Component::Report => write!(f, "REPORT"),
            Component::Config => write!(f, "CONFIG"),
            Component::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - routine noise in station exports (short trailing rows, blanks)
    Expected,
    /// Unexpected failure - missing files or a layout that does not match the data
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        if let Ok(mut slot) = LOGGER.lock() {
            *slot = Some(logger);
        }
    }

    fn log(&self, level: LogLevel, component: Component, subject: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let subject_part = subject.map(|s| format!(" [{}]", s)).unwrap_or_default();
        let log_entry = format!("{} {} {}{}: {}", timestamp, level, component, subject_part, message);

        if self.console_timestamps {
            match level {
                LogLevel::Error => eprintln!("{}", log_entry),
                LogLevel::Warn => eprintln!("   {}", log_entry),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", component, subject_part, message),
                LogLevel::Warn => eprintln!("   ⚠ {}{}: {}", component, subject_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => {} // Skip debug in non-timestamp mode
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

fn dispatch(level: LogLevel, component: Component, subject: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, component, subject, message);
        }
    }
}

/// Log a general informational message
pub fn info(component: Component, subject: Option<&str>, message: &str) {
    dispatch(LogLevel::Info, component, subject, message);
}

/// Log a warning message
pub fn warn(component: Component, subject: Option<&str>, message: &str) {
    dispatch(LogLevel::Warn, component, subject, message);
}

/// Log an error message
pub fn error(component: Component, subject: Option<&str>, message: &str) {
    dispatch(LogLevel::Error, component, subject, message);
}

/// Log a debug message
pub fn debug(component: Component, subject: Option<&str>, message: &str) {
    dispatch(LogLevel::Debug, component, subject, message);
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify an ingest failure by how likely it is to indicate a real problem
pub fn classify_ingest_failure(err: &IngestError) -> FailureType {
    match err {
        // Station exports routinely end with partial rows
        IngestError::FieldCount { .. } => FailureType::Expected,
        // Sensors emit "N/A" or blanks during outages; a layout mismatch looks the same
        IngestError::InvalidNumber { .. } => FailureType::Unknown,
        IngestError::InvalidDate(_) => FailureType::Unexpected,
        // Usually a stray byte from a legacy encoding
        IngestError::InvalidEncoding(_) => FailureType::Unknown,
        IngestError::Io { .. } => FailureType::Unexpected,
    }
}

/// Log an ingest failure with automatic classification
pub fn log_ingest_failure(subject: &str, operation: &str, err: &IngestError) {
    let failure_type = classify_ingest_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => debug(Component::Ingest, Some(subject), &message),
        FailureType::Unexpected => error(Component::Ingest, Some(subject), &message),
        FailureType::Unknown => warn(Component::Ingest, Some(subject), &message),
    }
}

// ---------------------------------------------------------------------------
// Load Summary Logging
// ---------------------------------------------------------------------------

/// Log a summary of a load: accepted vs rejected lines and skipped files
pub fn log_load_summary(files_read: usize, files_skipped: usize, accepted: usize, rejected: usize) {
    let message = format!(
        "Load complete: {} files read, {} skipped; {} lines accepted, {} rejected",
        files_read, files_skipped, accepted, rejected
    );

    if files_skipped == 0 && rejected == 0 {
        info(Component::Ingest, None, &message);
    } else if accepted == 0 {
        error(Component::Ingest, None, &message);
    } else {
        warn(Component::Ingest, None, &message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_failure_classification() {
        let short_row = IngestError::FieldCount { expected: 17, found: 2 };
        assert_eq!(classify_ingest_failure(&short_row), FailureType::Expected);

        let missing = IngestError::Io {
            path: "data/missing.csv".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(classify_ingest_failure(&missing), FailureType::Unexpected);

        let na = IngestError::InvalidNumber { field: 8, token: "N/A".to_string() };
        assert_eq!(classify_ingest_failure(&na), FailureType::Unknown);

        let latin1 = IngestError::InvalidEncoding("invalid utf-8 sequence".to_string());
        assert_eq!(classify_ingest_failure(&latin1), FailureType::Unknown);
    }

    #[test]
    fn test_log_file_receives_entries() {
        let path = std::env::temp_dir().join(format!("weather_stats_log_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let logger = Logger {
            min_level: LogLevel::Warn,
            log_file: Some(path.to_string_lossy().into_owned()),
            console_timestamps: false,
        };
        logger.log(LogLevel::Info, Component::Ingest, None, "filtered out");
        logger.log(LogLevel::Error, Component::Ingest, Some("a.csv"), "kept");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("filtered out"));
        assert!(contents.contains("ERROR INGEST [a.csv]: kept"));
        let _ = std::fs::remove_file(&path);
    }
}
