/// Core data types for the weather statistics service.
///
/// This module defines the shared domain model imported by all other modules:
/// the measurement record, calendar constants, and the ingest error type.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Calendar constants
// ---------------------------------------------------------------------------

/// English month names, indexed by `month - 1`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Earliest year accepted from input files.
pub const MIN_YEAR: i32 = 1900;

/// Latest year accepted from input files.
pub const MAX_YEAR: i32 = 2100;

/// Returns the English name for a month number in 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month.checked_sub(1)? as usize).copied()
}

// ---------------------------------------------------------------------------
// Record type
// ---------------------------------------------------------------------------

/// One day's measurements from a weather station.
///
/// Records are keyed by date alone: two records observed on the same day
/// compare equal even when their measurements differ, which is what lets the
/// ordered store drop same-day duplicates.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeatherRecord {
    pub date: NaiveDate,
    pub wind_speed: f64,      // S
    pub temperature: f64,     // T
    pub solar_radiation: f64, // R
}

impl WeatherRecord {
    pub fn new(date: NaiveDate, wind_speed: f64, temperature: f64, solar_radiation: f64) -> Self {
        Self {
            date,
            wind_speed,
            temperature,
            solar_radiation,
        }
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

impl PartialEq for WeatherRecord {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
    }
}

impl Eq for WeatherRecord {}

impl PartialOrd for WeatherRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeatherRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

impl fmt::Display for WeatherRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} | WS: {:.1} | Temp: {:.1} | Solar: {:.1}",
            self.day(),
            self.month(),
            self.year(),
            self.wind_speed,
            self.temperature,
            self.solar_radiation
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while reading measurement files.
#[derive(Debug, PartialEq)]
pub enum IngestError {
    /// The line has fewer comma-separated fields than the layout requires.
    FieldCount { expected: usize, found: usize },
    /// A measurement field could not be parsed as a number.
    InvalidNumber { field: usize, token: String },
    /// The timestamp field is malformed or out of range.
    InvalidDate(String),
    /// The line is not valid UTF-8.
    InvalidEncoding(String),
    /// A data or source-list file could not be read.
    Io { path: String, message: String },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::FieldCount { expected, found } => {
                write!(f, "Field count error: expected at least {}, found {}", expected, found)
            }
            IngestError::InvalidNumber { field, token } => {
                write!(f, "Invalid number in field {}: '{}'", field, token)
            }
            IngestError::InvalidDate(token) => write!(f, "Invalid date: '{}'", token),
            IngestError::InvalidEncoding(detail) => write!(f, "Invalid encoding: {}", detail),
            IngestError::Io { path, message } => write!(f, "IO error for {}: {}", path, message),
        }
    }
}

impl std::error::Error for IngestError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
