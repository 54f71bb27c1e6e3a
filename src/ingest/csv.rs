/// Line parser for station measurement exports.
///
/// Each data line is comma separated. Field 0 holds a `DD/MM/YYYY HH:MM`
/// timestamp of which only the date is kept; the measurement fields sit at
/// fixed offsets that vary between station schemas, so they come from a
/// `CsvLayout` rather than being baked in.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::{IngestError, MAX_YEAR, MIN_YEAR, WeatherRecord};

/// Field offsets (zero-based) for one export schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsvLayout {
    pub date_field: usize,
    pub wind_speed_field: usize,
    pub temperature_field: usize,
    pub solar_radiation_field: usize,
    /// Lines with fewer fields than this are rejected outright.
    pub min_fields: usize,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            date_field: 0,
            wind_speed_field: 8,
            temperature_field: 11,
            solar_radiation_field: 12,
            min_fields: 17,
        }
    }
}

impl CsvLayout {
    /// The larger of `min_fields` and the highest configured offset + 1.
    pub fn required_fields(&self) -> usize {
        [
            self.date_field,
            self.wind_speed_field,
            self.temperature_field,
            self.solar_radiation_field,
        ]
        .into_iter()
        .map(|f| f + 1)
        .max()
        .unwrap_or(0)
        .max(self.min_fields)
    }
}

/// Parses the date portion of a `DD/MM/YYYY[ HH:MM]` timestamp.
///
/// Day must be 1–31, month 1–12 and year 1900–2100, and the result must be a
/// real calendar date (31/02 is rejected).
pub fn parse_date(token: &str) -> Result<NaiveDate, IngestError> {
    let invalid = || IngestError::InvalidDate(token.to_string());

    let date_part = token.split_whitespace().next().ok_or_else(invalid)?;
    let mut parts = date_part.split('/');
    let (Some(d), Some(m), Some(y), None) = (parts.next(), parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let day: u32 = d.trim().parse().map_err(|_| invalid())?;
    let month: u32 = m.trim().parse().map_err(|_| invalid())?;
    let year: i32 = y.trim().parse().map_err(|_| invalid())?;

    if !(1..=31).contains(&day) || !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(invalid());
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn parse_number(fields: &[&str], index: usize) -> Result<f64, IngestError> {
    let token = fields[index].trim();
    token.parse().map_err(|_| IngestError::InvalidNumber {
        field: index,
        token: token.to_string(),
    })
}

/// Parses one data line into a record.
pub fn parse_line(line: &str, layout: &CsvLayout) -> Result<WeatherRecord, IngestError> {
    let fields: Vec<&str> = line.split(',').collect();
    let required = layout.required_fields();
    if fields.len() < required {
        return Err(IngestError::FieldCount {
            expected: required,
            found: fields.len(),
        });
    }

    let date = parse_date(fields[layout.date_field])?;
    let wind_speed = parse_number(&fields, layout.wind_speed_field)?;
    let temperature = parse_number(&fields, layout.temperature_field)?;
    let solar_radiation = parse_number(&fields, layout.solar_radiation_field)?;

    Ok(WeatherRecord::new(date, wind_speed, temperature, solar_radiation))
}
