/// Per-month summaries for a single year.

use serde::Serialize;

use crate::analysis::stats::{Summary, total};
use crate::model::{WeatherRecord, month_name};
use crate::store::RecordCollection;

/// Wind speed and temperature summaries plus total solar radiation for one
/// (year, month).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub samples: usize,
    pub wind_speed: Summary,
    pub temperature: Summary,
    pub total_solar_radiation: f64,
}

impl MonthlySummary {
    pub fn for_year_month(collection: &RecordCollection, year: i32, month: u32) -> Self {
        Self::from_records(year, month, &collection.records_for_year_month(year, month))
    }

    pub fn from_records(year: i32, month: u32, records: &[WeatherRecord]) -> Self {
        let speeds: Vec<f64> = records.iter().map(|r| r.wind_speed).collect();
        let temps: Vec<f64> = records.iter().map(|r| r.temperature).collect();
        let radiation: Vec<f64> = records.iter().map(|r| r.solar_radiation).collect();

        Self {
            year,
            month,
            samples: records.len(),
            wind_speed: Summary::of(&speeds),
            temperature: Summary::of(&temps),
            total_solar_radiation: total(&radiation),
        }
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or("Unknown")
    }

    pub fn has_data(&self) -> bool {
        self.samples > 0
    }
}
