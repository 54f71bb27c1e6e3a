/// Month-scoped correlation between measurement channels.
///
/// The three channel pairs are named by their short codes: `S_T` (wind speed
/// vs temperature), `S_R` (wind speed vs solar radiation) and `T_R`
/// (temperature vs solar radiation).

use std::fmt;
use std::str::FromStr;

use crate::analysis::stats::pearson_correlation;
use crate::model::WeatherRecord;
use crate::store::RecordCollection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationKind {
    SpeedTemperature,
    SpeedRadiation,
    TemperatureRadiation,
}

impl CorrelationKind {
    pub const ALL: [CorrelationKind; 3] = [
        CorrelationKind::SpeedTemperature,
        CorrelationKind::SpeedRadiation,
        CorrelationKind::TemperatureRadiation,
    ];

    pub fn code(self) -> &'static str {
        match self {
            CorrelationKind::SpeedTemperature => "S_T",
            CorrelationKind::SpeedRadiation => "S_R",
            CorrelationKind::TemperatureRadiation => "T_R",
        }
    }

    /// The (x, y) pair of measurements this kind correlates.
    pub fn channels(self, record: &WeatherRecord) -> (f64, f64) {
        match self {
            CorrelationKind::SpeedTemperature => (record.wind_speed, record.temperature),
            CorrelationKind::SpeedRadiation => (record.wind_speed, record.solar_radiation),
            CorrelationKind::TemperatureRadiation => (record.temperature, record.solar_radiation),
        }
    }
}

impl fmt::Display for CorrelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CorrelationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CorrelationKind::ALL
            .into_iter()
            .find(|k| k.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown correlation kind: '{}'", s))
    }
}

/// Pearson correlation of the chosen channel pair over a set of records.
pub fn correlate(records: &[WeatherRecord], kind: CorrelationKind) -> f64 {
    let (x, y): (Vec<f64>, Vec<f64>) = records.iter().map(|r| kind.channels(r)).unzip();
    pearson_correlation(&x, &y)
}

/// Correlation for every record indexed under `month`, across all years.
///
/// Returns `0.0` for a month with fewer than two records.
pub fn correlation_for_month(collection: &RecordCollection, month: u32, kind: CorrelationKind) -> f64 {
    correlate(collection.records_for_month(month), kind)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
