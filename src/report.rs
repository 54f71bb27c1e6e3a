//! Annual wind / temperature / solar report.
//!
//! The text form is one header line carrying the year, followed by exactly
//! twelve month lines:
//!
//! ```text
//! 2021
//! January,5.2(1.3, 1.0),24.1(3.2, 2.6),1824.0
//! February,0.0(0.0, 0.0),0.0(0.0, 0.0),0.0
//! ...
//! ```

use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::analysis::MonthlySummary;
use crate::logging::{self, Component};
use crate::store::RecordCollection;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualReport {
    pub year: i32,
    pub months: Vec<MonthlySummary>,
}

impl AnnualReport {
    /// Builds summaries for January through December of `year`.
    pub fn for_year(collection: &RecordCollection, year: i32) -> Self {
        let months = (1..=12)
            .map(|month| MonthlySummary::for_year_month(collection, year, month))
            .collect();
        Self { year, months }
    }

    /// Months that had at least one record.
    pub fn months_with_data(&self) -> usize {
        self.months.iter().filter(|m| m.has_data()).count()
    }
}

/// One-decimal rendering that never prints `-0.0`.
struct OneDecimal(f64);

impl fmt::Display for OneDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:.1}", self.0);
        match text.strip_prefix('-') {
            Some("0.0") => f.write_str("0.0"),
            _ => f.write_str(&text),
        }
    }
}

impl fmt::Display for AnnualReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.year)?;
        for m in &self.months {
            writeln!(
                f,
                "{},{}({}, {}),{}({}, {}),{}",
                m.month_name(),
                OneDecimal(m.wind_speed.mean),
                OneDecimal(m.wind_speed.std_dev),
                OneDecimal(m.wind_speed.mad),
                OneDecimal(m.temperature.mean),
                OneDecimal(m.temperature.std_dev),
                OneDecimal(m.temperature.mad),
                OneDecimal(m.total_solar_radiation)
            )?;
        }
        Ok(())
    }
}

/// Writes the text form of `report` to `path`, replacing any existing file.
pub fn write_report(report: &AnnualReport, path: &Path) -> io::Result<()> {
    fs::write(path, report.to_string())?;
    logging::info(
        Component::Report,
        Some(&path.display().to_string()),
        &format!("Wrote {} report ({} months with data)", report.year, report.months_with_data()),
    );
    Ok(())
}

/// Writes `report` as pretty-printed JSON.
pub fn write_report_json(report: &AnnualReport, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
    fs::write(path, json)?;
    logging::debug(Component::Report, Some(&path.display().to_string()), "Wrote JSON report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeatherRecord;
    use chrono::NaiveDate;

    fn collection() -> RecordCollection {
        let mut c = RecordCollection::new();
        for (day, ws, t, sr) in [(1, 2.0, 20.0, 100.0), (2, 4.0, 22.0, 150.0), (3, 6.0, 24.0, 250.0)] {
            c.add(WeatherRecord::new(NaiveDate::from_ymd_opt(2021, 1, day).unwrap(), ws, t, sr));
        }
        c
    }

    #[test]
    fn test_report_has_header_and_twelve_months() {
        let report = AnnualReport::for_year(&collection(), 2021);
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "2021");
        assert_eq!(lines[1], "January,4.0(2.0, 1.3),22.0(2.0, 1.3),500.0");
        assert_eq!(lines[2], "February,0.0(0.0, 0.0),0.0(0.0, 0.0),0.0");
        assert!(lines[12].starts_with("December,"));
        assert_eq!(report.months_with_data(), 1);
    }

    #[test]
    fn test_report_for_year_without_data_is_all_zero() {
        let report = AnnualReport::for_year(&collection(), 1999);
        for line in report.to_string().lines().skip(1) {
            assert!(line.ends_with(",0.0(0.0, 0.0),0.0(0.0, 0.0),0.0"), "unexpected line {}", line);
        }
    }

    #[test]
    fn test_empty_month_line_is_exact() {
        let report = AnnualReport::for_year(&RecordCollection::new(), 2020);
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "January,0.0(0.0, 0.0),0.0(0.0, 0.0),0.0");
        assert_eq!(lines[2], "February,0.0(0.0, 0.0),0.0(0.0, 0.0),0.0");
        assert!(!text.contains("-0.0"), "negative zero in report:\n{}", text);
    }

    #[test]
    fn test_small_negative_values_do_not_print_negative_zero() {
        let mut c = RecordCollection::new();
        for (day, t) in [(1, -0.06), (2, -0.02)] {
            c.add(WeatherRecord::new(NaiveDate::from_ymd_opt(2021, 6, day).unwrap(), 0.0, t, 0.0));
        }
        let text = AnnualReport::for_year(&c, 2021).to_string();
        let june = text.lines().find(|l| l.starts_with("June,")).unwrap();
        assert_eq!(june, "June,0.0(0.0, 0.0),0.0(0.0, 0.0),0.0");
        assert_eq!(OneDecimal(-0.26).to_string(), "-0.3");
        assert_eq!(OneDecimal(-1.0).to_string(), "-1.0");
    }

    #[test]
    fn test_write_report_and_json() {
        let report = AnnualReport::for_year(&collection(), 2021);
        let dir = std::env::temp_dir();
        let text_path = dir.join(format!("weather_stats_report_{}.csv", std::process::id()));
        let json_path = dir.join(format!("weather_stats_report_{}.json", std::process::id()));

        write_report(&report, &text_path).unwrap();
        write_report_json(&report, &json_path).unwrap();

        assert_eq!(fs::read_to_string(&text_path).unwrap(), report.to_string());
        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["year"], 2021);
        assert_eq!(json["months"].as_array().map(Vec::len), Some(12));

        let _ = fs::remove_file(&text_path);
        let _ = fs::remove_file(&json_path);
    }
}
