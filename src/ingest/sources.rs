/// Batch loading from a data-source list.
///
/// A source list is a plain text file naming one measurement file per line.
/// Loading is best effort: unreadable files and malformed lines are logged,
/// counted in the returned `LoadSummary`, and skipped.

use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::ingest::csv::{CsvLayout, parse_line};
use crate::logging::{self, Component};
use crate::model::IngestError;
use crate::store::RecordCollection;

/// What a load accepted and what it dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadSummary {
    pub files_read: usize,
    pub files_skipped: usize,
    pub lines_accepted: usize,
    pub lines_rejected: usize,
    /// Accepted lines whose date was already in the tree.
    pub duplicate_dates: usize,
    pub warnings: Vec<String>,
}

impl LoadSummary {
    pub fn is_clean(&self) -> bool {
        self.files_skipped == 0 && self.lines_rejected == 0
    }

    fn skip_file(&mut self, err: &IngestError) {
        self.files_skipped += 1;
        self.warnings.push(err.to_string());
    }
}

fn io_error(path: &Path, err: std::io::Error) -> IngestError {
    IngestError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Loads every data line of one file into `collection`.
///
/// Blank lines are ignored; with `skip_header` the first non-blank line is
/// treated as a header. Lines are split on raw `\n` bytes so a line that is
/// not valid UTF-8 is rejected on its own. Returns `Err` only when the file
/// itself cannot be opened or read; per-line failures are recorded in
/// `summary`.
pub fn load_data_file(
    path: &Path,
    layout: &CsvLayout,
    skip_header: bool,
    collection: &mut RecordCollection,
    summary: &mut LoadSummary,
) -> Result<(), IngestError> {
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let subject = path.display().to_string();
    let mut header_pending = skip_header;

    for (line_no, bytes) in BufReader::new(file).split(b'\n').enumerate() {
        let bytes = bytes.map_err(|e| io_error(path, e))?;
        let decoded =
            String::from_utf8(bytes).map_err(|e| IngestError::InvalidEncoding(e.utf8_error().to_string()));
        if decoded.as_deref().is_ok_and(|line| line.trim().is_empty()) {
            continue;
        }
        if header_pending {
            header_pending = false;
            continue;
        }

        match decoded.and_then(|line| parse_line(line.trim_end_matches('\r'), layout)) {
            Ok(record) => {
                summary.lines_accepted += 1;
                if !collection.add(record) {
                    summary.duplicate_dates += 1;
                }
            }
            Err(err) => {
                summary.lines_rejected += 1;
                logging::log_ingest_failure(&subject, &format!("line {}", line_no + 1), &err);
                summary.warnings.push(format!("{}:{}: {}", subject, line_no + 1, err));
            }
        }
    }

    summary.files_read += 1;
    Ok(())
}

/// Resolves a listed file name. Names are tried as given first, then
/// relative to the directory holding the list.
fn resolve_listed_path(list_dir: Option<&Path>, name: &str) -> PathBuf {
    let listed = PathBuf::from(name);
    if listed.is_absolute() || listed.exists() {
        return listed;
    }
    match list_dir {
        Some(dir) => dir.join(&listed),
        None => listed,
    }
}

/// Reads the source list at `list_path` and loads each file it names.
pub fn load_from_source_list(
    list_path: &Path,
    layout: &CsvLayout,
    skip_header: bool,
    collection: &mut RecordCollection,
) -> LoadSummary {
    let mut summary = LoadSummary::default();

    let names = match std::fs::read_to_string(list_path) {
        Ok(text) => text,
        Err(e) => {
            let err = io_error(list_path, e);
            logging::log_ingest_failure(&list_path.display().to_string(), "read source list", &err);
            summary.skip_file(&err);
            return summary;
        }
    };

    let list_dir = list_path.parent();
    for name in names.lines().map(str::trim).filter(|n| !n.is_empty()) {
        let path = resolve_listed_path(list_dir, name);
        logging::debug(Component::Ingest, Some(name), "Loading data file");
        if let Err(err) = load_data_file(&path, layout, skip_header, collection, &mut summary) {
            logging::log_ingest_failure(name, "open data file", &err);
            summary.skip_file(&err);
        }
    }

    if summary.duplicate_dates > 0 {
        logging::info(
            Component::Store,
            None,
            &format!(
                "{} records shared a date with an earlier record; kept in the month index only",
                summary.duplicate_dates
            ),
        );
    }
    logging::log_load_summary(
        summary.files_read,
        summary.files_skipped,
        summary.lines_accepted,
        summary.lines_rejected,
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("weather_stats_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn layout() -> CsvLayout {
        CsvLayout {
            date_field: 0,
            wind_speed_field: 1,
            temperature_field: 2,
            solar_radiation_field: 3,
            min_fields: 4,
        }
    }

    #[test]
    fn test_header_blank_and_bad_lines_are_skipped() {
        let dir = scratch_dir("single_file");
        let data = dir.join("a.csv");
        fs::write(
            &data,
            "WAST,S,T,SR\n\n1/1/2020 9:00,1,2,3\nbroken\n2/1/2020 9:00,x,2,3\n3/1/2020 9:00,4,5,6\n",
        )
        .unwrap();

        let mut collection = RecordCollection::new();
        let mut summary = LoadSummary::default();
        load_data_file(&data, &layout(), true, &mut collection, &mut summary).unwrap();

        assert_eq!(summary.files_read, 1);
        assert_eq!(summary.lines_accepted, 2);
        assert_eq!(summary.lines_rejected, 2);
        assert_eq!(summary.warnings.len(), 2);
        assert_eq!(collection.total_count(), 2);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_utf8_line_is_rejected_alone() {
        let dir = scratch_dir("bad_bytes");
        let data = dir.join("latin1.csv");
        let mut bytes = b"WAST,S,T,SR\r\n1/1/2020 9:00,1,2,3\r\n".to_vec();
        bytes.extend_from_slice(b"2/1/2020 9:00,\xff,2,3\r\n");
        bytes.extend_from_slice(b"3/1/2020 9:00,4,5,6\r\n4/1/2020 9:00,7,8,9\r\n");
        fs::write(&data, bytes).unwrap();

        let mut collection = RecordCollection::new();
        let mut summary = LoadSummary::default();
        load_data_file(&data, &layout(), true, &mut collection, &mut summary).unwrap();

        assert_eq!(summary.files_read, 1);
        assert_eq!(summary.lines_accepted, 3);
        assert_eq!(summary.lines_rejected, 1);
        assert!(summary.warnings[0].contains(":3: Invalid encoding"), "{:?}", summary.warnings);
        assert_eq!(collection.total_count(), 3);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_files_do_not_stop_the_load() {
        let dir = scratch_dir("source_list");
        fs::write(dir.join("good.csv"), "header\n5/6/2021 0:00,1,2,3\n5/6/2021 0:10,2,3,4\n").unwrap();
        let list = dir.join("data_source.txt");
        fs::write(&list, "missing.csv\n\ngood.csv\n").unwrap();

        let mut collection = RecordCollection::new();
        let summary = load_from_source_list(&list, &layout(), true, &mut collection);

        assert_eq!(summary.files_read, 1);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.lines_accepted, 2);
        assert_eq!(summary.duplicate_dates, 1);
        assert!(!summary.is_clean());
        assert_eq!(collection.total_count(), 1);
        assert_eq!(collection.indexed_count(), 2);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_source_list_yields_empty_summary() {
        let mut collection = RecordCollection::new();
        let summary = load_from_source_list(Path::new("/no/such/list.txt"), &layout(), true, &mut collection);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.files_read, 0);
        assert!(collection.is_empty());
    }
}
