/// Reading measurement files into a `RecordCollection`.
///
/// Submodules:
/// - `csv` — single-line parsing and the configurable field layout.
/// - `sources` — source-list and data-file loading with skip accounting.

pub mod csv;
pub mod sources;

pub use csv::{CsvLayout, parse_date, parse_line};
pub use sources::{LoadSummary, load_data_file, load_from_source_list};
