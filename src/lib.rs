//! Weather station statistics.
//!
//! Loads daily wind speed, temperature and solar radiation readings from
//! station CSV exports into a date-ordered tree plus a month index, and
//! computes monthly summaries and channel correlations over them.

pub mod analysis;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod report;
pub mod store;
