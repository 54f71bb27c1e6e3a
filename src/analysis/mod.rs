/// Statistical analysis over stored weather records.
///
/// Submodules:
/// - `stats` — pure descriptive statistics and Pearson correlation.
/// - `correlation` — channel-pair selection and month-scoped correlation.
/// - `monthly` — per-(year, month) summaries used by the annual report.

pub mod correlation;
pub mod monthly;
pub mod stats;

pub use correlation::{CorrelationKind, correlation_for_month};
pub use monthly::MonthlySummary;
pub use stats::Summary;
