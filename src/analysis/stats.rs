//! Descriptive statistics over measurement samples.
//!
//! Every function here is total: degenerate inputs (empty slices, a single
//! sample, zero variance, mismatched lengths) yield `0.0` instead of NaN or an
//! error, so a month with no data still produces a printable summary.

use serde::Serialize;

/// Below this magnitude the Pearson denominator is treated as zero.
pub const CORRELATION_EPSILON: f64 = 1e-10;

/// A series whose `n·Σx² − (Σx)²` is at most this fraction of `n·Σx²` is
/// treated as constant. Cancellation leaves residue of that order behind.
pub const SPREAD_TOLERANCE: f64 = 1e-12;

/// Sum of all samples; exactly `0.0` (never `-0.0`) for an empty slice.
pub fn total(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0, |acc, x| acc + x)
}

/// Arithmetic mean; `0.0` for an empty slice.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    total(samples) / samples.len() as f64
}

/// Sample standard deviation with Bessel's correction (`n − 1`).
///
/// Returns `0.0` when fewer than two samples are given.
pub fn std_dev(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(samples);
    let sum_sq: f64 = samples.iter().map(|x| (x - m).powi(2)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// Mean of `|x − mean(x)|`; `0.0` for an empty slice.
pub fn mean_absolute_deviation(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let m = mean(samples);
    samples.iter().map(|x| (x - m).abs()).sum::<f64>() / samples.len() as f64
}

/// Sample Pearson correlation coefficient of two paired series.
///
/// Uses the sum-based form
///
/// ```text
///            n·Σxy − Σx·Σy
/// r = ─────────────────────────────────
///     √((n·Σx² − (Σx)²)(n·Σy² − (Σy)²))
/// ```
///
/// Returns `0.0` when the lengths differ, when fewer than two pairs are
/// given, or when either series is constant. A series counts as constant
/// when all its samples are equal or its spread is within
/// [`SPREAD_TOLERANCE`] of its scale.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }
    let n = x.len() as f64;

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y) {
        sum_x += a;
        sum_y += b;
        sum_xy += a * b;
        sum_x2 += a * a;
        sum_y2 += b * b;
    }

    let (Some(spread_x), Some(spread_y)) = (
        spread(x, n, sum_x, sum_x2),
        spread(y, n, sum_y, sum_y2),
    ) else {
        return 0.0;
    };

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = (spread_x * spread_y).sqrt();
    if denominator.abs() < CORRELATION_EPSILON {
        return 0.0;
    }
    (numerator / denominator).clamp(-1.0, 1.0)
}

/// `n·Σx² − (Σx)²` for one series, or `None` if the series is constant.
fn spread(samples: &[f64], n: f64, sum: f64, sum_sq: f64) -> Option<f64> {
    if samples.windows(2).all(|w| w[0] == w[1]) {
        return None;
    }
    let scale = n * sum_sq;
    let spread = scale - sum * sum;
    (spread > scale * SPREAD_TOLERANCE).then_some(spread)
}

/// Mean, sample standard deviation and mean absolute deviation of one series.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
    pub mad: f64,
}

impl Summary {
    pub fn of(samples: &[f64]) -> Self {
        Self {
            mean: mean(samples),
            std_dev: std_dev(samples),
            mad: mean_absolute_deviation(samples),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
