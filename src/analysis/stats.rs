//! Descriptive statistics for interval sequences
//!
//! The confidence interval uses the normal approximation
//! `mean ± 1.96 · std / √n` rather than a t-distribution, and percentiles use
//! linear interpolation between order statistics.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AnalysisError, Result};

/// z-score of the two-sided 95% normal interval
pub const Z_95: f64 = 1.96;
pub const LOWER_PERCENTILE: f64 = 2.5;
pub const UPPER_PERCENTILE: f64 = 97.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(with = "nan_as_null")]
    pub low: f64,
    #[serde(with = "nan_as_null")]
    pub high: f64,
}

/// Summary of one interval sequence.
///
/// `std_dev` and `confidence_interval` are NaN when `count` is 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    #[serde(with = "nan_as_null")]
    pub std_dev: f64,
    pub confidence_interval: Bounds,
    pub percentile_range: Bounds,
    pub min: f64,
    pub max: f64,
}

/// Undefined statistics serialize as null in every output format
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

impl Summary {
    /// Whether the spread statistics could be computed
    pub fn has_spread(&self) -> bool {
        !self.std_dev.is_nan()
    }
}

/// Summarize a sequence of elapsed-time values
pub fn summarize(values: &[f64]) -> Result<Summary> {
    if values.is_empty() {
        return Err(AnalysisError::insufficient_data(
            "cannot summarize an empty interval sequence",
            0,
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let min = sorted[0];
    let max = sorted[count - 1];

    // Identical values: avoid rounding noise in the mean and deviations
    let (mean, std_dev) = if min == max {
        (min, if count > 1 { 0.0 } else { f64::NAN })
    } else {
        let mean = mean(&sorted);
        (mean, sample_std_dev(&sorted, mean))
    };

    if count < 2 {
        warn!("Only one interval available; standard deviation and confidence interval are undefined");
    }

    let margin = Z_95 * std_dev / (count as f64).sqrt();

    Ok(Summary {
        count,
        mean,
        std_dev,
        confidence_interval: Bounds {
            low: mean - margin,
            high: mean + margin,
        },
        percentile_range: Bounds {
            low: percentile_sorted(&sorted, LOWER_PERCENTILE),
            high: percentile_sorted(&sorted, UPPER_PERCENTILE),
        },
        min,
        max,
    })
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample standard deviation (n − 1 denominator), NaN below two values
pub fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Percentile `p` (0–100) of ascending `sorted` values, linearly interpolated
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (n - 1) as f64 * (p / 100.0).clamp(0.0, 1.0);
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let fraction = rank - lower as f64;
            (sorted[lower] + fraction * (sorted[upper] - sorted[lower])).min(sorted[upper])
        }
    }
}
