//! Descriptive statistics and frequency tables
//!
//! Numeric summaries for numerical and date columns, and insertion-ordered
//! frequency tables for categorical columns. Empty input yields all-NaN
//! statistics by contract; callers treat NaN as "undefined" rather than
//! propagating it into further arithmetic.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::hash::{Hash, Hasher};

use crate::table::{format_number, CellValue};

// =============================================================================
// Numeric Statistics
// =============================================================================

/// Summary statistics for a numerical or date column.
///
/// For date columns, `min`/`max` carry millisecond-epoch values of the
/// earliest/latest date while `mean`/`median`/`stddev` are NaN: only range
/// statistics apply to dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericStats {
    /// Number of values the statistics were computed from.
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    #[serde(rename = "stddev")]
    pub std_dev: f64,
    /// First quartile (median of the lower half, median excluded for odd
    /// counts). Absent when fewer than two values exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q1: Option<f64>,
    /// Third quartile, same rule as `q1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q3: Option<f64>,
}

impl NumericStats {
    /// The empty-input contract: count 0, every statistic NaN.
    pub fn empty() -> Self {
        Self {
            count: 0,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            median: f64::NAN,
            std_dev: f64::NAN,
            q1: None,
            q3: None,
        }
    }
}

/// Compute summary statistics over a sequence of real numbers.
///
/// The standard deviation is the population standard deviation (divide by
/// N, not N−1); the median averages the two central elements for even
/// counts. Sorting is numeric, never lexicographic.
pub fn compute_numeric_stats(values: &[f64]) -> NumericStats {
    let count = values.len();
    if count == 0 {
        return NumericStats::empty();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mean = sorted.iter().sum::<f64>() / count as f64;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

    NumericStats {
        count,
        min: sorted[0],
        max: sorted[count - 1],
        mean,
        median: median_of_sorted(&sorted),
        std_dev: variance.sqrt(),
        q1: quartile_half(&sorted[..count / 2]),
        q3: quartile_half(&sorted[count.div_ceil(2)..]),
    }
}

/// Compute date-column statistics by mapping each date to its
/// millisecond-epoch value and reusing the numeric calculator for the
/// range. Mean, median and deviation are not meaningful for dates and are
/// reported as NaN.
pub fn compute_date_stats(dates: &[NaiveDateTime]) -> NumericStats {
    let epochs: Vec<f64> = dates
        .iter()
        .map(|d| d.and_utc().timestamp_millis() as f64)
        .collect();
    let mut stats = compute_numeric_stats(&epochs);
    stats.mean = f64::NAN;
    stats.median = f64::NAN;
    stats.std_dev = f64::NAN;
    stats.q1 = None;
    stats.q3 = None;
    stats
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

fn quartile_half(half: &[f64]) -> Option<f64> {
    if half.is_empty() {
        None
    } else {
        Some(median_of_sorted(half))
    }
}

// =============================================================================
// Frequency Tables
// =============================================================================

/// Normalized key of a categorical frequency table.
///
/// Numeric cells key by their numeric value so `5` and `5.0` collapse;
/// everything else keys by its string representation. Keys serialize as
/// strings (JSON object keys), numbers in canonical integer-style form.
#[derive(Debug, Clone)]
pub enum FrequencyKey {
    Number(f64),
    Text(String),
}

impl FrequencyKey {
    /// Normalize a non-missing cell into a frequency key. Only numeric
    /// cells key numerically; a numeric-looking string keys as text.
    pub fn from_cell(value: &CellValue) -> Self {
        match value {
            // `+ 0.0` collapses -0.0 into 0.0 so both hash to the same key.
            CellValue::Number(n) if n.is_finite() => FrequencyKey::Number(*n + 0.0),
            _ => FrequencyKey::Text(value.display_string()),
        }
    }
}

impl PartialEq for FrequencyKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FrequencyKey::Number(a), FrequencyKey::Number(b)) => a.to_bits() == b.to_bits(),
            (FrequencyKey::Text(a), FrequencyKey::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FrequencyKey {}

impl Hash for FrequencyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            FrequencyKey::Number(n) => {
                state.write_u8(0);
                state.write_u64(n.to_bits());
            }
            FrequencyKey::Text(s) => {
                state.write_u8(1);
                s.hash(state);
            }
        }
    }
}

impl std::fmt::Display for FrequencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrequencyKey::Number(n) => write!(f, "{}", format_number(*n)),
            FrequencyKey::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for FrequencyKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Distinct value → occurrence count, in first-seen order. The stable
/// iteration order keeps rendering deterministic for a given call.
pub type FrequencyTable = IndexMap<FrequencyKey, u64>;

/// Count occurrences of each distinct value. Callers pass non-missing
/// values only; no numeric binning happens here (that is Histogram
/// territory, not frequency territory).
pub fn compute_frequencies(values: &[&CellValue]) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for value in values {
        *table.entry(FrequencyKey::from_cell(value)).or_insert(0) += 1;
    }
    table
}
