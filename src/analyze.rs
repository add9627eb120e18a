//! Per-column analysis orchestration
//!
//! Walks a [`Table`] column by column: partitions each column into missing
//! and non-missing values, classifies it, and attaches the statistics that
//! fit the inferred type. Columns are independent of one another, so
//! analyzing one never observes state from another.

use indexmap::IndexMap;
use serde::Serialize;

use crate::classify::{self, ClassifierOptions, ColumnDataType};
use crate::stats::{
    compute_date_stats, compute_frequencies, compute_numeric_stats, FrequencyTable, NumericStats,
};
use crate::table::{CellValue, Table};

/// Analysis record for a single column.
///
/// Exactly one of `stats` (numerical/date columns) or `unique_values`
/// (categorical columns) is present; `other` columns carry neither.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAnalysis {
    pub header: String,
    #[serde(rename = "type")]
    pub data_type: ColumnDataType,
    /// Total row count of the table.
    pub total_count: usize,
    /// Rows whose cell for this column is missing.
    pub missing_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<NumericStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_values: Option<FrequencyTable>,
}

/// Header → analysis record, one entry per header in header order.
pub type AnalysisResult = IndexMap<String, ColumnAnalysis>;

/// Analyze every column of a table with default classifier options.
///
/// A table with zero headers or zero rows yields an empty result: that is
/// a valid terminal state, not an error.
pub fn analyze_table(table: &Table) -> AnalysisResult {
    analyze_table_with(table, &ClassifierOptions::default())
}

/// Analyze every column with explicit classifier options.
pub fn analyze_table_with(table: &Table, options: &ClassifierOptions) -> AnalysisResult {
    let mut result = AnalysisResult::new();
    if table.is_empty() {
        return result;
    }

    for header in table.headers() {
        let values = table.column_values(header);
        let analysis = analyze_column(header, &values, table.row_count(), options);
        result.insert(header.clone(), analysis);
    }
    result
}

/// Analyze one column given all of its cells across the table's rows.
pub fn analyze_column(
    header: &str,
    values: &[&CellValue],
    total_count: usize,
    options: &ClassifierOptions,
) -> ColumnAnalysis {
    let non_missing: Vec<&CellValue> = values
        .iter()
        .copied()
        .filter(|v| !v.is_missing())
        .collect();
    let missing_count = total_count - non_missing.len();
    let data_type = classify::classify_values(&non_missing, options);

    let mut analysis = ColumnAnalysis {
        header: header.to_string(),
        data_type,
        total_count,
        missing_count,
        stats: None,
        unique_values: None,
    };

    match data_type {
        ColumnDataType::Numerical => {
            // Classification required every non-missing value to pass the
            // numeric check, so nothing is dropped here.
            let numbers: Vec<f64> = non_missing.iter().filter_map(|v| v.as_f64()).collect();
            analysis.stats = Some(compute_numeric_stats(&numbers));
        }
        ColumnDataType::Date => {
            // Values that fail to parse are silently dropped from the date
            // sample; the column keeps its date type regardless.
            let mut dates: Vec<_> = non_missing
                .iter()
                .filter_map(|v| classify::parse_date(v))
                .collect();
            dates.sort();
            analysis.stats = Some(compute_date_stats(&dates));
        }
        ColumnDataType::Categorical => {
            analysis.unique_values = Some(compute_frequencies(&non_missing));
        }
        ColumnDataType::Other => {}
    }

    analysis
}
