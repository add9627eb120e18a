//! Input table types for glimpse
//!
//! This module defines the boundary between the file readers and the
//! analysis core: a [`Table`] of ordered headers and rows, where every cell
//! is a [`CellValue`]. Readers produce these values; the core only consumes
//! them and never interprets file formats itself.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;

/// Sentinel for cells a row does not carry at all.
static ABSENT: CellValue = CellValue::Null;

// =============================================================================
// Cell Values
// =============================================================================

/// A single raw cell value as produced by a reader.
///
/// The variants mirror what upstream parsers can emit: JSON null / blank
/// cells, numbers, text, and date cells (Excel date cells arrive as real
/// dates; date-looking *strings* stay strings until classification).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing cell (JSON null, blank Excel cell).
    Null,
    /// Numeric cell. Readers only emit finite values.
    Number(f64),
    /// Text cell.
    String(String),
    /// Date cell, serialized as an ISO-8601 string.
    Date(NaiveDateTime),
}

impl CellValue {
    /// Missing-value rule: null, or a string that is empty after trimming.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric view of this cell: a finite number, or a non-empty string
    /// that parses to a finite number. Dates are not numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            _ => None,
        }
    }

    /// Display form used for categorical frequency keys and reports.
    ///
    /// Integer-valued numbers render without a fractional part so that
    /// `5.0` and `5` collapse to the same key.
    pub fn display_string(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::String(s) => s.clone(),
            CellValue::Date(d) => d.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

/// Render a number the way report keys expect: no trailing `.0` for
/// integer-valued floats, plain `to_string` otherwise.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

// =============================================================================
// Table
// =============================================================================

/// One row of a table: header name → raw cell value.
pub type Row = HashMap<String, CellValue>;

/// A parsed tabular dataset.
///
/// Headers are ordered and unique; rows are ordered. A row is a mapping from
/// header to cell — a header a row does not mention reads as a missing value,
/// never as an error.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create a table from ordered headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Ordered column headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows, in input order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// A table with no headers or no rows has nothing to analyze.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }

    /// Extract the column for `header` across all rows, in row order.
    ///
    /// Rows that lack the header contribute a null cell, so the returned
    /// vector always has one entry per row.
    pub fn column_values(&self, header: &str) -> Vec<&CellValue> {
        self.rows
            .iter()
            .map(|row| row.get(header).unwrap_or(&ABSENT))
            .collect()
    }
}
