//! File reader abstraction layer for glimpse
//!
//! The reader module turns uploaded files into [`Table`] values for the
//! analysis core. Each format implements the [`TableReader`] trait;
//! [`load_table`] dispatches on the file extension.
//!
//! Readers perform all file-format interpretation — the core itself never
//! touches files. They apply light dynamic typing (numbers, nulls, Excel
//! date cells) but leave semantic type inference to the classifier.
//!
//! # Example
//!
//! ```rust,ignore
//! use glimpse::reader::load_table;
//!
//! let table = load_table(Path::new("data.csv"))?;
//! let report = DatasetReport::build(&table);
//! ```

use std::path::Path;

use crate::table::Table;
use crate::{GlimpseError, Result};

pub mod csv;
pub mod json;

#[cfg(feature = "excel")]
pub mod excel;

pub use self::csv::CsvReader;
pub use self::json::JsonReader;

#[cfg(feature = "excel")]
pub use self::excel::ExcelReader;

/// Trait for tabular file readers.
///
/// Readers parse one file format into the common table shape. They trust
/// nothing about the file but guarantee the table invariants on success:
/// unique non-empty headers, one cell map per row.
pub trait TableReader {
    /// Parse the file at `path` into a table.
    ///
    /// # Errors
    ///
    /// Returns [`GlimpseError::Reader`] when the file cannot be opened,
    /// is syntactically invalid, or has an unusable header row.
    fn read(&self, path: &Path) -> Result<Table>;
}

/// Load a table from a file, choosing the reader by extension.
///
/// Supported: `csv`, `tsv`, `json`, and (with the `excel` feature) `xlsx`,
/// `xls`, `xlsm`, `xlsb`, `ods`.
pub fn load_table(path: &Path) -> Result<Table> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => CsvReader::new().read(path),
        "tsv" => CsvReader::with_delimiter(b'\t').read(path),
        "json" => JsonReader::new().read(path),
        #[cfg(feature = "excel")]
        "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => ExcelReader::new().read(path),
        _ => Err(GlimpseError::Reader(format!(
            "unsupported file type '{extension}': upload CSV, JSON, or Excel files"
        ))),
    }
}

/// Validate a parsed header row: non-empty, no blank names, no duplicates.
pub(crate) fn ensure_headers(headers: &[String]) -> Result<()> {
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(GlimpseError::Reader(
            "could not parse headers: is the file empty or the first row blank?".to_string(),
        ));
    }
    let mut seen = std::collections::HashSet::new();
    for header in headers {
        if !seen.insert(header.as_str()) {
            return Err(GlimpseError::Reader(format!(
                "duplicate column header '{header}'"
            )));
        }
    }
    Ok(())
}
