//! CSV / TSV reader
//!
//! Reads delimiter-separated files with a header row. Cells get the same
//! dynamic typing the browser parser applied: numeric strings become
//! numbers, blank cells become nulls, everything else stays text. Date
//! detection is NOT done here; date-looking strings pass through for the
//! classifier to judge.

use std::path::Path;

use crate::reader::{ensure_headers, TableReader};
use crate::table::{CellValue, Row, Table};
use crate::{GlimpseError, Result};

/// Reader for CSV-like files.
#[derive(Debug, Clone)]
pub struct CsvReader {
    delimiter: u8,
}

impl CsvReader {
    /// Comma-separated reader.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Reader with an explicit delimiter (e.g. `b'\t'` for TSV).
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableReader for CsvReader {
    fn read(&self, path: &Path) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|e| GlimpseError::Reader(format!("failed to open CSV file: {e}")))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| GlimpseError::Reader(format!("failed to read CSV headers: {e}")))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        ensure_headers(&headers)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| GlimpseError::Reader(format!("failed to read CSV row: {e}")))?;
            let row: Row = headers
                .iter()
                .zip(record.iter())
                .map(|(header, field)| (header.clone(), dynamic_type(field)))
                .collect();
            rows.push(row);
        }

        Ok(Table::new(headers, rows))
    }
}

/// Dynamic typing for a raw CSV field: empty → null, finite number →
/// number, anything else → string (untrimmed, so the missing-value rule
/// still sees the original text).
fn dynamic_type(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() {
            return CellValue::Number(n);
        }
    }
    CellValue::String(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_basic_csv() {
        let file = write_temp("browser,visitors\nchrome,5\nsafari,3\nchrome,2\n");
        let table = CsvReader::new().read(file.path()).unwrap();

        assert_eq!(table.headers(), ["browser", "visitors"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.rows()[0]["visitors"],
            CellValue::Number(5.0)
        );
        assert_eq!(table.rows()[1]["browser"], CellValue::from("safari"));
    }

    #[test]
    fn test_empty_cells_become_null() {
        let file = write_temp("a,b\n1,\n,2\n");
        let table = CsvReader::new().read(file.path()).unwrap();

        assert_eq!(table.rows()[0]["b"], CellValue::Null);
        assert_eq!(table.rows()[1]["a"], CellValue::Null);
    }

    #[test]
    fn test_short_rows_read_as_missing() {
        let file = write_temp("a,b,c\n1,2\n");
        let table = CsvReader::new().read(file.path()).unwrap();

        let c = table.column_values("c");
        assert_eq!(c.len(), 1);
        assert!(c[0].is_missing());
    }

    #[test]
    fn test_non_numeric_text_stays_text() {
        let file = write_temp("v\n12ab\nnan\n");
        let table = CsvReader::new().read(file.path()).unwrap();
        assert_eq!(table.rows()[0]["v"], CellValue::from("12ab"));
        // "nan" parses to a float NaN, which is not a finite number.
        assert_eq!(table.rows()[1]["v"], CellValue::from("nan"));
    }

    #[test]
    fn test_tsv_delimiter() {
        let file = write_temp("a\tb\n1\tx\n");
        let table = CsvReader::with_delimiter(b'\t').read(file.path()).unwrap();
        assert_eq!(table.headers(), ["a", "b"]);
        assert_eq!(table.rows()[0]["a"], CellValue::Number(1.0));
    }

    #[test]
    fn test_duplicate_headers_rejected() {
        let file = write_temp("a,a\n1,2\n");
        assert!(CsvReader::new().read(file.path()).is_err());
    }
}
