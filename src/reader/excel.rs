//! Excel reader
//!
//! Reads the first worksheet of an Excel workbook. The first row is the
//! header row; date cells come through as real date values (the classifier
//! then sees them as dates without string parsing), numbers stay numeric,
//! booleans are stringified, blank and error cells read as missing.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::reader::{ensure_headers, TableReader};
use crate::table::{CellValue, Row, Table};
use crate::{GlimpseError, Result};

/// Reader for `xlsx`, `xls`, `xlsm`, `xlsb` and `ods` workbooks.
#[derive(Debug, Clone, Default)]
pub struct ExcelReader;

impl ExcelReader {
    pub fn new() -> Self {
        Self
    }
}

impl TableReader for ExcelReader {
    fn read(&self, path: &Path) -> Result<Table> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| GlimpseError::Reader(format!("failed to open Excel file: {e}")))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| GlimpseError::Reader("Excel file contains no sheets".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| GlimpseError::Reader(format!("failed to read worksheet: {e}")))?;

        let mut rows_iter = range.rows();

        let headers: Vec<String> = rows_iter
            .next()
            .map(|row| row.iter().map(header_text).collect())
            .unwrap_or_default();
        ensure_headers(&headers)?;

        let rows: Vec<Row> = rows_iter
            .map(|cells| {
                headers
                    .iter()
                    .zip(cells.iter())
                    .map(|(header, cell)| (header.clone(), convert_cell(cell)))
                    .collect()
            })
            .collect();

        Ok(Table::new(headers, rows))
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Map one worksheet cell onto the cell boundary.
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) if f.is_finite() => CellValue::Number(*f),
        Data::Float(_) => CellValue::Null,
        Data::Bool(b) => CellValue::String(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => CellValue::Date(naive),
            None => CellValue::Null,
        },
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        // Formula errors behave like blank cells.
        Data::Error(_) => CellValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell_scalars() {
        assert_eq!(convert_cell(&Data::Empty), CellValue::Null);
        assert_eq!(
            convert_cell(&Data::String("hi".to_string())),
            CellValue::from("hi")
        );
        assert_eq!(convert_cell(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::from("true"));
    }

    #[test]
    fn test_error_cells_read_as_missing() {
        assert_eq!(
            convert_cell(&Data::Error(calamine::CellErrorType::Div0)),
            CellValue::Null
        );
    }

    #[test]
    fn test_missing_file_is_reader_error() {
        let err = ExcelReader::new()
            .read(Path::new("/nonexistent/data.xlsx"))
            .unwrap_err();
        assert!(matches!(err, GlimpseError::Reader(_)));
    }
}
