//! JSON reader
//!
//! Reads a JSON array of objects. Headers come from the keys of the first
//! object, in document order; later objects may add or omit keys (omitted
//! keys read as missing values). Booleans and nested values are
//! stringified so the cell boundary stays string | number | date | null.

use std::path::Path;

use crate::reader::{ensure_headers, TableReader};
use crate::table::{CellValue, Row, Table};
use crate::{GlimpseError, Result};

/// Reader for JSON arrays of objects.
#[derive(Debug, Clone, Default)]
pub struct JsonReader;

impl JsonReader {
    pub fn new() -> Self {
        Self
    }

    /// Build a table from an already-parsed JSON value. The REST endpoint
    /// uses this directly on request bodies.
    pub fn table_from_value(&self, value: &serde_json::Value) -> Result<Table> {
        let records = value.as_array().ok_or_else(|| {
            GlimpseError::Reader("invalid JSON format: expected an array of objects".to_string())
        })?;

        if records.is_empty() {
            return Ok(Table::default());
        }

        let objects: Vec<&serde_json::Map<String, serde_json::Value>> = records
            .iter()
            .map(|r| {
                r.as_object().ok_or_else(|| {
                    GlimpseError::Reader(
                        "invalid JSON format: expected an array of objects".to_string(),
                    )
                })
            })
            .collect::<Result<_>>()?;

        let headers: Vec<String> = objects[0].keys().cloned().collect();
        ensure_headers(&headers)?;

        let rows: Vec<Row> = objects
            .iter()
            .map(|obj| {
                obj.iter()
                    .filter(|(key, _)| headers.contains(key))
                    .map(|(key, value)| (key.clone(), cell_from_json(value)))
                    .collect()
            })
            .collect();

        Ok(Table::new(headers, rows))
    }
}

impl TableReader for JsonReader {
    fn read(&self, path: &Path) -> Result<Table> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GlimpseError::Reader(format!("failed to read JSON file: {e}")))?;
        let value: serde_json::Value = serde_json::from_str(&contents)
            .map_err(|e| GlimpseError::Reader(format!("invalid JSON syntax: {e}")))?;
        self.table_from_value(&value)
    }
}

/// Map a JSON value onto the cell boundary.
pub fn cell_from_json(value: &serde_json::Value) -> CellValue {
    match value {
        serde_json::Value::Null => CellValue::Null,
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if f.is_finite() => CellValue::Number(f),
            _ => CellValue::String(n.to_string()),
        },
        serde_json::Value::String(s) => CellValue::String(s.clone()),
        serde_json::Value::Bool(b) => CellValue::String(b.to_string()),
        // Nested arrays/objects become their compact JSON text.
        other => CellValue::String(other.to_string()),
    }
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
    fn test_read_array_of_objects() {
        let file = write_temp(r#"[{"name":"a","n":1},{"name":"b","n":2.5}]"#);
        let table = JsonReader::new().read(file.path()).unwrap();

        assert_eq!(table.headers(), ["name", "n"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0]["n"], CellValue::Number(1.0));
        assert_eq!(table.rows()[1]["name"], CellValue::from("b"));
    }

    #[test]
    fn test_headers_keep_document_order() {
        let file = write_temp(r#"[{"z":1,"a":2,"m":3}]"#);
        let table = JsonReader::new().read(file.path()).unwrap();
        assert_eq!(table.headers(), ["z", "a", "m"]);
    }

    #[test]
    fn test_missing_keys_read_as_missing() {
        let file = write_temp(r#"[{"a":1,"b":2},{"a":3}]"#);
        let table = JsonReader::new().read(file.path()).unwrap();

        let b = table.column_values("b");
        assert_eq!(b[0], &CellValue::Number(2.0));
        assert!(b[1].is_missing());
    }

    #[test]
    fn test_extra_keys_in_later_objects_are_ignored() {
        // Headers come from the first object only.
        let file = write_temp(r#"[{"a":1},{"a":2,"surprise":3}]"#);
        let table = JsonReader::new().read(file.path()).unwrap();
        assert_eq!(table.headers(), ["a"]);
    }

    #[test]
    fn test_booleans_and_nested_values_stringify() {
        let file = write_temp(r#"[{"flag":true,"tags":["x","y"]}]"#);
        let table = JsonReader::new().read(file.path()).unwrap();
        assert_eq!(table.rows()[0]["flag"], CellValue::from("true"));
        assert_eq!(table.rows()[0]["tags"], CellValue::from(r#"["x","y"]"#));
    }

    #[test]
    fn test_empty_array_is_empty_table() {
        let file = write_temp("[]");
        let table = JsonReader::new().read(file.path()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_non_array_rejected() {
        let file = write_temp(r#"{"a":1}"#);
        assert!(JsonReader::new().read(file.path()).is_err());
    }

    #[test]
    fn test_array_of_non_objects_rejected() {
        let file = write_temp("[1,2,3]");
        assert!(JsonReader::new().read(file.path()).is_err());
    }

    #[test]
    fn test_invalid_syntax_rejected() {
        let file = write_temp("not json");
        assert!(JsonReader::new().read(file.path()).is_err());
    }
}
