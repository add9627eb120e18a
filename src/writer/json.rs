//! JSON report writer
//!
//! Serializes a [`DatasetReport`] for the client renderer. Field names are
//! camelCase, frequency keys are plain strings, and NaN statistics come
//! out as `null` — exactly the shape the renderer's "N/A" handling
//! expects.

use crate::api::DatasetReport;
use crate::writer::ReportWriter;
use crate::{GlimpseError, Result};

/// Writer producing the renderer-facing JSON document.
#[derive(Debug, Clone, Default)]
pub struct JsonReportWriter {
    pretty: bool,
}

impl JsonReportWriter {
    /// Compact output.
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Human-readable, indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl ReportWriter for JsonReportWriter {
    fn write(&self, report: &DatasetReport) -> Result<String> {
        let result = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        result.map_err(|e| GlimpseError::Writer(format!("failed to serialize report: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CellValue, Row, Table};

    fn sample_report() -> DatasetReport {
        let rows: Vec<Row> = vec![
            [("browser".to_string(), CellValue::from("chrome"))]
                .into_iter()
                .collect(),
            [("browser".to_string(), CellValue::from("safari"))]
                .into_iter()
                .collect(),
        ];
        let table = Table::new(vec!["browser".to_string()], rows);
        DatasetReport::build(&table)
    }

    #[test]
    fn test_compact_output_shape() {
        let json = JsonReportWriter::new().write(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["metadata"]["rows"], 2);
        assert_eq!(
            value["analysis"]["browser"]["uniqueValues"]["chrome"],
            1
        );
        assert_eq!(value["suggestions"][0]["type"], "Bar");
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let json = JsonReportWriter::pretty().write(&sample_report()).unwrap();
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_nan_statistics_serialize_as_null() {
        // A date column's mean is NaN by contract; JSON has no NaN.
        let rows: Vec<Row> = ["2024-01-01", "2024-02-01", "2024-03-01"]
            .iter()
            .map(|d| {
                [("day".to_string(), CellValue::from(*d))]
                    .into_iter()
                    .collect()
            })
            .collect();
        let table = Table::new(vec!["day".to_string()], rows);
        let report = DatasetReport::build(&table);

        let json = JsonReportWriter::new().write(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["analysis"]["day"]["stats"]["mean"].is_null());
        assert!(value["analysis"]["day"]["stats"]["min"].is_number());
    }
}
