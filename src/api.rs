//! High-level glimpse API.
//!
//! One-call facade over the analysis pipeline: `DatasetReport::build()`
//! runs column analysis and suggestion generation and bundles both with
//! dataset metadata, ready for serialization to a renderer.

use serde::Serialize;

use crate::analyze::{analyze_table, analyze_table_with, AnalysisResult};
use crate::classify::ClassifierOptions;
use crate::suggest::{suggest_charts, ChartSuggestion};
use crate::table::Table;

/// Metadata about the analyzed dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetMetadata {
    /// Number of rows in the source table.
    pub rows: usize,
    /// Column headers, in table order.
    pub columns: Vec<String>,
}

/// Full analysis report: metadata, per-column analyses, and ranked chart
/// suggestions. Created fresh on every build; holds no reference to the
/// source table.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    pub metadata: DatasetMetadata,
    pub analysis: AnalysisResult,
    pub suggestions: Vec<ChartSuggestion>,
}

impl DatasetReport {
    /// Analyze a table with default classifier options.
    pub fn build(table: &Table) -> Self {
        let analysis = analyze_table(table);
        Self::assemble(table, analysis)
    }

    /// Analyze a table with explicit classifier options.
    pub fn build_with(table: &Table, options: &ClassifierOptions) -> Self {
        let analysis = analyze_table_with(table, options);
        Self::assemble(table, analysis)
    }

    fn assemble(table: &Table, analysis: AnalysisResult) -> Self {
        let suggestions = suggest_charts(&analysis);
        Self {
            metadata: DatasetMetadata {
                rows: table.row_count(),
                columns: table.headers().to_vec(),
            },
            analysis,
            suggestions,
        }
    }

    /// Number of suggestions in the report.
    pub fn suggestion_count(&self) -> usize {
        self.suggestions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CellValue, Row};

    fn sample_table() -> Table {
        let rows = vec![
            [
                ("browser".to_string(), CellValue::from("chrome")),
                ("visitors".to_string(), CellValue::Number(5.0)),
            ]
            .into_iter()
            .collect::<Row>(),
            [
                ("browser".to_string(), CellValue::from("safari")),
                ("visitors".to_string(), CellValue::Number(3.0)),
            ]
            .into_iter()
            .collect::<Row>(),
        ];
        Table::new(vec!["browser".to_string(), "visitors".to_string()], rows)
    }

    #[test]
    fn test_report_metadata() {
        let report = DatasetReport::build(&sample_table());
        assert_eq!(report.metadata.rows, 2);
        assert_eq!(report.metadata.columns, vec!["browser", "visitors"]);
        assert_eq!(report.analysis.len(), 2);
    }

    #[test]
    fn test_report_empty_table() {
        let report = DatasetReport::build(&Table::default());
        assert_eq!(report.metadata.rows, 0);
        assert!(report.analysis.is_empty());
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_report_serialization_shape() {
        let report = DatasetReport::build(&sample_table());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["metadata"]["rows"], 2);
        assert!(json["analysis"]["browser"]["uniqueValues"].is_object());
        assert!(json["suggestions"].is_array());
    }
}
