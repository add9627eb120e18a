/*!
# glimpse - Dataset Analysis & Chart Suggestions

Automatic column-level statistical analysis and chart-type recommendations
for tabular datasets.

Upload a CSV, JSON, or Excel file; glimpse infers each column's semantic
type (numerical, categorical, date, other), computes descriptive
statistics, and derives a ranked list of recommended visualizations for a
client-side renderer.

## Example

```rust,ignore
use glimpse::{reader::load_table, DatasetReport};

let table = load_table(Path::new("sales.csv"))?;
let report = DatasetReport::build(&table);
for suggestion in &report.suggestions {
    println!("{} ({:.2}): {}", suggestion.chart_type, suggestion.score, suggestion.title);
}
```

## Architecture

The pipeline is a chain of pure transformations:

- **readers** → parse files into a [`Table`] of raw cells
- [`classify`] → infer each column's semantic type via an ordered rule chain
- [`stats`] → descriptive statistics and frequency tables
- [`analyze`] → per-column orchestration into an [`AnalysisResult`]
- [`suggest`] → ranked [`ChartSuggestion`] list
- **writers** → serialize the report for the renderer

Analysis and suggestion generation are synchronous, side-effect-free
functions of their input; concurrent calls on different tables need no
coordination.

## Core Components

- [`table`] - Input table and cell value types
- [`classify`] - Column type classification
- [`stats`] - Statistics calculator
- [`analyze`] - Column analyzer
- [`suggest`] - Suggestion engine
- [`reader`] - File format abstraction layer
- [`writer`] - Report output abstraction layer
*/

pub mod analyze;
pub mod api;
pub mod classify;
pub mod reader;
pub mod stats;
pub mod suggest;
pub mod table;
pub mod writer;

// Re-export key types for convenience
pub use analyze::{analyze_table, analyze_table_with, AnalysisResult, ColumnAnalysis};
pub use api::{DatasetMetadata, DatasetReport};
pub use classify::{ClassifierOptions, ColumnDataType};
pub use stats::{FrequencyKey, FrequencyTable, NumericStats};
pub use suggest::{suggest_charts, ChartSuggestion, ChartType, ColumnRef};
pub use table::{CellValue, Row, Table};

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum GlimpseError {
    #[error("Reader error: {0}")]
    Reader(String),

    #[error("Writer error: {0}")]
    Writer(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, GlimpseError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
