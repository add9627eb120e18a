//! Chart suggestion engine
//!
//! Turns a full [`AnalysisResult`] into a ranked list of chart
//! recommendations. Each rule is applied independently to every matching
//! column (or column pair), so a single column can yield several
//! suggestions; nothing is deduplicated or merged. The final list is
//! stable-sorted by descending score, ties keeping rule-application order.

use serde::Serialize;

use crate::analyze::AnalysisResult;
use crate::classify::ColumnDataType;

/// Recommendable chart types.
///
/// Every variant can be suggested even when no renderer exists for it yet;
/// the contract only guarantees suggestion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartType {
    Pie,
    Bar,
    Line,
    Histogram,
    BoxPlot,
    Scatter,
    Heatmap,
    StatsTable,
    PivotTable,
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ChartType::Pie => "Pie",
            ChartType::Bar => "Bar",
            ChartType::Line => "Line",
            ChartType::Histogram => "Histogram",
            ChartType::BoxPlot => "BoxPlot",
            ChartType::Scatter => "Scatter",
            ChartType::Heatmap => "Heatmap",
            ChartType::StatsTable => "StatsTable",
            ChartType::PivotTable => "PivotTable",
        };
        write!(f, "{}", name)
    }
}

/// A column a suggestion depends on, with the type it was analyzed as.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRef {
    pub header: String,
    #[serde(rename = "type")]
    pub data_type: ColumnDataType,
}

/// One recommended visualization. Immutable once created; consumed by the
/// renderer, never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSuggestion {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub description: String,
    /// Columns this suggestion depends on, in render order. Always
    /// consistent with the AnalysisResult the suggestion was derived from.
    pub required_columns: Vec<ColumnRef>,
    /// Relevance in [0, 1].
    pub score: f64,
}

/// Cardinality cap for pie charts; beyond this, slices become unreadable.
const PIE_MAX_CARDINALITY: usize = 10;

/// Derive ranked chart suggestions from a set of column analyses.
pub fn suggest_charts(analysis: &AnalysisResult) -> Vec<ChartSuggestion> {
    let mut suggestions = Vec::new();

    suggest_pies(analysis, &mut suggestions);
    suggest_bars(analysis, &mut suggestions);
    suggest_numeric_summaries(analysis, &mut suggestions);
    suggest_time_series(analysis, &mut suggestions);

    // Stable sort: equal scores keep rule-application order.
    suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
    suggestions
}

/// Low-cardinality categorical columns read well as proportions.
fn suggest_pies(analysis: &AnalysisResult, out: &mut Vec<ChartSuggestion>) {
    for column in analysis.values() {
        let Some(unique_values) = &column.unique_values else {
            continue;
        };
        let cardinality = unique_values.len();
        if column.data_type == ColumnDataType::Categorical
            && cardinality > 1
            && cardinality <= PIE_MAX_CARDINALITY
        {
            out.push(ChartSuggestion {
                chart_type: ChartType::Pie,
                title: format!("Distribution of {}", column.header),
                description: format!(
                    "Shows proportions for each category in '{}'.",
                    column.header
                ),
                required_columns: vec![ColumnRef {
                    header: column.header.clone(),
                    data_type: column.data_type,
                }],
                score: 0.8,
            });
        }
    }
}

/// Bar charts work for any categorical column, higher cardinality included.
fn suggest_bars(analysis: &AnalysisResult, out: &mut Vec<ChartSuggestion>) {
    for column in analysis.values() {
        let Some(unique_values) = &column.unique_values else {
            continue;
        };
        if column.data_type == ColumnDataType::Categorical && unique_values.len() > 1 {
            out.push(ChartSuggestion {
                chart_type: ChartType::Bar,
                title: format!("Counts per category in {}", column.header),
                description: format!(
                    "Compares counts across different categories in '{}'.",
                    column.header
                ),
                required_columns: vec![ColumnRef {
                    header: column.header.clone(),
                    data_type: column.data_type,
                }],
                score: 0.9,
            });
        }
    }
}

/// Numerical columns with more than one value get a stats table and a
/// histogram suggestion.
fn suggest_numeric_summaries(analysis: &AnalysisResult, out: &mut Vec<ChartSuggestion>) {
    for column in analysis.values() {
        if column.data_type != ColumnDataType::Numerical {
            continue;
        }
        let Some(stats) = &column.stats else { continue };
        if stats.count <= 1 {
            continue;
        }

        let required = vec![ColumnRef {
            header: column.header.clone(),
            data_type: column.data_type,
        }];
        out.push(ChartSuggestion {
            chart_type: ChartType::StatsTable,
            title: format!("Statistics for {}", column.header),
            description: format!(
                "Key summary statistics for the numerical column '{}'.",
                column.header
            ),
            required_columns: required.clone(),
            score: 0.95,
        });
        out.push(ChartSuggestion {
            chart_type: ChartType::Histogram,
            title: format!("Distribution of {}", column.header),
            description: format!(
                "Shows the frequency distribution of values in '{}'.",
                column.header
            ),
            required_columns: required,
            score: 0.7,
        });
    }
}

/// Exactly one line chart pairing the first date column with the first
/// numerical column, in header iteration order. Only one such pair is
/// suggested even when several qualify.
fn suggest_time_series(analysis: &AnalysisResult, out: &mut Vec<ChartSuggestion>) {
    let date_col = analysis
        .values()
        .find(|c| c.data_type == ColumnDataType::Date);
    let num_col = analysis
        .values()
        .find(|c| c.data_type == ColumnDataType::Numerical);

    if let (Some(date_col), Some(num_col)) = (date_col, num_col) {
        out.push(ChartSuggestion {
            chart_type: ChartType::Line,
            title: format!("Trend of {} over {}", num_col.header, date_col.header),
            description: format!(
                "Shows how '{}' changes over time based on '{}'.",
                num_col.header, date_col.header
            ),
            required_columns: vec![
                ColumnRef {
                    header: date_col.header.clone(),
                    data_type: date_col.data_type,
                },
                ColumnRef {
                    header: num_col.header.clone(),
                    data_type: num_col.data_type,
                },
            ],
            score: 0.85,
        });
    }
}
