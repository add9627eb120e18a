//! Column type classification
//!
//! Infers the semantic type of a column from its raw cell values. The
//! heuristics are an explicit priority-ordered rule chain over a single
//! scan of the values, so each rule (and the date-majority threshold) can
//! be tested and tuned independently.
//!
//! # Classification order
//!
//! 1. **date-majority** — more than `date_fraction_threshold` of the
//!    non-missing values are date-like, and at least `min_date_values`
//!    such values exist.
//! 2. **all-numeric** — every non-missing value is numeric, and at least
//!    one exists.
//! 3. **any-present** — at least one non-missing value exists.
//! 4. Fall-through: the column is entirely missing.
//!
//! Date strings are frequently also numeric-parseable, so the date rule
//! runs first with a high-confidence threshold rather than letting the
//! numeric rule capture them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::table::CellValue;

// =============================================================================
// Column Data Types
// =============================================================================

/// Semantic type of a column, decided once at analysis time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDataType {
    Numerical,
    Categorical,
    Date,
    Other,
}

impl std::fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnDataType::Numerical => write!(f, "numerical"),
            ColumnDataType::Categorical => write!(f, "categorical"),
            ColumnDataType::Date => write!(f, "date"),
            ColumnDataType::Other => write!(f, "other"),
        }
    }
}

// =============================================================================
// Classifier Options
// =============================================================================

/// Tunable knobs for the classifier rule chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierOptions {
    /// Fraction of non-missing values that must be date-like before a
    /// column is classified as a date column. Strictly exceeded, not met.
    pub date_fraction_threshold: f64,
    /// Minimum number of date-like values for the date rule to apply.
    pub min_date_values: usize,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            date_fraction_threshold: 0.7,
            min_date_values: 2,
        }
    }
}

// =============================================================================
// Value Profile
// =============================================================================

/// Counts gathered in one pass over a column's values.
///
/// The rule chain operates on this profile only, never on the values
/// themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueProfile {
    /// Values that are not missing.
    pub non_missing: usize,
    /// Non-missing values passing the numeric check.
    pub numeric: usize,
    /// Non-missing values passing the date-like check.
    pub date_like: usize,
}

impl ValueProfile {
    /// Scan a column's cells, skipping missing values.
    pub fn scan<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        let mut profile = ValueProfile::default();
        for value in values {
            if value.is_missing() {
                continue;
            }
            profile.non_missing += 1;
            if value.as_f64().is_some() {
                profile.numeric += 1;
            }
            if is_date_like(value) {
                profile.date_like += 1;
            }
        }
        profile
    }

    /// Fraction of non-missing values that are date-like (NaN when the
    /// column is entirely missing, which no rule matches).
    pub fn date_fraction(&self) -> f64 {
        self.date_like as f64 / self.non_missing as f64
    }
}

// =============================================================================
// Rule Chain
// =============================================================================

/// One predicate → type rule in the classification chain.
pub struct TypeRule {
    /// Stable identifier, useful in diagnostics and tests.
    pub name: &'static str,
    /// Type assigned when the predicate matches.
    pub data_type: ColumnDataType,
    matches: fn(&ValueProfile, &ClassifierOptions) -> bool,
}

fn date_majority(profile: &ValueProfile, options: &ClassifierOptions) -> bool {
    profile.date_like >= options.min_date_values
        && profile.date_fraction() > options.date_fraction_threshold
}

fn all_numeric(profile: &ValueProfile, _options: &ClassifierOptions) -> bool {
    profile.non_missing > 0 && profile.numeric == profile.non_missing
}

fn any_present(profile: &ValueProfile, _options: &ClassifierOptions) -> bool {
    profile.non_missing > 0
}

/// The ordered rule chain. First match wins; no match means the column is
/// entirely missing and falls through to [`ColumnDataType::Other`].
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        name: "date-majority",
        data_type: ColumnDataType::Date,
        matches: date_majority,
    },
    TypeRule {
        name: "all-numeric",
        data_type: ColumnDataType::Numerical,
        matches: all_numeric,
    },
    TypeRule {
        name: "any-present",
        data_type: ColumnDataType::Categorical,
        matches: any_present,
    },
];

/// Classify a precomputed profile.
pub fn classify(profile: &ValueProfile, options: &ClassifierOptions) -> ColumnDataType {
    TYPE_RULES
        .iter()
        .find(|rule| (rule.matches)(profile, options))
        .map(|rule| rule.data_type)
        .unwrap_or(ColumnDataType::Other)
}

/// Scan and classify a column's cells in one call.
pub fn classify_values(values: &[&CellValue], options: &ClassifierOptions) -> ColumnDataType {
    classify(&ValueProfile::scan(values.iter().copied()), options)
}

// =============================================================================
// Date Detection
// =============================================================================

/// String shapes accepted as candidate dates. A candidate must also parse
/// into a valid date to count as date-like.
fn date_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // YYYY-MM-DD with optional trailing time
            Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("invalid date regex"),
            // M/D/YYYY with optional trailing time
            Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}").expect("invalid date regex"),
            // ISO-8601 timestamp, optionally fractional and zoned
            Regex::new(
                r"\d{4}-[01]\d-[0-3]\dT[0-2]\d:[0-5]\d:[0-5]\d(\.\d+)?([+-][0-2]\d:[0-5]\d|Z)?",
            )
            .expect("invalid date regex"),
        ]
    })
}

/// Whether a cell counts as a date for classification.
///
/// Date cells always do. Strings must match a known date shape AND parse
/// into a valid date, so `2024-13-40` and `2024-01-15garbage` do not count.
/// Plausible-range numeric timestamps are deliberately NOT date-like: they
/// are ambiguous with numeric IDs.
pub fn is_date_like(value: &CellValue) -> bool {
    match value {
        CellValue::Date(_) => true,
        CellValue::String(s) => {
            let trimmed = s.trim();
            date_patterns().iter().any(|p| p.is_match(trimmed))
                && parse_date_str(trimmed).is_some()
        }
        _ => false,
    }
}

/// Parse a cell into a date if possible. Date cells pass through; strings
/// go through the format list. Numbers and nulls never parse.
pub fn parse_date(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Date(d) => Some(*d),
        CellValue::String(s) => parse_date_str(s.trim()),
        _ => None,
    }
}

/// Datetime formats tried before falling back to plain dates.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only formats, completed with a midnight time.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

fn parse_date_str(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }

    // Zoned ISO-8601 timestamps ("...Z", "...+02:00")
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[CellValue]) -> Vec<&CellValue> {
        values.iter().collect()
    }

    fn classify_default(values: &[CellValue]) -> ColumnDataType {
        classify_values(&cells(values), &ClassifierOptions::default())
    }

    #[test]
    fn test_all_numeric_column() {
        let values = [
            CellValue::Number(1.0),
            CellValue::from("2"),
            CellValue::from(" 3.5 "),
        ];
        assert_eq!(classify_default(&values), ColumnDataType::Numerical);
    }

    #[test]
    fn test_mixed_column_is_categorical() {
        let values = [CellValue::from("a"), CellValue::Number(1.0)];
        assert_eq!(classify_default(&values), ColumnDataType::Categorical);
    }

    #[test]
    fn test_entirely_missing_column_is_other() {
        let values = [
            CellValue::Null,
            CellValue::from(""),
            CellValue::from("   "),
        ];
        assert_eq!(classify_default(&values), ColumnDataType::Other);
        assert_eq!(classify_default(&[]), ColumnDataType::Other);
    }

    #[test]
    fn test_missing_values_ignored_by_numeric_rule() {
        let values = [CellValue::from("1"), CellValue::Null, CellValue::from("2")];
        assert_eq!(classify_default(&values), ColumnDataType::Numerical);
    }

    #[test]
    fn test_date_majority() {
        let values = [
            CellValue::from("2024-01-01"),
            CellValue::from("2024-02-01"),
            CellValue::from("2024-03-01"),
        ];
        assert_eq!(classify_default(&values), ColumnDataType::Date);
    }

    #[test]
    fn test_date_fraction_boundary() {
        // 2 of 3 date-like = 0.67, below the 0.7 threshold: not a date column.
        let below = [
            CellValue::from("2024-01-01"),
            CellValue::from("2024-02-01"),
            CellValue::from("not-a-date"),
        ];
        assert_eq!(classify_default(&below), ColumnDataType::Categorical);

        // 3 of 4 date-like = 0.75, above the threshold: date column.
        let above = [
            CellValue::from("2024-01-01"),
            CellValue::from("2024-02-01"),
            CellValue::from("2024-03-01"),
            CellValue::from("not-a-date"),
        ];
        assert_eq!(classify_default(&above), ColumnDataType::Date);
    }

    #[test]
    fn test_exact_threshold_is_not_enough() {
        // Exactly 0.7 must NOT classify as date (strictly exceeded).
        let values: Vec<CellValue> = (0..7)
            .map(|i| CellValue::from(format!("2024-01-{:02}", i + 1)))
            .chain((0..3).map(|_| CellValue::from("junk")))
            .collect();
        assert_eq!(classify_default(&values), ColumnDataType::Categorical);
    }

    #[test]
    fn test_single_date_value_is_not_enough() {
        // One parseable date is 100% of non-missing values but below the
        // minimum count of 2.
        let values = [CellValue::from("2024-01-01")];
        assert_eq!(classify_default(&values), ColumnDataType::Categorical);
    }

    #[test]
    fn test_threshold_is_tunable() {
        let values = [
            CellValue::from("2024-01-01"),
            CellValue::from("2024-02-01"),
            CellValue::from("not-a-date"),
        ];
        let relaxed = ClassifierOptions {
            date_fraction_threshold: 0.5,
            ..Default::default()
        };
        assert_eq!(
            classify_values(&cells(&values), &relaxed),
            ColumnDataType::Date
        );
    }

    #[test]
    fn test_numeric_timestamps_are_not_dates() {
        // Millisecond-epoch sized numbers stay numerical.
        let values = [
            CellValue::Number(1700000000000.0),
            CellValue::Number(1700000100000.0),
            CellValue::Number(1700000200000.0),
        ];
        assert!(!is_date_like(&values[0]));
        assert_eq!(classify_default(&values), ColumnDataType::Numerical);
    }

    #[test]
    fn test_is_date_like_shapes() {
        assert!(is_date_like(&CellValue::from("2024-01-15")));
        assert!(is_date_like(&CellValue::from("1/15/2024")));
        assert!(is_date_like(&CellValue::from("12/5/2024")));
        assert!(is_date_like(&CellValue::from("2024-01-15T10:30:00")));
        assert!(is_date_like(&CellValue::from("2024-01-15T10:30:00Z")));
        assert!(is_date_like(&CellValue::from("2024-01-15T10:30:00+02:00")));

        assert!(!is_date_like(&CellValue::from("not-a-date")));
        assert!(!is_date_like(&CellValue::from("15.01.2024")));
        // Matches the shape but is not a valid calendar date.
        assert!(!is_date_like(&CellValue::from("2024-13-40")));
        // Matches the shape but has trailing garbage the parser rejects.
        assert!(!is_date_like(&CellValue::from("2024-01-15garbage")));
    }

    #[test]
    fn test_parse_date_values() {
        let parsed = parse_date(&CellValue::from("2024-01-15")).unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-15 00:00:00");

        let parsed = parse_date(&CellValue::from("1/15/2024")).unwrap();
        assert_eq!(parsed.date().format("%Y-%m-%d").to_string(), "2024-01-15");

        let parsed = parse_date(&CellValue::from("2024-01-15T10:30:00Z")).unwrap();
        assert_eq!(parsed.format("%H:%M:%S").to_string(), "10:30:00");

        assert!(parse_date(&CellValue::from("nope")).is_none());
        assert!(parse_date(&CellValue::Number(1700000000000.0)).is_none());
        assert!(parse_date(&CellValue::Null).is_none());
    }

    #[test]
    fn test_rule_chain_order() {
        // Date-looking strings are numeric-parseable supersets in other
        // systems; here the date rule must win before all-numeric is
        // consulted. A profile satisfying both resolves to Date.
        let profile = ValueProfile {
            non_missing: 3,
            numeric: 3,
            date_like: 3,
        };
        assert_eq!(
            classify(&profile, &ClassifierOptions::default()),
            ColumnDataType::Date
        );
    }

    #[test]
    fn test_rule_names_are_stable() {
        let names: Vec<&str> = TYPE_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["date-majority", "all-numeric", "any-present"]);
    }
}
