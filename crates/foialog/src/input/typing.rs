//! Lightweight column type recognition.
//!
//! The pipeline itself never re-types a column; this sketch backs the CLI
//! `inspect` command so stale vocabularies and mistyped columns are visible
//! before a run.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::source::is_missing;

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(),
        Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap(),
        Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").unwrap(),
    ]
});

static CURRENCY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?\d{1,3}(,\d{3})*(\.\d+)?$").unwrap());

/// Broad type of a column's non-missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Date,
    Text,
}

impl ColumnType {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Text => "text",
        }
    }
}

fn looks_like_date(value: &str) -> bool {
    if !DATE_PATTERNS.iter().any(|re| re.is_match(value)) {
        return false;
    }
    // Confirm the shape actually parses as a calendar date.
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(value, "%m/%d/%Y").is_ok()
        || NaiveDate::parse_from_str(value, "%m-%d-%Y").is_ok()
}

fn looks_like_boolean(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "yes" | "no" | "true" | "false"
    )
}

/// Sketch the type of a column from its values.
///
/// A type wins when at least 90% of the non-missing values fit it; columns
/// with no non-missing values, and everything else, report as text.
pub fn sketch_column_type<'a>(values: impl Iterator<Item = &'a str>) -> ColumnType {
    let mut total = 0usize;
    let mut integers = 0usize;
    let mut floats = 0usize;
    let mut booleans = 0usize;
    let mut dates = 0usize;

    for value in values {
        if is_missing(value) {
            continue;
        }
        total += 1;

        if value.parse::<i64>().is_ok() {
            integers += 1;
            floats += 1;
        } else if value.parse::<f64>().is_ok() || CURRENCY.is_match(value) {
            floats += 1;
        } else if looks_like_boolean(value) {
            booleans += 1;
        } else if looks_like_date(value) {
            dates += 1;
        }
    }

    if total == 0 {
        return ColumnType::Text;
    }

    let majority = |count: usize| count * 10 >= total * 9;

    if majority(integers) {
        ColumnType::Integer
    } else if majority(floats) {
        ColumnType::Float
    } else if majority(booleans) {
        ColumnType::Boolean
    } else if majority(dates) {
        ColumnType::Date
    } else {
        ColumnType::Text
    }
}
