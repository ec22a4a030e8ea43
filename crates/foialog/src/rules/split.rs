//! Composite-field splits: derive categorical + free-text fields from one
//! noisy source field.

use serde::{Deserialize, Serialize};

use crate::input::{is_missing, MISSING};

use super::{contains_ci, strip_prefix_ci};

/// Flag labels for the fulfillment split, in matching order.
const FLAG_PREFIXES: [&str; 3] = ["Yes", "No", "Partial"];

/// One keyword group for status-detail classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailGroup {
    /// Canonical label assigned when any keyword matches.
    pub label: String,
    /// Case-insensitive substrings, any of which selects this group.
    pub keywords: Vec<String>,
}

impl DetailGroup {
    /// Build a group from a label and keyword list.
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn matches(&self, value: &str) -> bool {
        self.keywords.iter().any(|k| contains_ci(value, k))
    }
}

/// A derivation of new fields from one source field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeriveOp {
    /// Derive {Flag, Detail} from a prefix-normalized source.
    ///
    /// Flag is an explicit four-way classification: a value starting with
    /// "Yes", "No", or "Partial" takes that label; everything else is
    /// "Other". Detail is the source minus the matched flag token, with one
    /// leading ", " separator stripped.
    FlagDetail {
        source: String,
        flag_field: String,
        detail_field: String,
    },

    /// Derive {Overall, Detail} from a status field.
    ///
    /// Overall matches the leading token against a closed label set anchored
    /// at string start. Detail classifies the FULL original string against
    /// the ordered keyword groups; first matching group wins, no match is
    /// missing. Group order is significant: broad keyword sets sit after the
    /// specific groups that subsume them.
    StatusDetail {
        source: String,
        overall_field: String,
        detail_field: String,
        overall_labels: Vec<String>,
        groups: Vec<DetailGroup>,
    },
}

impl DeriveOp {
    /// The source field this derivation reads.
    pub fn source(&self) -> &str {
        match self {
            DeriveOp::FlagDetail { source, .. } => source,
            DeriveOp::StatusDetail { source, .. } => source,
        }
    }

    /// The fields this derivation creates, in creation order.
    pub fn derived_fields(&self) -> [&str; 2] {
        match self {
            DeriveOp::FlagDetail {
                flag_field,
                detail_field,
                ..
            } => [flag_field, detail_field],
            DeriveOp::StatusDetail {
                overall_field,
                detail_field,
                ..
            } => [overall_field, detail_field],
        }
    }

    /// Compute the derived cell values for one source value.
    pub fn derive(&self, value: &str) -> [String; 2] {
        if is_missing(value) {
            return [MISSING.to_string(), MISSING.to_string()];
        }

        match self {
            DeriveOp::FlagDetail { .. } => split_flag(value),
            DeriveOp::StatusDetail {
                overall_labels,
                groups,
                ..
            } => split_status(value, overall_labels, groups),
        }
    }
}

/// Four-way flag classification plus residual detail.
fn split_flag(value: &str) -> [String; 2] {
    for prefix in FLAG_PREFIXES {
        if let Some(rest) = strip_prefix_ci(value, prefix) {
            let detail = rest.strip_prefix(", ").unwrap_or(rest).trim();
            let detail = if detail.is_empty() {
                MISSING.to_string()
            } else {
                detail.to_string()
            };
            return [prefix.to_string(), detail];
        }
    }
    // Explicit fallback: anything not starting with a known flag token.
    ["Other".to_string(), value.to_string()]
}

/// Leading-token overall status plus full-string detail classification.
fn split_status(value: &str, overall_labels: &[String], groups: &[DetailGroup]) -> [String; 2] {
    let overall = overall_labels
        .iter()
        .find(|label| strip_prefix_ci(value, label).is_some())
        .map(|label| label.clone())
        .unwrap_or_else(|| MISSING.to_string());

    let detail = groups
        .iter()
        .find(|group| group.matches(value))
        .map(|group| group.label.clone())
        .unwrap_or_else(|| MISSING.to_string());

    [overall, detail]
}
