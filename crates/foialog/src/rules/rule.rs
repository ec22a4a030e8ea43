//! Per-field normalization rules.
//!
//! Every rule is a pure function over one field's value. Rules never see row
//! or column context, never panic, and pass the missing marker through
//! untouched. A field's rules are applied in declaration order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::input::{is_missing, MISSING};

use super::alias::AliasStep;
use super::{contains_ci, strip_prefix_ci};

static YES_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*yes\b").unwrap());
static NO_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*no\b").unwrap());

/// Result of applying one rule to one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// The (possibly unchanged) value after the rule.
    pub value: String,
    /// Whether the rule's pattern matched this value at all. Used to detect
    /// rules that match nothing across a whole column.
    pub matched: bool,
}

impl RuleOutcome {
    fn unchanged(value: &str) -> Self {
        Self {
            value: value.to_string(),
            matched: false,
        }
    }
}

/// One declarative normalization rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldRule {
    /// Drop every character that is not ASCII alphanumeric. Case is kept:
    /// this canonicalizes punctuation and spacing noise only.
    StripNonAlphanumeric,

    /// Replace the whole value with `canonical` when it contains `marker`.
    MapContains {
        marker: String,
        canonical: String,
        case_insensitive: bool,
    },

    /// Replace a matching leading token with `canonical`, keeping the rest of
    /// the value ("yrd, see attached" becomes "Yes, see attached").
    MapPrefix {
        prefix: String,
        canonical: String,
        case_insensitive: bool,
    },

    /// Collapse to "Yes"/"No" on a leading yes/no token; anything else
    /// becomes the missing marker. Free-text elaboration on an answer is
    /// discarded here; the run report counts how often.
    YesNo,

    /// Ordered (predicate, transform) steps folded over the value. Sequential
    /// mutation: every step whose predicate holds is applied, and only the
    /// final value survives.
    AliasChain { steps: Vec<AliasStep> },
}

impl FieldRule {
    /// Convenience constructor for a case-insensitive substring consolidation.
    pub fn contains(marker: &str, canonical: &str) -> Self {
        FieldRule::MapContains {
            marker: marker.to_string(),
            canonical: canonical.to_string(),
            case_insensitive: true,
        }
    }

    /// Convenience constructor for a case-insensitive prefix normalization.
    pub fn prefix(prefix: &str, canonical: &str) -> Self {
        FieldRule::MapPrefix {
            prefix: prefix.to_string(),
            canonical: canonical.to_string(),
            case_insensitive: true,
        }
    }

    /// Apply the rule to a single value.
    pub fn apply(&self, value: &str) -> RuleOutcome {
        if is_missing(value) {
            return RuleOutcome::unchanged(value);
        }

        match self {
            FieldRule::StripNonAlphanumeric => {
                let stripped: String =
                    value.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
                let matched = stripped.len() != value.len();
                let value = if stripped.is_empty() {
                    MISSING.to_string()
                } else {
                    stripped
                };
                RuleOutcome { value, matched }
            }

            FieldRule::MapContains {
                marker,
                canonical,
                case_insensitive,
            } => {
                let hit = if *case_insensitive {
                    contains_ci(value, marker)
                } else {
                    value.contains(marker.as_str())
                };
                if hit {
                    RuleOutcome {
                        value: canonical.clone(),
                        matched: true,
                    }
                } else {
                    RuleOutcome::unchanged(value)
                }
            }

            FieldRule::MapPrefix {
                prefix,
                canonical,
                case_insensitive,
            } => {
                let rest = if *case_insensitive {
                    strip_prefix_ci(value, prefix)
                } else {
                    value.strip_prefix(prefix.as_str())
                };
                match rest {
                    Some(rest) => RuleOutcome {
                        value: format!("{}{}", canonical, rest),
                        matched: true,
                    },
                    None => RuleOutcome::unchanged(value),
                }
            }

            FieldRule::YesNo => {
                if YES_TOKEN.is_match(value) {
                    RuleOutcome {
                        value: "Yes".to_string(),
                        matched: true,
                    }
                } else if NO_TOKEN.is_match(value) {
                    RuleOutcome {
                        value: "No".to_string(),
                        matched: true,
                    }
                } else {
                    RuleOutcome {
                        value: MISSING.to_string(),
                        matched: false,
                    }
                }
            }

            FieldRule::AliasChain { steps } => {
                let mut current = value.to_string();
                let mut matched = false;
                for step in steps {
                    if is_missing(&current) {
                        break;
                    }
                    if let Some(next) = step.apply(&current) {
                        matched = true;
                        current = next;
                    }
                }
                RuleOutcome {
                    value: current,
                    matched,
                }
            }
        }
    }

    /// Short label for the run report.
    pub fn label(&self) -> String {
        match self {
            FieldRule::StripNonAlphanumeric => "strip_non_alphanumeric".to_string(),
            FieldRule::MapContains { marker, canonical, .. } => {
                format!("contains '{}' -> '{}'", marker, canonical)
            }
            FieldRule::MapPrefix { prefix, canonical, .. } => {
                format!("prefix '{}' -> '{}'", prefix, canonical)
            }
            FieldRule::YesNo => "yes_no".to_string(),
            FieldRule::AliasChain { steps } => format!("alias chain ({} steps)", steps.len()),
        }
    }
}
