//! Alias-collapse steps: ordered (predicate, transform) pairs.
//!
//! A chain is folded left over the value. Steps are sequential mutations,
//! not first-match-wins: a later step sees whatever an earlier step left
//! behind, and the declared order is part of the configuration's meaning.

use serde::{Deserialize, Serialize};

use crate::input::MISSING;

use super::{contains_ci, replace_ci, strip_prefix_ci};

/// Predicate deciding whether a step fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AliasMatch {
    /// The value contains the pattern.
    Contains {
        pattern: String,
        case_insensitive: bool,
    },
    /// The trimmed value equals one of the tokens (case-insensitive).
    EqualsAny { tokens: Vec<String> },
    /// Always fires; pairs with transforms that are identity on non-matching
    /// values (prefix strips, spelling fixes).
    Always,
}

impl AliasMatch {
    fn holds(&self, value: &str) -> bool {
        match self {
            AliasMatch::Contains {
                pattern,
                case_insensitive,
            } => {
                if *case_insensitive {
                    contains_ci(value, pattern)
                } else {
                    value.contains(pattern.as_str())
                }
            }
            AliasMatch::EqualsAny { tokens } => {
                let trimmed = value.trim();
                tokens.iter().any(|t| trimmed.eq_ignore_ascii_case(t))
            }
            AliasMatch::Always => true,
        }
    }
}

/// Transform applied when the predicate holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AliasAction {
    /// Replace the whole value with a canonical label.
    ReplaceValue { canonical: String },
    /// Replace the value with the missing marker.
    SetMissing,
    /// Strip a leading boilerplate phrase, keeping the remainder.
    StripPrefix {
        prefix: String,
        case_insensitive: bool,
    },
    /// Replace every occurrence of `from` with `to` (spelling fixes).
    ReplaceText {
        from: String,
        to: String,
        case_insensitive: bool,
    },
}

/// One (predicate, transform) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasStep {
    pub when: AliasMatch,
    pub then: AliasAction,
}

impl AliasStep {
    /// Collapse values containing a marker to a canonical label.
    pub fn collapse(marker: &str, canonical: &str) -> Self {
        Self {
            when: AliasMatch::Contains {
                pattern: marker.to_string(),
                case_insensitive: true,
            },
            then: AliasAction::ReplaceValue {
                canonical: canonical.to_string(),
            },
        }
    }

    /// Map negative-answer tokens to the missing marker.
    pub fn missing_tokens(tokens: &[&str]) -> Self {
        Self {
            when: AliasMatch::EqualsAny {
                tokens: tokens.iter().map(|t| t.to_string()).collect(),
            },
            then: AliasAction::SetMissing,
        }
    }

    /// Strip a boilerplate phrase prefix.
    pub fn strip_prefix(prefix: &str) -> Self {
        Self {
            when: AliasMatch::Always,
            then: AliasAction::StripPrefix {
                prefix: prefix.to_string(),
                case_insensitive: true,
            },
        }
    }

    /// Correct a known misspelling wherever it appears.
    pub fn fix_spelling(from: &str, to: &str) -> Self {
        Self {
            when: AliasMatch::Contains {
                pattern: from.to_string(),
                case_insensitive: true,
            },
            then: AliasAction::ReplaceText {
                from: from.to_string(),
                to: to.to_string(),
                case_insensitive: true,
            },
        }
    }

    /// Apply the step. Returns `Some(new_value)` when the step fired and
    /// changed the value, `None` otherwise.
    pub fn apply(&self, value: &str) -> Option<String> {
        if !self.when.holds(value) {
            return None;
        }

        let next = match &self.then {
            AliasAction::ReplaceValue { canonical } => canonical.clone(),
            AliasAction::SetMissing => MISSING.to_string(),
            AliasAction::StripPrefix {
                prefix,
                case_insensitive,
            } => {
                let rest = if *case_insensitive {
                    strip_prefix_ci(value, prefix)
                } else {
                    value.strip_prefix(prefix.as_str())
                };
                match rest {
                    Some(rest) if rest.trim().is_empty() => MISSING.to_string(),
                    Some(rest) => rest.trim_start().to_string(),
                    None => return None,
                }
            }
            AliasAction::ReplaceText {
                from,
                to,
                case_insensitive,
            } => {
                if *case_insensitive {
                    replace_ci(value, from, to)
                } else {
                    value.replace(from.as_str(), to.as_str())
                }
            }
        };

        if next == value { None } else { Some(next) }
    }
}
