//! Run report: what the pipeline did, and what it noticed.

use serde::{Deserialize, Serialize};

/// Severity of a report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Possible stale configuration; worth a look.
    Warning,
    /// An invariant did not hold after the run.
    Error,
}

impl Severity {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

/// Kind of report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A rule matched zero values across the whole column.
    NoOpRule,
    /// Values were replaced by the missing marker (accepted lossy transform).
    CoercedToMissing,
    /// A controlled-vocabulary field holds a value outside its declared set.
    VocabularyViolation,
}

impl EntryKind {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::NoOpRule => "No-op rule",
            EntryKind::CoercedToMissing => "Coerced to missing",
            EntryKind::VocabularyViolation => "Vocabulary violation",
        }
    }
}

/// One observation from the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub kind: EntryKind,
    pub severity: Severity,
    /// Field the entry is about.
    pub field: String,
    /// What happened.
    pub detail: String,
    /// How many values were involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<usize>,
}

/// Per-rule application counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleStat {
    /// Field the rule ran against.
    pub field: String,
    /// Rule label.
    pub rule: String,
    /// Values the rule's pattern matched.
    pub matched: usize,
    /// Values the rule actually changed.
    pub changed: usize,
}

/// Everything the pipeline has to say about one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Data rows processed.
    pub rows: usize,
    /// Columns in the table when the pipeline started.
    pub columns: usize,
    /// Per-rule counts, in application order.
    pub rules: Vec<RuleStat>,
    /// Observations, in the order they were made.
    pub entries: Vec<ReportEntry>,
    /// Columns removed by the pruning pass.
    pub pruned: Vec<String>,
}

impl RunReport {
    /// Create an empty report for a table of the given shape.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            rules: Vec::new(),
            entries: Vec::new(),
            pruned: Vec::new(),
        }
    }

    /// Record an observation.
    pub fn push_entry(
        &mut self,
        kind: EntryKind,
        severity: Severity,
        field: &str,
        detail: String,
        occurrences: Option<usize>,
    ) {
        self.entries.push(ReportEntry {
            kind,
            severity,
            field: field.to_string(),
            detail,
            occurrences,
        });
    }

    /// Count entries at a given severity.
    pub fn count_at(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|e| e.severity == severity).count()
    }

    /// Whether any error-level entry was recorded.
    pub fn has_errors(&self) -> bool {
        self.count_at(Severity::Error) > 0
    }
}
