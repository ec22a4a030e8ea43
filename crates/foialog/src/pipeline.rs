//! The field normalization pipeline.
//!
//! Applies a catalog's per-field rule lists and composite-field splits to a
//! table, column by column, in declaration order. No rule sees more than one
//! value at a time; no field's rules depend on another field.

use serde::{Deserialize, Serialize};

use crate::catalog::LogCatalog;
use crate::error::{FoialogError, Result};
use crate::input::{is_missing, DataTable, MISSING};
use crate::report::{EntryKind, RuleStat, RunReport, Severity};
use crate::rules::{DeriveOp, FieldRule};

/// The rules targeting one field, with its declared vocabulary if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldPlan {
    /// Canonical field name the rules apply to.
    pub field: String,
    /// Rules, applied in order.
    pub rules: Vec<FieldRule>,
    /// Declared canonical label set. After the run, every observed value of
    /// the field must be in this set or missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<Vec<String>>,
}

impl FieldPlan {
    /// Plan with rules and no declared vocabulary (open string domain).
    pub fn open(field: &str, rules: Vec<FieldRule>) -> Self {
        Self {
            field: field.to_string(),
            rules,
            vocabulary: None,
        }
    }

    /// Plan with rules and a declared controlled vocabulary.
    pub fn controlled(field: &str, rules: Vec<FieldRule>, vocabulary: &[&str]) -> Self {
        Self {
            field: field.to_string(),
            rules,
            vocabulary: Some(vocabulary.iter().map(|v| v.to_string()).collect()),
        }
    }
}

/// Engine that runs a catalog's plans and derives against a table.
pub struct Pipeline;

impl Pipeline {
    /// Create a new pipeline.
    pub fn new() -> Self {
        Self
    }

    /// Run every field plan and derivation in the catalog.
    ///
    /// Fields the catalog does not mention pass through unchanged. A plan or
    /// derivation naming an absent column is fatal.
    pub fn run(&self, table: &mut DataTable, catalog: &LogCatalog) -> Result<RunReport> {
        let mut report = RunReport::new(table.row_count(), table.column_count());

        for plan in &catalog.plans {
            self.run_plan(table, plan, &mut report)?;
        }

        for derive in &catalog.derives {
            self.run_derive(table, derive, &mut report)?;
        }

        for plan in &catalog.plans {
            self.check_vocabulary(table, &plan.field, plan.vocabulary.as_deref(), &mut report)?;
        }
        for derive in &catalog.derives {
            if let DeriveOp::FlagDetail { flag_field, .. } = derive {
                let flags = ["Yes".to_string(), "No".to_string(), "Partial".to_string(), "Other".to_string()];
                self.check_vocabulary(table, flag_field, Some(&flags), &mut report)?;
            }
        }

        Ok(report)
    }

    /// Apply one field's rules in order.
    fn run_plan(&self, table: &mut DataTable, plan: &FieldPlan, report: &mut RunReport) -> Result<()> {
        let col = table
            .column_index(&plan.field)
            .ok_or_else(|| FoialogError::config_mismatch("field plan", &plan.field))?;

        for rule in &plan.rules {
            let mut matched = 0usize;
            let mut changed = 0usize;
            let mut lost = 0usize;

            for row in 0..table.row_count() {
                let value = table.get(row, col).unwrap_or(MISSING).to_string();
                if is_missing(&value) {
                    continue;
                }

                let outcome = rule.apply(&value);
                if outcome.matched {
                    matched += 1;
                }
                if outcome.value != value {
                    if outcome.value == MISSING {
                        lost += 1;
                    }
                    changed += 1;
                    table.set(row, col, outcome.value);
                }
            }

            report.rules.push(RuleStat {
                field: plan.field.clone(),
                rule: rule.label(),
                matched,
                changed,
            });

            if matched == 0 {
                report.push_entry(
                    EntryKind::NoOpRule,
                    Severity::Warning,
                    &plan.field,
                    format!("rule [{}] matched no values; possibly stale", rule.label()),
                    None,
                );
            }
            if lost > 0 {
                report.push_entry(
                    EntryKind::CoercedToMissing,
                    Severity::Info,
                    &plan.field,
                    format!("rule [{}] replaced values with the missing marker", rule.label()),
                    Some(lost),
                );
            }
        }

        Ok(())
    }

    /// Derive new fields from a source field.
    fn run_derive(&self, table: &mut DataTable, derive: &DeriveOp, report: &mut RunReport) -> Result<()> {
        let source_col = table
            .column_index(derive.source())
            .ok_or_else(|| FoialogError::config_mismatch("derive", derive.source()))?;

        let [first, second] = derive.derived_fields();
        let first = first.to_string();
        let second = second.to_string();
        table.add_column(first.clone(), MISSING.to_string());
        table.add_column(second.clone(), MISSING.to_string());
        let first_col = table.column_count() - 2;
        let second_col = table.column_count() - 1;

        let mut derived = 0usize;
        let mut unclassified = 0usize;

        for row in 0..table.row_count() {
            let value = table.get(row, source_col).unwrap_or(MISSING).to_string();
            let [a, b] = derive.derive(&value);
            if !is_missing(&value) {
                derived += 1;
                if is_missing(&b) {
                    unclassified += 1;
                }
            }
            table.set(row, first_col, a);
            table.set(row, second_col, b);
        }

        report.rules.push(RuleStat {
            field: derive.source().to_string(),
            rule: format!("derive {} + {}", first, second),
            matched: derived,
            changed: derived,
        });

        if unclassified > 0 {
            report.push_entry(
                EntryKind::CoercedToMissing,
                Severity::Info,
                &second,
                "values matched no classification group".to_string(),
                Some(unclassified),
            );
        }

        Ok(())
    }

    /// Verify the closed-vocabulary invariant for one field.
    fn check_vocabulary(
        &self,
        table: &DataTable,
        field: &str,
        vocabulary: Option<&[String]>,
        report: &mut RunReport,
    ) -> Result<()> {
        let Some(vocabulary) = vocabulary else {
            return Ok(());
        };
        let col = table
            .column_index(field)
            .ok_or_else(|| FoialogError::config_mismatch("vocabulary check", field))?;

        let mut offenders: Vec<String> = Vec::new();
        let mut count = 0usize;
        for value in table.column_values(col) {
            if is_missing(value) || vocabulary.iter().any(|v| v == value) {
                continue;
            }
            count += 1;
            if offenders.len() < 3 && !offenders.iter().any(|o| o == value) {
                offenders.push(value.to_string());
            }
        }

        if count > 0 {
            report.push_entry(
                EntryKind::VocabularyViolation,
                Severity::Error,
                field,
                format!("values outside declared vocabulary: {:?}", offenders),
                Some(count),
            );
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::FieldRule;
    use crate::schema::HeaderRenames;

    fn mini_catalog() -> LogCatalog {
        LogCatalog {
            renames: HeaderRenames::default(),
            plans: vec![FieldPlan::controlled(
                "Division",
                vec![
                    FieldRule::contains("dir", "Director's Office"),
                    FieldRule::contains("wildlife", "Wildlife"),
                ],
                &["Director's Office", "Wildlife"],
            )],
            derives: Vec::new(),
            prune_if_all_missing: Vec::new(),
            output_order: Vec::new(),
        }
    }

    fn table(values: &[&str]) -> DataTable {
        DataTable::new(
            vec!["Division".to_string()],
            values.iter().map(|v| vec![v.to_string()]).collect(),
            b',',
        )
    }

    #[test]
    fn test_run_consolidates_column() {
        let mut t = table(&["Dir Office", "Director office", "wildlife div"]);
        let report = Pipeline::new().run(&mut t, &mini_catalog()).unwrap();

        assert_eq!(t.get(0, 0), Some("Director's Office"));
        assert_eq!(t.get(1, 0), Some("Director's Office"));
        assert_eq!(t.get(2, 0), Some("Wildlife"));
        assert!(!report.has_errors());
    }

    #[test]
    fn test_unmentioned_field_passes_through() {
        let mut t = DataTable::new(
            vec!["Division".to_string(), "Notes".to_string()],
            vec![vec!["dir".to_string(), "keep me, verbatim!".to_string()]],
            b',',
        );
        Pipeline::new().run(&mut t, &mini_catalog()).unwrap();
        assert_eq!(t.get(0, 1), Some("keep me, verbatim!"));
    }

    #[test]
    fn test_noop_rule_is_reported_not_fatal() {
        let mut t = table(&["Dir Office"]);
        let report = Pipeline::new().run(&mut t, &mini_catalog()).unwrap();

        let noop: Vec<_> = report
            .entries
            .iter()
            .filter(|e| e.kind == EntryKind::NoOpRule)
            .collect();
        assert_eq!(noop.len(), 1);
        assert!(noop[0].detail.contains("wildlife"));
    }

    #[test]
    fn test_absent_plan_field_is_fatal() {
        let mut t = DataTable::new(
            vec!["Something_Else".to_string()],
            vec![vec!["x".to_string()]],
            b',',
        );
        let err = Pipeline::new().run(&mut t, &mini_catalog()).unwrap_err();
        assert!(err.to_string().contains("Division"));
    }

    #[test]
    fn test_vocabulary_violation_reported() {
        let mut t = table(&["Dir Office", "Mystery Unit"]);
        let report = Pipeline::new().run(&mut t, &mini_catalog()).unwrap();

        assert!(report.has_errors());
        let entry = report
            .entries
            .iter()
            .find(|e| e.kind == EntryKind::VocabularyViolation)
            .unwrap();
        assert_eq!(entry.occurrences, Some(1));
        assert!(entry.detail.contains("Mystery Unit"));
    }

    #[test]
    fn test_rules_applied_twice_match_once() {
        let mut once = table(&["Dir Office", "wildlife", "Unrelated"]);
        Pipeline::new().run(&mut once, &mini_catalog()).unwrap();

        let mut twice = once.clone();
        Pipeline::new().run(&mut twice, &mini_catalog()).unwrap();

        assert_eq!(once.rows, twice.rows);
    }
}
