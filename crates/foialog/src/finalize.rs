//! Column pruning and output ordering.

use crate::error::{FoialogError, Result};
use crate::input::{is_missing, DataTable};

/// Drop listed columns that are 100% missing, then project the table onto
/// `output_order`.
///
/// Order names are checked against the pre-prune header set, so a column
/// removed by this run's pruning pass is skipped from the order rather than
/// reported as a mismatch. A name that was never in the table is fatal.
/// Columns not listed in `output_order` are dropped; this is how consumed
/// composite source fields leave the table. Returns the pruned field names.
pub fn finalize(
    table: &mut DataTable,
    prune_if_all_missing: &[String],
    output_order: &[String],
) -> Result<Vec<String>> {
    let mut pruned = Vec::new();
    for name in prune_if_all_missing {
        let index = table
            .column_index(name)
            .ok_or_else(|| FoialogError::config_mismatch("prune set", name))?;
        if table.column_values(index).all(is_missing) {
            pruned.push(name.clone());
        }
    }

    let mut indices = Vec::with_capacity(output_order.len());
    for name in output_order {
        let index = table
            .column_index(name)
            .ok_or_else(|| FoialogError::config_mismatch("output order", name))?;
        if !pruned.iter().any(|p| p == name) {
            indices.push(index);
        }
    }

    table.select_columns(&indices);
    Ok(pruned)
}
