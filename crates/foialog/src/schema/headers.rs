//! Header canonicalization and the literal rename table.
//!
//! Raw log headers are survey questions ("Were all of the requested records
//! sent to the requester?"), punctuation included. Canonicalization reduces
//! them deterministically; the rename table then maps the worst of the
//! generated names to short stable identifiers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FoialogError, Result};
use crate::input::DataTable;

/// Canonicalize a single raw header.
///
/// Strips every character outside `[A-Za-z0-9 ]`, then maps each run of
/// spaces to a single underscore. A header ending in stripped punctuation
/// keeps its trailing underscore ("Request #" becomes "Request_"); the
/// rename table is expected to clean those up.
pub fn canonicalize_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push('_');
            }
            pending_space = false;
            out.push(ch);
        } else if ch == ' ' {
            pending_space = true;
        }
    }
    if pending_space && !out.is_empty() {
        out.push('_');
    }

    out
}

/// Canonicalize every header in order.
pub fn canonicalize_headers(raw: &[String]) -> Vec<String> {
    raw.iter().map(|h| canonicalize_header(h)).collect()
}

/// Literal rename table applied after canonicalization.
///
/// Static configuration, not computed: each entry maps one known generated
/// name to its stable short form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderRenames {
    map: IndexMap<String, String>,
}

impl HeaderRenames {
    /// Build a rename table from `(from, to)` pairs.
    pub fn new<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            map: pairs
                .into_iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Number of rename entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over `(from, to)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply the renames in place.
    ///
    /// Every source name must be present in `headers`; a missing source means
    /// the table is stale relative to the input file and the run must not
    /// silently continue.
    pub fn apply(&self, headers: &mut [String]) -> Result<()> {
        for (from, to) in &self.map {
            let index = headers
                .iter()
                .position(|h| h == from)
                .ok_or_else(|| FoialogError::config_mismatch("rename table", from))?;
            headers[index] = to.clone();
        }
        Ok(())
    }
}

/// Canonicalize a table's headers and apply the rename table.
///
/// Column order and row data are untouched.
pub fn normalize_headers(table: &mut DataTable, renames: &HeaderRenames) -> Result<()> {
    table.headers = canonicalize_headers(&table.headers);
    renames.apply(&mut table.headers)
}
