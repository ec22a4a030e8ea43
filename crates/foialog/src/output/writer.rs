//! Delimited output writer.

use std::path::Path;

use crate::error::{FoialogError, Result};
use crate::input::DataTable;

/// Writes a normalized table to a delimited UTF-8 file with a header row.
///
/// Missing cells are written as the missing marker, never as an empty
/// string, so the output stays unambiguous about "no value".
pub struct Writer {
    delimiter: u8,
}

impl Writer {
    /// Create a writer for the given delimiter.
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Write the whole table once. One output row per input row.
    pub fn write_file(&self, table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)?;

        writer.write_record(&table.headers)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|e| FoialogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}
