//! Error types for the foialog library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for foialog operations.
#[derive(Debug, Error)]
pub enum FoialogError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A rename, rule, prune, or ordering declaration references a column
    /// that is absent from the live table. Fatal: the configuration is stale
    /// relative to the input file.
    #[error("{context} references unknown column '{name}'")]
    ConfigMismatch { context: String, name: String },
}

impl FoialogError {
    /// Construct a configuration mismatch for the given declaration context.
    pub fn config_mismatch(context: impl Into<String>, name: impl Into<String>) -> Self {
        FoialogError::ConfigMismatch {
            context: context.into(),
            name: name.into(),
        }
    }
}

/// Result type alias for foialog operations.
pub type Result<T> = std::result::Result<T, FoialogError>;
