//! Error types for the validating reader.

use std::path::PathBuf;

use thiserror::Error;

use strictcsv_model::{RowError, SchemaError};

/// Errors surfaced while constructing or driving a validating reader.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Configuration errors (fatal, at construction or header time) ===
    /// The declared schema is internally inconsistent.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The input ended before any non-blank record could serve as a header.
    #[error("no header found: input has no non-blank records")]
    NoHeader,

    /// A required column is absent from the header row.
    #[error("required column '{column}' not found in header")]
    MissingRequiredColumn { column: String },

    /// The header carries a column the schema does not declare (strict mode).
    #[error("unexpected column '{column}' in header")]
    UnexpectedColumn { column: String },

    // === Data errors (per row) ===
    /// One or more fields in a data row failed validation.
    #[error(transparent)]
    Row(#[from] RowError),

    // === Source errors ===
    /// The underlying tokenizer failed to read a record.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Input file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open the input file.
    #[error("failed to open file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Returns the row-level detail if this is a data error.
    pub fn as_row_error(&self) -> Option<&RowError> {
        match self {
            IngestError::Row(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for reader operations.
pub type Result<T> = std::result::Result<T, IngestError>;
