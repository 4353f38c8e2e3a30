//! Error taxonomy for schema construction and row validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value::{ColumnType, Value};

/// Fatal configuration errors detected when a [`Schema`](crate::Schema) is built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A column was declared with an empty name.
    #[error("column at position {position} has an empty name")]
    EmptyColumnName { position: usize },

    /// Two columns share the same name.
    #[error("duplicate column name '{name}'")]
    DuplicateColumn { name: String },

    /// A default value was declared that is not a member of the column's choices.
    #[error("default value for column '{column}' is not among its choices")]
    DefaultNotInChoices { column: String },
}

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldErrorKind {
    /// Empty cell for a required column with no default.
    MissingRequired,
    /// The raw value could not be coerced to the declared type.
    TypeMismatch { expected: ColumnType },
    /// The coerced value is not a member of the declared choices.
    InvalidChoice { allowed: Vec<Value> },
    /// The record carries a field beyond the header width (strict policy only).
    UnexpectedField,
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorKind::MissingRequired => write!(f, "missing required value"),
            FieldErrorKind::TypeMismatch { expected } => {
                write!(f, "expected {expected} value")
            }
            FieldErrorKind::InvalidChoice { allowed } => {
                write!(f, "not an allowed choice (allowed: ")?;
                for (i, value) in allowed.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{value}'")?;
                }
                write!(f, ")")
            }
            FieldErrorKind::UnexpectedField => write!(f, "unexpected extra field"),
        }
    }
}

/// A single failed field within a row.
///
/// `column` is `None` only for extra fields beyond the header width,
/// which have no declared column to name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// 0-based field index within the record.
    pub position: usize,
    pub column: Option<String>,
    pub raw: String,
    pub kind: FieldErrorKind,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.column {
            Some(column) => write!(f, "field '{column}': {} (raw: '{}')", self.kind, self.raw),
            None => write!(
                f,
                "field #{}: {} (raw: '{}')",
                self.position + 1,
                self.kind,
                self.raw
            ),
        }
    }
}

/// All field failures for one data row.
///
/// `row` is 1-based and counts only non-blank data rows, header excluded.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub struct RowError {
    pub row: u64,
    pub fields: Vec<FieldError>,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} failed validation: ", self.row)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}
