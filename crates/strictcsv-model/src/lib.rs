//! Data model for schema-validated CSV reading.
//!
//! Declares what a CSV file is supposed to look like ([`Schema`],
//! [`ColumnSpec`]), the typed values rows coerce into ([`Value`],
//! [`Record`]), and the error taxonomy validation produces
//! ([`SchemaError`], [`FieldError`], [`RowError`]).
//!
//! This crate is pure data: no I/O, no parsing of delimited text. The
//! validating reader lives in `strictcsv-ingest`.

pub mod error;
pub mod record;
pub mod schema;
pub mod value;

pub use error::{FieldError, FieldErrorKind, RowError, SchemaError};
pub use record::Record;
pub use schema::{ColumnSpec, Schema};
pub use value::{ColumnType, Value};
