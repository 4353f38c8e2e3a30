//! Schema-validating CSV reader.
//!
//! Wraps the `csv` tokenizer with per-row validation and coercion against
//! a declared [`Schema`](strictcsv_model::Schema): the first non-blank
//! record is resolved as the header (by name, order-independent), every
//! following non-blank record is coerced field by field, and the caller
//! receives typed [`Record`](strictcsv_model::Record)s — or structured
//! errors — one row at a time.
//!
//! The reader is a pull iterator: lazy, single-pass, O(1) memory beyond
//! the current record, and fused once the input is exhausted. Row-error
//! propagation is policy-controlled ([`RowErrorPolicy`]): fail the stream
//! on the first bad row, or skip bad rows and collect their errors in a
//! side channel.

pub mod dialect;
pub mod error;
pub mod field;
mod header;
pub mod options;
pub mod reader;
mod row;

pub use dialect::Dialect;
pub use error::{IngestError, Result};
pub use field::coerce_field;
pub use options::{ExtraColumnsPolicy, ReaderOptions, RowErrorPolicy};
pub use reader::ValidatingReader;
