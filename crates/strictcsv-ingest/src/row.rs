//! Row processing: one tokenized record in, one validated record (or a
//! complete per-row error report) out.

use csv::StringRecord;

use strictcsv_model::{FieldError, FieldErrorKind, Record, RowError, Schema};

use crate::field::coerce_field;
use crate::header::HeaderMapping;
use crate::options::{ExtraColumnsPolicy, ReaderOptions};

/// Validates every field of one data record.
///
/// Does not short-circuit: all field failures in the row are collected so
/// the caller gets a complete report. `row_number` is 1-based and counts
/// non-blank data rows only.
pub fn process_row(
    record: &StringRecord,
    mapping: &HeaderMapping,
    schema: &Schema,
    options: &ReaderOptions,
    row_number: u64,
) -> Result<Record, RowError> {
    debug_assert_eq!(
        mapping.schema_len(),
        schema.len(),
        "header mapping paired with a different schema"
    );

    let mut out = Record::new();
    let mut errors: Vec<FieldError> = Vec::new();

    for position in 0..mapping.width() {
        // Short records: missing trailing fields behave as empty cells.
        let raw = record.get(position).unwrap_or("");
        let Some(column_index) = mapping.column_at(position) else {
            continue; // undeclared header cell, tolerated
        };
        let spec = &schema.columns()[column_index];
        match coerce_field(raw, spec, options.strip_white_spaces) {
            Ok(value) => out.insert(spec.name.clone(), value),
            Err(kind) => errors.push(FieldError {
                position,
                column: Some(spec.name.clone()),
                raw: raw.to_owned(),
                kind,
            }),
        }
    }

    if record.len() > mapping.width() && options.extra_columns == ExtraColumnsPolicy::Fail {
        for position in mapping.width()..record.len() {
            errors.push(FieldError {
                position,
                column: None,
                raw: record.get(position).unwrap_or("").to_owned(),
                kind: FieldErrorKind::UnexpectedField,
            });
        }
    }

    // Declared columns the header never mentioned: default them in so
    // record shape is stable across the stream.
    for &column_index in mapping.absent_columns() {
        let spec = &schema.columns()[column_index];
        match coerce_field("", spec, options.strip_white_spaces) {
            Ok(value) => out.insert(spec.name.clone(), value),
            Err(kind) => errors.push(FieldError {
                position: mapping.width(),
                column: Some(spec.name.clone()),
                raw: String::new(),
                kind,
            }),
        }
    }

    if errors.is_empty() {
        Ok(out)
    } else {
        Err(RowError {
            row: row_number,
            fields: errors,
        })
    }
}
