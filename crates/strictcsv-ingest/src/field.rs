//! Field-level coercion and validation.
//!
//! Pure functions: raw cell text plus its column declaration in, typed
//! value or failure reason out. No I/O, no shared state.

use strictcsv_model::{ColumnSpec, ColumnType, FieldErrorKind, Value};

/// Coerces one raw cell against its column declaration.
///
/// Order of checks: optional whitespace stripping, empty-cell handling
/// (required vs default), type coercion, choice membership. Choices are
/// checked against the coerced value, not the raw text; substituted
/// defaults are exempt because schema construction already verified them.
pub fn coerce_field(
    raw: &str,
    spec: &ColumnSpec,
    strip_white_spaces: bool,
) -> Result<Value, FieldErrorKind> {
    let cell = if strip_white_spaces { raw.trim() } else { raw };

    if cell.is_empty() {
        if let Some(default) = &spec.default {
            return Ok(default.clone());
        }
        if spec.required {
            return Err(FieldErrorKind::MissingRequired);
        }
        return Ok(Value::Missing);
    }

    let value = coerce_type(cell, spec.data_type)?;

    if !spec.allows(&value) {
        return Err(FieldErrorKind::InvalidChoice {
            allowed: spec.choices.clone().unwrap_or_default(),
        });
    }

    Ok(value)
}

fn coerce_type(cell: &str, data_type: ColumnType) -> Result<Value, FieldErrorKind> {
    let mismatch = || FieldErrorKind::TypeMismatch {
        expected: data_type,
    };
    match data_type {
        ColumnType::String => Ok(Value::Text(cell.to_owned())),
        ColumnType::Int => cell.parse::<i64>().map(Value::Int).map_err(|_| mismatch()),
        ColumnType::Float => cell.parse::<f64>().map(Value::Float).map_err(|_| mismatch()),
        ColumnType::Bool => cell.parse::<bool>().map(Value::Bool).map_err(|_| mismatch()),
    }
}
