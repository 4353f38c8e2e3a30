//! Header resolution: matching the first record against the schema.

use csv::StringRecord;

use strictcsv_model::Schema;

use crate::error::{IngestError, Result};
use crate::options::{ExtraColumnsPolicy, ReaderOptions};

/// Position-to-column table derived from the header row.
///
/// Built once per stream; matching is exact and case-sensitive (header
/// cells are trimmed first when whitespace stripping is on). Header order
/// is authoritative for positions — schema declaration order is not.
#[derive(Debug, Clone)]
pub struct HeaderMapping {
    /// For each header position, the schema column index it maps to.
    /// `None` marks an undeclared header cell tolerated under the ignore
    /// policy.
    slots: Vec<Option<usize>>,
    /// Schema column indices that do not appear in the header at all.
    /// Required columns can never land here; absent optional columns are
    /// defaulted into every record.
    absent: Vec<usize>,
    /// Width of the schema this mapping was resolved against; row
    /// processing asserts it is paired with the same schema.
    schema_len: usize,
}

impl HeaderMapping {
    /// Resolves the header record against the schema.
    ///
    /// Fails with [`IngestError::MissingRequiredColumn`] if a required
    /// column is absent, or [`IngestError::UnexpectedColumn`] for an
    /// undeclared header cell under the strict extra-columns policy.
    pub fn resolve(header: &StringRecord, schema: &Schema, options: &ReaderOptions) -> Result<Self> {
        let mut slots = Vec::with_capacity(header.len());
        let mut seen = vec![false; schema.len()];

        for cell in header.iter() {
            let name = if options.strip_white_spaces {
                cell.trim()
            } else {
                cell
            };
            match schema.position(name) {
                Some(index) => {
                    seen[index] = true;
                    slots.push(Some(index));
                }
                None if options.extra_columns == ExtraColumnsPolicy::Fail => {
                    return Err(IngestError::UnexpectedColumn {
                        column: name.to_owned(),
                    });
                }
                None => slots.push(None),
            }
        }

        for (index, spec) in schema.columns().iter().enumerate() {
            if spec.required && !seen[index] {
                return Err(IngestError::MissingRequiredColumn {
                    column: spec.name.clone(),
                });
            }
        }

        let absent: Vec<usize> = (0..schema.len()).filter(|&i| !seen[i]).collect();

        tracing::debug!(
            mapped = slots.iter().filter(|slot| slot.is_some()).count(),
            ignored = slots.iter().filter(|slot| slot.is_none()).count(),
            absent = absent.len(),
            "resolved CSV header"
        );

        Ok(Self {
            slots,
            absent,
            schema_len: schema.len(),
        })
    }

    /// Number of header positions.
    pub fn width(&self) -> usize {
        self.slots.len()
    }

    /// Schema column index mapped at a header position, if any.
    pub fn column_at(&self, position: usize) -> Option<usize> {
        self.slots.get(position).copied().flatten()
    }

    /// Declared columns that never appeared in the header (all optional).
    pub fn absent_columns(&self) -> &[usize] {
        &self.absent
    }

    /// Width of the schema this mapping was resolved against.
    pub fn schema_len(&self) -> usize {
        self.schema_len
    }
}
