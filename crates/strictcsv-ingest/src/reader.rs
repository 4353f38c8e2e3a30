//! The validating reader: a lazy, exhaustible per-row iterator.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{StringRecord, StringRecordsIntoIter};

use strictcsv_model::{Record, RowError, Schema};

use crate::error::{IngestError, Result};
use crate::header::HeaderMapping;
use crate::options::{ReaderOptions, RowErrorPolicy};
use crate::row::process_row;

/// Reader lifecycle. Header resolution happens on the first advance, at
/// most once; `Exhausted` is terminal (a fresh reader must be built to
/// re-read).
#[derive(Debug)]
enum ReaderState {
    HeaderPending,
    Streaming(HeaderMapping),
    Exhausted,
}

/// Streams validated records from delimited text.
///
/// Pulls raw records from the tokenizer one at a time, skips blank ones,
/// resolves the first non-blank record as the header, then yields one
/// [`Record`] (or error) per non-blank data row. Holds no buffer beyond
/// the current record.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use strictcsv_ingest::{ReaderOptions, ValidatingReader};
/// use strictcsv_model::{ColumnSpec, ColumnType, Schema, Value};
///
/// let schema = Schema::new(vec![
///     ColumnSpec::new("title").required(),
///     ColumnSpec::new("price").with_type(ColumnType::Int).required(),
/// ])
/// .unwrap();
///
/// let input = "title,price\nWidget,10\n";
/// let mut reader =
///     ValidatingReader::new(Cursor::new(input), schema, ReaderOptions::new());
///
/// let record = reader.next().unwrap().unwrap();
/// assert_eq!(record.get("price"), Some(&Value::Int(10)));
/// assert!(reader.next().is_none());
/// ```
pub struct ValidatingReader<R: Read> {
    records: StringRecordsIntoIter<R>,
    schema: Schema,
    options: ReaderOptions,
    state: ReaderState,
    /// Non-blank data rows pulled so far (header excluded), 1-based in errors.
    rows_seen: u64,
    /// Rows skipped under [`RowErrorPolicy::Collect`].
    row_errors: Vec<RowError>,
}

impl<R: Read> ValidatingReader<R> {
    /// Wraps an already-open character stream. No tokens are consumed
    /// until the first advance.
    pub fn new(source: R, schema: Schema, options: ReaderOptions) -> Self {
        let records = options
            .dialect
            .reader_builder()
            .from_reader(source)
            .into_records();
        Self {
            records,
            schema,
            options,
            state: ReaderState::HeaderPending,
            rows_seen: 0,
            row_errors: Vec::new(),
        }
    }

    /// The schema this reader validates against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rows skipped so far under the `Collect` policy, in file order.
    pub fn row_errors(&self) -> &[RowError] {
        &self.row_errors
    }

    /// Consumes the collected row errors, leaving the side channel empty.
    pub fn take_row_errors(&mut self) -> Vec<RowError> {
        std::mem::take(&mut self.row_errors)
    }

    /// Pulls the next non-blank record from the tokenizer.
    ///
    /// A record is blank when it has no cells or every cell is empty after
    /// trimming; blank records are never counted as data rows.
    fn next_non_blank(
        records: &mut StringRecordsIntoIter<R>,
    ) -> Option<csv::Result<StringRecord>> {
        for result in records {
            match result {
                Ok(record) => {
                    if is_blank(&record) {
                        continue;
                    }
                    return Some(Ok(record));
                }
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

impl ValidatingReader<File> {
    /// Opens a CSV file for validated reading.
    pub fn open(path: &Path, schema: Schema, options: ReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileOpen {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Ok(Self::new(file, schema, options))
    }
}

impl<R: Read> Iterator for ValidatingReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &self.state {
                ReaderState::Exhausted => return None,

                ReaderState::HeaderPending => {
                    match Self::next_non_blank(&mut self.records) {
                        Some(Ok(header)) => {
                            match HeaderMapping::resolve(&header, &self.schema, &self.options) {
                                Ok(mapping) => {
                                    self.state = ReaderState::Streaming(mapping);
                                }
                                Err(err) => {
                                    self.state = ReaderState::Exhausted;
                                    return Some(Err(err));
                                }
                            }
                        }
                        Some(Err(err)) => {
                            self.state = ReaderState::Exhausted;
                            return Some(Err(err.into()));
                        }
                        None => {
                            self.state = ReaderState::Exhausted;
                            return Some(Err(IngestError::NoHeader));
                        }
                    }
                }

                ReaderState::Streaming(mapping) => {
                    let record = match Self::next_non_blank(&mut self.records) {
                        Some(Ok(record)) => record,
                        Some(Err(err)) => {
                            self.state = ReaderState::Exhausted;
                            return Some(Err(err.into()));
                        }
                        None => {
                            self.state = ReaderState::Exhausted;
                            return None;
                        }
                    };

                    self.rows_seen += 1;
                    match process_row(
                        &record,
                        mapping,
                        &self.schema,
                        &self.options,
                        self.rows_seen,
                    ) {
                        Ok(out) => return Some(Ok(out)),
                        Err(row_error) => match self.options.row_errors {
                            RowErrorPolicy::Raise => {
                                self.state = ReaderState::Exhausted;
                                return Some(Err(row_error.into()));
                            }
                            RowErrorPolicy::Collect => {
                                tracing::warn!(
                                    row = row_error.row,
                                    failures = row_error.fields.len(),
                                    "skipping invalid row"
                                );
                                self.row_errors.push(row_error);
                            }
                        },
                    }
                }
            }
        }
    }
}
