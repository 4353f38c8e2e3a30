//! Reader configuration.

use crate::dialect::Dialect;

/// What to do with header columns the schema does not declare, and with
/// record fields beyond the header width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtraColumnsPolicy {
    /// Tolerate and ignore them.
    #[default]
    Ignore,
    /// Treat them as errors: fatal at header time, per-row afterwards.
    Fail,
}

/// How a failed data row propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowErrorPolicy {
    /// Surface the row error and stop iterating.
    #[default]
    Raise,
    /// Skip the row, keep iterating, and expose the error via
    /// [`ValidatingReader::row_errors`](crate::ValidatingReader::row_errors).
    Collect,
}

/// Configuration for a [`ValidatingReader`](crate::ValidatingReader).
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub dialect: Dialect,
    pub strip_white_spaces: bool,
    pub extra_columns: ExtraColumnsPolicy,
    pub row_errors: RowErrorPolicy,
}

impl Default for ReaderOptions {
    /// Standard dialect, whitespace stripping on, extra columns ignored,
    /// row errors raised.
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            strip_white_spaces: true,
            extra_columns: ExtraColumnsPolicy::Ignore,
            row_errors: RowErrorPolicy::Raise,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_strip_white_spaces(mut self, strip: bool) -> Self {
        self.strip_white_spaces = strip;
        self
    }

    pub fn with_extra_columns(mut self, policy: ExtraColumnsPolicy) -> Self {
        self.extra_columns = policy;
        self
    }

    pub fn with_row_errors(mut self, policy: RowErrorPolicy) -> Self {
        self.row_errors = policy;
        self
    }
}
