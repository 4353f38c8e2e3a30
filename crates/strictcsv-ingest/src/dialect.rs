//! Delimiter and quoting configuration for the underlying tokenizer.

/// How raw text is split into fields.
///
/// Passed explicitly at reader construction; there is no process-wide
/// dialect registry. Callers wanting named presets can keep their own
/// lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    /// Field separator byte.
    pub delimiter: u8,
    /// Quote byte used to wrap fields containing separators or newlines.
    pub quote: u8,
    /// Escape byte; `None` means quotes are escaped by doubling.
    pub escape: Option<u8>,
    /// Whether a doubled quote inside a quoted field denotes a literal quote.
    pub double_quote: bool,
}

impl Default for Dialect {
    /// Comma-delimited, double-quote quoting.
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: None,
            double_quote: true,
        }
    }
}

impl Dialect {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_escape(mut self, escape: u8) -> Self {
        self.escape = Some(escape);
        self
    }

    pub fn with_double_quote(mut self, double_quote: bool) -> Self {
        self.double_quote = double_quote;
        self
    }

    /// Builds the tokenizer configuration for this dialect.
    ///
    /// Headers are disabled and records are flexible: the validating reader
    /// resolves the header itself and handles short/long records per policy.
    pub(crate) fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .escape(self.escape)
            .double_quote(self.double_quote);
        builder
    }
}
