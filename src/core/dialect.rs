use std::str::FromStr;

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};

use crate::error::CsvError;

/// When the writer wraps fields in quotes.
///
/// On reading, every policy but [`Quoting::None`] honours quote characters;
/// `None` turns quote handling off entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// Quote only the fields that need it (delimiter, quote or line break inside).
    #[default]
    Minimal,
    /// Quote every field.
    All,
    /// Quote every field that is not a number.
    NonNumeric,
    /// Never quote.
    None,
}

impl From<Quoting> for QuoteStyle {
    fn from(quoting: Quoting) -> Self {
        match quoting {
            Quoting::Minimal => QuoteStyle::Necessary,
            Quoting::All => QuoteStyle::Always,
            Quoting::NonNumeric => QuoteStyle::NonNumeric,
            Quoting::None => QuoteStyle::Never,
        }
    }
}

/// Line terminator written after each record.
///
/// Readers always accept `\r`, `\n` and `\r\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTerminator {
    #[default]
    CrLf,
    Lf,
}

/// A bundle of CSV formatting rules.
///
/// The named presets follow the usual spreadsheet conventions:
///
/// | name        | delimiter | terminator | quoting   |
/// |-------------|-----------|------------|-----------|
/// | `excel`     | `,`       | `\r\n`     | minimal   |
/// | `excel-tab` | `\t`      | `\r\n`     | minimal   |
/// | `unix`      | `,`       | `\n`       | all       |
///
/// # Examples
///
/// ```
/// use simplecsv::core::dialect::{Dialect, Quoting};
///
/// let dialect: Dialect = "unix".parse().unwrap();
/// assert_eq!(dialect.quoting, Quoting::All);
///
/// let semicolons = Dialect::excel().with_delimiter(b';');
/// assert_eq!(semicolons.delimiter, b';');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote_char: u8,
    /// Escape character, only used when `double_quote` is off.
    pub escape_char: Option<u8>,
    /// Whether a quote inside a quoted field is written as two quotes.
    pub double_quote: bool,
    pub quoting: Quoting,
    pub line_terminator: LineTerminator,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::excel()
    }
}

impl Dialect {
    pub fn excel() -> Self {
        Self {
            delimiter: b',',
            quote_char: b'"',
            escape_char: None,
            double_quote: true,
            quoting: Quoting::Minimal,
            line_terminator: LineTerminator::CrLf,
        }
    }

    pub fn excel_tab() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::excel()
        }
    }

    pub fn unix() -> Self {
        Self {
            quoting: Quoting::All,
            line_terminator: LineTerminator::Lf,
            ..Self::excel()
        }
    }

    /// Looks up a preset by name.
    pub fn named(name: &str) -> Result<Self, CsvError> {
        match name {
            "excel" => Ok(Self::excel()),
            "excel-tab" | "excel_tab" => Ok(Self::excel_tab()),
            "unix" => Ok(Self::unix()),
            other => Err(CsvError::UnknownDialect(other.to_string())),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_quote_char(mut self, quote_char: u8) -> Self {
        self.quote_char = quote_char;
        self
    }

    pub fn with_quoting(mut self, quoting: Quoting) -> Self {
        self.quoting = quoting;
        self
    }

    pub(crate) fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote_char)
            .double_quote(self.double_quote)
            .escape(self.escape_char)
            .quoting(self.quoting != Quoting::None)
            .terminator(Terminator::CRLF)
            .has_headers(false)
            .flexible(true);
        builder
    }

    pub(crate) fn writer_builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .quote(self.quote_char)
            .double_quote(self.double_quote)
            .quote_style(self.quoting.into())
            .terminator(match self.line_terminator {
                LineTerminator::CrLf => Terminator::CRLF,
                LineTerminator::Lf => Terminator::Any(b'\n'),
            })
            .has_headers(false)
            .flexible(true);
        if let Some(escape) = self.escape_char {
            builder.escape(escape);
        }
        builder
    }
}

impl FromStr for Dialect {
    type Err = CsvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::named(s)
    }
}
