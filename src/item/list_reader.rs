use std::io::Read;

use encoding_rs::Encoding;

use crate::{
    core::{
        dialect::{Dialect, Quoting},
        encoding::{decode_record, resolve},
        target::Source,
    },
    error::CsvResult,
};

/// Reads a whole CSV source into rows of strings.
///
/// The first row is returned like any other: there is no header handling.
///
/// # Examples
///
/// ```
/// use simplecsv::core::target::Source;
/// use simplecsv::item::list_reader::ListReaderBuilder;
///
/// let data = "a;b\n1;2\n";
/// let rows = ListReaderBuilder::new()
///     .delimiter(b';')
///     .build()
///     .read(Source::reader(data.as_bytes()))
///     .unwrap();
///
/// assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
/// ```
pub struct ListReader {
    dialect: Dialect,
    encoding: Option<String>,
}

impl ListReader {
    /// Reads every row of `source`.
    ///
    /// # Errors
    ///
    /// - [`CsvError::UnknownEncoding`](crate::CsvError::UnknownEncoding) before
    ///   the source is opened;
    /// - [`CsvError::Resolution`](crate::CsvError::Resolution) if the source
    ///   cannot be opened;
    /// - [`CsvError::Encoding`](crate::CsvError::Encoding) or
    ///   [`CsvError::Csv`](crate::CsvError::Csv) while reading. The source is
    ///   closed before the error is returned.
    pub fn read<R: Read>(&self, source: Source<R>) -> CsvResult<Vec<Vec<String>>> {
        let encoding = resolve(self.encoding.as_deref())?;
        let input = source.open()?;
        decoded_rows(self.dialect.reader_builder().from_reader(input), encoding).collect()
    }
}

/// Iterates over the decoded rows of a CSV reader.
pub(crate) fn decoded_rows<R: Read>(
    rdr: csv::Reader<R>,
    encoding: &'static Encoding,
) -> impl Iterator<Item = CsvResult<Vec<String>>> {
    rdr.into_byte_records()
        .enumerate()
        .map(move |(row, record)| decode_record(&record?, encoding, row))
}

/// A builder for configuring a [`ListReader`].
///
/// Defaults: `excel` dialect, UTF-8.
#[derive(Default)]
pub struct ListReaderBuilder {
    dialect: Dialect,
    encoding: Option<String>,
}

impl ListReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.dialect.delimiter = delimiter;
        self
    }

    pub fn quote_char(mut self, quote_char: u8) -> Self {
        self.dialect.quote_char = quote_char;
        self
    }

    pub fn quoting(mut self, quoting: Quoting) -> Self {
        self.dialect.quoting = quoting;
        self
    }

    /// Encoding label of the source, e.g. `"latin1"`. Resolved when reading.
    pub fn encoding<S: Into<String>>(mut self, label: S) -> Self {
        self.encoding = Some(label.into());
        self
    }

    pub fn build(self) -> ListReader {
        ListReader {
            dialect: self.dialect,
            encoding: self.encoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use crate::error::CsvError;

    use super::*;

    #[test]
    fn header_row_is_kept() -> Result<(), Box<dyn Error>> {
        let data = "city,country\r\nBoston,\"United States\"\r\nConcord,United States\r\n";

        let rows = ListReaderBuilder::new()
            .build()
            .read(Source::reader(data.as_bytes()))?;

        assert_eq!(
            rows,
            vec![
                vec!["city", "country"],
                vec!["Boston", "United States"],
                vec!["Concord", "United States"],
            ]
        );
        Ok(())
    }

    #[test]
    fn ragged_rows_are_accepted() -> Result<(), Box<dyn Error>> {
        let rows = ListReaderBuilder::new()
            .build()
            .read(Source::reader("a,b,c\n1\n".as_bytes()))?;

        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["1"]]);
        Ok(())
    }

    #[test]
    fn fields_are_decoded_from_latin1() -> Result<(), Box<dyn Error>> {
        let data: &[u8] = b"name\ncaf\xe9\n";

        let rows = ListReaderBuilder::new()
            .encoding("latin1")
            .build()
            .read(Source::reader(data))?;

        assert_eq!(rows, vec![vec!["name"], vec!["café"]]);
        Ok(())
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let data: &[u8] = b"name\ncaf\xe9\n";

        let result = ListReaderBuilder::new().build().read(Source::reader(data));

        assert!(matches!(
            result,
            Err(CsvError::Encoding { row: 1, field: 0, .. })
        ));
    }

    #[test]
    fn unknown_encoding_is_reported() {
        let result = ListReaderBuilder::new()
            .encoding("no-such-charset")
            .build()
            .read(Source::reader("a\n".as_bytes()));

        assert!(matches!(result, Err(CsvError::UnknownEncoding(_))));
    }
}
