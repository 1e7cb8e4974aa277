use std::{collections::BTreeMap, io::Read};

use crate::{
    core::{
        dialect::{Dialect, Quoting},
        encoding::resolve,
        target::Source,
    },
    error::CsvResult,
    item::{list_reader::decoded_rows, record::DictRow},
};

/// Reads a whole CSV source into records keyed by the first row.
///
/// A row shorter than the header gets the rest value for the missing names,
/// or leaves them out when no rest value is set. Values past the header go to
/// the row's overflow bucket. Rows without any field are skipped.
///
/// The encoding applies to the header and to every value.
///
/// # Examples
///
/// ```
/// use simplecsv::core::target::Source;
/// use simplecsv::item::dict_reader::DictReaderBuilder;
///
/// let records = DictReaderBuilder::new()
///     .build()
///     .read(Source::reader("a,b\n1,2".as_bytes()))
///     .unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].get("a"), Some("1"));
/// assert_eq!(records[0].get("b"), Some("2"));
/// ```
pub struct DictReader {
    dialect: Dialect,
    encoding: Option<String>,
    rest_value: Option<String>,
}

impl DictReader {
    pub fn read<R: Read>(&self, source: Source<R>) -> CsvResult<Vec<DictRow>> {
        let encoding = resolve(self.encoding.as_deref())?;
        let input = source.open()?;
        let mut rows = decoded_rows(self.dialect.reader_builder().from_reader(input), encoding)
            .filter(|row| !matches!(row, Ok(fields) if fields.is_empty()));

        let names = match rows.next() {
            Some(header) => header?,
            None => return Ok(Vec::new()),
        };

        rows.map(|row| row.map(|values| self.to_record(&names, values)))
            .collect()
    }

    fn to_record(&self, names: &[String], values: Vec<String>) -> DictRow {
        let mut values = values.into_iter();
        let mut fields = BTreeMap::new();

        for name in names {
            match values.next() {
                Some(value) => {
                    fields.insert(name.clone(), value);
                }
                None => {
                    if let Some(rest) = &self.rest_value {
                        fields.insert(name.clone(), rest.clone());
                    }
                }
            }
        }

        DictRow::new(fields, values.collect())
    }
}

/// A builder for configuring a [`DictReader`].
///
/// Defaults: `excel` dialect, UTF-8, missing fields left out.
#[derive(Default)]
pub struct DictReaderBuilder {
    dialect: Dialect,
    encoding: Option<String>,
    rest_value: Option<String>,
}

impl DictReaderBuilder {
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

    pub fn encoding<S: Into<String>>(mut self, label: S) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Value given to header names a short row has no value for.
    pub fn rest_value<S: Into<String>>(mut self, rest_value: S) -> Self {
        self.rest_value = Some(rest_value.into());
        self
    }

    pub fn build(self) -> DictReader {
        DictReader {
            dialect: self.dialect,
            encoding: self.encoding,
            rest_value: self.rest_value,
        }
    }
}
