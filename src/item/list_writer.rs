use std::io::Write;

use serde::Serialize;

use crate::{
    core::{
        dialect::{Dialect, Quoting},
        progress::{LOG_PROGRESS, ProgressListener},
        target::{Sink, Target},
    },
    error::{CsvError, CsvResult},
};

/// Writes a list of rows to CSV, one designated row first as the header.
///
/// Each row is any value that serializes as a flat sequence of scalars:
/// vectors, arrays, tuples. Rows may have different lengths.
///
/// The input slice is never modified; the header row is written first and
/// skipped when the remaining rows follow in their original order.
///
/// # Examples
///
/// ```
/// use simplecsv::core::target::Sink;
/// use simplecsv::item::list_writer::ListWriterBuilder;
///
/// let rows = vec![vec!["1", "2"], vec!["a", "b"], vec!["3", "4"]];
///
/// let writer = ListWriterBuilder::new().header_row(Some(1)).build();
/// let target = writer.write(&rows, Sink::writer(Vec::new())).unwrap();
///
/// let data = String::from_utf8(target.into_writer().unwrap()).unwrap();
/// assert_eq!(data, "a,b\r\n1,2\r\n3,4\r\n");
/// ```
pub struct ListWriter<'a> {
    header_row: Option<usize>,
    dialect: Dialect,
    listener: &'a dyn ProgressListener,
}

impl ListWriter<'_> {
    /// Writes `rows` to `sink` and returns where they went.
    ///
    /// # Errors
    ///
    /// - [`CsvError::HeaderRowOutOfRange`] if the header index does not point
    ///   into a non-empty `rows`; nothing is created in that case.
    /// - [`CsvError::Resolution`] if the sink cannot be opened.
    /// - [`CsvError::Csv`] or [`CsvError::Io`] if writing fails. The handle is
    ///   closed before the error is returned.
    pub fn write<R: Serialize, W: Write>(
        &self,
        rows: &[R],
        sink: Sink<W>,
    ) -> CsvResult<Target<W>> {
        let header = match self.header_row {
            Some(index) if !rows.is_empty() && index >= rows.len() => {
                return Err(CsvError::HeaderRowOutOfRange {
                    index,
                    len: rows.len(),
                });
            }
            Some(index) if !rows.is_empty() => Some(index),
            _ => None,
        };

        let handle = sink.open()?;
        let mut wtr = self.dialect.writer_builder().from_writer(handle);
        self.listener.on_start();

        if let Some(index) = header {
            wtr.serialize(&rows[index])?;
        }

        let mut written = 0;
        for (index, row) in rows.iter().enumerate() {
            if Some(index) == header {
                continue;
            }
            wtr.serialize(row)?;
            self.listener.on_item(written);
            written += 1;
        }

        let handle = wtr.into_inner().map_err(|error| error.into_error())?;
        self.listener.on_finish(written);

        Ok(handle.into_target())
    }
}

/// A builder for configuring a [`ListWriter`].
///
/// Defaults: `excel` dialect, header at index 0, progress sent to the log.
pub struct ListWriterBuilder<'a> {
    header_row: Option<usize>,
    dialect: Dialect,
    listener: &'a dyn ProgressListener,
}

impl Default for ListWriterBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ListWriterBuilder<'a> {
    pub fn new() -> Self {
        Self {
            header_row: Some(0),
            dialect: Dialect::excel(),
            listener: &LOG_PROGRESS,
        }
    }

    /// Index of the row written first. `None` writes the rows as they are.
    pub fn header_row(mut self, header_row: Option<usize>) -> Self {
        self.header_row = header_row;
        self
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

    pub fn listener(mut self, listener: &'a dyn ProgressListener) -> Self {
        self.listener = listener;
        self
    }

    pub fn build(self) -> ListWriter<'a> {
        ListWriter {
            header_row: self.header_row,
            dialect: self.dialect,
            listener: self.listener,
        }
    }
}
