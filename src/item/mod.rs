//! Readers and writers for lists of rows and lists of records.
//!
//! Each component follows the builder pattern; the functions at the bottom
//! of this module run them with their default configuration.

use std::io::{Read, Write};

use serde::Serialize;

use crate::{
    core::target::{Sink, Source, Target},
    error::CsvResult,
};

/// Writing mapping records under a header of field names.
pub mod dict_writer;

/// Reading CSV rows into records keyed by the header.
pub mod dict_reader;

/// Writing rows of values.
pub mod list_writer;

/// Reading CSV rows into lists of strings.
pub mod list_reader;

/// The record type produced by the dictionary reader.
pub mod record;

use dict_reader::DictReaderBuilder;
use dict_writer::DictWriterBuilder;
use list_reader::ListReaderBuilder;
use list_writer::ListWriterBuilder;
use record::DictRow;

/// Writes `rows` with the `excel` dialect, `rows[0]` being the header.
///
/// # Examples
///
/// ```
/// use simplecsv::{Sink, write_list};
///
/// let rows = vec![vec!["a", "b"], vec!["1", "2"], vec!["3", "4"]];
/// let target = write_list(&rows, Sink::writer(Vec::new())).unwrap();
///
/// let data = String::from_utf8(target.into_writer().unwrap()).unwrap();
/// assert_eq!(data, "a,b\r\n1,2\r\n3,4\r\n");
/// ```
pub fn write_list<R: Serialize, W: Write>(rows: &[R], sink: Sink<W>) -> CsvResult<Target<W>> {
    ListWriterBuilder::new().build().write(rows, sink)
}

/// Writes `records` with the `excel` dialect under the sorted union of their
/// keys.
///
/// The first record that cannot be written ends the call with
/// [`CsvError::PartialWrite`](crate::CsvError::PartialWrite).
pub fn write_dict<T: Serialize, W: Write>(records: &[T], sink: Sink<W>) -> CsvResult<Target<W>> {
    DictWriterBuilder::new()
        .build()
        .write(records, sink)
        .map(|report| report.target)
}

/// Reads every row of `source`, header included, with the `excel` dialect.
pub fn read_to_list<R: Read>(source: Source<R>) -> CsvResult<Vec<Vec<String>>> {
    ListReaderBuilder::new().build().read(source)
}

/// Reads `source` into records keyed by its first row, with the `excel`
/// dialect.
///
/// # Examples
///
/// ```
/// use simplecsv::{Source, read_to_dict};
///
/// let records = read_to_dict(Source::reader("a,b\n1,2".as_bytes())).unwrap();
/// assert_eq!(records[0].get("a"), Some("1"));
/// ```
pub fn read_to_dict<R: Read>(source: Source<R>) -> CsvResult<Vec<DictRow>> {
    DictReaderBuilder::new().build().read(source)
}

#[deprecated(note = "use `write_list`")]
pub fn convert_list_to_csv<R: Serialize, W: Write>(
    rows: &[R],
    sink: Sink<W>,
) -> CsvResult<Target<W>> {
    write_list(rows, sink)
}

#[deprecated(note = "use `write_dict`")]
pub fn convert_dict_to_csv<T: Serialize, W: Write>(
    records: &[T],
    sink: Sink<W>,
) -> CsvResult<Target<W>> {
    write_dict(records, sink)
}

#[deprecated(note = "use `read_to_list`")]
pub fn read_csv_to_list<R: Read>(source: Source<R>) -> CsvResult<Vec<Vec<String>>> {
    read_to_list(source)
}

#[deprecated(note = "use `read_to_dict`")]
pub fn read_csv_to_dict<R: Read>(source: Source<R>) -> CsvResult<Vec<DictRow>> {
    read_to_dict(source)
}
