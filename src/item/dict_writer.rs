use std::io::Write;

use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::{
    core::{
        dialect::{Dialect, Quoting},
        keys::{collect_all_keys, record_keys, to_fields},
        progress::{LOG_PROGRESS, ProgressListener},
        target::{Sink, Target},
    },
    error::{CsvError, CsvResult},
};

/// What to do with a record holding keys that are not field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtrasAction {
    /// The record fails.
    #[default]
    Raise,
    /// The extra keys are dropped.
    Ignore,
}

/// A record that was left out of the output.
#[derive(Debug)]
pub struct SkippedRecord {
    pub index: usize,
    pub error: CsvError,
}

/// Outcome of a dictionary write.
#[derive(Debug)]
pub struct DictWriteReport<W> {
    pub target: Target<W>,
    /// Records written, header excluded.
    pub written: usize,
    pub skipped: Vec<SkippedRecord>,
}

/// Writes mapping records to CSV under a header of field names.
///
/// Field names come from, in order of preference:
///
/// 1. the explicit list given to the builder;
/// 2. the keys of the record at `header_row`, sorted;
/// 3. the sorted union of the keys of all records, or the keys of the first
///    record if some record is not a mapping.
///
/// Cells are the record values: strings as they are, numbers and booleans in
/// their display form, nulls empty, nested values as compact JSON. Missing
/// fields are filled with the rest value.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use simplecsv::core::target::Sink;
/// use simplecsv::item::dict_writer::DictWriterBuilder;
///
/// let records = vec![HashMap::from([("x", 1)]), HashMap::from([("y", 2)])];
///
/// let report = DictWriterBuilder::new()
///     .build()
///     .write(&records, Sink::writer(Vec::new()))
///     .unwrap();
///
/// assert_eq!(report.written, 2);
/// let data = String::from_utf8(report.target.into_writer().unwrap()).unwrap();
/// assert_eq!(data, "x,y\r\n1,\r\n,2\r\n");
/// ```
pub struct DictWriter<'a> {
    header_row: Option<usize>,
    field_names: Option<Vec<String>>,
    dialect: Dialect,
    extras_action: ExtrasAction,
    rest_value: String,
    skip_limit: usize,
    listener: &'a dyn ProgressListener,
}

impl DictWriter<'_> {
    /// Writes `records` to `sink`.
    ///
    /// A record that cannot be written is skipped while fewer than
    /// `skip_limit` records have been skipped; past that the write stops with
    /// [`CsvError::PartialWrite`], which carries the number of records written
    /// and the cause. Engine failures always stop the write the same way.
    ///
    /// Each record is flushed to the sink before it is counted, so `written`
    /// never includes buffered output. Without field names no line is written
    /// and no record is counted. The handle is closed on every path.
    pub fn write<T: Serialize, W: Write>(
        &self,
        records: &[T],
        sink: Sink<W>,
    ) -> CsvResult<DictWriteReport<W>> {
        let names = self.resolve_field_names(records)?;
        self.listener.on_field_names(&names);

        let handle = sink.open()?;
        let mut wtr = self.dialect.writer_builder().from_writer(handle);
        self.listener.on_start();

        let mut written = 0;
        if !names.is_empty() {
            emit(&mut wtr, &names).map_err(|error| partial(written, error))?;
        }

        let mut skipped = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let row = match self.to_row(index, record, &names) {
                Ok(row) => row,
                Err(error) if skipped.len() < self.skip_limit => {
                    self.listener.on_skip(index, &error);
                    skipped.push(SkippedRecord { index, error });
                    continue;
                }
                Err(error) => return Err(partial(written, error)),
            };

            if names.is_empty() {
                continue;
            }
            emit(&mut wtr, &row).map_err(|error| partial(written, error))?;
            self.listener.on_item(written);
            written += 1;
        }

        let handle = wtr
            .into_inner()
            .map_err(|error| partial(written, error.into_error().into()))?;
        self.listener.on_finish(written);

        Ok(DictWriteReport {
            target: handle.into_target(),
            written,
            skipped,
        })
    }

    fn resolve_field_names<T: Serialize>(&self, records: &[T]) -> CsvResult<Vec<String>> {
        if let Some(names) = &self.field_names {
            return Ok(names.clone());
        }

        if let Some(index) = self.header_row {
            let record = records.get(index).ok_or(CsvError::HeaderRowOutOfRange {
                index,
                len: records.len(),
            })?;
            let mut names = record_keys(record)?;
            names.sort();
            return Ok(names);
        }

        match collect_all_keys(records) {
            Ok(keys) => Ok(keys.into_iter().collect()),
            Err(error) => {
                warn!("Cannot collect all keys, using the first record: {}", error);
                match records.first() {
                    Some(first) => record_keys(first),
                    None => Ok(Vec::new()),
                }
            }
        }
    }

    fn to_row<T: Serialize>(
        &self,
        index: usize,
        record: &T,
        names: &[String],
    ) -> CsvResult<Vec<String>> {
        let fields = to_fields(record).map_err(|reason| CsvError::Record { index, reason })?;

        if self.extras_action == ExtrasAction::Raise {
            let extras: Vec<&str> = fields
                .keys()
                .filter(|key| !names.iter().any(|name| name == *key))
                .map(String::as_str)
                .collect();
            if !extras.is_empty() {
                return Err(CsvError::Record {
                    index,
                    reason: format!("fields not in field names: {}", extras.join(", ")),
                });
            }
        }

        Ok(names
            .iter()
            .map(|name| match fields.get(name) {
                Some(value) => cell(value),
                None => self.rest_value.clone(),
            })
            .collect())
    }
}

/// Writes one line and pushes it through to the sink.
fn emit<W: Write>(wtr: &mut csv::Writer<W>, fields: &[String]) -> CsvResult<()> {
    wtr.write_record(fields)?;
    wtr.flush()?;
    Ok(())
}

fn partial(written: usize, error: CsvError) -> CsvError {
    CsvError::PartialWrite {
        written,
        source: Box::new(error),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// A builder for configuring a [`DictWriter`].
///
/// Defaults: `excel` dialect, no header row, field names collected from the
/// records, extra keys rejected, empty rest value, no skipped records,
/// progress sent to the log.
pub struct DictWriterBuilder<'a> {
    header_row: Option<usize>,
    field_names: Option<Vec<String>>,
    dialect: Dialect,
    extras_action: ExtrasAction,
    rest_value: String,
    skip_limit: usize,
    listener: &'a dyn ProgressListener,
}

impl Default for DictWriterBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> DictWriterBuilder<'a> {
    pub fn new() -> Self {
        Self {
            header_row: None,
            field_names: None,
            dialect: Dialect::excel(),
            extras_action: ExtrasAction::Raise,
            rest_value: String::new(),
            skip_limit: 0,
            listener: &LOG_PROGRESS,
        }
    }

    /// Index of the record whose keys, sorted, become the field names.
    pub fn header_row(mut self, header_row: Option<usize>) -> Self {
        self.header_row = header_row;
        self
    }

    /// Field names written as they are given.
    pub fn field_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_names = Some(names.into_iter().map(Into::into).collect());
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

    pub fn extras_action(mut self, extras_action: ExtrasAction) -> Self {
        self.extras_action = extras_action;
        self
    }

    /// Value written for a field the record does not have.
    pub fn rest_value<S: Into<String>>(mut self, rest_value: S) -> Self {
        self.rest_value = rest_value.into();
        self
    }

    /// Number of failing records tolerated before the write stops.
    pub fn skip_limit(mut self, skip_limit: usize) -> Self {
        self.skip_limit = skip_limit;
        self
    }

    pub fn listener(mut self, listener: &'a dyn ProgressListener) -> Self {
        self.listener = listener;
        self
    }

    pub fn build(self) -> DictWriter<'a> {
        DictWriter {
            header_row: self.header_row,
            field_names: self.field_names,
            dialect: self.dialect,
            extras_action: self.extras_action,
            rest_value: self.rest_value,
            skip_limit: self.skip_limit,
            listener: self.listener,
        }
    }
}
