use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
/// Error raised by the CSV helpers
pub enum CsvError {
    #[error("Cannot open {}: {source}", .path.display())]
    Resolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("Row {row}, field {field}: invalid {encoding} data")]
    Encoding {
        row: usize,
        field: usize,
        encoding: &'static str,
    },

    #[error("Header row {index} out of range for {len} rows")]
    HeaderRowOutOfRange { index: usize, len: usize },

    #[error("Cannot collect keys: {0}")]
    KeyCollection(String),

    #[error("Record {index}: {reason}")]
    Record { index: usize, reason: String },

    /// The dictionary writer stopped after `written` records.
    #[error("Wrote {written} records before failing: {source}")]
    PartialWrite {
        written: usize,
        #[source]
        source: Box<CsvError>,
    },
}

/// Result type of every reading and writing operation.
pub type CsvResult<T> = Result<T, CsvError>;
