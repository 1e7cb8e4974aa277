#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # simplecsv

 Simple helpers for reading and writing CSV files as lists of rows and as
 lists of dictionary-like records.

 ## Core Concepts

- **Sink / Source:** where a writer sends its output (an auto-named file, a
  path, or an open writer) and where a reader takes its input from (a path or
  an open reader).
- **Dialect:** a bundle of formatting rules (delimiter, quote character,
  quoting policy, line terminator). `excel` is the default; `excel-tab` and
  `unix` are also available by name.
- **ListWriter / ListReader:** rows of values in, rows of strings out. The
  writer puts one designated row first as the header.
- **DictWriter / DictReader:** mapping records in, `DictRow`s out. The writer
  works out field names when none are given; the reader keys every row by the
  first one.
- **ProgressListener:** receives one event per written item. By default
  progress goes to the `log` facade.

 ## Getting Started

 Writing with no file name creates a timestamp-named `.csv` file:

```no_run
use std::collections::HashMap;
use simplecsv::{Sink, Source, read_to_dict, write_dict};

fn main() -> Result<(), simplecsv::CsvError> {
    let records = vec![
        HashMap::from([("make", "Porsche"), ("model", "356")]),
        HashMap::from([("make", "Peugeot"), ("year", "1995")]),
    ];

    // Header is the sorted union of the keys: make,model,year
    let target = write_dict(&records, Sink::auto())?;
    let path = target.into_path().unwrap();

    let read = read_to_dict(Source::path(&path))?;
    assert_eq!(read[1].get("year"), Some("1995"));
    Ok(())
}
```

 Everything the shortcuts fix can be set through the builders:

```
use simplecsv::core::dialect::Dialect;
use simplecsv::core::target::Sink;
use simplecsv::item::list_writer::ListWriterBuilder;

let rows = vec![vec!["1", "2"], vec!["x", "y"]];

let target = ListWriterBuilder::new()
    .header_row(Some(1))
    .dialect(Dialect::unix())
    .build()
    .write(&rows, Sink::writer(Vec::new()))
    .unwrap();

let data = String::from_utf8(target.into_writer().unwrap()).unwrap();
assert_eq!(data, "\"x\",\"y\"\n\"1\",\"2\"\n");
```
 */

/// Dialects, file resolution, key collection and progress reporting
pub mod core;

/// Error types for reading and writing
pub mod error;

#[doc(inline)]
pub use error::*;

/// List and dictionary readers and writers
pub mod item;

#[doc(inline)]
pub use crate::core::{
    dialect::{Dialect, Quoting},
    target::{Sink, Source, Target},
};

#[doc(inline)]
pub use item::{read_to_dict, read_to_list, record::DictRow, write_dict, write_list};

#[allow(deprecated)]
#[doc(inline)]
pub use item::{convert_dict_to_csv, convert_list_to_csv, read_csv_to_dict, read_csv_to_list};
