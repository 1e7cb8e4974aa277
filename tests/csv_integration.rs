use std::{
    collections::{BTreeMap, HashMap},
    fs::{self, read_to_string},
};

use serde::Serialize;
use simplecsv::{
    DictRow, Sink, Source,
    core::{dialect::Dialect, progress::ProgressListener},
    item::{
        dict_reader::DictReaderBuilder, dict_writer::DictWriterBuilder,
        list_reader::ListReaderBuilder, list_writer::ListWriterBuilder,
    },
    read_to_dict, read_to_list, write_dict, write_list,
};
use tempfile::TempDir;

#[derive(Serialize, Debug, Clone, PartialEq)]
struct Product {
    id: String,
    name: String,
    price: f64,
    available: bool,
}

fn products() -> Vec<Product> {
    vec![
        Product {
            id: "P001".to_string(),
            name: "Wireless Headphones".to_string(),
            price: 79.99,
            available: true,
        },
        Product {
            id: "P002".to_string(),
            name: "USB-C Cable, 2m".to_string(),
            price: 12.5,
            available: false,
        },
        Product {
            id: "P003".to_string(),
            name: "Smart \"Fit\" Watch".to_string(),
            price: 149.0,
            available: true,
        },
    ]
}

#[test]
fn list_is_written_to_a_file_with_header_first() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("list.csv");

    let rows = vec![vec!["a", "b"], vec!["1", "2"], vec!["3", "4"]];
    let target = write_list(&rows, Sink::path(&path)).unwrap();

    assert_eq!(target.path(), Some(path.as_path()));
    assert_eq!(read_to_string(&path).unwrap(), "a,b\r\n1,2\r\n3,4\r\n");
}

#[test]
fn header_row_comes_back_first() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("header.csv");

    let rows = vec![
        vec!["1", "Boston"],
        vec!["2", "Concord"],
        vec!["id", "city"],
        vec!["3", "Salem"],
    ];
    ListWriterBuilder::new()
        .header_row(Some(2))
        .build()
        .write(&rows, Sink::path(&path))
        .unwrap();

    let read = read_to_list(Source::path(&path)).unwrap();

    assert_eq!(read[0], rows[2]);
    let rest: Vec<_> = rows
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != 2)
        .map(|(_, row)| row.clone())
        .collect();
    assert_eq!(read[1..], rest[..]);
}

#[test]
fn records_round_trip_with_field_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.csv");

    DictWriterBuilder::new()
        .field_names(["id", "name", "price", "available"])
        .build()
        .write(&products(), Sink::path(&path))
        .unwrap();

    let read = read_to_dict(Source::path(&path)).unwrap();

    assert_eq!(read.len(), 3);
    assert_eq!(read[1].get("name"), Some("USB-C Cable, 2m"));
    assert_eq!(read[1].get("price"), Some("12.5"));
    assert_eq!(read[1].get("available"), Some("false"));
    assert_eq!(read[2].get("name"), Some("Smart \"Fit\" Watch"));
    assert_eq!(read[2].get("price"), Some("149.0"));
}

#[test]
fn records_restricted_to_field_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("restricted.csv");

    let records = vec![
        BTreeMap::from([("a", "1"), ("b", "2")]),
        BTreeMap::from([("a", "3"), ("b", "4")]),
    ];
    DictWriterBuilder::new()
        .field_names(["b", "a"])
        .build()
        .write(&records, Sink::path(&path))
        .unwrap();

    let read = read_to_dict(Source::path(&path)).unwrap();

    let expected: Vec<DictRow> = records
        .iter()
        .map(|record| record.iter().map(|(k, v)| (*k, *v)).collect())
        .collect();
    assert_eq!(read, expected);
    assert_eq!(read_to_string(&path).unwrap(), "b,a\r\n2,1\r\n4,3\r\n");
}

#[test]
fn write_read_write_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    let names = ["id", "name", "price", "available"];

    DictWriterBuilder::new()
        .field_names(names)
        .build()
        .write(&products(), Sink::path(&first))
        .unwrap();
    let read = read_to_dict(Source::path(&first)).unwrap();
    DictWriterBuilder::new()
        .field_names(names)
        .build()
        .write(&read, Sink::path(&second))
        .unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn heterogeneous_records_use_sorted_union() {
    let records = vec![HashMap::from([("x", 1)]), HashMap::from([("y", 2)])];

    let target = write_dict(&records, Sink::writer(Vec::new())).unwrap();

    let data = String::from_utf8(target.into_writer().unwrap()).unwrap();
    assert_eq!(data, "x,y\r\n1,\r\n,2\r\n");
}

#[test]
fn two_line_file_reads_into_one_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("two_lines.csv");
    fs::write(&path, "a,b\n1,2").unwrap();

    let read = read_to_dict(Source::path(&path)).unwrap();

    let expected: DictRow = [("a", "1"), ("b", "2")].into_iter().collect();
    assert_eq!(read, vec![expected]);
}

#[test]
fn empty_inputs_produce_at_most_a_header() {
    let dir = TempDir::new().unwrap();
    let list_path = dir.path().join("empty_list.csv");
    let dict_path = dir.path().join("empty_dict.csv");

    let rows: Vec<Vec<String>> = Vec::new();
    write_list(&rows, Sink::path(&list_path)).unwrap();

    let records: Vec<Product> = Vec::new();
    DictWriterBuilder::new()
        .field_names(["id", "name"])
        .build()
        .write(&records, Sink::path(&dict_path))
        .unwrap();

    assert_eq!(read_to_string(&list_path).unwrap(), "");
    assert_eq!(read_to_string(&dict_path).unwrap(), "id,name\r\n");
    assert!(read_to_dict(Source::path(&dict_path)).unwrap().is_empty());
}

#[test]
fn auto_named_files_are_distinct() {
    let dir = TempDir::new().unwrap();
    let rows = vec![vec!["a"], vec!["1"]];

    let first = ListWriterBuilder::new()
        .build()
        .write(&rows, Sink::auto_in(dir.path()))
        .unwrap()
        .into_path()
        .unwrap();
    let second = ListWriterBuilder::new()
        .build()
        .write(&rows, Sink::auto_in(dir.path()))
        .unwrap()
        .into_path()
        .unwrap();

    assert_ne!(first, second);
    for path in [&first, &second] {
        assert_eq!(path.extension().unwrap(), "csv");
        assert_eq!(read_to_string(path).unwrap(), "a\r\n1\r\n");
    }
}

#[test]
fn custom_dialect_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("semicolons.csv");
    let dialect = Dialect::named("unix").unwrap().with_delimiter(b';');

    let rows = vec![vec!["name", "note"], vec!["Alice", "likes; semicolons"]];
    ListWriterBuilder::new()
        .dialect(dialect)
        .build()
        .write(&rows, Sink::path(&path))
        .unwrap();

    assert_eq!(
        read_to_string(&path).unwrap(),
        "\"name\";\"note\"\n\"Alice\";\"likes; semicolons\"\n"
    );

    let read = ListReaderBuilder::new()
        .dialect(dialect)
        .build()
        .read(Source::path(&path))
        .unwrap();
    assert_eq!(read, rows);

    let records = DictReaderBuilder::new()
        .delimiter(b';')
        .build()
        .read(Source::path(&path))
        .unwrap();
    assert_eq!(records[0].get("note"), Some("likes; semicolons"));
}

#[test]
fn progress_is_reported_per_record() {
    let _ = env_logger::builder().is_test(true).try_init();

    #[derive(Default)]
    struct Names(std::cell::RefCell<Vec<String>>, std::cell::Cell<usize>);

    impl ProgressListener for Names {
        fn on_field_names(&self, names: &[String]) {
            self.0.borrow_mut().extend_from_slice(names);
        }

        fn on_item(&self, _index: usize) {
            self.1.set(self.1.get() + 1);
        }
    }

    let listener = Names::default();
    DictWriterBuilder::new()
        .listener(&listener)
        .build()
        .write(&products(), Sink::writer(Vec::<u8>::new()))
        .unwrap();

    assert_eq!(
        *listener.0.borrow(),
        vec!["available", "id", "name", "price"]
    );
    assert_eq!(listener.1.get(), 3);
}

#[test]
#[allow(deprecated)]
fn deprecated_aliases_forward() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("aliases.csv");

    let rows = vec![vec!["a", "b"], vec!["1", "2"]];
    simplecsv::convert_list_to_csv(&rows, Sink::path(&path)).unwrap();

    assert_eq!(simplecsv::read_csv_to_list(Source::path(&path)).unwrap(), rows);
    assert_eq!(
        simplecsv::read_csv_to_dict(Source::path(&path)).unwrap()[0].get("b"),
        Some("2")
    );

    let records = vec![BTreeMap::from([("k", "v")])];
    let target = simplecsv::convert_dict_to_csv(&records, Sink::writer(Vec::new())).unwrap();
    assert_eq!(target.into_writer().unwrap(), b"k\r\nv\r\n");
}
