//! Key collection for mapping-like records.
//!
//! Records are anything `Serialize` whose serialized form is a map: hash maps,
//! b-tree maps, structs, JSON objects. Keys are read from that form.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CsvError;

/// Serializes a record and returns its fields, in the record's natural order.
pub(crate) fn to_fields<T: Serialize>(record: &T) -> Result<Map<String, Value>, String> {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(format!("expected a mapping, found {}", kind(&other))),
        Err(error) => Err(error.to_string()),
    }
}

/// Returns every key seen across `records`, sorted.
///
/// Fails if any record does not serialize to a mapping.
pub fn collect_all_keys<T: Serialize>(records: &[T]) -> Result<BTreeSet<String>, CsvError> {
    let mut keys = BTreeSet::new();
    for (index, record) in records.iter().enumerate() {
        let fields = to_fields(record)
            .map_err(|reason| CsvError::KeyCollection(format!("record {}: {}", index, reason)))?;
        keys.extend(fields.into_iter().map(|(key, _)| key));
    }
    Ok(keys)
}

/// Returns the keys of a single record in their natural order: declaration
/// order for structs, iteration order for maps.
pub fn record_keys<T: Serialize>(record: &T) -> Result<Vec<String>, CsvError> {
    to_fields(record)
        .map(|fields| fields.into_iter().map(|(key, _)| key).collect())
        .map_err(CsvError::KeyCollection)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
