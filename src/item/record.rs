use std::collections::{BTreeMap, btree_map};

use serde::{Serialize, Serializer, ser::SerializeMap};

/// A record read by the dictionary reader.
///
/// Fields are keyed by the header names. Values found past the end of the
/// header are kept, in order, in the overflow bucket.
///
/// # Examples
///
/// ```
/// use simplecsv::item::record::DictRow;
///
/// let row: DictRow = [("a", "1"), ("b", "2")].into_iter().collect();
/// assert_eq!(row.get("a"), Some("1"));
/// assert!(row.overflow().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictRow {
    fields: BTreeMap<String, String>,
    overflow: Vec<String>,
}

impl DictRow {
    pub(crate) fn new(fields: BTreeMap<String, String>, overflow: Vec<String>) -> Self {
        Self { fields, overflow }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Values beyond the last header column.
    pub fn overflow(&self) -> &[String] {
        &self.overflow
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.fields.iter()
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DictRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            overflow: Vec::new(),
        }
    }
}

impl From<DictRow> for BTreeMap<String, String> {
    fn from(row: DictRow) -> Self {
        row.fields
    }
}

impl<'a> IntoIterator for &'a DictRow {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Serializes as a map of the named fields; overflow values are left out.
impl Serialize for DictRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
