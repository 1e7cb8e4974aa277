use encoding_rs::{Encoding, UTF_8};

use crate::error::CsvError;

/// Resolves an encoding label such as `"latin1"` or `"utf-16le"`.
///
/// `None` means UTF-8.
pub fn resolve(label: Option<&str>) -> Result<&'static Encoding, CsvError> {
    match label {
        None => Ok(UTF_8),
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| CsvError::UnknownEncoding(label.to_string())),
    }
}

/// Decodes every field of a raw record, failing on the first malformed one.
pub(crate) fn decode_record(
    record: &csv::ByteRecord,
    encoding: &'static Encoding,
    row: usize,
) -> Result<Vec<String>, CsvError> {
    record
        .iter()
        .enumerate()
        .map(|(field, bytes)| {
            encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.into_owned())
                .ok_or(CsvError::Encoding {
                    row,
                    field,
                    encoding: encoding.name(),
                })
        })
        .collect()
}
