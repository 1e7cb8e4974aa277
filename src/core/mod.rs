use rand::distr::{Alphanumeric, SampleString};

/// Named CSV dialects and their engine configuration.
pub mod dialect;

/// Strict decoding of raw fields.
pub mod encoding;

/// Key collection across mapping records.
pub mod keys;

/// Progress reporting hooks.
pub mod progress;

/// Resolution of sinks and sources into open handles.
pub mod target;

/// Generates a random name consisting of alphanumeric characters.
///
/// # Returns
///
/// A `String` containing the generated random name.
fn build_name() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), 8)
}
