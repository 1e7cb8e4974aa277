use log::{debug, info, warn};

use crate::error::CsvError;

/// Receives progress events from the readers and writers.
///
/// Every method has an empty default, so an implementation only overrides
/// the events it cares about.
pub trait ProgressListener {
    /// Called once the output is open, before the first row is written.
    fn on_start(&self) {}

    /// Called once the field names of a dictionary write are known.
    fn on_field_names(&self, _names: &[String]) {}

    /// Called after each data row or record is written. `index` counts
    /// written items from zero.
    fn on_item(&self, _index: usize) {}

    /// Called when a dictionary record is skipped.
    fn on_skip(&self, _index: usize, _error: &CsvError) {}

    /// Called once the output is complete.
    fn on_finish(&self, _written: usize) {}
}

/// Reports progress through the `log` facade.
#[derive(Default)]
pub struct LogProgress {}

impl ProgressListener for LogProgress {
    fn on_start(&self) {
        info!("Writing rows");
    }

    fn on_field_names(&self, names: &[String]) {
        info!("Field names: {:?}", names);
    }

    fn on_item(&self, index: usize) {
        debug!("Wrote item {}", index);
    }

    fn on_skip(&self, index: usize, error: &CsvError) {
        warn!("Skipped record {}: {}", index, error);
    }

    fn on_finish(&self, written: usize) {
        info!("Wrote {} items", written);
    }
}

/// Ignores every event.
#[derive(Default)]
pub struct NoProgress {}

impl ProgressListener for NoProgress {}

pub(crate) static LOG_PROGRESS: LogProgress = LogProgress {};
