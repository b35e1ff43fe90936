use super::MetricRecord;
use crate::github::CollectError;

/// Sink for the records and per-repository errors of a collection cycle.
pub trait Accumulator {
    /// Accept a counter-type record.
    fn add_counter(&mut self, record: MetricRecord);

    /// Accept an error that prevented a record from being produced.
    fn add_error(&mut self, error: CollectError);
}

/// Accumulator that keeps everything it receives in memory.
#[derive(Debug, Default)]
pub struct RecordingAccumulator {
    records: Vec<MetricRecord>,
    errors: Vec<CollectError>,
}

impl RecordingAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    #[must_use]
    pub fn errors(&self) -> &[CollectError] {
        &self.errors
    }

    /// Find the record emitted for a given measurement and `repository` tag.
    #[must_use]
    pub fn find(&self, name: &str, repository: &str) -> Option<&MetricRecord> {
        self.records
            .iter()
            .find(|r| r.name() == name && r.tag(super::REPOSITORY_TAG) == Some(repository))
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<MetricRecord>, Vec<CollectError>) {
        (self.records, self.errors)
    }
}

impl Accumulator for RecordingAccumulator {
    fn add_counter(&mut self, record: MetricRecord) {
        self.records.push(record);
    }

    fn add_error(&mut self, error: CollectError) {
        self.errors.push(error);
    }
}
