//! In-memory `RecordSource` and `ReportSink` implementations used by unit and
//! behaviour tests.

use std::convert::Infallible;

use crate::{ClassifiedRecord, RawRecord, RecordSource, ReportSink};

/// In-memory `RecordSource` returning a fixed table.
#[derive(Default, Debug, Clone)]
pub struct MemorySource {
    records: Vec<RawRecord>,
}

impl MemorySource {
    /// Create a source from a collection of rows.
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Create a source from `(geometry, tags)` pairs.
    pub fn with_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::with_records(
            rows.into_iter()
                .map(|(geometry, tags)| RawRecord::new(geometry, tags)),
        )
    }
}

impl RecordSource for MemorySource {
    type Error = Infallible;

    fn load(&self) -> Result<Vec<RawRecord>, Self::Error> {
        Ok(self.records.clone())
    }
}

/// `ReportSink` that keeps every batch it receives.
#[derive(Default, Debug, Clone)]
pub struct MemorySink {
    batches: Vec<Vec<ClassifiedRecord>>,
}

impl MemorySink {
    /// All records received, flattened across batches.
    pub fn records(&self) -> impl Iterator<Item = &ClassifiedRecord> {
        self.batches.iter().flatten()
    }

    /// Number of `consume` calls.
    #[must_use]
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }
}

impl ReportSink for MemorySink {
    type Error = Infallible;

    fn consume(&mut self, records: &[ClassifiedRecord]) -> Result<(), Self::Error> {
        self.batches.push(records.to_vec());
        Ok(())
    }
}
