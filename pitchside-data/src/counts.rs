//! Per-sport aggregate counts.
//!
//! Every tag of every classified record is counted once. The table is ordered
//! by descending count, ties broken by ascending tag, and written as CSV with
//! a `sport,count` header.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::io::Write;

use log::info;
use pitchside_core::{ClassifiedRecord, ReportSink};
use serde::Serialize;
use thiserror::Error;

/// Number of records carrying one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    /// The sport tag.
    #[serde(rename = "sport")]
    pub tag: String,
    /// Records carrying the tag.
    pub count: u64,
}

/// Errors raised while writing a counts table.
#[derive(Debug, Error)]
pub enum CountsError {
    /// A row could not be encoded or written.
    #[error("failed to write counts row")]
    Write(#[from] csv::Error),
    /// The output could not be flushed.
    #[error("failed to flush counts table")]
    Flush(#[from] std::io::Error),
}

/// Tally the tags of `records`.
///
/// # Examples
/// ```
/// use pitchside_core::{FilterMode, PriorityOrder, RawRecord, run};
/// use pitchside_data::count_tags;
///
/// let rows = vec![
///     RawRecord::new("POINT (1 2)", "cricket"),
///     RawRecord::new("POINT (3 4)", "cricket;bowls"),
/// ];
/// let report = run(&rows, &FilterMode::All, &PriorityOrder::default());
/// let counts = count_tags(&report.classified);
/// assert_eq!(counts[0].tag, "cricket");
/// assert_eq!(counts[0].count, 2);
/// ```
#[must_use]
pub fn count_tags(records: &[ClassifiedRecord]) -> Vec<TagCount> {
    let mut tally: BTreeMap<&str, u64> = BTreeMap::new();
    for tag in records.iter().flat_map(|record| record.tags.iter()) {
        let entry = tally.entry(tag).or_default();
        *entry = entry.saturating_add(1);
    }
    let mut counts: Vec<TagCount> = tally
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_owned(),
            count,
        })
        .collect();
    // The map yields tags in ascending order, so a stable sort keeps ties there.
    counts.sort_by_key(|row| Reverse(row.count));
    counts
}

/// Write `counts` as CSV with a `sport,count` header.
pub fn write_counts<W: Write>(counts: &[TagCount], writer: W) -> Result<(), CountsError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if counts.is_empty() {
        csv_writer.write_record(["sport", "count"])?;
    }
    for row in counts {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// [`ReportSink`] writing aggregate counts to `W`.
#[derive(Debug)]
pub struct CountsReport<W> {
    writer: W,
    counts: Vec<TagCount>,
}

impl<W: Write> CountsReport<W> {
    /// Write the table to `writer` when records are consumed.
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            counts: Vec::new(),
        }
    }

    /// Counts from the last consumed batch.
    #[must_use]
    pub fn counts(&self) -> &[TagCount] {
        &self.counts
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for CountsReport<W> {
    type Error = CountsError;

    fn consume(&mut self, records: &[ClassifiedRecord]) -> Result<(), Self::Error> {
        self.counts = count_tags(records);
        write_counts(&self.counts, &mut self.writer)?;
        info!(
            "Counted {} distinct sports across {} records",
            self.counts.len(),
            records.len()
        );
        Ok(())
    }
}
