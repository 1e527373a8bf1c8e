//! Output seam for classified records.
//!
//! Sinks serialise a finished run: an aggregate count table, a rendered map,
//! or anything else that only needs points and tags.

use crate::record::ClassifiedRecord;

/// Consumes the classified records of a run.
pub trait ReportSink {
    /// Error raised while writing the report.
    type Error: std::error::Error;

    /// Render or persist `records`, which arrive in input order.
    fn consume(&mut self, records: &[ClassifiedRecord]) -> Result<(), Self::Error>;
}
