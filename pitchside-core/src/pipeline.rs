//! Per-record orchestration over a whole dataset.
//!
//! Each row is handled independently, in input order: parse tags, filter,
//! reduce the geometry, then assemble a [`ClassifiedRecord`] or a
//! [`FailureRecord`]. A bad row never stops the run.

use std::fmt;

use log::info;

use crate::diagnostics::{DiagnosticsSink, LogDiagnostics};
use crate::filter::FilterMode;
use crate::geometry::reduce_reporting;
use crate::record::{ClassifiedRecord, FailureRecord, RawRecord};
use crate::source::RecordSource;
use crate::tags::{PriorityOrder, TagSet, primary_of};

/// Output of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Admitted records whose geometry reduced, in input order.
    pub classified: Vec<ClassifiedRecord>,
    /// Admitted records whose geometry failed, in input order.
    pub failures: Vec<FailureRecord>,
}

impl RunReport {
    /// End-of-run counts.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            classified: self.classified.len(),
            failures: self.failures.len(),
        }
    }
}

/// Counts of successes and failures for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of classified records.
    pub classified: usize,
    /// Number of geometry failures.
    pub failures: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} classified, {} failed",
            self.classified, self.failures
        )
    }
}

/// Run the pipeline, sending diagnostics to the `log` facade.
///
/// # Examples
/// ```
/// use pitchside_core::{FilterMode, PriorityOrder, RawRecord, run};
///
/// let rows = vec![
///     RawRecord::new("POINT (1 2)", "cricket"),
///     RawRecord::new("BOGUS", "rugby_union"),
///     RawRecord::new("POINT (3 4)", "cricket;bowls"),
/// ];
/// let report = run(&rows, &FilterMode::any_of(["cricket"]), &PriorityOrder::default());
/// assert_eq!(report.summary().classified, 2);
/// assert_eq!(report.summary().failures, 0);
/// ```
#[must_use]
pub fn run(records: &[RawRecord], mode: &FilterMode, priority: &PriorityOrder) -> RunReport {
    run_with_diagnostics(records, mode, priority, &mut LogDiagnostics)
}

/// Run the pipeline, sending diagnostics to `diagnostics`.
pub fn run_with_diagnostics(
    records: &[RawRecord],
    mode: &FilterMode,
    priority: &PriorityOrder,
    diagnostics: &mut dyn DiagnosticsSink,
) -> RunReport {
    let mut report = RunReport::default();
    for record in records {
        let tags = TagSet::parse(&record.sport_tags);
        if !mode.admits(&tags) {
            continue;
        }
        match reduce_reporting(&record.geometry, diagnostics) {
            Ok(point) => {
                let primary_tag = primary_of(&tags, priority).map(str::to_owned);
                report.classified.push(ClassifiedRecord {
                    point,
                    tags,
                    primary_tag,
                });
            }
            Err(failure) => report.failures.push(FailureRecord {
                raw_geometry: record.geometry.clone(),
                reason: failure.reason,
            }),
        }
    }
    info!(
        "Processed {} rows: {}",
        records.len(),
        report.summary()
    );
    report
}

/// Load every row from `source` and run the pipeline over it.
///
/// Only a loader failure is returned as an error.
pub fn run_source<S: RecordSource>(
    source: &S,
    mode: &FilterMode,
    priority: &PriorityOrder,
    diagnostics: &mut dyn DiagnosticsSink,
) -> Result<RunReport, S::Error> {
    let records = source.load()?;
    Ok(run_with_diagnostics(&records, mode, priority, diagnostics))
}
