//! Structured diagnostics for geometry failures.
//!
//! Every reduction failure is delivered to a [`DiagnosticsSink`] as a
//! [`GeometryDiagnostic`]. Sinks observe failures only; nothing they do feeds
//! back into control flow.

use log::warn;

use crate::record::FailureReason;

/// A single geometry failure reported during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryDiagnostic {
    /// The geometry text exactly as it was read.
    pub raw_geometry: String,
    /// Failure classification.
    pub reason: FailureReason,
    /// Human-readable detail, e.g. the parser message or the geometry type.
    pub detail: String,
}

/// Receives geometry diagnostics.
///
/// `Vec<GeometryDiagnostic>` implements the trait, which makes failures easy
/// to inspect in tests.
///
/// # Examples
/// ```
/// use pitchside_core::{GeometryDiagnostic, reduce_reporting};
///
/// let mut seen: Vec<GeometryDiagnostic> = Vec::new();
/// assert!(reduce_reporting("BOGUS", &mut seen).is_err());
/// assert_eq!(seen.len(), 1);
/// ```
pub trait DiagnosticsSink {
    /// Record a failure.
    fn record(&mut self, diagnostic: GeometryDiagnostic);
}

impl DiagnosticsSink for Vec<GeometryDiagnostic> {
    fn record(&mut self, diagnostic: GeometryDiagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to the `log` facade at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl DiagnosticsSink for LogDiagnostics {
    fn record(&mut self, diagnostic: GeometryDiagnostic) {
        warn!(
            "Skipped geometry ({}): {} [{}]",
            diagnostic.reason, diagnostic.detail, diagnostic.raw_geometry
        );
    }
}

/// Forwards at most `limit` diagnostics to an inner sink and counts the rest.
#[derive(Debug)]
pub struct CappedDiagnostics<S> {
    inner: S,
    limit: usize,
    dropped: usize,
}

impl<S: DiagnosticsSink> CappedDiagnostics<S> {
    /// Wrap `inner`, forwarding no more than `limit` diagnostics.
    pub const fn new(inner: S, limit: usize) -> Self {
        Self {
            inner,
            limit,
            dropped: 0,
        }
    }

    /// Number of diagnostics withheld from the inner sink.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Unwrap the inner sink.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: DiagnosticsSink> DiagnosticsSink for CappedDiagnostics<S> {
    fn record(&mut self, diagnostic: GeometryDiagnostic) {
        if self.limit == 0 {
            self.dropped += 1;
            return;
        }
        self.limit -= 1;
        self.inner.record(diagnostic);
    }
}
