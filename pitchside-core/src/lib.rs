//! Core domain logic for the Pitchside facility mapper.
//!
//! Responsibilities:
//! - Reduce WKT geometries to a single representative point.
//! - Parse multi-valued sport tags and resolve a primary tag.
//! - Admit records by sport and drive the per-record pipeline.
//!
//! Boundaries:
//! - No I/O. Loading rows and rendering reports happen behind the
//!   [`RecordSource`] and [`ReportSink`] traits.
//! - Per-record failures are values, never panics or fatal errors.
//!
//! Coordinates follow the `geo` convention of `x = longitude` and
//! `y = latitude`; [`RepresentativePoint`] always reports latitude first.

#![forbid(unsafe_code)]

pub mod diagnostics;
pub mod filter;
pub mod geometry;
pub mod palette;
pub mod pipeline;
pub mod record;
pub mod sink;
pub mod source;
pub mod tags;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use diagnostics::{CappedDiagnostics, DiagnosticsSink, GeometryDiagnostic, LogDiagnostics};
pub use filter::{FilterMode, admit};
pub use geometry::{GeometryFailure, ParsedGeometry, reduce, reduce_reporting};
pub use palette::{DEFAULT_COLOUR, Palette, PaletteError};
pub use pipeline::{RunReport, RunSummary, run, run_source, run_with_diagnostics};
pub use record::{
    ClassifiedRecord, CoordinateError, FailureReason, FailureRecord, RawRecord,
    RepresentativePoint,
};
pub use sink::ReportSink;
pub use source::RecordSource;
pub use tags::{PriorityOrder, TagSet, parse_tags, primary_of};
