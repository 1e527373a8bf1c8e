//! Facade crate for the `pitchside` sports facility classifier.
//!
//! This crate re-exports the core classification pipeline and, behind the
//! default `data` feature, the CSV loader and report writers.

#![forbid(unsafe_code)]

pub use pitchside_core::{
    ClassifiedRecord, DiagnosticsSink, FailureReason, FailureRecord, FilterMode,
    GeometryDiagnostic, GeometryFailure, Palette, PriorityOrder, RawRecord, RecordSource,
    ReportSink, RepresentativePoint, RunReport, RunSummary, TagSet, admit, parse_tags, primary_of,
    reduce, run, run_with_diagnostics,
};

#[cfg(feature = "data")]
pub use pitchside_data::{
    CountsReport, CsvRecordSource, LoadError, MapOptions, MapReport, MapStyle, count_tags,
    render_map,
};
