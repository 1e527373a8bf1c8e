//! Input and output adapters for the `pitchside` pipeline.
//!
//! Responsibilities:
//! - Load raw facility rows from CSV tables ([`CsvRecordSource`]).
//! - Aggregate classified records into per-sport counts ([`CountsReport`]).
//! - Render classified records as Leaflet HTML maps ([`MapReport`]).
//!
//! Boundaries:
//! - Classification rules live in `pitchside-core`; nothing here reinterprets
//!   geometry or tags.
#![forbid(unsafe_code)]

pub mod counts;
pub mod loader;
pub mod map;
pub mod preview;

pub use counts::{CountsError, CountsReport, TagCount, count_tags, write_counts};
pub use loader::{CsvRecordSource, LoadError, read_records};
pub use map::{DEFAULT_FILL_OPACITY, DEFAULT_RADIUS, MapError, MapOptions, MapReport, MapStyle, render_map};
pub use preview::{PREVIEW_ROWS, log_preview};
