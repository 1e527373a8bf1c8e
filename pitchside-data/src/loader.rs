//! CSV loading of raw facility rows.
//!
//! Column 0 holds the geometry text and column 1 the `;`-separated sport
//! tags. Further columns are ignored; a missing tag column reads as empty.

use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use csv::{ReaderBuilder, StringRecord};
use log::info;
use pitchside_core::{RawRecord, RecordSource};
use thiserror::Error;

const GEOMETRY_COLUMN: usize = 0;
const TAGS_COLUMN: usize = 1;

/// Errors raised while loading a facility table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file could not be opened.
    #[error("failed to open facility table {path}")]
    Open {
        /// Path that was opened.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A row could not be read or decoded.
    #[error("failed to read facility table {path}")]
    Read {
        /// Path being read.
        path: Utf8PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

/// [`RecordSource`] reading a CSV file from disk.
///
/// # Examples
/// ```no_run
/// use pitchside_core::RecordSource;
/// use pitchside_data::CsvRecordSource;
///
/// let source = CsvRecordSource::new("facilities.csv").with_headers(false);
/// let rows = source.load()?;
/// # Ok::<(), pitchside_data::LoadError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    path: Utf8PathBuf,
    has_headers: bool,
}

impl CsvRecordSource {
    /// Read `path`, treating its first row as a header.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            has_headers: true,
        }
    }

    /// Set whether the first row is a header.
    #[must_use]
    pub const fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// File this source reads.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl RecordSource for CsvRecordSource {
    type Error = LoadError;

    fn load(&self) -> Result<Vec<RawRecord>, Self::Error> {
        let file = pitchside_fs::open_input(&self.path).map_err(|source| LoadError::Open {
            path: self.path.clone(),
            source,
        })?;
        let records = read_records(file, self.has_headers).map_err(|source| LoadError::Read {
            path: self.path.clone(),
            source,
        })?;
        info!("Loaded {} rows from {}", records.len(), self.path);
        Ok(records)
    }
}

/// Read every row of a CSV stream into [`RawRecord`]s.
///
/// # Examples
/// ```
/// use pitchside_data::read_records;
///
/// let table = "geometry,sport\n\"POINT (1 2)\",cricket\n";
/// let rows = read_records(table.as_bytes(), true)?;
/// assert_eq!(rows[0].sport_tags, "cricket");
/// # Ok::<(), csv::Error>(())
/// ```
pub fn read_records<R: Read>(reader: R, has_headers: bool) -> Result<Vec<RawRecord>, csv::Error> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(reader);
    csv_reader
        .records()
        .map(|row| row.map(|fields| to_raw_record(&fields)))
        .collect()
}

fn to_raw_record(fields: &StringRecord) -> RawRecord {
    RawRecord::new(
        fields.get(GEOMETRY_COLUMN).unwrap_or_default(),
        fields.get(TAGS_COLUMN).unwrap_or_default(),
    )
}
