//! Input seam for raw facility rows.
//!
//! Loading is the only fatal step of a run: if the table cannot be read there
//! is nothing to classify. Implementations live outside the core (see the
//! CSV loader in `pitchside-data`).

use crate::record::RawRecord;

/// Supplies the full input table in row order.
///
/// # Examples
/// ```
/// use std::convert::Infallible;
/// use pitchside_core::{RawRecord, RecordSource};
///
/// struct Fixed;
///
/// impl RecordSource for Fixed {
///     type Error = Infallible;
///
///     fn load(&self) -> Result<Vec<RawRecord>, Self::Error> {
///         Ok(vec![RawRecord::new("POINT (1 2)", "cricket")])
///     }
/// }
///
/// assert_eq!(Fixed.load().map(|rows| rows.len()), Ok(1));
/// ```
pub trait RecordSource {
    /// Error raised when the table is unavailable.
    type Error: std::error::Error;

    /// Load every row into memory.
    fn load(&self) -> Result<Vec<RawRecord>, Self::Error>;
}
