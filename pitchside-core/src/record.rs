//! Records flowing through the pipeline.
//!
//! A [`RawRecord`] enters as one input row and leaves either as a
//! [`ClassifiedRecord`] handed to a report sink or as a [`FailureRecord`]
//! kept for diagnostics.

use std::fmt;

use geo::Coord;
use thiserror::Error;

use crate::tags::TagSet;

/// One row of the input table.
///
/// # Examples
/// ```
/// use pitchside_core::RawRecord;
///
/// let record = RawRecord::new("POINT (1 2)", "cricket;bowls");
/// assert_eq!(record.geometry, "POINT (1 2)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// WKT geometry encoding.
    pub geometry: String,
    /// Raw `;`-separated sport tags.
    pub sport_tags: String,
}

impl RawRecord {
    /// Construct a record from its two raw columns.
    pub fn new(geometry: impl Into<String>, sport_tags: impl Into<String>) -> Self {
        Self {
            geometry: geometry.into(),
            sport_tags: sport_tags.into(),
        }
    }
}

/// The single WGS84 position standing in for a facility geometry.
///
/// Latitude is always reported first. Construction validates that both
/// ordinates are finite and inside their geographic ranges.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pitchside_core::RepresentativePoint;
///
/// # fn main() -> Result<(), pitchside_core::CoordinateError> {
/// let point = RepresentativePoint::from_coord(Coord { x: 25.0, y: -1.5 })?;
/// assert_eq!(point.lat(), -1.5);
/// assert_eq!(point.lon(), 25.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RepresentativePoint {
    lat: f64,
    lon: f64,
}

/// Errors returned by [`RepresentativePoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// One of the ordinates was `NaN` or infinite.
    #[error("coordinate ({lat}, {lon}) is not finite")]
    NonFinite {
        /// Offending latitude.
        lat: f64,
        /// Offending longitude.
        lon: f64,
    },
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {lat} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Offending latitude.
        lat: f64,
    },
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {lon} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Offending longitude.
        lon: f64,
    },
}

impl RepresentativePoint {
    /// Validate and construct a point from latitude and longitude.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite { lat, lon });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange { lat });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange { lon });
        }
        Ok(Self { lat, lon })
    }

    /// Convert a `geo` coordinate (`x = longitude`, `y = latitude`).
    pub fn from_coord(coord: Coord<f64>) -> Result<Self, CoordinateError> {
        Self::new(coord.y, coord.x)
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Return the point as a `geo` coordinate.
    #[must_use]
    pub const fn to_coord(self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }
}

/// Why a record's geometry could not be reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FailureReason {
    /// The text is not valid WKT, or describes an empty geometry.
    ParseError,
    /// Valid WKT, but the geometry kind has no reduction rule.
    UnsupportedType,
    /// The reduced point lies outside the WGS84 ranges.
    OutOfRange,
}

impl FailureReason {
    /// Return the reason as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ParseError => "parse error",
            Self::UnsupportedType => "unsupported type",
            Self::OutOfRange => "out of range",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record admitted by the filter whose geometry reduced successfully.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassifiedRecord {
    /// Representative point of the facility.
    pub point: RepresentativePoint,
    /// Normalised sport tags.
    pub tags: TagSet,
    /// Highest-priority tag present, if any.
    pub primary_tag: Option<String>,
}

/// A record admitted by the filter whose geometry failed to reduce.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FailureRecord {
    /// The geometry text exactly as it was read.
    pub raw_geometry: String,
    /// Failure classification.
    pub reason: FailureReason,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(-90.0, -180.0)]
    #[case(90.0, 180.0)]
    #[case(0.0, 25.0)]
    fn accepts_boundary_coordinates(#[case] lat: f64, #[case] lon: f64) {
        let point = RepresentativePoint::new(lat, lon).expect("valid coordinate");
        assert_eq!((point.lat(), point.lon()), (lat, lon));
    }

    #[rstest]
    #[case(90.5, 0.0)]
    #[case(-91.0, 0.0)]
    fn rejects_latitude_out_of_range(#[case] lat: f64, #[case] lon: f64) {
        let err = RepresentativePoint::new(lat, lon).expect_err("latitude out of range");
        assert!(matches!(err, CoordinateError::LatitudeOutOfRange { .. }));
    }

    #[rstest]
    fn rejects_longitude_out_of_range() {
        let err = RepresentativePoint::new(0.0, 180.5).expect_err("longitude out of range");
        assert!(matches!(err, CoordinateError::LongitudeOutOfRange { .. }));
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    fn rejects_non_finite(#[case] lat: f64, #[case] lon: f64) {
        let err = RepresentativePoint::new(lat, lon).expect_err("non-finite coordinate");
        assert!(matches!(err, CoordinateError::NonFinite { .. }));
    }

    #[rstest]
    fn coord_conversion_swaps_axes() {
        let point = RepresentativePoint::from_coord(Coord { x: 3.0, y: 4.0 }).expect("valid");
        assert_eq!(point.lat(), 4.0);
        assert_eq!(point.lon(), 3.0);
        assert_eq!(point.to_coord(), Coord { x: 3.0, y: 4.0 });
    }

    #[test]
    fn reason_display_matches_as_str() {
        assert_eq!(
            FailureReason::UnsupportedType.to_string(),
            FailureReason::UnsupportedType.as_str()
        );
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_plain_fields() {
        let point = RepresentativePoint::new(2.0, 1.0).expect("valid");
        assert_eq!(
            serde_json::to_string(&point).expect("point json"),
            r#"{"lat":2.0,"lon":1.0}"#
        );
        let failure = FailureRecord {
            raw_geometry: "BOGUS".to_owned(),
            reason: FailureReason::ParseError,
        };
        assert_eq!(
            serde_json::to_string(&failure).expect("failure json"),
            r#"{"raw_geometry":"BOGUS","reason":"parse_error"}"#
        );
    }
}
