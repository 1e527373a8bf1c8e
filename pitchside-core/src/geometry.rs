//! Reduce a WKT geometry to one representative point.
//!
//! Reduction rules, by geometry kind:
//! - `Point`: the point itself.
//! - `LineString`: the point halfway along the path, by planar arc length.
//! - `MultiPolygon`: the area-weighted centroid of its members.
//!
//! Every other kind is rejected with [`FailureReason::UnsupportedType`].
//! Nothing here panics on malformed input; each failure is a
//! [`GeometryFailure`] value.
//!
//! # Examples
//! ```
//! use pitchside_core::{FailureReason, reduce};
//!
//! let point = reduce("POINT (1 2)").expect("point reduces");
//! assert_eq!((point.lat(), point.lon()), (2.0, 1.0));
//!
//! let failure = reduce("POLYGON ((0 0, 1 0, 1 1, 0 0))").expect_err("polygons are rejected");
//! assert_eq!(failure.reason, FailureReason::UnsupportedType);
//! ```

use geo::{Centroid, Coord, CoordsIter, Geometry, Line, LineString, MultiPolygon};
use thiserror::Error;
use wkt::TryFromWkt;

use crate::diagnostics::{DiagnosticsSink, GeometryDiagnostic};
use crate::record::{CoordinateError, FailureReason, RepresentativePoint};

/// Typed failure returned by [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}: {detail}")]
pub struct GeometryFailure {
    /// Failure classification.
    pub reason: FailureReason,
    /// Parser message, geometry type name or coordinate problem.
    pub detail: String,
}

impl GeometryFailure {
    fn parse(detail: impl Into<String>) -> Self {
        Self {
            reason: FailureReason::ParseError,
            detail: detail.into(),
        }
    }

    fn empty(kind: &str) -> Self {
        Self::parse(format!("{kind} has no coordinates"))
    }

    fn unsupported(kind: &str) -> Self {
        Self {
            reason: FailureReason::UnsupportedType,
            detail: kind.to_owned(),
        }
    }
}

impl From<CoordinateError> for GeometryFailure {
    fn from(error: CoordinateError) -> Self {
        Self {
            reason: FailureReason::OutOfRange,
            detail: error.to_string(),
        }
    }
}

/// A parsed geometry, narrowed to the kinds with a reduction rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedGeometry {
    /// A single position.
    Point(Coord<f64>),
    /// An ordered path of vertices.
    LineString(LineString<f64>),
    /// One or more polygons.
    MultiPolygon(MultiPolygon<f64>),
    /// Any other geometry kind.
    Unsupported {
        /// The geometry type name, e.g. `"Polygon"`.
        raw_type: &'static str,
    },
}

impl ParsedGeometry {
    /// Parse a WKT encoding.
    ///
    /// Surrounding whitespace is ignored. Grammar errors and trailing text
    /// yield [`FailureReason::ParseError`], as do geometries with no
    /// coordinates such as `POINT EMPTY`.
    pub fn parse(encoding: &str) -> Result<Self, GeometryFailure> {
        let text = encoding.trim();
        let geometry = Geometry::<f64>::try_from_wkt_str(text)
            .map_err(|error| GeometryFailure::parse(error.to_string()))?;
        if let Some(rest) = trailing_text(text) {
            return Err(GeometryFailure::parse(format!(
                "unexpected text after geometry: {rest}"
            )));
        }
        if geometry.coords_count() == 0 {
            return Err(GeometryFailure::empty(leading_keyword(text)));
        }
        Ok(Self::from(geometry))
    }

    /// Name of the geometry kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::MultiPolygon(_) => "MultiPolygon",
            Self::Unsupported { raw_type } => *raw_type,
        }
    }

    /// Apply the reduction rule for this kind.
    pub fn representative_point(&self) -> Result<RepresentativePoint, GeometryFailure> {
        let coord = match self {
            Self::Point(coord) => *coord,
            Self::LineString(line) => {
                line_midpoint(line).ok_or_else(|| GeometryFailure::empty(self.kind()))?
            }
            Self::MultiPolygon(polygons) => polygons
                .centroid()
                .map(|point| point.0)
                .ok_or_else(|| GeometryFailure::empty(self.kind()))?,
            Self::Unsupported { raw_type } => return Err(GeometryFailure::unsupported(raw_type)),
        };
        RepresentativePoint::from_coord(coord).map_err(GeometryFailure::from)
    }
}

impl From<Geometry<f64>> for ParsedGeometry {
    fn from(geometry: Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(point) => Self::Point(point.0),
            Geometry::LineString(line) => Self::LineString(line),
            Geometry::MultiPolygon(polygons) => Self::MultiPolygon(polygons),
            other => Self::Unsupported {
                raw_type: geometry_type_name(&other),
            },
        }
    }
}

/// Reduce a WKT encoding to its representative point.
pub fn reduce(encoding: &str) -> Result<RepresentativePoint, GeometryFailure> {
    ParsedGeometry::parse(encoding)?.representative_point()
}

/// Reduce a WKT encoding, reporting any failure to `diagnostics`.
///
/// The failure is still returned so the caller can branch on it.
pub fn reduce_reporting(
    encoding: &str,
    diagnostics: &mut dyn DiagnosticsSink,
) -> Result<RepresentativePoint, GeometryFailure> {
    reduce(encoding).inspect_err(|failure| {
        diagnostics.record(GeometryDiagnostic {
            raw_geometry: encoding.to_owned(),
            reason: failure.reason,
            detail: failure.detail.clone(),
        });
    })
}

const fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// Point at normalised arc length 0.5 along `line`.
///
/// Zero-length paths collapse to their first vertex. Empty paths and paths
/// whose length is not finite yield `None`.
#[expect(
    clippy::float_arithmetic,
    reason = "arc-length interpolation requires float maths"
)]
fn line_midpoint(line: &LineString<f64>) -> Option<Coord<f64>> {
    let first = line.0.first().copied()?;
    let total: f64 = line.lines().map(|segment| segment_length(&segment)).sum();
    if !total.is_finite() {
        return None;
    }
    if total <= 0.0 {
        return Some(first);
    }
    let target = total * 0.5;
    let mut travelled = 0.0;
    for segment in line.lines() {
        let length = segment_length(&segment);
        if length > 0.0 && travelled + length >= target {
            let ratio = (target - travelled) / length;
            return Some(segment.start + segment.delta() * ratio);
        }
        travelled += length;
    }
    line.0.last().copied()
}

fn segment_length(segment: &Line<f64>) -> f64 {
    segment.dx().hypot(segment.dy())
}

/// Text following the end of the first geometry in `text`, if any.
///
/// A geometry ends at the parenthesis closing its outermost group or, for
/// the keyword form, at `EMPTY`.
fn trailing_text(text: &str) -> Option<String> {
    let mut depth = 0_usize;
    let mut opened = false;
    for (offset, ch) in text.char_indices() {
        match ch {
            '(' => {
                depth = depth.saturating_add(1);
                opened = true;
            }
            ')' => {
                depth = depth.saturating_sub(1);
                if opened && depth == 0 {
                    let rest = text.get(offset + ch.len_utf8()..)?.trim();
                    return (!rest.is_empty()).then(|| rest.to_owned());
                }
            }
            _ => {}
        }
    }
    if opened {
        return None;
    }
    let rest: Vec<&str> = text
        .split_whitespace()
        .skip_while(|word| !word.eq_ignore_ascii_case("EMPTY"))
        .skip(1)
        .collect();
    (!rest.is_empty()).then(|| rest.join(" "))
}

/// Geometry keyword at the start of `text`, e.g. `POINT`.
fn leading_keyword(text: &str) -> &str {
    let end = text
        .find(|ch: char| !ch.is_ascii_alphabetic())
        .unwrap_or(text.len());
    text.get(..end).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPSILON: f64 = 1.0e-9;

    #[expect(clippy::float_arithmetic, reason = "test tolerance check")]
    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    #[case("POINT (1 2)", 2.0, 1.0)]
    #[case("POINT(-3.5 40.25)", 40.25, -3.5)]
    #[case("  POINT (25 0)\n", 0.0, 25.0)]
    fn point_reports_latitude_first(#[case] wkt: &str, #[case] lat: f64, #[case] lon: f64) {
        let point = reduce(wkt).expect("point reduces");
        assert_eq!(point.lat(), lat);
        assert_eq!(point.lon(), lon);
    }

    #[rstest]
    fn straight_line_reduces_to_exact_midpoint() {
        let point = reduce("LINESTRING (0 0, 10 10)").expect("line reduces");
        assert_eq!((point.lat(), point.lon()), (5.0, 5.0));
    }

    #[rstest]
    fn bent_line_uses_arc_length_not_bounding_box() {
        // Path length 4 puts the midpoint at (2 0); the bounding-box centre
        // would be (1.5 0.5).
        let point = reduce("LINESTRING (0 0, 3 0, 3 1)").expect("line reduces");
        assert_close(point.lon(), 2.0);
        assert_close(point.lat(), 0.0);
    }

    #[rstest]
    fn zero_length_line_collapses_to_first_vertex() {
        let point = reduce("LINESTRING (4 5, 4 5)").expect("line reduces");
        assert_eq!((point.lat(), point.lon()), (5.0, 4.0));
    }

    #[rstest]
    fn multipolygon_of_equal_squares_averages_centroids() {
        let wkt = "MULTIPOLYGON (((0 0, 1 0, 1 1, 0 1, 0 0)), ((2 0, 3 0, 3 1, 2 1, 2 0)))";
        let point = reduce(wkt).expect("multipolygon reduces");
        assert_close(point.lon(), 1.5);
        assert_close(point.lat(), 0.5);
    }

    #[rstest]
    fn multipolygon_centroid_is_area_weighted() {
        // A 2x2 square centred on (1 1) outweighs a unit square centred on
        // (4.5 0.5) four to one.
        let wkt = "MULTIPOLYGON (((0 0, 2 0, 2 2, 0 2, 0 0)), ((4 0, 5 0, 5 1, 4 1, 4 0)))";
        let point = reduce(wkt).expect("multipolygon reduces");
        assert_close(point.lon(), 1.7);
        assert_close(point.lat(), 0.9);
    }

    #[rstest]
    #[case("POLYGON ((0 0, 1 0, 1 1, 0 0))", "Polygon")]
    #[case("MULTIPOINT ((0 0), (1 1))", "MultiPoint")]
    #[case("MULTILINESTRING ((0 0, 1 1))", "MultiLineString")]
    #[case("GEOMETRYCOLLECTION (POINT (1 2))", "GeometryCollection")]
    fn other_kinds_are_unsupported(#[case] wkt: &str, #[case] kind: &str) {
        let failure = reduce(wkt).expect_err("kind has no reduction rule");
        assert_eq!(failure.reason, FailureReason::UnsupportedType);
        assert_eq!(failure.detail, kind);
    }

    #[rstest]
    #[case("BOGUS")]
    #[case("")]
    #[case("POINT (1)")]
    #[case("POINT (a b)")]
    #[case("LINESTRING (0 0, 1 1")]
    #[case("MULTIPOLYGON (((0 0, 1 0)")]
    #[case("POINT (1 2) trailing")]
    #[case("POINT (1 2))")]
    #[case("LINESTRING EMPTY trailing")]
    fn malformed_text_is_a_parse_error(#[case] wkt: &str) {
        let failure = reduce(wkt).expect_err("malformed input");
        assert_eq!(failure.reason, FailureReason::ParseError);
    }

    #[rstest]
    #[case("LINESTRING EMPTY", "LINESTRING")]
    #[case("POINT EMPTY", "POINT")]
    #[case("MULTIPOLYGON EMPTY", "MULTIPOLYGON")]
    fn empty_geometry_is_a_parse_error(#[case] wkt: &str, #[case] keyword: &str) {
        let failure = reduce(wkt).expect_err("no coordinates");
        assert_eq!(failure.reason, FailureReason::ParseError);
        assert_eq!(failure.detail, format!("{keyword} has no coordinates"));
    }

    #[rstest]
    fn non_finite_path_length_has_no_midpoint() {
        let line = LineString::from(vec![(f64::NAN, 0.0), (1.0, 1.0)]);
        assert_eq!(line_midpoint(&line), None);
    }

    #[rstest]
    #[case("POINT (200 10)")]
    #[case("POINT (10 95)")]
    fn projected_coordinates_are_out_of_range(#[case] wkt: &str) {
        let failure = reduce(wkt).expect_err("outside WGS84");
        assert_eq!(failure.reason, FailureReason::OutOfRange);
    }

    #[rstest]
    fn parse_exposes_kind() {
        let parsed = ParsedGeometry::parse("LINESTRING (0 0, 1 1)").expect("valid wkt");
        assert_eq!(parsed.kind(), "LineString");
    }

    #[rstest]
    fn reporting_records_failures_only() {
        let mut seen: Vec<GeometryDiagnostic> = Vec::new();
        assert!(reduce_reporting("POINT (1 2)", &mut seen).is_ok());
        let failure = reduce_reporting("MULTIPOINT ((0 0))", &mut seen).expect_err("unsupported");
        assert_eq!(seen.len(), 1);
        let recorded = seen.first().expect("one diagnostic");
        assert_eq!(recorded.raw_geometry, "MULTIPOINT ((0 0))");
        assert_eq!(recorded.reason, failure.reason);
        assert_eq!(recorded.detail, "MultiPoint");
    }
}
