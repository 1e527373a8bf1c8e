//! Self-contained Leaflet HTML maps of classified records.
//!
//! Marker data is serialised to JSON and embedded in the page. Every `<` in
//! the payload is written as the JSON escape `\u003c`, so record text can
//! never close the surrounding `<script>` element. Popups are inserted as
//! text, not markup.

use std::io::Write;

use log::info;
use pitchside_core::{ClassifiedRecord, Palette, ReportSink};
use serde::Serialize;
use thiserror::Error;

/// Default circle marker radius in pixels.
pub const DEFAULT_RADIUS: f64 = 3.0;
/// Default circle marker fill opacity.
pub const DEFAULT_FILL_OPACITY: f64 = 0.7;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_HEAT_JS: &str = "https://unpkg.com/leaflet.heat@0.2.0/dist/leaflet-heat.js";

const RENDER_SCRIPT: &str = r"
const map = L.map('map').setView(payload.center, payload.zoom);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  attribution: '&copy; OpenStreetMap contributors',
  maxZoom: 19,
}).addTo(map);
if (payload.style.kind === 'heat') {
  L.heatLayer(payload.markers.map((m) => [m.lat, m.lon])).addTo(map);
} else {
  for (const m of payload.markers) {
    const layer = payload.style.kind === 'circles'
      ? L.circleMarker([m.lat, m.lon], {
          radius: payload.style.radius,
          color: m.colour,
          fill: true,
          fillColor: m.colour,
          fillOpacity: payload.style.fill_opacity,
        })
      : L.marker([m.lat, m.lon]);
    const popup = document.createElement('span');
    popup.textContent = m.popup;
    layer.bindPopup(popup).addTo(map);
  }
}
";

/// How records are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapStyle {
    /// Circle markers coloured by primary tag.
    Circles {
        /// Radius in pixels.
        radius: f64,
        /// Fill opacity in `[0, 1]`.
        fill_opacity: f64,
    },
    /// Plain pin markers.
    Pins,
    /// A density heat layer.
    Heat,
}

impl MapStyle {
    /// Circle markers with the given radius and the default opacity.
    #[must_use]
    pub const fn circles(radius: f64) -> Self {
        Self::Circles {
            radius,
            fill_opacity: DEFAULT_FILL_OPACITY,
        }
    }
}

impl Default for MapStyle {
    fn default() -> Self {
        Self::circles(DEFAULT_RADIUS)
    }
}

/// Rendering options for a map page.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Page title.
    pub title: String,
    /// Initial view centre latitude.
    pub center_lat: f64,
    /// Initial view centre longitude.
    pub center_lon: f64,
    /// Initial zoom level.
    pub zoom: u8,
    /// Marker style.
    pub style: MapStyle,
    /// Colours keyed by primary tag.
    pub palette: Palette,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            title: "Sports facilities".to_owned(),
            center_lat: 0.0,
            center_lon: 25.0,
            zoom: 3,
            style: MapStyle::default(),
            palette: Palette::default(),
        }
    }
}

/// Errors raised while producing a map.
#[derive(Debug, Error)]
pub enum MapError {
    /// The marker payload could not be serialised.
    #[error("failed to serialise map payload")]
    Serialise(#[from] serde_json::Error),
    /// The page could not be written.
    #[error("failed to write map page")]
    Write(#[from] std::io::Error),
}

#[derive(Serialize)]
struct Payload<'a> {
    center: [f64; 2],
    zoom: u8,
    style: MapStyle,
    markers: Vec<Marker<'a>>,
}

#[derive(Serialize)]
struct Marker<'a> {
    lat: f64,
    lon: f64,
    colour: &'a str,
    popup: String,
}

/// Render `records` as a complete HTML document.
///
/// # Examples
/// ```
/// use pitchside_core::{FilterMode, RawRecord, run};
/// use pitchside_data::{MapOptions, render_map};
///
/// let options = MapOptions::default();
/// let rows = vec![RawRecord::new("POINT (18.4 -33.9)", "cricket")];
/// let report = run(&rows, &FilterMode::All, &options.palette.priority());
/// let html = render_map(&report.classified, &options)?;
/// assert!(html.contains("\"colour\":\"green\""));
/// # Ok::<(), pitchside_data::MapError>(())
/// ```
pub fn render_map(records: &[ClassifiedRecord], options: &MapOptions) -> Result<String, MapError> {
    let payload = Payload {
        center: [options.center_lat, options.center_lon],
        zoom: options.zoom,
        style: options.style,
        markers: records
            .iter()
            .map(|record| Marker {
                lat: record.point.lat(),
                lon: record.point.lon(),
                colour: options.palette.colour_of(record.primary_tag.as_deref()),
                popup: record.tags.joined(),
            })
            .collect(),
    };
    let json = serde_json::to_string(&payload)?.replace('<', "\\u003c");

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    html.push_str(&escape_html(&options.title));
    html.push_str("</title>\n<link rel=\"stylesheet\" href=\"");
    html.push_str(LEAFLET_CSS);
    html.push_str("\">\n<script src=\"");
    html.push_str(LEAFLET_JS);
    html.push_str("\"></script>\n");
    if matches!(options.style, MapStyle::Heat) {
        html.push_str("<script src=\"");
        html.push_str(LEAFLET_HEAT_JS);
        html.push_str("\"></script>\n");
    }
    html.push_str(
        "<style>html, body, #map { height: 100%; margin: 0; }</style>\n</head>\n<body>\n<div id=\"map\"></div>\n<script>\nconst payload = ",
    );
    html.push_str(&json);
    html.push_str(";\n");
    html.push_str(RENDER_SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    Ok(html)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// [`ReportSink`] writing a map page to `W`.
#[derive(Debug)]
pub struct MapReport<W> {
    writer: W,
    options: MapOptions,
}

impl<W: Write> MapReport<W> {
    /// Render with `options` into `writer`.
    pub const fn new(writer: W, options: MapOptions) -> Self {
        Self { writer, options }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for MapReport<W> {
    type Error = MapError;

    fn consume(&mut self, records: &[ClassifiedRecord]) -> Result<(), Self::Error> {
        let html = render_map(records, &self.options)?;
        self.writer.write_all(html.as_bytes())?;
        self.writer.flush()?;
        info!("Rendered {} records onto the map", records.len());
        Ok(())
    }
}
