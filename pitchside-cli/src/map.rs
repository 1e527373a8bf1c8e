//! `map` and `heatmap` commands: Leaflet HTML pages of classified facilities.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use pitchside_core::{Palette, ReportSink};
use pitchside_data::{DEFAULT_RADIUS, MapOptions, MapReport, MapStyle};
use serde::{Deserialize, Serialize};

use crate::input::{InputConfig, create_output, write_summary};
use crate::{
    ARG_DEFAULT_COLOUR, ARG_HAS_HEADERS, ARG_INPUT, ARG_OUTPUT, ARG_PALETTE, ARG_PINS, ARG_RADIUS,
    ARG_SPORTS, CliError, DEFAULT_HEATMAP_OUTPUT, DEFAULT_MAP_OUTPUT, ENV_HEATMAP_INPUT,
    ENV_MAP_INPUT,
};

/// CLI arguments for the `map` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "map",
    long_about = "Classify every facility in a CSV table and draw it on an \
                 interactive map, coloured by its highest-priority sport. \
                 The palette order sets that priority.",
    about = "Draw classified facilities as coloured markers"
)]
#[ortho_config(prefix = "PITCHSIDE")]
pub(crate) struct MapArgs {
    /// CSV table with geometry in the first column and sport tags in the second.
    #[arg(long = ARG_INPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Destination HTML file.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Comma-separated sports to keep; every sport when omitted.
    #[arg(long = ARG_SPORTS, value_name = "sport,...", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) sports: Option<Vec<String>>,
    /// Whether the first row of the table is a header.
    #[arg(long = ARG_HAS_HEADERS, value_name = "bool")]
    #[serde(default)]
    pub(crate) has_headers: Option<bool>,
    /// Sport colours in priority order, e.g. `cricket=green,bowls=purple`.
    #[arg(long = ARG_PALETTE, value_name = "tag=colour,...")]
    #[serde(default)]
    pub(crate) palette: Option<String>,
    /// Colour for facilities without a palette sport.
    #[arg(long = ARG_DEFAULT_COLOUR, value_name = "colour")]
    #[serde(default)]
    pub(crate) default_colour: Option<String>,
    /// Circle marker radius in pixels.
    #[arg(long = ARG_RADIUS, value_name = "pixels")]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    /// Draw plain pins instead of coloured circles.
    #[arg(long = ARG_PINS, value_name = "bool")]
    #[serde(default)]
    pub(crate) pins: Option<bool>,
}

impl MapArgs {
    pub(crate) fn into_config(self) -> Result<MapConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MapConfig::try_from(merged)
    }
}

/// CLI arguments for the `heatmap` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "heatmap",
    long_about = "Classify every facility in a CSV table and draw a density \
                 heatmap of the results.",
    about = "Draw a density heatmap of classified facilities"
)]
#[ortho_config(prefix = "PITCHSIDE")]
pub(crate) struct HeatmapArgs {
    /// CSV table with geometry in the first column and sport tags in the second.
    #[arg(long = ARG_INPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Destination HTML file.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Comma-separated sports to keep; every sport when omitted.
    #[arg(long = ARG_SPORTS, value_name = "sport,...", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) sports: Option<Vec<String>>,
    /// Whether the first row of the table is a header.
    #[arg(long = ARG_HAS_HEADERS, value_name = "bool")]
    #[serde(default)]
    pub(crate) has_headers: Option<bool>,
}

impl HeatmapArgs {
    pub(crate) fn into_config(self) -> Result<MapConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MapConfig::try_from(merged)
    }
}

/// Resolved configuration shared by `map` and `heatmap`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MapConfig {
    pub(crate) source: InputConfig,
    pub(crate) output: Utf8PathBuf,
    pub(crate) options: MapOptions,
}

impl TryFrom<MapArgs> for MapConfig {
    type Error = CliError;

    fn try_from(args: MapArgs) -> Result<Self, Self::Error> {
        let source =
            InputConfig::resolve(args.input, ENV_MAP_INPUT, args.sports, args.has_headers)?;
        let mut palette = match args.palette.as_deref() {
            Some(entries) => entries.parse::<Palette>().map_err(CliError::InvalidPalette)?,
            None => Palette::default(),
        };
        if let Some(colour) = args.default_colour {
            palette = palette.with_default_colour(colour);
        }
        let radius = args.radius.unwrap_or(DEFAULT_RADIUS);
        if !radius.is_finite() || radius <= 0.0 {
            return Err(CliError::InvalidRadius { radius });
        }
        let style = if args.pins.unwrap_or(false) {
            MapStyle::Pins
        } else {
            MapStyle::circles(radius)
        };
        Ok(Self {
            source,
            output: args
                .output
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_MAP_OUTPUT)),
            options: MapOptions {
                style,
                palette,
                ..MapOptions::default()
            },
        })
    }
}

impl TryFrom<HeatmapArgs> for MapConfig {
    type Error = CliError;

    fn try_from(args: HeatmapArgs) -> Result<Self, Self::Error> {
        let source =
            InputConfig::resolve(args.input, ENV_HEATMAP_INPUT, args.sports, args.has_headers)?;
        Ok(Self {
            source,
            output: args
                .output
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_HEATMAP_OUTPUT)),
            options: MapOptions {
                title: "Sports facility density".to_owned(),
                style: MapStyle::Heat,
                ..MapOptions::default()
            },
        })
    }
}

pub(crate) fn run_map(args: MapArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_map(&config, writer)
}

pub(crate) fn run_heatmap(args: HeatmapArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_map(&config, writer)
}

pub(crate) fn execute_map(config: &MapConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    info!("writing map for {} to {}", config.source.input, config.output);
    let report = config.source.classify(&config.options.palette.priority())?;
    let mut sink = MapReport::new(create_output(&config.output)?, config.options.clone());
    sink.consume(&report.classified)
        .map_err(|source| CliError::WriteMap {
            path: config.output.clone(),
            source,
        })?;
    write_summary(writer, &config.output, &report)
}

#[cfg(test)]
pub(crate) fn map_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<MapConfig, CliError> {
    let merged = MapArgs::merge_from_layers(layers).map_err(CliError::from)?;
    MapConfig::try_from(merged)
}
