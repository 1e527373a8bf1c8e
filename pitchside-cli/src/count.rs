//! `count` command: per-sport facility counts written as CSV.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use pitchside_core::{Palette, ReportSink};
use pitchside_data::CountsReport;
use serde::{Deserialize, Serialize};

use crate::input::{InputConfig, create_output, write_summary};
use crate::{
    ARG_HAS_HEADERS, ARG_INPUT, ARG_OUTPUT, ARG_SPORTS, CliError, DEFAULT_COUNTS_OUTPUT,
    ENV_COUNT_INPUT,
};

/// CLI arguments for the `count` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "count",
    long_about = "Classify every facility in a CSV table and write how many \
                 facilities carry each sport tag, most common first. Paths \
                 can come from CLI flags, configuration files, or environment \
                 variables.",
    about = "Count classified facilities per sport"
)]
#[ortho_config(prefix = "PITCHSIDE")]
pub(crate) struct CountArgs {
    /// CSV table with geometry in the first column and sport tags in the second.
    #[arg(long = ARG_INPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Destination CSV file.
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

impl CountArgs {
    pub(crate) fn into_config(self) -> Result<CountConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CountConfig::try_from(merged)
    }
}

/// Resolved `count` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CountConfig {
    pub(crate) source: InputConfig,
    pub(crate) output: Utf8PathBuf,
}

impl TryFrom<CountArgs> for CountConfig {
    type Error = CliError;

    fn try_from(args: CountArgs) -> Result<Self, Self::Error> {
        let source =
            InputConfig::resolve(args.input, ENV_COUNT_INPUT, args.sports, args.has_headers)?;
        Ok(Self {
            source,
            output: args
                .output
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_COUNTS_OUTPUT)),
        })
    }
}

pub(crate) fn run_count(args: CountArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_count(&config, writer)
}

pub(crate) fn execute_count(config: &CountConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    info!("writing counts for {} to {}", config.source.input, config.output);
    let report = config.source.classify(&Palette::default().priority())?;
    let mut sink = CountsReport::new(create_output(&config.output)?);
    sink.consume(&report.classified)
        .map_err(|source| CliError::WriteCounts {
            path: config.output.clone(),
            source,
        })?;
    write_summary(writer, &config.output, &report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<CountConfig, CliError> {
    let merged = CountArgs::merge_from_layers(layers).map_err(CliError::from)?;
    CountConfig::try_from(merged)
}
