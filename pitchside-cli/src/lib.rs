//! Command-line interface for classifying and reporting on sports facilities.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::io::Write;

mod count;
mod error;
mod input;
mod map;

pub use error::CliError;

use count::CountArgs;
use map::{HeatmapArgs, MapArgs};

pub(crate) const ARG_INPUT: &str = "input";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_SPORTS: &str = "sports";
pub(crate) const ARG_HAS_HEADERS: &str = "has-headers";
pub(crate) const ARG_PALETTE: &str = "palette";
pub(crate) const ARG_DEFAULT_COLOUR: &str = "default-colour";
pub(crate) const ARG_RADIUS: &str = "radius";
pub(crate) const ARG_PINS: &str = "pins";
pub(crate) const ENV_COUNT_INPUT: &str = "PITCHSIDE_CMDS_COUNT_INPUT";
pub(crate) const ENV_MAP_INPUT: &str = "PITCHSIDE_CMDS_MAP_INPUT";
pub(crate) const ENV_HEATMAP_INPUT: &str = "PITCHSIDE_CMDS_HEATMAP_INPUT";

pub(crate) const DEFAULT_COUNTS_OUTPUT: &str = "sport_counts.csv";
pub(crate) const DEFAULT_MAP_OUTPUT: &str = "sports_map.html";
pub(crate) const DEFAULT_HEATMAP_OUTPUT: &str = "sports_heatmap.html";

/// Run the CLI with the current process arguments, writing the run summary to
/// standard output.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

/// Run the CLI with explicit arguments (including the program name), writing
/// the run summary to `writer`.
pub fn run_with<I, T>(args: I, writer: &mut dyn Write) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(CliError::ArgumentParsing)?;
    dispatch(cli.command, writer)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Count(args) => count::run_count(args, writer),
        Command::Map(args) => map::run_map(args, writer),
        Command::Heatmap(args) => map::run_heatmap(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "pitchside",
    about = "Classify sports facilities and report on them as tables or maps",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count classified facilities per sport.
    Count(CountArgs),
    /// Draw classified facilities as coloured markers.
    Map(MapArgs),
    /// Draw a density heatmap of classified facilities.
    Heatmap(HeatmapArgs),
}

#[cfg(test)]
mod tests;
