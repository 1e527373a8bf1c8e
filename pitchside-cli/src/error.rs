//! Error types emitted by the `pitchside` CLI.
//!
//! Keep this error type reasonably small, as every command returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use pitchside_core::PaletteError;
use pitchside_data::{CountsError, LoadError, MapError};
use thiserror::Error;

/// Errors emitted by the `pitchside` CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// The input table does not exist.
    #[error("{field} path {path} does not exist")]
    MissingSourceFile {
        /// Flag that named the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// The input path exists but is not a regular file.
    #[error("{field} path {path} is not a file")]
    SourcePathNotFile {
        /// Flag that named the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// The input path could not be inspected.
    #[error("failed to inspect {field} path {path}: {source}")]
    InspectSourcePath {
        /// Flag that named the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The `--palette` value could not be parsed.
    #[error("invalid palette: {0}")]
    InvalidPalette(#[source] PaletteError),
    /// The marker radius is not a positive finite number.
    #[error("radius must be a positive number, got {radius}")]
    InvalidRadius {
        /// Rejected radius.
        radius: f64,
    },
    /// Loading the facility table failed.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The output file could not be created.
    #[error("failed to create output {path}: {source}")]
    CreateOutput {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Writing the counts table failed.
    #[error("failed to write counts to {path}: {source}")]
    WriteCounts {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: CountsError,
    },
    /// Writing the map page failed.
    #[error("failed to write map to {path}: {source}")]
    WriteMap {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: MapError,
    },
    /// Writing the run summary failed.
    #[error("failed to write run summary: {0}")]
    WriteSummary(#[source] std::io::Error),
}
