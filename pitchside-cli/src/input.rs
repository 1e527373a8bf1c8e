//! Input resolution and classification shared by every command.

use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8;
use pitchside_core::{FilterMode, PriorityOrder, RecordSource, RunReport, run};
use pitchside_data::{CsvRecordSource, log_preview};

use crate::{ARG_INPUT, CliError};

/// Where records come from and which of them to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InputConfig {
    /// CSV facility table.
    pub(crate) input: Utf8PathBuf,
    /// Sports to keep; empty keeps everything.
    pub(crate) sports: Vec<String>,
    /// Whether the table starts with a header row.
    pub(crate) has_headers: bool,
}

impl InputConfig {
    pub(crate) fn resolve(
        input: Option<Utf8PathBuf>,
        env: &'static str,
        sports: Option<Vec<String>>,
        has_headers: Option<bool>,
    ) -> Result<Self, CliError> {
        let path = input.ok_or(CliError::MissingArgument {
            field: ARG_INPUT,
            env,
        })?;
        Ok(Self {
            input: path,
            sports: sports.unwrap_or_default(),
            has_headers: has_headers.unwrap_or(true),
        })
    }

    pub(crate) fn filter_mode(&self) -> FilterMode {
        FilterMode::from_sports(&self.sports)
    }

    pub(crate) fn validate_source(&self) -> Result<(), CliError> {
        match pitchside_fs::is_regular_file(&self.input) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_INPUT,
                path: self.input.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_INPUT,
                    path: self.input.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_INPUT,
                path: self.input.clone(),
                source,
            }),
        }
    }

    /// Load the table and classify it, logging a preview of the result.
    pub(crate) fn classify(&self, priority: &PriorityOrder) -> Result<RunReport, CliError> {
        self.validate_source()?;
        let rows = CsvRecordSource::new(self.input.clone())
            .with_headers(self.has_headers)
            .load()?;
        let report = run(&rows, &self.filter_mode(), priority);
        log_preview(&report.classified);
        Ok(report)
    }
}

pub(crate) fn create_output(path: &Utf8Path) -> Result<BufWriter<fs_utf8::File>, CliError> {
    pitchside_fs::create_output(path)
        .map(BufWriter::new)
        .map_err(|source| CliError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })
}

pub(crate) fn write_summary(
    writer: &mut dyn Write,
    output: &Utf8Path,
    report: &RunReport,
) -> Result<(), CliError> {
    writeln!(writer, "Wrote {output}: {}", report.summary()).map_err(CliError::WriteSummary)
}
