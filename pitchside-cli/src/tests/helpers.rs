//! Temporary workspaces holding facility tables for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

/// Logger that keeps every formatted message for later inspection.
struct CapturedLog(Mutex<Vec<String>>);

static CAPTURED: CapturedLog = CapturedLog(Mutex::new(Vec::new()));

impl Log for CapturedLog {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.0
            .lock()
            .expect("log buffer lock")
            .push(record.args().to_string());
    }

    fn flush(&self) {}
}

/// Install the capturing logger; later calls keep the first installation.
pub(super) fn capture_logs() {
    if log::set_logger(&CAPTURED).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Whether any captured message contains `needle`.
pub(super) fn logged(needle: &str) -> bool {
    CAPTURED
        .0
        .lock()
        .expect("log buffer lock")
        .iter()
        .any(|message| message.contains(needle))
}

pub(super) const SAMPLE_TABLE: &str = "\
WKT,sport
\"POINT (18.42 -33.92)\",cricket
\"LINESTRING (28.0 -26.0, 28.2 -26.0)\",rugby_union;cricket
BOGUS,rugby_union
\"POINT (36.82 -1.29)\",field_hockey
\"POINT (3.38 6.52)\",
";

#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn with_sample_table() -> Self {
        let workspace = Self::new();
        write_utf8(&workspace.table(), SAMPLE_TABLE.as_bytes());
        workspace
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn table(&self) -> Utf8PathBuf {
        self.root.join("facilities.csv")
    }

    pub(super) fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root.join(name)).expect("read output")
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture");
}
