use crate::error::EngineError;
use line_census_core::{ResultCollection, ScanError, Totals};
use std::path::PathBuf;

/// Everything one engine run produced.
#[derive(Debug, Default)]
pub struct RunResult {
    /// Per-file results, already in report order.
    pub files: ResultCollection,
    /// Files whose scan stopped before the end of the stream.
    pub incomplete: Vec<(PathBuf, ScanError)>,
    /// Files with no resolvable language.
    pub skipped: Vec<PathBuf>,
    /// Walk failures tolerated outside strict mode.
    pub errors: Vec<EngineError>,
    /// The run was cancelled before every file was started.
    pub cancelled: bool,
}

impl RunResult {
    pub fn totals(&self) -> Totals {
        self.files.totals()
    }

    /// No scan was cut short and no walk error was tolerated.
    pub fn is_clean(&self) -> bool {
        self.incomplete.is_empty() && self.errors.is_empty() && !self.cancelled
    }
}
