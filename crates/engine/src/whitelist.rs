//! Optional list restricting which files are scanned.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};

/// File paths accepted for scanning, one per line in the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    entries: Vec<PathBuf>,
}

impl Whitelist {
    /// Read a whitelist file. Blank lines are skipped; surrounding
    /// whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Whitelist`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        File::open(path)
            .map(BufReader::new)
            .and_then(Self::parse)
            .map_err(|source| EngineError::Whitelist {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Parse whitelist entries from any reader.
    ///
    /// # Errors
    ///
    /// Propagates read errors.
    pub fn parse<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let entry = line.trim();
            if !entry.is_empty() {
                entries.push(PathBuf::from(entry));
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `path` equals an entry or ends with it, compared by components.
    pub fn allows(&self, path: &Path) -> bool {
        self.entries
            .iter()
            .any(|entry| path == entry || path.ends_with(entry))
    }
}
