//! Ledger persistence
//!
//! Loads and saves the whole ledger as one JSON document. Loading never
//! fails: a missing file is an empty ledger, and corrupt content yields an
//! empty ledger plus the parse error for the caller to report.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{TallyError, TallyResult};
use crate::models::Ledger;

use super::file_io::{read_json, write_json_atomic};

/// Result of loading the ledger file
#[derive(Debug)]
pub struct LoadOutcome {
    /// What could be loaded (empty on any problem)
    pub ledger: Ledger,
    /// The problem that forced an empty ledger, if any
    pub problem: Option<TallyError>,
}

impl LoadOutcome {
    fn clean(ledger: Ledger) -> Self {
        Self {
            ledger,
            problem: None,
        }
    }
}

/// File-backed storage for a single ledger
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Create a store for the ledger file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger, falling back to an empty ledger
    pub fn load(&self) -> LoadOutcome {
        match self.load_strict() {
            Ok(ledger) => {
                debug!(path = %self.path.display(), entries = ledger.len(), "loaded ledger");
                LoadOutcome::clean(ledger)
            }
            Err(TallyError::FileMissing(_)) => {
                debug!(path = %self.path.display(), "no ledger file yet, starting empty");
                LoadOutcome::clean(Ledger::new())
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not load ledger");
                LoadOutcome {
                    ledger: Ledger::new(),
                    problem: Some(e),
                }
            }
        }
    }

    /// Load the ledger, reporting a missing or corrupt file as an error
    pub fn load_strict(&self) -> TallyResult<Ledger> {
        read_json(&self.path)
    }

    /// Copy the current file aside as `<name>.corrupt`
    ///
    /// Used before an unreadable ledger gets overwritten by the next save.
    pub fn preserve_corrupt(&self) -> TallyResult<PathBuf> {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".corrupt");
        let copy = self.path.with_file_name(name);
        fs::copy(&self.path, &copy).map_err(|e| {
            TallyError::Storage(format!("Failed to copy {}: {}", self.path.display(), e))
        })?;
        Ok(copy)
    }

    /// Overwrite the file with the full ledger
    pub fn save(&self, ledger: &Ledger) -> TallyResult<()> {
        write_json_atomic(&self.path, ledger)?;
        debug!(path = %self.path.display(), entries = ledger.len(), "saved ledger");
        Ok(())
    }
}
