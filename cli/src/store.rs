//! The ledger file: one snapshot on disk, replaced whole on every save.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use electoral_ledger::{ElectionLedger, LedgerSnapshot};

use crate::CliError;

/// The on-disk home of a single ledger.
#[derive(Clone, Debug)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load and fully validate the stored ledger.
    pub fn load(&self) -> Result<ElectionLedger, CliError> {
        if !self.exists() {
            return Err(CliError::LedgerMissing(self.path.clone()));
        }
        let bytes = fs::read(&self.path).map_err(|e| CliError::io(&self.path, e))?;
        let ledger = LedgerSnapshot::from_bytes(&bytes)?.restore()?;
        tracing::debug!(
            path = %self.path.display(),
            states = ledger.submitted_count(),
            "ledger loaded"
        );
        Ok(ledger)
    }

    /// Write the ledger, replacing any previous file only once the new
    /// contents are fully on disk.
    pub fn save(&self, ledger: &ElectionLedger) -> Result<(), CliError> {
        self.write_snapshot(&LedgerSnapshot::capture(ledger))
    }

    /// Write an already captured snapshot.
    pub fn write_snapshot(&self, snapshot: &LedgerSnapshot) -> Result<(), CliError> {
        let bytes = snapshot.to_bytes();
        let tmp = self.temp_path();
        fs::write(&tmp, &bytes).map_err(|e| CliError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| CliError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "ledger saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}
