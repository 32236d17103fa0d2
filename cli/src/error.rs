use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot error: {0}")]
    Snapshot(#[from] electoral_ledger::SnapshotError),

    #[error("ledger error: {0}")]
    Ledger(#[from] electoral_ledger::LedgerError),

    #[error("no ledger at {}; run `electoral deploy` first", .0.display())]
    LedgerMissing(PathBuf),

    #[error("a ledger already exists at {}; pass --force to replace it", .0.display())]
    LedgerExists(PathBuf),

    #[error("invalid results file {}: {message}", .path.display())]
    ResultsFile { path: PathBuf, message: String },
}

impl CliError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
