//! CLI configuration with TOML file support.

use electoral_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::CliError;

/// Configuration for the `electoral` binary.
///
/// Can be loaded from a TOML file via [`CliConfig::from_toml_file`]; command
/// line flags and `ELECTORAL_*` environment variables override file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the ledger snapshot lives between invocations.
    #[serde(default = "default_ledger_file")]
    pub ledger_file: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_ledger_file() -> PathBuf {
    PathBuf::from("./election.ledger")
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CliError> {
        toml::from_str(s).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("CliConfig is always serializable to TOML")
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ledger_file: default_ledger_file(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
