//! Library side of the `electoral` command-line tool.
//!
//! The binary is the external caller of the ledger: it deploys a ledger with
//! an owner, feeds it state results on that owner's behalf, closes it, and
//! reports on it. Between invocations the ledger lives in a snapshot file.

pub mod commands;
pub mod config;
pub mod error;
pub mod store;

pub use config::CliConfig;
pub use error::CliError;
pub use store::LedgerFile;
