//! electoral — command-line front end for a single election ledger.

use std::fmt::Display;
use std::path::PathBuf;

use clap::Parser;
use electoral_cli::{commands, CliConfig, LedgerFile};
use electoral_types::{AccountAddress, StateResult};
use electoral_utils::LogFormat;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "electoral", about = "Owner-controlled electoral seat ledger")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ledger snapshot file.
    #[arg(long, env = "ELECTORAL_LEDGER_FILE")]
    ledger_file: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[arg(long, env = "ELECTORAL_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "ELECTORAL_LOG_LEVEL")]
    log_level: Option<String>,

    /// Print command output as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a new ledger owned by the given account.
    Deploy {
        #[arg(long)]
        owner: AccountAddress,

        /// Replace an existing ledger file.
        #[arg(long)]
        force: bool,
    },

    /// Submit one state's result.
    Submit {
        /// Account submitting the result.
        #[arg(long)]
        caller: AccountAddress,

        state: String,
        votes_a: u64,
        votes_b: u64,
        seats: u32,
    },

    /// Submit every `[[result]]` entry of a TOML file, in order.
    Import {
        #[arg(long)]
        caller: AccountAddress,

        file: PathBuf,
    },

    /// Close the election.
    End {
        #[arg(long)]
        caller: AccountAddress,
    },

    /// Show the owner, phase, leader and accepted states.
    Status,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<CliConfig> {
    let mut config = match cli.config {
        Some(ref path) => CliConfig::from_toml_file(path)?,
        None => CliConfig::default(),
    };
    if let Some(ref ledger_file) = cli.ledger_file {
        config.ledger_file = ledger_file.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if let Some(ref level) = cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn emit<T: Serialize + Display>(report: &T, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    electoral_utils::init_logging(config.log_format, &config.log_level);
    if let Some(ref path) = cli.config {
        tracing::debug!(path = %path.display(), "loaded config file");
    }

    let file = LedgerFile::new(config.ledger_file);
    match cli.command {
        Command::Deploy { owner, force } => emit(&commands::deploy(&file, owner, force)?, cli.json),
        Command::Submit {
            caller,
            state,
            votes_a,
            votes_b,
            seats,
        } => {
            let result = StateResult::new(state, votes_a, votes_b, seats);
            emit(&commands::submit(&file, &caller, result)?, cli.json)
        }
        Command::Import { caller, file: path } => {
            emit(&commands::import(&file, &caller, &path)?, cli.json)
        }
        Command::End { caller } => emit(&commands::end(&file, &caller)?, cli.json),
        Command::Status => emit(&commands::status(&file)?, cli.json),
    }
}
