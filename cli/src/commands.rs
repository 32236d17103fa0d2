//! The operations behind each subcommand.
//!
//! Each command loads the ledger, applies at most one kind of write through a
//! [`SharedLedger`] so committed events can be reported, and saves only when
//! something was committed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use electoral_ledger::{ElectionLedger, ElectionPhase, LedgerEvent, SharedLedger};
use electoral_types::{AccountAddress, Candidate, StateResult};
use serde::{Deserialize, Serialize};

use crate::store::LedgerFile;
use crate::CliError;

/// Read-only summary of a ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub owner: AccountAddress,
    pub leader: Candidate,
    pub phase: ElectionPhase,
    pub seats_a: u32,
    pub seats_b: u32,
    pub seats_total: u64,
    pub states: Vec<StateResult>,
}

impl StatusReport {
    pub fn of(ledger: &ElectionLedger) -> Self {
        let tally = ledger.seat_tally();
        Self {
            owner: *ledger.owner(),
            leader: ledger.current_leader(),
            phase: ledger.phase(),
            seats_a: tally.candidate_a,
            seats_b: tally.candidate_b,
            seats_total: tally.total(),
            states: ledger.results().to_vec(),
        }
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self.phase {
            ElectionPhase::Open => "open",
            ElectionPhase::Closed => "closed",
        };
        writeln!(f, "owner:   {}", self.owner)?;
        writeln!(f, "phase:   {phase}")?;
        writeln!(f, "leader:  {}", self.leader)?;
        writeln!(
            f,
            "seats:   {} {} / {} {} ({} awarded)",
            Candidate::CandidateA,
            self.seats_a,
            Candidate::CandidateB,
            self.seats_b,
            self.seats_total
        )?;
        writeln!(f, "states:  {}", self.states.len())?;
        for state in &self.states {
            let winner = state.winner().unwrap_or_default();
            writeln!(
                f,
                "  {:<20} {:>10} {:>10} {:>4} seats -> {winner}",
                state.name, state.votes_a, state.votes_b, state.seats
            )?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    pub owner: AccountAddress,
    pub ledger_file: PathBuf,
}

impl fmt::Display for DeployReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "election ledger deployed to {} (owner {})",
            self.ledger_file.display(),
            self.owner
        )
    }
}

/// Outcome of a committed write, with the events it produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub events: Vec<LedgerEvent>,
    pub status: StatusReport,
}

impl fmt::Display for WriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "{}", describe(event))?;
        }
        write!(f, "{}", self.status)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub state: String,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
    pub events: Vec<LedgerEvent>,
    pub status: StatusReport,
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "imported {} result(s), rejected {}",
            self.accepted,
            self.rejected.len()
        )?;
        for rejection in &self.rejected {
            writeln!(
                f,
                "  rejected {} [{}]: {}",
                rejection.state, rejection.kind, rejection.message
            )?;
        }
        for event in &self.events {
            writeln!(f, "{}", describe(event))?;
        }
        write!(f, "{}", self.status)
    }
}

fn describe(event: &LedgerEvent) -> String {
    match event {
        LedgerEvent::StateResultAccepted {
            state,
            winner,
            seats,
        } => format!("accepted {state}: {seats} seat(s) to {winner}"),
        LedgerEvent::LeaderChanged { previous, current } => {
            format!("leader changed: {previous} -> {current}")
        }
        LedgerEvent::ElectionEnded { leader } => format!("election ended, leader {leader}"),
    }
}

/// A batch of results as read by `import`: a TOML file of `[[result]]` tables.
#[derive(Clone, Debug, Deserialize)]
pub struct ResultsFile {
    #[serde(rename = "result", default)]
    pub results: Vec<StateResult>,
}

impl ResultsFile {
    pub fn from_toml_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        toml::from_str(&content).map_err(|e| CliError::ResultsFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Wraps a loaded ledger and records every event committed through it.
struct Session {
    shared: SharedLedger,
    events: Arc<Mutex<Vec<LedgerEvent>>>,
}

impl Session {
    fn open(file: &LedgerFile) -> Result<Self, CliError> {
        let shared = SharedLedger::new(file.load()?);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        shared.subscribe(Box::new(move |event| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        }));
        Ok(Self { shared, events })
    }

    fn take_events(&self) -> Vec<LedgerEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn commit(self, file: &LedgerFile) -> Result<(Vec<LedgerEvent>, StatusReport), CliError> {
        file.write_snapshot(&self.shared.snapshot())?;
        Ok((self.take_events(), self.status()))
    }

    fn status(&self) -> StatusReport {
        self.shared.view(StatusReport::of)
    }
}

/// Create a fresh ledger owned by `owner`.
pub fn deploy(
    file: &LedgerFile,
    owner: AccountAddress,
    force: bool,
) -> Result<DeployReport, CliError> {
    if file.exists() && !force {
        return Err(CliError::LedgerExists(file.path().to_path_buf()));
    }
    file.save(&ElectionLedger::new(owner))?;
    tracing::info!(%owner, path = %file.path().display(), "election ledger deployed");
    Ok(DeployReport {
        owner,
        ledger_file: file.path().to_path_buf(),
    })
}

pub fn submit(
    file: &LedgerFile,
    caller: &AccountAddress,
    result: StateResult,
) -> Result<WriteReport, CliError> {
    let session = Session::open(file)?;
    session.shared.submit_state_result(caller, result)?;
    let (events, status) = session.commit(file)?;
    Ok(WriteReport { events, status })
}

/// Apply every result in `results_path` in order. Each one commits or fails
/// on its own; the ledger is saved once, if anything was accepted.
pub fn import(
    file: &LedgerFile,
    caller: &AccountAddress,
    results_path: &Path,
) -> Result<ImportReport, CliError> {
    let batch = ResultsFile::from_toml_file(results_path)?;
    let session = Session::open(file)?;

    let mut accepted = 0;
    let mut rejected = Vec::new();
    for result in batch.results {
        let state = result.name.clone();
        match session.shared.submit_state_result(caller, result) {
            Ok(_) => accepted += 1,
            Err(e) => rejected.push(Rejection {
                state,
                kind: e.kind(),
                message: e.to_string(),
            }),
        }
    }
    tracing::info!(accepted, rejected = rejected.len(), "import finished");

    let (events, status) = if accepted > 0 {
        session.commit(file)?
    } else {
        (Vec::new(), session.status())
    };
    Ok(ImportReport {
        accepted,
        rejected,
        events,
        status,
    })
}

pub fn end(file: &LedgerFile, caller: &AccountAddress) -> Result<WriteReport, CliError> {
    let session = Session::open(file)?;
    session.shared.end_election(caller)?;
    let (events, status) = session.commit(file)?;
    Ok(WriteReport { events, status })
}

pub fn status(file: &LedgerFile) -> Result<StatusReport, CliError> {
    Ok(StatusReport::of(&file.load()?))
}
