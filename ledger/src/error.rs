//! Errors returned by ledger writes.

use electoral_types::{AccountAddress, Candidate};
use thiserror::Error;

/// Why a write to the ledger was refused.
///
/// Every variant is raised before anything is mutated, so a failed call always
/// leaves the ledger exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("caller {caller} is not the ledger owner")]
    Unauthorized { caller: AccountAddress },

    #[error("the election has ended")]
    ElectionClosed,

    #[error("results for state {0} were already submitted")]
    DuplicateState(String),

    #[error("state {state} is tied at {votes} votes each")]
    TiedResult { state: String, votes: u64 },

    #[error("state {state} must have at least 1 seat")]
    InvalidSeatCount { state: String },

    #[error("the election has already ended")]
    AlreadyEnded,

    #[error("seat tally for {candidate} would overflow")]
    SeatTallyOverflow { candidate: Candidate },

    #[error("{0} cannot be credited with seats")]
    NotAContender(Candidate),
}

impl LedgerError {
    /// Stable snake-case code for logs and machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::ElectionClosed => "election_closed",
            Self::DuplicateState(_) => "duplicate_state",
            Self::TiedResult { .. } => "tied_result",
            Self::InvalidSeatCount { .. } => "invalid_seat_count",
            Self::AlreadyEnded => "already_ended",
            Self::SeatTallyOverflow { .. } => "seat_tally_overflow",
            Self::NotAContender(_) => "not_a_contender",
        }
    }
}
