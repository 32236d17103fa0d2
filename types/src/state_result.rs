//! Per-state vote tallies as submitted to the ledger.

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;

/// The tally for one named state.
///
/// All of the state's `seats` go to whichever candidate has strictly more
/// votes. A result with equal vote counts has no winner and is never accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateResult {
    /// State name. Matched exactly (case-sensitive) for duplicate detection.
    pub name: String,
    pub votes_a: u64,
    pub votes_b: u64,
    /// Electoral seats awarded to the state winner.
    pub seats: u32,
}

impl StateResult {
    pub fn new(name: impl Into<String>, votes_a: u64, votes_b: u64, seats: u32) -> Self {
        Self {
            name: name.into(),
            votes_a,
            votes_b,
            seats,
        }
    }

    /// The candidate with strictly more votes, or `None` on a tie.
    pub fn winner(&self) -> Option<Candidate> {
        if self.votes_a > self.votes_b {
            Some(Candidate::CandidateA)
        } else if self.votes_b > self.votes_a {
            Some(Candidate::CandidateB)
        } else {
            None
        }
    }

    pub fn is_tied(&self) -> bool {
        self.votes_a == self.votes_b
    }
}
