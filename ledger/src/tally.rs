//! Cumulative seat counts per candidate.

use electoral_types::Candidate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::LedgerError;

/// Seats won so far by each candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatTally {
    pub candidate_a: u32,
    pub candidate_b: u32,
}

impl SeatTally {
    pub const ZERO: Self = Self {
        candidate_a: 0,
        candidate_b: 0,
    };

    /// Seats held by `candidate`. `Nobody` never holds any.
    pub fn seats_of(&self, candidate: Candidate) -> u32 {
        match candidate {
            Candidate::CandidateA => self.candidate_a,
            Candidate::CandidateB => self.candidate_b,
            Candidate::Nobody => 0,
        }
    }

    /// The tally after crediting `seats` to `candidate`.
    ///
    /// Returns a new value instead of mutating so callers can validate
    /// before committing.
    pub fn credited(&self, candidate: Candidate, seats: u32) -> Result<Self, LedgerError> {
        let mut next = *self;
        let slot = match candidate {
            Candidate::CandidateA => &mut next.candidate_a,
            Candidate::CandidateB => &mut next.candidate_b,
            Candidate::Nobody => return Err(LedgerError::NotAContender(candidate)),
        };
        *slot = slot
            .checked_add(seats)
            .ok_or(LedgerError::SeatTallyOverflow { candidate })?;
        Ok(next)
    }

    /// The candidate with strictly more seats, or `Nobody` when level.
    pub fn leader(&self) -> Candidate {
        match self.candidate_a.cmp(&self.candidate_b) {
            Ordering::Greater => Candidate::CandidateA,
            Ordering::Less => Candidate::CandidateB,
            Ordering::Equal => Candidate::Nobody,
        }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.candidate_a) + u64::from(self.candidate_b)
    }
}
