//! The candidates an election is contested between.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Who a state, or the election as a whole, is attributed to.
///
/// `Nobody` is the neutral value: the leader before any state is submitted and
/// whenever the seat tallies are level. It never wins a state.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Candidate {
    #[default]
    Nobody,
    CandidateA,
    CandidateB,
}

impl Candidate {
    /// Stable numeric code (0 = nobody, 1 = candidate A, 2 = candidate B).
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Nobody => 0,
            Self::CandidateA => 1,
            Self::CandidateB => 2,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nobody => "nobody",
            Self::CandidateA => "candidate-a",
            Self::CandidateB => "candidate-b",
        }
    }

    /// Whether this candidate can win seats.
    pub fn is_contender(&self) -> bool {
        matches!(self, Self::CandidateA | Self::CandidateB)
    }
}

impl TryFrom<u8> for Candidate {
    type Error = TypesError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Nobody),
            1 => Ok(Self::CandidateA),
            2 => Ok(Self::CandidateB),
            other => Err(TypesError::UnknownCandidate(other)),
        }
    }
}

impl FromStr for Candidate {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nobody" => Ok(Self::Nobody),
            "candidate-a" => Ok(Self::CandidateA),
            "candidate-b" => Ok(Self::CandidateB),
            other => Err(TypesError::UnknownCandidateName(other.to_string())),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
