//! The election ledger — per-state submissions, seat tallies and the
//! open/closed phase.
//!
//! The owner fixed at construction is the only identity allowed to write.
//! Submissions are append-only: a state name accepted once is never accepted
//! again, and nothing accepted is ever changed. Closing the election is
//! irreversible. Every write validates all of its preconditions before it
//! mutates anything, so a failed call has no effect.

use std::collections::HashMap;

use electoral_types::{AccountAddress, Candidate, StateResult};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::tally::SeatTally;

/// Phase of the election. `Open` is initial, `Closed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElectionPhase {
    /// Submissions are accepted.
    Open,
    /// Read-only; reached only through [`ElectionLedger::end_election`].
    Closed,
}

/// The aggregate holding all election state.
#[derive(Clone, Debug)]
pub struct ElectionLedger {
    owner: AccountAddress,
    /// Accepted results in submission order.
    results: Vec<StateResult>,
    /// State name → position in `results`.
    index: HashMap<String, usize>,
    tally: SeatTally,
    ended: bool,
}

impl ElectionLedger {
    /// Create an open ledger with empty tallies, writable only by `owner`.
    pub fn new(owner: AccountAddress) -> Self {
        tracing::debug!(%owner, "election ledger created");
        Self {
            owner,
            results: Vec::new(),
            index: HashMap::new(),
            tally: SeatTally::ZERO,
            ended: false,
        }
    }

    /// Rebuild a ledger from already-validated parts (see `snapshot`).
    pub(crate) fn from_parts(
        owner: AccountAddress,
        results: Vec<StateResult>,
        tally: SeatTally,
        ended: bool,
    ) -> Self {
        let index = results
            .iter()
            .enumerate()
            .map(|(pos, r)| (r.name.clone(), pos))
            .collect();
        Self {
            owner,
            results,
            index,
            tally,
            ended,
        }
    }

    /// Record the result for one state and credit its seats to the winner.
    ///
    /// Preconditions are checked in this order, and the first failure is
    /// returned: caller is the owner, election still open, state not yet
    /// submitted, vote counts not tied, at least one seat, winner's tally does
    /// not overflow.
    ///
    /// Returns the state's winner.
    pub fn submit_state_result(
        &mut self,
        caller: &AccountAddress,
        result: StateResult,
    ) -> Result<Candidate, LedgerError> {
        let (winner, tally) = match self.validate_submission(caller, &result) {
            Ok(checked) => checked,
            Err(e) => {
                tracing::warn!(
                    %caller,
                    state = %result.name,
                    kind = e.kind(),
                    "state result rejected: {e}"
                );
                return Err(e);
            }
        };

        let state = result.name.clone();
        let seats = result.seats;
        self.tally = tally;
        self.index.insert(state.clone(), self.results.len());
        self.results.push(result);

        tracing::info!(
            %state,
            %winner,
            seats,
            leader = %self.current_leader(),
            "state result accepted"
        );
        Ok(winner)
    }

    fn validate_submission(
        &self,
        caller: &AccountAddress,
        result: &StateResult,
    ) -> Result<(Candidate, SeatTally), LedgerError> {
        self.ensure_owner(caller)?;
        if self.ended {
            return Err(LedgerError::ElectionClosed);
        }
        if self.index.contains_key(&result.name) {
            return Err(LedgerError::DuplicateState(result.name.clone()));
        }
        apply_result(self.tally, result)
    }

    /// Close the election. Irreversible; only the owner may do it, once.
    pub fn end_election(&mut self, caller: &AccountAddress) -> Result<(), LedgerError> {
        let checked = self.ensure_owner(caller).and_then(|()| {
            if self.ended {
                Err(LedgerError::AlreadyEnded)
            } else {
                Ok(())
            }
        });
        if let Err(e) = checked {
            tracing::warn!(%caller, kind = e.kind(), "end election rejected: {e}");
            return Err(e);
        }

        self.ended = true;
        tracing::info!(
            leader = %self.current_leader(),
            states = self.results.len(),
            "election ended"
        );
        Ok(())
    }

    fn ensure_owner(&self, caller: &AccountAddress) -> Result<(), LedgerError> {
        if *caller == self.owner {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized { caller: *caller })
        }
    }

    /// The candidate ahead on seats, or `Nobody` when level (including 0–0).
    pub fn current_leader(&self) -> Candidate {
        self.tally.leader()
    }

    pub fn election_ended(&self) -> bool {
        self.ended
    }

    pub fn phase(&self) -> ElectionPhase {
        if self.ended {
            ElectionPhase::Closed
        } else {
            ElectionPhase::Open
        }
    }

    pub fn owner(&self) -> &AccountAddress {
        &self.owner
    }

    pub fn seat_tally(&self) -> SeatTally {
        self.tally
    }

    pub fn seats_of(&self, candidate: Candidate) -> u32 {
        self.tally.seats_of(candidate)
    }

    /// Whether a result for `name` (exact, case-sensitive) has been accepted.
    pub fn is_submitted(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn state_result(&self, name: &str) -> Option<&StateResult> {
        self.index.get(name).map(|&pos| &self.results[pos])
    }

    /// Accepted results in submission order.
    pub fn results(&self) -> &[StateResult] {
        &self.results
    }

    pub fn submitted_count(&self) -> usize {
        self.results.len()
    }
}

/// Checks a result on its own merits (strict winner, at least one seat) and
/// returns the winner with the tally that results from crediting it.
pub(crate) fn apply_result(
    tally: SeatTally,
    result: &StateResult,
) -> Result<(Candidate, SeatTally), LedgerError> {
    let winner = result.winner().ok_or_else(|| LedgerError::TiedResult {
        state: result.name.clone(),
        votes: result.votes_a,
    })?;
    if result.seats == 0 {
        return Err(LedgerError::InvalidSeatCount {
            state: result.name.clone(),
        });
    }
    let tally = tally.credited(winner, result.seats)?;
    Ok((winner, tally))
}
