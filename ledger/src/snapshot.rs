//! Ledger snapshots. Capture every field of the ledger so it can be restored
//! later.
//!
//! The snapshot hash is computed deterministically from the captured fields,
//! and [`LedgerSnapshot::restore`] re-derives the tally and leader from the
//! stored results, so a tampered or hand-edited snapshot is refused rather
//! than loaded.

use std::collections::HashSet;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use electoral_types::{AccountAddress, Candidate, StateResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::LedgerError;
use crate::ledger::{apply_result, ElectionLedger};
use crate::tally::SeatTally;

/// Current snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot hash does not match its contents")]
    HashMismatch,

    #[error("unsupported snapshot version {0} (expected {expected})", expected = SNAPSHOT_VERSION)]
    UnsupportedVersion(u32),

    #[error("state {0} appears more than once")]
    DuplicateState(String),

    #[error("state {state} would not have been accepted: {source}")]
    InvalidResult {
        state: String,
        #[source]
        source: LedgerError,
    },

    #[error("stored seat tally {stored:?} differs from recomputed {recomputed:?}")]
    TallyMismatch {
        stored: SeatTally,
        recomputed: SeatTally,
    },

    #[error("stored leader {stored} differs from derived leader {derived}")]
    LeaderMismatch {
        stored: Candidate,
        derived: Candidate,
    },

    #[error("snapshot decode failed: {0}")]
    Decode(String),
}

/// Every field of an [`ElectionLedger`] at one point in time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Snapshot version for compatibility.
    pub version: u32,
    /// Blake2b-256 over all other fields.
    pub hash: [u8; 32],
    pub owner: AccountAddress,
    /// Accepted results in submission order.
    pub results: Vec<StateResult>,
    pub tally: SeatTally,
    /// Leader at capture time. Redundant with `tally`; checked on restore.
    pub leader: Candidate,
    pub ended: bool,
}

impl LedgerSnapshot {
    pub fn capture(ledger: &ElectionLedger) -> Self {
        let mut snap = Self {
            version: SNAPSHOT_VERSION,
            hash: [0u8; 32],
            owner: *ledger.owner(),
            results: ledger.results().to_vec(),
            tally: ledger.seat_tally(),
            leader: ledger.current_leader(),
            ended: ledger.election_ended(),
        };
        snap.hash = snap.compute_hash();
        snap
    }

    fn compute_hash(&self) -> [u8; 32] {
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.version.to_le_bytes());
        hasher.update(self.owner.as_bytes());
        hasher.update((self.results.len() as u64).to_le_bytes());
        for result in &self.results {
            // Length prefix keeps ("ab", "c") and ("a", "bc") apart.
            hasher.update((result.name.len() as u64).to_le_bytes());
            hasher.update(result.name.as_bytes());
            hasher.update(result.votes_a.to_le_bytes());
            hasher.update(result.votes_b.to_le_bytes());
            hasher.update(result.seats.to_le_bytes());
        }
        hasher.update(self.tally.candidate_a.to_le_bytes());
        hasher.update(self.tally.candidate_b.to_le_bytes());
        hasher.update([self.leader.as_u8(), u8::from(self.ended)]);

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the snapshot hash matches the captured fields.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("snapshot serialization should not fail")
    }

    /// Deserialize a snapshot from bytes. Does not verify it; see [`Self::restore`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(|e| SnapshotError::Decode(e.to_string()))
    }

    /// Rebuild the ledger, refusing anything the ledger itself could not have
    /// produced.
    pub fn restore(self) -> Result<ElectionLedger, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(self.version));
        }
        if !self.verify() {
            return Err(SnapshotError::HashMismatch);
        }

        let mut seen = HashSet::with_capacity(self.results.len());
        let mut recomputed = SeatTally::ZERO;
        for result in &self.results {
            if !seen.insert(result.name.as_str()) {
                return Err(SnapshotError::DuplicateState(result.name.clone()));
            }
            (_, recomputed) = apply_result(recomputed, result).map_err(|source| {
                SnapshotError::InvalidResult {
                    state: result.name.clone(),
                    source,
                }
            })?;
        }
        if recomputed != self.tally {
            return Err(SnapshotError::TallyMismatch {
                stored: self.tally,
                recomputed,
            });
        }
        let derived = recomputed.leader();
        if derived != self.leader {
            return Err(SnapshotError::LeaderMismatch {
                stored: self.leader,
                derived,
            });
        }

        Ok(ElectionLedger::from_parts(
            self.owner,
            self.results,
            self.tally,
            self.ended,
        ))
    }
}
