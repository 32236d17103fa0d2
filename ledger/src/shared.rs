//! Thread-safe handle for hosting one ledger behind concurrent callers.
//!
//! Writes hold the write lock across their whole check-and-apply sequence, so
//! two writes never interleave. Reads share the read lock and always observe a
//! committed state.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use electoral_types::{AccountAddress, Candidate, StateResult};

use crate::error::LedgerError;
use crate::event::{EventBus, LedgerEvent};
use crate::ledger::{ElectionLedger, ElectionPhase};
use crate::snapshot::LedgerSnapshot;
use crate::tally::SeatTally;

struct Inner {
    ledger: RwLock<ElectionLedger>,
    events: RwLock<EventBus>,
}

/// Cloneable handle to a single [`ElectionLedger`].
///
/// Events are emitted while the write lock is still held, so listeners see
/// them in commit order. A listener must not call back into the same handle.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<Inner>,
}

impl SharedLedger {
    pub fn new(ledger: ElectionLedger) -> Self {
        Self {
            inner: Arc::new(Inner {
                ledger: RwLock::new(ledger),
                events: RwLock::new(EventBus::new()),
            }),
        }
    }

    pub fn subscribe(&self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.inner
            .events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribe(listener);
    }

    // Writes validate before mutating, so a panic while a guard was held
    // cannot have left a half-applied write behind.
    fn read(&self) -> RwLockReadGuard<'_, ElectionLedger> {
        self.inner
            .ledger
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ElectionLedger> {
        self.inner
            .ledger
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, events: &[LedgerEvent]) {
        let bus = self
            .inner
            .events
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        for event in events {
            bus.emit(event);
        }
    }

    pub fn submit_state_result(
        &self,
        caller: &AccountAddress,
        result: StateResult,
    ) -> Result<Candidate, LedgerError> {
        let mut ledger = self.write();
        let previous = ledger.current_leader();
        let state = result.name.clone();
        let seats = result.seats;
        let winner = ledger.submit_state_result(caller, result)?;

        let mut events = vec![LedgerEvent::StateResultAccepted {
            state,
            winner,
            seats,
        }];
        let current = ledger.current_leader();
        if current != previous {
            events.push(LedgerEvent::LeaderChanged { previous, current });
        }
        self.emit(&events);
        drop(ledger);
        Ok(winner)
    }

    pub fn end_election(&self, caller: &AccountAddress) -> Result<(), LedgerError> {
        let mut ledger = self.write();
        ledger.end_election(caller)?;
        self.emit(&[LedgerEvent::ElectionEnded {
            leader: ledger.current_leader(),
        }]);
        drop(ledger);
        Ok(())
    }

    pub fn current_leader(&self) -> Candidate {
        self.read().current_leader()
    }

    pub fn election_ended(&self) -> bool {
        self.read().election_ended()
    }

    pub fn phase(&self) -> ElectionPhase {
        self.read().phase()
    }

    pub fn seat_tally(&self) -> SeatTally {
        self.read().seat_tally()
    }

    /// Run `f` against one consistent view of the ledger.
    pub fn view<R>(&self, f: impl FnOnce(&ElectionLedger) -> R) -> R {
        f(&self.read())
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::capture(&self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn owner() -> AccountAddress {
        AccountAddress::from_bytes([1; 20])
    }

    fn recording(shared: &SharedLedger) -> Arc<Mutex<Vec<LedgerEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        shared.subscribe(Box::new(move |event| {
            sink.lock().unwrap().push(event.clone());
        }));
        seen
    }

    #[test]
    fn submission_emits_acceptance_and_leader_change() {
        let shared = SharedLedger::new(ElectionLedger::new(owner()));
        let seen = recording(&shared);

        shared
            .submit_state_result(&owner(), StateResult::new("California", 1000, 900, 32))
            .unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                LedgerEvent::StateResultAccepted {
                    state: "California".into(),
                    winner: Candidate::CandidateA,
                    seats: 32,
                },
                LedgerEvent::LeaderChanged {
                    previous: Candidate::Nobody,
                    current: Candidate::CandidateA,
                },
            ]
        );
    }

    #[test]
    fn unchanged_leader_emits_no_leader_event() {
        let shared = SharedLedger::new(ElectionLedger::new(owner()));
        shared
            .submit_state_result(&owner(), StateResult::new("California", 1000, 900, 32))
            .unwrap();
        let seen = recording(&shared);

        shared
            .submit_state_result(&owner(), StateResult::new("Texas", 10, 9, 38))
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(matches!(seen[0], LedgerEvent::StateResultAccepted { .. }));
    }

    #[test]
    fn rejected_writes_emit_nothing() {
        let shared = SharedLedger::new(ElectionLedger::new(owner()));
        let seen = recording(&shared);
        let stranger = AccountAddress::from_bytes([9; 20]);

        assert!(shared
            .submit_state_result(&stranger, StateResult::new("Ohio", 1, 2, 3))
            .is_err());
        assert!(shared.end_election(&stranger).is_err());
        assert!(shared
            .submit_state_result(&owner(), StateResult::new("Ohio", 2, 2, 3))
            .is_err());

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn end_election_emits_final_leader() {
        let shared = SharedLedger::new(ElectionLedger::new(owner()));
        shared
            .submit_state_result(&owner(), StateResult::new("Ohio", 800, 1200, 33))
            .unwrap();
        let seen = recording(&shared);

        shared.end_election(&owner()).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![LedgerEvent::ElectionEnded {
                leader: Candidate::CandidateB
            }]
        );
        assert_eq!(shared.phase(), ElectionPhase::Closed);
    }

    #[test]
    fn view_sees_consistent_fields() {
        let shared = SharedLedger::new(ElectionLedger::new(owner()));
        shared
            .submit_state_result(&owner(), StateResult::new("Ohio", 800, 1200, 33))
            .unwrap();
        let (leader, tally) = shared.view(|l| (l.current_leader(), l.seat_tally()));
        assert_eq!(leader, tally.leader());
        assert_eq!(tally.candidate_b, 33);
    }
}
