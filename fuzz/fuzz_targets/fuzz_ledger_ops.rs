#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use electoral_ledger::{ElectionLedger, LedgerError};
use electoral_types::{AccountAddress, Candidate, StateResult};

const OWNER: AccountAddress = AccountAddress::from_bytes([0xaa; 20]);
const INTRUDER: AccountAddress = AccountAddress::from_bytes([0xbb; 20]);

#[derive(Arbitrary, Debug)]
enum Op {
    Submit {
        by_owner: bool,
        // Small name space so duplicates actually happen.
        state: u8,
        votes_a: u64,
        votes_b: u64,
        seats: u32,
    },
    End {
        by_owner: bool,
    },
}

// Drive the ledger with arbitrary call sequences and check that the seat tally
// always matches the accepted results and that rejected calls change nothing.
fuzz_target!(|ops: Vec<Op>| {
    let mut ledger = ElectionLedger::new(OWNER);

    for op in ops {
        let before = (ledger.seat_tally(), ledger.submitted_count(), ledger.election_ended());
        match op {
            Op::Submit {
                by_owner,
                state,
                votes_a,
                votes_b,
                seats,
            } => {
                let caller = if by_owner { OWNER } else { INTRUDER };
                let result = StateResult::new(format!("S{}", state % 16), votes_a, votes_b, seats);
                match ledger.submit_state_result(&caller, result) {
                    Ok(winner) => {
                        assert!(by_owner && !before.2);
                        assert!(winner.is_contender());
                        assert_eq!(ledger.submitted_count(), before.1 + 1);
                    }
                    Err(_) => assert_eq!(
                        (ledger.seat_tally(), ledger.submitted_count(), ledger.election_ended()),
                        before
                    ),
                }
            }
            Op::End { by_owner } => {
                let caller = if by_owner { OWNER } else { INTRUDER };
                match ledger.end_election(&caller) {
                    Ok(()) => assert!(by_owner && !before.2),
                    Err(LedgerError::AlreadyEnded) => assert!(before.2),
                    Err(_) => assert!(!by_owner),
                }
            }
        }

        let mut a = 0u64;
        let mut b = 0u64;
        for result in ledger.results() {
            match result.winner() {
                Some(Candidate::CandidateA) => a += u64::from(result.seats),
                Some(Candidate::CandidateB) => b += u64::from(result.seats),
                _ => panic!("accepted result without a winner: {result:?}"),
            }
        }
        let tally = ledger.seat_tally();
        assert_eq!((u64::from(tally.candidate_a), u64::from(tally.candidate_b)), (a, b));
        assert_eq!(ledger.current_leader(), tally.leader());
    }
});
