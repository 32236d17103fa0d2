//! Electoral ledger.
//!
//! A single owner submits one vote tally per named state. Each state's seats go
//! to whichever candidate has strictly more votes there; the current leader is
//! whoever holds strictly more seats overall, or nobody when level. The owner
//! may close the election once, after which the ledger is read-only.

pub mod error;
pub mod event;
pub mod ledger;
pub mod shared;
pub mod snapshot;
pub mod tally;

pub use error::LedgerError;
pub use event::{EventBus, LedgerEvent};
pub use ledger::{ElectionLedger, ElectionPhase};
pub use shared::SharedLedger;
pub use snapshot::{LedgerSnapshot, SnapshotError, SNAPSHOT_VERSION};
pub use tally::SeatTally;
