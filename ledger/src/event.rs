//! Events emitted for committed ledger writes.

use electoral_types::Candidate;
use serde::{Deserialize, Serialize};

/// Ledger-level events that observers can subscribe to via the [`EventBus`].
///
/// Only committed writes produce events; a rejected call emits nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A state result was accepted and its seats credited.
    StateResultAccepted {
        state: String,
        winner: Candidate,
        seats: u32,
    },
    /// The derived leader changed as a result of a submission.
    LeaderChanged {
        previous: Candidate,
        current: Candidate,
    },
    /// The election was closed.
    ElectionEnded { leader: Candidate },
}

type Listener = Box<dyn Fn(&LedgerEvent) + Send + Sync>;

/// Synchronous fan-out event bus for ledger events.
///
/// Listeners are invoked inline on the emitting thread while the write that
/// produced the event still holds the ledger; keep handlers fast.
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &LedgerEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
