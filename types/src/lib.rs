//! Fundamental types for the electoral ledger.
//!
//! This crate defines the values shared by every other crate in the workspace:
//! caller identities, candidates and per-state results.

pub mod address;
pub mod candidate;
pub mod error;
pub mod state_result;

pub use address::{AccountAddress, ADDRESS_LEN};
pub use candidate::Candidate;
pub use error::TypesError;
pub use state_result::StateResult;
