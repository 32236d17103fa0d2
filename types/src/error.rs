//! Errors raised while constructing shared types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("unknown candidate code: {0}")]
    UnknownCandidate(u8),

    #[error("unknown candidate name: {0}")]
    UnknownCandidateName(String),
}
