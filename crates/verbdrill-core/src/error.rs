//! Round engine error types.
//!
//! Every variant is an expected, caller-recoverable condition. The HTTP layer
//! maps them onto status codes; nothing in the engine retries them.

use thiserror::Error;

/// Errors returned by the round state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The identity token does not belong to an active session.
    #[error("unauthorized: no active session for this identity")]
    Unauthorized,

    /// No round exists with the given identifier.
    #[error("round not found: {0}")]
    RoundNotFound(String),

    /// The round has no current exercise left to grade.
    #[error("round already complete: {0}")]
    RoundComplete(String),
}

impl RoundError {
    /// Stable machine-readable code used in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            RoundError::Unauthorized => "unauthorized",
            RoundError::RoundNotFound(_) => "round_not_found",
            RoundError::RoundComplete(_) => "round_complete",
        }
    }
}
