//! Error types for talking to the scoring service.
//!
//! Every failure the controller can see is a [`ServiceError`]. None of them
//! escape the controller: each one is turned into a notice and a well-defined
//! session state.

use std::time::Duration;

use tracing::instrument;

/// Structured rejection carried in the `error` field of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Rejection {
    /// The guess is not in the service's word list.
    #[display("Invalid word")]
    InvalidWord,

    /// The session id is unknown to the service (expired or finished).
    #[display("Invalid session")]
    InvalidSession,

    /// Any other message the service chose to send.
    #[display("{}", _0)]
    Other(String),
}

impl Rejection {
    /// Classifies a raw `error` message from the service.
    #[instrument]
    pub fn from_message(message: &str) -> Self {
        let trimmed = message.trim();
        if trimmed.eq_ignore_ascii_case("invalid word") {
            Self::InvalidWord
        } else if trimmed.eq_ignore_ascii_case("invalid session") {
            Self::InvalidSession
        } else {
            Self::Other(trimmed.to_string())
        }
    }
}

/// Failure of a request to the scoring service.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ServiceError {
    /// The request could not be sent or the response could not be read.
    #[display("Network error: {}", _0)]
    Transport(String),

    /// No response arrived within the configured deadline.
    #[display("Request timed out after {}s", _0.as_secs())]
    TimedOut(Duration),

    /// The service answered with a structured error.
    #[display("{}", _0)]
    Rejected(Rejection),

    /// The response did not have the agreed shape.
    #[display("Unexpected response from server: {}", _0)]
    ContractViolation(String),
}

impl std::error::Error for ServiceError {}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::ContractViolation(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
