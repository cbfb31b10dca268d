//! Remote storage error outcome
//!
//! A flat classification of cloud-tier client failures, so callers can
//! branch on retry policy without looking at client-specific error types.

use std::io;

use thiserror::Error;

/// What a remote storage failure means for the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorOutcome {
    #[error("No error")]
    NoError,

    /// Could be retried
    #[error("Retryable error")]
    Retry,

    /// The service asked us to retry later (SlowDown response)
    #[error("Cloud service asked us to slow down")]
    RetrySlowdown,

    /// Must not be retried
    #[error("Non retriable error")]
    Fail,

    /// Object does not exist (only meaningful for downloads)
    #[error("Key not found error")]
    NotFound,
}

impl ErrorOutcome {
    /// Stable integer code
    pub fn code(self) -> i32 {
        match self {
            ErrorOutcome::NoError => 0,
            ErrorOutcome::Retry => 1,
            ErrorOutcome::RetrySlowdown => 2,
            ErrorOutcome::Fail => 3,
            ErrorOutcome::NotFound => 4,
        }
    }

    /// Inverse of [`code`](Self::code)
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ErrorOutcome::NoError),
            1 => Some(ErrorOutcome::Retry),
            2 => Some(ErrorOutcome::RetrySlowdown),
            3 => Some(ErrorOutcome::Fail),
            4 => Some(ErrorOutcome::NotFound),
            _ => None,
        }
    }

    /// Message for any code, including ones outside the taxonomy
    pub fn message_for_code(code: i32) -> String {
        match Self::from_code(code) {
            Some(outcome) => outcome.to_string(),
            None => "Undefined error_outcome encountered".to_string(),
        }
    }

    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorOutcome::Retry | ErrorOutcome::RetrySlowdown)
    }

    /// Closest standard I/O error kind
    pub fn io_kind(self) -> io::ErrorKind {
        match self {
            ErrorOutcome::NoError | ErrorOutcome::Fail => io::ErrorKind::Other,
            ErrorOutcome::Retry => io::ErrorKind::Interrupted,
            ErrorOutcome::RetrySlowdown => io::ErrorKind::WouldBlock,
            ErrorOutcome::NotFound => io::ErrorKind::NotFound,
        }
    }
}

impl From<ErrorOutcome> for io::Error {
    fn from(outcome: ErrorOutcome) -> Self {
        io::Error::new(outcome.io_kind(), outcome)
    }
}
