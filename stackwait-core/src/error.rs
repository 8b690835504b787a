//! Error types for status polling

use std::time::Duration;
use thiserror::Error;

/// Result type alias for polling operations
pub type Result<T> = std::result::Result<T, PollError>;

/// Errors that can occur while waiting for an asynchronous operation
#[derive(Debug, Error)]
pub enum PollError {
    /// The status fetch itself failed (connection, decode, ...)
    #[error("status request failed: {0}")]
    Transport(String),

    /// The status endpoint answered with an unexpected HTTP status code
    #[error("unexpected status code {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// A payload field the caller relies on is absent
    #[error("response has no '{field}' field")]
    MissingField {
        /// Name of the absent field
        field: String,
    },

    /// No record with the given id in the payload's `results` listing
    #[error("no record with id {id} in results")]
    RecordNotFound {
        /// The id that was searched for
        id: String,
    },

    /// The operation never reached a terminal state within the deadline
    #[error("operation did not finish within {elapsed:?}")]
    DeadlineExceeded {
        /// Wall-clock time spent polling
        elapsed: Duration,
    },

    /// The operation finished, but with the wrong recorded status
    #[error("expected status '{expected}', got '{actual}'")]
    StatusMismatch {
        /// The status the caller expected
        expected: String,
        /// The status the payload recorded
        actual: String,
    },

    /// Poll interval or deadline is unusable
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl PollError {
    /// Check if this error means the operation never finished
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::DeadlineExceeded { .. })
    }

    /// Check if this error means the operation finished with the wrong result
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::StatusMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classification() {
        let err = PollError::DeadlineExceeded {
            elapsed: Duration::from_secs(60),
        };
        assert!(err.is_timeout());
        assert!(!err.is_mismatch());
    }

    #[test]
    fn test_mismatch_classification() {
        let err = PollError::StatusMismatch {
            expected: "SUCCESS".to_string(),
            actual: "FAILURE".to_string(),
        };
        assert!(err.is_mismatch());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_mismatch_message_names_both_statuses() {
        let err = PollError::StatusMismatch {
            expected: "SUCCESS".to_string(),
            actual: "FAILURE".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("SUCCESS"));
        assert!(message.contains("FAILURE"));
    }
}
