//! Poll outcome types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::error::PollError;

/// One status fetch result: the HTTP status code and the decoded JSON body.
///
/// Produced by the fetch operation injected into [`crate::Poller::poll`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// HTTP status code of the fetch
    pub status_code: u16,
    /// Decoded response body
    pub body: Value,
}

impl StatusResponse {
    /// A successful (200) response with the given body
    pub fn ok(body: Value) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }
}

/// Final result of one poll operation
///
/// Exactly one variant is produced per poll; a poll operation is never
/// resumed after yielding its outcome.
#[derive(Debug)]
pub enum PollOutcome {
    /// The completion predicate accepted a payload; it is attached
    Completed(Value),
    /// The deadline ran out before any payload was terminal
    TimedOut {
        /// The last payload seen, for diagnostics
        last_payload: Option<Value>,
        /// Wall-clock time spent polling
        elapsed: Duration,
    },
    /// A fetch failed hard (transport, status code, payload shape)
    Failed(PollError),
}

impl PollOutcome {
    /// Check if the operation reached a terminal state
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Check if the deadline ran out
    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }

    /// Unwrap the terminal payload, converting the other variants into an
    /// error suitable for `?` call sites.
    ///
    /// `TimedOut` becomes [`PollError::DeadlineExceeded`]; `Failed` yields
    /// its underlying error unchanged.
    pub fn into_completed(self) -> Result<Value, PollError> {
        match self {
            Self::Completed(payload) => Ok(payload),
            Self::TimedOut { elapsed, .. } => Err(PollError::DeadlineExceeded { elapsed }),
            Self::Failed(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_completed_passes_payload_through() {
        let outcome = PollOutcome::Completed(json!({"status": "SUCCESS"}));
        let payload = outcome.into_completed().unwrap();
        assert_eq!(payload["status"], "SUCCESS");
    }

    #[test]
    fn test_into_completed_converts_timeout() {
        let outcome = PollOutcome::TimedOut {
            last_payload: Some(json!({"finished": false})),
            elapsed: Duration::from_secs(180),
        };
        let err = outcome.into_completed().unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn test_into_completed_preserves_failure() {
        let outcome = PollOutcome::Failed(PollError::UnexpectedStatus {
            status: 500,
            body: "server error".to_string(),
        });
        let err = outcome.into_completed().unwrap_err();
        assert!(matches!(err, PollError::UnexpectedStatus { status: 500, .. }));
    }
}
