//! Poll settings
//!
//! Process-wide defaults for polling, constructed once per run and passed
//! into the client and poller rather than read from ambient state. The
//! overall deadline is deliberately not here: each wait supplies its own.

use std::time::Duration;

use crate::error::PollError;

/// Default delay between status fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default per-request timeout for a single status fetch
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Polling configuration
#[derive(Debug, Clone)]
pub struct PollSettings {
    /// How long to sleep between status fetches
    pub poll_interval: Duration,

    /// How long a single status fetch may take
    pub request_timeout: Duration,
}

impl PollSettings {
    /// Creates settings from environment variables, with defaults.
    ///
    /// Recognized variables (values in whole seconds):
    /// - STACKWAIT_POLL_INTERVAL (default: 2)
    /// - STACKWAIT_REQUEST_TIMEOUT (default: 8)
    pub fn from_env() -> Self {
        let poll_interval = std::env::var("STACKWAIT_POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        let request_timeout = std::env::var("STACKWAIT_REQUEST_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Self {
            poll_interval,
            request_timeout,
        }
    }

    /// Validates the settings
    pub fn validate(&self) -> Result<(), PollError> {
        if self.poll_interval.is_zero() {
            return Err(PollError::InvalidSettings(
                "poll_interval must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(PollError::InvalidSettings(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
