//! CLI configuration
//!
//! Everything a wait needs: where the stack is, how to authenticate, how
//! often to poll and how long to keep trying.

use std::time::Duration;

use stackwait_client::{PollSettings, Result, StackClient};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the deployed stack
    pub stack_url: String,
    /// Session ID for authenticated endpoints
    pub session_id: Option<String>,
    /// Delay between status fetches
    pub poll_interval: Duration,
    /// Overall deadline for the wait
    pub timeout: Duration,
}

impl Config {
    /// Build a stack client from this configuration
    pub fn client(&self) -> Result<StackClient> {
        let settings = PollSettings {
            poll_interval: self.poll_interval,
            ..PollSettings::from_env()
        };

        let mut client = StackClient::from_settings(&self.stack_url, settings)?;
        if let Some(session_id) = &self.session_id {
            client = client.with_session(session_id);
        }
        Ok(client)
    }
}
