//! Stackwait HTTP Client
//!
//! A small, type-safe client for a deployed stack's asynchronous status
//! endpoints. It pairs one GET-and-decode fetch operation with the
//! `stackwait-core` poller and exposes a wait helper per endpoint family
//! (upload tasks, job file transfers, job requests).
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use stackwait_client::StackClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = StackClient::new("https://example.com")
//!         .with_session("83fe193aa9a1a67274b2d2f09e40d2d6");
//!
//!     // Wait up to five minutes for an upload task to finish well.
//!     let payload = client
//!         .wait_for_task(
//!             "/viewer/task_status/6a8e23b1/",
//!             "SUCCESS",
//!             Duration::from_secs(300),
//!         )
//!         .await?;
//!
//!     println!("Task finished: {payload}");
//!     Ok(())
//! }
//! ```

pub mod error;
mod job_requests;
mod tasks;
mod transfers;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use job_requests::JOB_REQUEST_ENDPOINT;
pub use stackwait_core::{PollError, PollOutcome, PollSettings, StatusResponse};
pub use tasks::TASK_STATUS_PREFIX;
pub use transfers::JOB_FILE_TRANSFER_ENDPOINT;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// HTTP client for a deployed stack's status endpoints
///
/// Holds the stack's base URL, an optional session credential and the
/// polling settings every wait helper uses. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StackClient {
    /// Base URL of the stack (e.g. "https://example.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Session ID sent as a `sessionid` cookie on every request
    session_id: Option<String>,
    /// Poll interval and per-request timeout
    settings: PollSettings,
}

impl StackClient {
    /// Create a new stack client with default settings
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the stack (a trailing slash is trimmed)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new stack client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session_id: None,
            settings: PollSettings::default(),
        }
    }

    /// Create a stack client whose per-request timeout and poll interval
    /// come from the given settings
    pub fn from_settings(base_url: impl Into<String>, settings: PollSettings) -> Result<Self> {
        settings.validate()?;
        let client = Client::builder().timeout(settings.request_timeout).build()?;

        let mut this = Self::with_client(base_url, client);
        this.settings = settings;
        Ok(this)
    }

    /// Attach the session ID used for authenticated endpoints
    ///
    /// Sent as a `sessionid` cookie, the way the stack's login flow
    /// establishes it in a browser.
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Get the base URL of the stack
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the polling settings in use
    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Perform one status fetch: GET the endpoint and decode the JSON body.
    ///
    /// This is the fetch operation handed to the poller. A success answer
    /// must carry JSON — a proxy error page or truncated body can never
    /// satisfy a predicate, so it fails the wait immediately instead of
    /// spinning until the deadline. Non-success bodies are kept verbatim
    /// as a string value so error responses stay diagnosable.
    pub async fn fetch_status(&self, endpoint: &str) -> std::result::Result<StatusResponse, PollError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(session_id) = &self.session_id {
            request = request.header(
                reqwest::header::COOKIE,
                format!("sessionid={session_id}"),
            );
        }

        let response = request
            .send()
            .await
            .map_err(|e| PollError::Transport(e.to_string()))?;
        let status = response.status();
        let status_code = status.as_u16();

        let text = response
            .text()
            .await
            .map_err(|e| PollError::Transport(e.to_string()))?;
        let body = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) if status.is_success() => {
                return Err(PollError::Transport(format!(
                    "body of {status_code} response is not JSON: {e}"
                )));
            }
            Err(_) => Value::String(text),
        };

        Ok(StatusResponse { status_code, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = StackClient::new("https://example.com");
        assert_eq!(client.base_url(), "https://example.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = StackClient::new("https://example.com/");
        assert_eq!(client.base_url(), "https://example.com");
    }

    #[test]
    fn test_client_with_session() {
        let client = StackClient::new("https://example.com").with_session("abc123");
        assert_eq!(client.session_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_client_from_settings_rejects_zero_interval() {
        let settings = PollSettings {
            poll_interval: std::time::Duration::ZERO,
            ..PollSettings::default()
        };
        assert!(StackClient::from_settings("https://example.com", settings).is_err());
    }
}
