//! Status polling engine
//!
//! Repeatedly fetches a status payload on a fixed interval until a
//! completion predicate accepts it, the wall-clock deadline runs out, or
//! a fetch fails hard. Always fetches at least once before sleeping and
//! never sleeps after the terminal decision.

use std::future::Future;
use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::error::PollError;
use crate::outcome::{PollOutcome, StatusResponse};
use crate::predicate::CompletionPredicate;
use crate::settings::PollSettings;

/// Status code every known status endpoint answers with on success
const EXPECTED_STATUS: u16 = 200;

/// Fixed-interval poller with a wall-clock deadline
#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
    timeout: Duration,
    expected_status: u16,
}

impl Poller {
    /// Creates a poller that fetches every `interval` until `timeout` has
    /// elapsed. Both durations must be positive.
    pub fn new(interval: Duration, timeout: Duration) -> Result<Self, PollError> {
        if interval.is_zero() {
            return Err(PollError::InvalidSettings(
                "poll interval must be greater than 0".to_string(),
            ));
        }

        if timeout.is_zero() {
            return Err(PollError::InvalidSettings(
                "timeout must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            interval,
            timeout,
            expected_status: EXPECTED_STATUS,
        })
    }

    /// Creates a poller from the settings' poll interval and a per-wait
    /// deadline
    pub fn from_settings(settings: &PollSettings, timeout: Duration) -> Result<Self, PollError> {
        settings.validate()?;
        Self::new(settings.poll_interval, timeout)
    }

    /// Override the status code treated as a successful fetch
    pub fn with_expected_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    /// Polls until terminal.
    ///
    /// `fetch` performs one status retrieval; it is called at least once.
    /// Any fetch error and any status code other than the expected one end
    /// the poll immediately, without retrying. Elapsed time is measured
    /// from loop start, so a slow fetch consumes deadline budget.
    pub async fn poll<F, Fut>(&self, mut fetch: F, predicate: &CompletionPredicate) -> PollOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<StatusResponse, PollError>>,
    {
        let start = Instant::now();
        debug!(
            "Polling every {:?} with a {:?} deadline",
            self.interval, self.timeout
        );

        loop {
            let response = match fetch().await {
                Ok(response) => response,
                Err(e) => return PollOutcome::Failed(e),
            };

            if response.status_code != self.expected_status {
                return PollOutcome::Failed(PollError::UnexpectedStatus {
                    status: response.status_code,
                    body: response.body.to_string(),
                });
            }

            match predicate.is_complete(&response.body) {
                Ok(true) => {
                    info!("Operation finished after {:?}", start.elapsed());
                    return PollOutcome::Completed(response.body);
                }
                Ok(false) => {}
                Err(e) => return PollOutcome::Failed(e),
            }

            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                info!(
                    "Operation still not finished after {:?}, giving up",
                    elapsed
                );
                return PollOutcome::TimedOut {
                    last_payload: Some(response.body),
                    elapsed,
                };
            }

            debug!("Not finished yet, sleeping {:?}", self.interval);
            time::sleep(self.interval).await;
        }
    }
}
