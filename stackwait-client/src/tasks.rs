//! Task status endpoint
//!
//! Uploads and other viewer operations hand back a task status URL; the
//! task is done when its `finished` flag is set, after which `status`
//! records how it went.

use serde_json::Value;
use std::time::Duration;

use stackwait_core::{CompletionPredicate, Poller, extract};
use tracing::info;

use crate::{Result, StackClient};

/// Prefix every task status URL handed back by the stack starts with
pub const TASK_STATUS_PREFIX: &str = "/viewer/task_status/";

impl StackClient {
    /// Wait until the task behind `task_status_url` finishes, then check
    /// its recorded status against `expected_status`.
    ///
    /// # Arguments
    /// * `task_status_url` - Endpoint path, e.g. `/viewer/task_status/<uuid>/`
    /// * `expected_status` - Terminal status literal, e.g. `SUCCESS`
    /// * `timeout` - Overall deadline for this wait
    ///
    /// # Returns
    /// The terminal payload.
    pub async fn wait_for_task(
        &self,
        task_status_url: &str,
        expected_status: &str,
        timeout: Duration,
    ) -> Result<Value> {
        let poller = Poller::from_settings(self.settings(), timeout)?;
        let predicate = CompletionPredicate::task_finished();

        info!("Waiting for task at {}", task_status_url);
        let outcome = poller
            .poll(|| self.fetch_status(task_status_url), &predicate)
            .await;
        let payload = outcome.into_completed()?;

        let status = extract::task_status(&payload)?;
        info!("Task status is {}", status);
        extract::expect_status(status, expected_status)?;

        Ok(payload)
    }
}
