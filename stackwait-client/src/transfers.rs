//! Job file transfer endpoint
//!
//! Moving experiment files to a job's working directory runs
//! asynchronously; the transfer is done once `transfer_datetime` is
//! recorded, and `transfer_status` says whether it worked.

use serde_json::Value;
use std::time::Duration;

use stackwait_core::{CompletionPredicate, Poller, extract};
use tracing::info;

use crate::{Result, StackClient};

/// Job file transfer resource root (trailing slash matters to the stack)
pub const JOB_FILE_TRANSFER_ENDPOINT: &str = "/api/job_file_transfer/";

impl StackClient {
    /// Wait until the job file transfer finishes, then check its recorded
    /// status against `expected_status`.
    ///
    /// Handles both response shapes the stack serves: the single transfer
    /// resource and the paged listing whose first result is the transfer.
    ///
    /// # Returns
    /// The terminal payload.
    pub async fn wait_for_file_transfer(
        &self,
        transfer_id: i64,
        expected_status: &str,
        timeout: Duration,
    ) -> Result<Value> {
        let endpoint = format!("{JOB_FILE_TRANSFER_ENDPOINT}{transfer_id}");
        let poller = Poller::from_settings(self.settings(), timeout)?;
        let predicate = CompletionPredicate::transfer_complete();

        info!("Waiting for job file transfer {}", transfer_id);
        let outcome = poller
            .poll(|| self.fetch_status(&endpoint), &predicate)
            .await;
        let payload = outcome.into_completed()?;

        let status = extract::transfer_status(&payload)?;
        info!("Transfer status is {}", status);
        extract::expect_status(status, expected_status)?;

        Ok(payload)
    }
}
