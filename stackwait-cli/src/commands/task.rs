//! Task wait command

use anyhow::{Result, bail};
use chrono::Utc;
use colored::*;
use stackwait_client::TASK_STATUS_PREFIX;

use crate::config::Config;

/// Wait for an upload task to finish with the expected status
pub async fn wait(config: &Config, endpoint: &str, expect: &str) -> Result<()> {
    if !endpoint.starts_with(TASK_STATUS_PREFIX) {
        bail!("task status endpoint should start with {TASK_STATUS_PREFIX}, got {endpoint}");
    }

    let client = config.client()?;

    println!("Waiting for task at {} [{}]...", endpoint, Utc::now());

    match client.wait_for_task(endpoint, expect, config.timeout).await {
        Ok(payload) => {
            let status = stackwait_core::extract::task_status(&payload)?;
            println!(
                "{}",
                format!("Task finished with status {} [{}]", status, Utc::now()).green()
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", format!("Task wait failed: {e}").red());
            Err(e.into())
        }
    }
}
