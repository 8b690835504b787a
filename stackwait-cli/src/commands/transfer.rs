//! Job file transfer wait command

use anyhow::Result;
use chrono::Utc;
use colored::*;

use crate::config::Config;

/// Wait for a job file transfer to finish with the expected status
pub async fn wait(config: &Config, transfer_id: i64, expect: &str) -> Result<()> {
    let client = config.client()?;

    println!(
        "Waiting for job file transfer {} [{}]...",
        transfer_id,
        Utc::now()
    );

    match client
        .wait_for_file_transfer(transfer_id, expect, config.timeout)
        .await
    {
        Ok(payload) => {
            let status = stackwait_core::extract::transfer_status(&payload)?;
            println!(
                "{}",
                format!("Transfer finished with status {} [{}]", status, Utc::now()).green()
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", format!("Transfer wait failed: {e}").red());
            Err(e.into())
        }
    }
}
