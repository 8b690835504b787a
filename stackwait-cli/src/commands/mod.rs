//! Command handlers
//!
//! One subcommand per endpoint family, routed to its handler.

mod job_request;
mod task;
mod transfer;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Wait for an upload task to finish
    Task {
        /// Task status endpoint, e.g. /viewer/task_status/<uuid>/
        endpoint: String,

        /// Expected terminal status
        #[arg(long, default_value = "SUCCESS")]
        expect: String,
    },
    /// Wait for a job file transfer to finish
    Transfer {
        /// Job file transfer id
        id: i64,

        /// Expected terminal status
        #[arg(long, default_value = "SUCCESS")]
        expect: String,
    },
    /// Wait for a job request property to reach a value
    JobRequest {
        /// Job request id
        id: i64,

        /// Record property to watch, e.g. job_status
        #[arg(long)]
        property: String,

        /// Value that ends the wait (JSON literal or bare string)
        #[arg(long)]
        value: String,
    },
}

/// Handle a command by routing it to the appropriate handler
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Task { endpoint, expect } => task::wait(config, &endpoint, &expect).await,
        Commands::Transfer { id, expect } => transfer::wait(config, id, &expect).await,
        Commands::JobRequest {
            id,
            property,
            value,
        } => job_request::wait(config, id, &property, &value).await,
    }
}
