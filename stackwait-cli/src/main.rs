//! Stackwait CLI
//!
//! Command-line tool for waiting on a stack's asynchronous operations:
//! upload tasks, job file transfers and job requests. Each subcommand
//! polls the matching status endpoint until the operation is terminal or
//! the deadline runs out, and exits non-zero on timeout, transport
//! failure or a wrong terminal status.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stackwait")]
#[command(about = "Waits for asynchronous stack operations to finish", long_about = None)]
struct Cli {
    /// Stack base URL
    #[arg(long, env = "STACKWAIT_STACK_URL")]
    stack_url: String,

    /// Session ID for authenticated endpoints
    #[arg(long, env = "STACKWAIT_SESSION_ID")]
    session_id: Option<String>,

    /// Seconds between status fetches
    #[arg(long, env = "STACKWAIT_POLL_INTERVAL", default_value_t = 2)]
    poll_interval: u64,

    /// Overall deadline in seconds
    #[arg(long, default_value_t = 300)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stackwait_client=warn,stackwait_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        stack_url: cli.stack_url,
        session_id: cli.session_id,
        poll_interval: Duration::from_secs(cli.poll_interval),
        timeout: Duration::from_secs(cli.timeout),
    };

    handle_command(cli.command, &config).await
}
