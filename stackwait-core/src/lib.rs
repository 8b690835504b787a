//! Stackwait Core
//!
//! Client-side engine for waiting on asynchronous stack operations.
//!
//! A deployed stack accepts long-running operations (upload tasks, job file
//! transfers, job requests) and exposes their progress through JSON status
//! endpoints. This crate contains:
//! - Poller: fetches a status payload on a fixed interval under a deadline
//! - Completion predicates: decide whether a payload is terminal
//! - Extraction helpers: pull the asserted status out of a terminal payload
//!
//! The poller performs no HTTP itself; callers inject a fetch operation
//! (see `stackwait-client` for the reqwest-backed one).
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use stackwait_core::{CompletionPredicate, Poller, PollError, StatusResponse};
//!
//! # async fn fetch_somehow() -> Result<StatusResponse, PollError> { unimplemented!() }
//! #[tokio::main]
//! async fn main() -> Result<(), PollError> {
//!     let poller = Poller::new(Duration::from_secs(2), Duration::from_secs(300))?;
//!     let outcome = poller
//!         .poll(|| fetch_somehow(), &CompletionPredicate::task_finished())
//!         .await;
//!     let payload = outcome.into_completed()?;
//!     println!("task status: {}", stackwait_core::extract::task_status(&payload)?);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extract;
pub mod outcome;
pub mod poller;
pub mod predicate;
pub mod settings;

// Re-export commonly used types
pub use error::PollError;
pub use outcome::{PollOutcome, StatusResponse};
pub use poller::Poller;
pub use predicate::CompletionPredicate;
pub use settings::PollSettings;
