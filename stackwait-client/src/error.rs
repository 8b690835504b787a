//! Error types for the stack client

use stackwait_core::PollError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the stack client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a wait even started
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// A wait ended in anything other than the expected terminal status
    #[error(transparent)]
    Poll(#[from] PollError),
}

impl ClientError {
    /// Check if the underlying operation never finished
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Poll(e) if e.is_timeout())
    }

    /// Check if the operation finished, but with the wrong recorded status
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Poll(e) if e.is_mismatch())
    }
}
