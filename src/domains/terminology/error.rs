//! Terminology-specific error types.

use thiserror::Error;

/// Errors that can occur when querying the terminology server.
#[derive(Debug, Error)]
pub enum TerminologyError {
    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Terminology server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The request could not be sent or the body could not be read.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not a ValueSet.
    #[error("Invalid terminology response: {0}")]
    InvalidResponse(String),
}

impl TerminologyError {
    /// Create an invalid response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}
