//! Error types for the adapter layer.

use thiserror::Error;

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Errors that can occur while talking to a document backend.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The adapter configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Transport failure (DNS, connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success status. `reason` is
    /// the response body, or the status text when the body is empty.
    #[error("remote returned HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// The response body was not valid JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The document could not be serialized.
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),

    /// The remote accepted the request but reported a non-success status.
    #[error("write rejected by remote: {0}")]
    Rejected(String),
}

impl AdapterError {
    /// Returns the HTTP status code if the remote answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AdapterError::Status { status, .. } => Some(*status),
            AdapterError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the request never produced a usable HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, AdapterError::Http(e) if e.status().is_none())
    }
}
