//! Error types for the document store.

use sheetdb_adapter::AdapterError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while loading or saving the document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The adapter failed to read or write.
    #[error("adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// The stored document does not match the expected shape.
    #[error("stored document has unexpected shape: {0}")]
    Decode(#[source] serde_json::Error),

    /// The in-memory data could not be turned into JSON.
    #[error("failed to encode data: {0}")]
    Encode(#[source] serde_json::Error),

    /// The last read failed, so writing would overwrite data never loaded.
    #[error("last read failed; refusing to overwrite the stored document")]
    Stale,
}
