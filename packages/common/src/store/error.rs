use thiserror::Error;

/// Errors that can occur during document store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database could not be reached.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or failed the operation.
    #[error("document store error: {0}")]
    Backend(String),

    /// A stored body could not be converted to or from JSON.
    #[error("document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
