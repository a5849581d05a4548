//! Document store errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a document store backend
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No store handle is configured
    #[error("Database not configured")]
    Unavailable,

    /// The backend rejected or failed the operation
    #[error("Database error: {0}")]
    Backend(String),

    /// A document could not be converted to or from the backend format
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Documents must be JSON objects
    #[error("Document must be an object")]
    NotAnObject,
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for StoreError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}
