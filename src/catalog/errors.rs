//! Catalog operation errors

use thiserror::Error;

use crate::schema::ValidationError;
use crate::store::StoreError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by catalog operations
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Input failed entity validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The document store failed or is not configured
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Returns true if no store handle is configured
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CatalogError::Store(StoreError::Unavailable))
    }
}
