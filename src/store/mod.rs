//! # Document Store Adapter
//!
//! A thin handle to a document database. Documents are JSON objects grouped
//! into named collections; each stored document carries a store-assigned
//! `_id`.
//!
//! Backends:
//! - [`MongoStore`] - MongoDB through the official driver
//! - [`MemoryStore`] - in-process collections, for tests and local runs
//!
//! The handle is created once at startup and shared by every request. Both
//! backends are safe for concurrent use without per-request locking.

mod errors;
mod filter;
mod memory;
mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use errors::{StoreError, StoreResult};
pub use filter::Filter;
pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Raw CRUD over a document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Name of the database this handle points at
    fn database_name(&self) -> &str;

    /// Insert one document, returning its generated identifier
    async fn insert_one(&self, collection: &str, document: Value) -> StoreResult<String>;

    /// Insert several documents in a single call
    async fn insert_many(&self, collection: &str, documents: Vec<Value>)
        -> StoreResult<Vec<String>>;

    /// All documents matching the filter, in the store's natural order
    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Value>>;

    /// Number of documents matching the filter
    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64>;

    /// Names of the collections in the database
    async fn list_collection_names(&self) -> StoreResult<Vec<String>>;
}

/// Store handle shared across request handlers
pub type SharedStore = Arc<dyn DocumentStore>;
