//! In-memory document store
//!
//! Collections keep documents in insertion order, which is the natural
//! order reported by `find`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::DocumentStore;
use crate::schema::ID_FIELD;

/// Document store backed by process memory
#[derive(Debug)]
pub struct MemoryStore {
    name: String,
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    /// Create an empty store with the given database name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Assign an identifier if the document has none, returning it
    fn prepare(mut document: Value) -> StoreResult<(String, Value)> {
        let obj = document.as_object_mut().ok_or(StoreError::NotAnObject)?;

        let id = match obj.get(ID_FIELD).and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().simple().to_string();
                obj.insert(ID_FIELD.to_string(), Value::String(id.clone()));
                id
            }
        };

        Ok((id, document))
    }

    fn poisoned() -> StoreError {
        StoreError::Backend("collection lock poisoned".to_string())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new("memory")
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn database_name(&self) -> &str {
        &self.name
    }

    async fn insert_one(&self, collection: &str, document: Value) -> StoreResult<String> {
        let (id, document) = Self::prepare(document)?;

        let mut collections = self.collections.write().map_err(|_| Self::poisoned())?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Value>,
    ) -> StoreResult<Vec<String>> {
        // Prepare everything first so a bad document inserts nothing
        let prepared = documents
            .into_iter()
            .map(Self::prepare)
            .collect::<StoreResult<Vec<_>>>()?;

        let mut collections = self.collections.write().map_err(|_| Self::poisoned())?;
        let docs = collections.entry(collection.to_string()).or_default();

        let mut ids = Vec::with_capacity(prepared.len());
        for (id, document) in prepared {
            docs.push(document);
            ids.push(id);
        }

        Ok(ids)
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().map_err(|_| Self::poisoned())?;

        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let collections = self.collections.read().map_err(|_| Self::poisoned())?;

        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).count() as u64)
            .unwrap_or(0))
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        let collections = self.collections.read().map_err(|_| Self::poisoned())?;

        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}
