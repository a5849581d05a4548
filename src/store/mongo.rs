//! MongoDB document store
//!
//! Documents cross the boundary as JSON: they are converted to BSON on
//! insert and back to relaxed extended JSON on read. Identifiers are
//! driver-assigned ObjectIds reported as hex strings.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde_json::Value;
use tracing::{debug, info};

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::DocumentStore;

const APP_NAME: &str = "mufoods";

/// Document store backed by a MongoDB database
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Build a client for the given connection URL and database.
    ///
    /// The driver connects lazily; use [`MongoStore::ping`] to check reachability.
    pub async fn connect(url: &str, database: &str) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(url).await?;
        options.app_name = Some(APP_NAME.to_string());

        let client = Client::with_options(options)?;
        let db = client.database(database);

        info!(database = database, "MongoDB client created");
        Ok(Self { db })
    }

    /// Round-trip a ping command to the server
    pub async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }

    fn to_bson_document(value: &Value) -> StoreResult<Document> {
        if !value.is_object() {
            return Err(StoreError::NotAnObject);
        }
        Ok(bson::to_document(value)?)
    }

    fn to_json(document: Document) -> Value {
        Bson::Document(document).into_relaxed_extjson()
    }

    fn id_to_string(id: &Bson) -> String {
        match id {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn insert_one(&self, collection: &str, document: Value) -> StoreResult<String> {
        let document = Self::to_bson_document(&document)?;
        let result = self.collection(collection).insert_one(document, None).await?;

        Ok(Self::id_to_string(&result.inserted_id))
    }

    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<Value>,
    ) -> StoreResult<Vec<String>> {
        let documents = documents
            .iter()
            .map(Self::to_bson_document)
            .collect::<StoreResult<Vec<_>>>()?;
        let total = documents.len();

        let result = self
            .collection(collection)
            .insert_many(documents, None)
            .await?;

        Ok((0..total)
            .filter_map(|i| result.inserted_ids.get(&i))
            .map(Self::id_to_string)
            .collect())
    }

    async fn find(&self, collection: &str, filter: &Filter) -> StoreResult<Vec<Value>> {
        let query = filter.to_document()?;
        debug!(collection = collection, query = %query, "find");

        let cursor = self.collection(collection).find(query, None).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Self::to_json).collect())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        let query = filter.to_document()?;
        Ok(self
            .collection(collection)
            .count_documents(query, None)
            .await?)
    }

    async fn list_collection_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.db.list_collection_names(None).await?)
    }
}
