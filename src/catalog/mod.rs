//! # Catalog Operations
//!
//! The operations behind the public API: beverage listing, contact intake,
//! demo seeding and diagnostics. Each operation is a single store round trip
//! (seeding does a count followed by one bulk insert).

mod diagnostics;
mod errors;
mod query;
mod seed;

use chrono::Utc;
use tracing::{info, warn};

use crate::schema::{Beverage, ContactInquiry, Entity};
use crate::store::{Filter, SharedStore, StoreError};

pub use diagnostics::{DiagnosticsReport, EnvStatus, ERROR_EXCERPT_CHARS, MAX_LISTED_COLLECTIONS};
pub use errors::{CatalogError, CatalogResult};
pub use query::{BeverageQuery, SEARCH_FIELDS};
pub use seed::{sample_beverages, SAMPLE_COUNT};

/// Result of a seed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog was empty and the demo beverages were inserted
    Seeded { count: u64 },
    /// The catalog already held beverages; nothing was inserted
    AlreadySeeded { count: u64 },
}

impl SeedOutcome {
    pub fn count(&self) -> u64 {
        match self {
            SeedOutcome::Seeded { count } | SeedOutcome::AlreadySeeded { count } => *count,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            SeedOutcome::Seeded { .. } => "Seeded beverages",
            SeedOutcome::AlreadySeeded { .. } => "Beverages already seeded",
        }
    }
}

/// Catalog operations over an optional store handle.
///
/// A missing handle is not an error until an operation needs the store.
#[derive(Clone, Default)]
pub struct CatalogService {
    store: Option<SharedStore>,
}

impl CatalogService {
    pub fn new(store: Option<SharedStore>) -> Self {
        Self { store }
    }

    /// The store handle, if one is configured
    pub fn store(&self) -> Option<&SharedStore> {
        self.store.as_ref()
    }

    fn require_store(&self) -> CatalogResult<&SharedStore> {
        self.store
            .as_ref()
            .ok_or(CatalogError::Store(StoreError::Unavailable))
    }

    /// Validate and insert one entity, returning its identifier.
    pub async fn create<E: Entity>(&self, entity: E) -> CatalogResult<String> {
        let store = self.require_store()?;
        let entity = entity.validated()?;
        let document = entity.to_document(Utc::now()).map_err(StoreError::from)?;

        Ok(store.insert_one(E::COLLECTION, document).await?)
    }

    /// In-stock beverages matching the query, without identifiers.
    ///
    /// Stored documents that fail validation are skipped.
    pub async fn list_beverages(&self, query: &BeverageQuery) -> CatalogResult<Vec<Beverage>> {
        let store = self.require_store()?;
        let documents = store.find(Beverage::COLLECTION, &query.to_filter()).await?;

        let mut beverages = Vec::with_capacity(documents.len());
        for document in documents {
            match Beverage::from_document(document) {
                Ok(beverage) => beverages.push(beverage),
                Err(e) => warn!(error = %e, "Skipping invalid beverage document"),
            }
        }

        Ok(beverages)
    }

    /// Persist a contact inquiry, returning its identifier.
    pub async fn submit_inquiry(&self, inquiry: ContactInquiry) -> CatalogResult<String> {
        let id = self.create(inquiry).await?;
        info!(id = %id, "Contact inquiry stored");
        Ok(id)
    }

    /// Insert the demo beverages unless the catalog already has any.
    pub async fn seed_beverages(&self) -> CatalogResult<SeedOutcome> {
        let store = self.require_store()?;

        let existing = store.count(Beverage::COLLECTION, &Filter::All).await?;
        if existing > 0 {
            info!(count = existing, "Beverages already seeded");
            return Ok(SeedOutcome::AlreadySeeded { count: existing });
        }

        let now = Utc::now();
        let documents = sample_beverages()?
            .iter()
            .map(|b| b.to_document(now))
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)?;

        let ids = store.insert_many(Beverage::COLLECTION, documents).await?;
        info!(count = ids.len(), "Seeded beverages");

        Ok(SeedOutcome::Seeded {
            count: ids.len() as u64,
        })
    }

    /// Report backend, store and configuration status. Never fails.
    pub async fn diagnostics(&self, env: EnvStatus) -> DiagnosticsReport {
        diagnostics::probe(self.store.as_ref(), env).await
    }
}
