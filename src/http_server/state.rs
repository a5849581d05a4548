//! Shared handler state
//!
//! Built once at startup and cloned into every request.

use std::sync::Arc;

use tracing::{info, warn};

use super::config::{AppConfig, StoreBackend};
use crate::catalog::{CatalogService, EnvStatus};
use crate::store::{MemoryStore, MongoStore, SharedStore};

/// State shared across handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub catalog: CatalogService,
    pub env: EnvStatus,
}

impl AppState {
    /// Wrap an already-open store handle
    pub fn new(store: Option<SharedStore>, env: EnvStatus) -> Self {
        Self {
            catalog: CatalogService::new(store),
            env,
        }
    }

    /// Open the configured store and build the state.
    ///
    /// A store that cannot be opened leaves the state without a handle;
    /// the service still starts and reports the problem through diagnostics.
    pub async fn from_config(config: &AppConfig) -> Self {
        Self::new(open_store(config).await, config.env_status())
    }
}

async fn open_store(config: &AppConfig) -> Option<SharedStore> {
    match config.backend {
        StoreBackend::Memory => {
            let name = config.database_name.as_deref().unwrap_or("memory");
            info!(database = name, "Using in-memory store");
            let store: SharedStore = Arc::new(MemoryStore::new(name));
            Some(store)
        }
        StoreBackend::Mongo => {
            let Some((url, name)) = config.database_settings() else {
                warn!("DATABASE_URL or DATABASE_NAME not set, running without a database");
                return None;
            };

            match MongoStore::connect(url, name).await {
                Ok(store) => {
                    if let Err(e) = store.ping().await {
                        warn!(error = %e, "MongoDB ping failed, continuing with lazy connection");
                    }
                    let store: SharedStore = Arc::new(store);
                    Some(store)
                }
                Err(e) => {
                    warn!(error = %e, "Failed to create MongoDB client");
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mongo_without_settings_has_no_store() {
        let state = AppState::from_config(&AppConfig::default()).await;
        assert!(state.catalog.store().is_none());
    }

    #[tokio::test]
    async fn test_memory_backend() {
        let config = AppConfig {
            backend: StoreBackend::Memory,
            database_name: Some("shop".to_string()),
            ..Default::default()
        };
        let state = AppState::from_config(&config).await;

        let store = state.catalog.store().unwrap();
        assert_eq!(store.database_name(), "shop");
        assert!(state.env.database_name_set);
        assert!(!state.env.database_url_set);
    }

    #[tokio::test]
    async fn test_malformed_url_has_no_store() {
        let config = AppConfig {
            database_url: Some("not-a-mongo-url".to_string()),
            database_name: Some("shop".to_string()),
            ..Default::default()
        };
        let state = AppState::from_config(&config).await;
        assert!(state.catalog.store().is_none());
    }
}
