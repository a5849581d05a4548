//! Connectivity diagnostics
//!
//! Best-effort introspection of the store handle and configuration. Every
//! failure is folded into a status string; building a report cannot fail.

use serde::Serialize;

use crate::store::SharedStore;

/// Longest error excerpt included in a report
pub const ERROR_EXCERPT_CHARS: usize = 50;

/// Most collection names included in a report
pub const MAX_LISTED_COLLECTIONS: usize = 10;

/// Presence of the database settings in the environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvStatus {
    pub database_url_set: bool,
    pub database_name_set: bool,
}

/// Diagnostics response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Probe the store handle and report its state.
pub async fn probe(store: Option<&SharedStore>, env: EnvStatus) -> DiagnosticsReport {
    let mut report = DiagnosticsReport {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_flag(env.database_url_set),
        database_name: set_flag(env.database_name_set),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    match store {
        Some(store) => {
            report.database = "✅ Available".to_string();
            report.connection_status = "Connected".to_string();

            match store.list_collection_names().await {
                Ok(names) => {
                    report.collections = names.into_iter().take(MAX_LISTED_COLLECTIONS).collect();
                    report.database = "✅ Connected & Working".to_string();
                }
                Err(e) => {
                    report.database =
                        format!("⚠️  Connected but Error: {}", excerpt(&e.to_string()));
                }
            }
        }
        None => {
            report.database = "⚠️  Available but not initialized".to_string();
        }
    }

    report
}

fn set_flag(set: bool) -> String {
    if set { "✅ Set" } else { "❌ Not Set" }.to_string()
}

fn excerpt(message: &str) -> String {
    message.chars().take(ERROR_EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_no_store() {
        let report = probe(None, EnvStatus::default()).await;

        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "⚠️  Available but not initialized");
        assert_eq!(report.connection_status, "Not Connected");
        assert_eq!(report.database_url, "❌ Not Set");
        assert_eq!(report.database_name, "❌ Not Set");
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn test_working_store_lists_at_most_ten() {
        let memory = MemoryStore::default();
        for i in 0..12 {
            crate::store::DocumentStore::insert_one(
                &memory,
                &format!("c{:02}", i),
                serde_json::json!({}),
            )
            .await
            .unwrap();
        }
        let store: SharedStore = Arc::new(memory);
        let env = EnvStatus {
            database_url_set: true,
            database_name_set: true,
        };

        let report = probe(Some(&store), env).await;

        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections.len(), MAX_LISTED_COLLECTIONS);
        assert_eq!(report.database_url, "✅ Set");
    }

    #[test]
    fn test_excerpt_counts_chars() {
        let long = "é".repeat(80);
        assert_eq!(excerpt(&long).chars().count(), ERROR_EXCERPT_CHARS);
        assert_eq!(excerpt("short"), "short");
    }
}
