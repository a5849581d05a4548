//! Service HTTP Routes
//!
//! Root status and connectivity diagnostics. Neither route can fail.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::state::AppState;
use crate::catalog::DiagnosticsReport;

pub const SERVICE_NAME: &str = "MU Foods";

/// Root status response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub name: String,
    pub status: String,
}

/// Create root and diagnostics routes
pub fn diagnostics_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/test", get(diagnostics_handler))
        .with_state(state)
}

async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        name: SERVICE_NAME.to_string(),
        status: "ok".to_string(),
    })
}

async fn diagnostics_handler(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    Json(state.catalog.diagnostics(state.env).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_response_serialization() {
        let response = RootResponse {
            name: SERVICE_NAME.to_string(),
            status: "ok".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({"name": "MU Foods", "status": "ok"}));
    }
}
