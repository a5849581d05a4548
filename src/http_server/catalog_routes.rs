//! Catalog HTTP Routes
//!
//! Beverage listing, demo seeding and contact intake. Mounted under `/api`.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use super::errors::ApiResult;
use super::extract::ValidatedJson;
use super::state::AppState;
use crate::catalog::BeverageQuery;
use crate::schema::{Beverage, ContactInquiry};

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub ok: bool,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub ok: bool,
    pub message: String,
    pub count: u64,
}

// ==================
// Catalog Routes
// ==================

/// Create catalog routes
pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/beverages", get(list_beverages_handler))
        .route("/beverages/seed", post(seed_beverages_handler))
        .route("/contact", post(submit_contact_handler))
        .with_state(state)
}

async fn list_beverages_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Vec<Beverage>>> {
    let query = BeverageQuery::from_pairs(params);
    let beverages = state.catalog.list_beverages(&query).await?;
    Ok(Json(beverages))
}

async fn seed_beverages_handler(State(state): State<AppState>) -> ApiResult<Json<SeedResponse>> {
    let outcome = state.catalog.seed_beverages().await?;

    Ok(Json(SeedResponse {
        ok: true,
        message: outcome.message().to_string(),
        count: outcome.count(),
    }))
}

async fn submit_contact_handler(
    State(state): State<AppState>,
    ValidatedJson(inquiry): ValidatedJson<ContactInquiry>,
) -> ApiResult<Json<ContactResponse>> {
    let id = state.catalog.submit_inquiry(inquiry).await?;
    Ok(Json(ContactResponse { ok: true, id }))
}
