//! # HTTP API Module
//!
//! Declares the public routes, parses and validates input, calls the
//! catalog operations and maps failures to status codes.
//!
//! # Endpoints
//!
//! - `GET /` - Service name and status
//! - `GET /api/beverages` - In-stock beverages, filtered by `tag` and `q`
//! - `POST /api/contact` - Contact form submission
//! - `POST /api/beverages/seed` - Insert the demo catalog once
//! - `GET /test` - Connectivity diagnostics

pub mod catalog_routes;
pub mod config;
pub mod diagnostics_routes;
pub mod errors;
pub mod extract;
pub mod server;
pub mod state;

pub use config::{AppConfig, ConfigError, StoreBackend};
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
pub use state::AppState;
