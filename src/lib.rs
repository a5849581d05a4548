//! mufoods - Catalog and contact-form backend for the MU Foods website
//!
//! Layers, leaf-first:
//! - `store`: document store adapter (MongoDB or in-memory)
//! - `schema`: entity shapes and validation
//! - `catalog`: listing, contact, seeding and diagnostics operations
//! - `http_server`: routes, extraction and error mapping

pub mod catalog;
pub mod cli;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod store;
