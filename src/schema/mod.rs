//! Schema and validation layer
//!
//! Defines the shape of every persisted entity and enforces field
//! constraints before any write and before any record is returned.
//!
//! - Constraints are declared on the struct fields
//! - Construction goes through validating constructors
//! - Stored documents are normalized on the way out (`_id` dropped)

mod errors;
mod types;

pub use errors::{FieldError, SchemaResult, ValidationError};
pub use types::{
    Beverage, BeverageBuilder, ContactInquiry, Entity, Product, User, CREATED_AT_FIELD, ID_FIELD,
    UPDATED_AT_FIELD,
};
