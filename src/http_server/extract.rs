//! Validating JSON extractor

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;

use super::errors::ApiError;
use crate::schema::Entity;

/// Deserializes a JSON body into an entity and runs its validation.
///
/// Malformed bodies, missing fields and constraint violations are all
/// rejected with 422 and field-level detail.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Entity + Send + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value.validated()?))
    }
}
