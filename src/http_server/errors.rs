//! # API Errors
//!
//! Error types for the HTTP layer and their status code mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::catalog::CatalogError;
use crate::schema::{FieldError, ValidationError};
use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request body or entity failed validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Request body was not sent as JSON
    #[error("Expected request with `Content-Type: application/json`")]
    UnsupportedMediaType,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// No store handle configured
    #[error("Database not configured")]
    StoreUnavailable,

    /// Store operation failed
    #[error("{0}")]
    Store(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.fields)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable => ApiError::StoreUnavailable,
            other => ApiError::Store(other.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(e) => e.into(),
            CatalogError::Store(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedMediaType,
            JsonRejection::JsonDataError(err) => {
                let text = err.body_text();
                let field = match missing_field_name(&text) {
                    Some(name) => FieldError::missing_field(name),
                    None => FieldError::new("body", text),
                };
                ApiError::Validation(vec![field])
            }
            other => ApiError::Validation(vec![FieldError::new("body", other.body_text())]),
        }
    }
}

/// Field name from a serde "missing field `x`" message
fn missing_field_name(message: &str) -> Option<&str> {
    const MARKER: &str = "missing field `";
    let start = message.find(MARKER)? + MARKER.len();
    let len = message[start..].find('`')?;
    Some(&message[start..start + len])
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let code = err.status_code().as_u16();
        let error = err.to_string();
        let details = match err {
            ApiError::Validation(fields) => fields,
            _ => Vec::new(),
        };
        Self {
            error,
            code,
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation(vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::StoreUnavailable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Store("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            ApiError::from(StoreError::Unavailable),
            ApiError::StoreUnavailable
        ));
        assert!(matches!(
            ApiError::from(StoreError::Backend("down".into())),
            ApiError::Store(_)
        ));
    }

    #[test]
    fn test_validation_details_in_body() {
        let err = ValidationError::new(
            "ContactInquiry",
            vec![FieldError::new("email", "value is not a valid email address")],
        );
        let body = ErrorResponse::from(ApiError::from(err));

        assert_eq!(body.code, 422);
        assert_eq!(body.details.len(), 1);
        assert_eq!(body.details[0].field, "email");
    }

    #[test]
    fn test_missing_field_name() {
        assert_eq!(
            missing_field_name(
                "Failed to deserialize the JSON body into the target type: \
                 missing field `message` at line 1 column 50"
            ),
            Some("message")
        );
        assert_eq!(missing_field_name("invalid type: integer `3`, expected a string"), None);
    }

    #[test]
    fn test_unavailable_message() {
        let body = ErrorResponse::from(ApiError::StoreUnavailable);
        assert_eq!(body.error, "Database not configured");
        assert!(body.details.is_empty());
    }
}
