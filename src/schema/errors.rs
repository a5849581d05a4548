//! Schema validation errors
//!
//! Every rejected field is reported with its name and the reason it was
//! rejected, so the HTTP layer can return field-level detail to the client.

use std::fmt;

use serde::Serialize;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name (e.g. "email", "size_ml")
    pub field: String,
    /// Why the value was rejected
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field required")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Validation failure for one entity, carrying all rejected fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed for {entity}: {}", summarize(.fields))]
pub struct ValidationError {
    /// Entity name (e.g. "Beverage")
    pub entity: &'static str,
    /// Rejected fields, sorted by field name
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(entity: &'static str, mut fields: Vec<FieldError>) -> Self {
        fields.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.reason.cmp(&b.reason)));
        Self { entity, fields }
    }

    /// Convert the errors reported by a `validator::Validate` derive.
    pub fn from_validator(entity: &'static str, errors: &validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let reason = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| describe_code(&error.code));
                fields.push(FieldError::new(field.to_string(), reason));
            }
        }
        Self::new(entity, fields)
    }

    /// Returns true if the given field was rejected
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

fn summarize(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_code(code: &str) -> String {
    match code {
        "email" => "value is not a valid email address".to_string(),
        "url" => "value is not a valid URL".to_string(),
        "range" => "value is out of range".to_string(),
        "length" => "value has an invalid length".to_string(),
        other => format!("failed '{}' check", other),
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_are_sorted() {
        let err = ValidationError::new(
            "Beverage",
            vec![
                FieldError::new("size_ml", "too small"),
                FieldError::new("price", "negative"),
            ],
        );
        assert_eq!(err.fields[0].field, "price");
        assert!(err.has_field("size_ml"));
        assert!(!err.has_field("name"));
    }

    #[test]
    fn test_display_lists_fields() {
        let err = ValidationError::new("ContactInquiry", vec![FieldError::missing_field("email")]);
        assert_eq!(
            err.to_string(),
            "validation failed for ContactInquiry: email: field required"
        );
    }
}
