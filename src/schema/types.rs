//! Entity definitions
//!
//! Each entity declares its field constraints with `validator` attributes.
//! Instances are only handed to the store or to clients after passing
//! [`Entity::validated`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::errors::{FieldError, SchemaResult, ValidationError};

/// Field holding the store-assigned identifier. Never exposed to clients.
pub const ID_FIELD: &str = "_id";

pub const CREATED_AT_FIELD: &str = "created_at";
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// A validated record type persisted in its own collection.
///
/// The collection name is the lowercase type name.
pub trait Entity: Serialize + DeserializeOwned + Validate + Sized {
    /// Type name used in error reports
    const NAME: &'static str;

    /// Collection the entity lives in
    const COLLECTION: &'static str;

    /// Constraints the attribute grammar cannot express.
    fn extra_checks(&self) -> Vec<FieldError> {
        Vec::new()
    }

    /// Run every declared constraint, consuming and returning the entity.
    fn validated(self) -> SchemaResult<Self> {
        let mut fields = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ValidationError::from_validator(Self::NAME, &errors).fields,
        };
        fields.extend(self.extra_checks());

        if fields.is_empty() {
            Ok(self)
        } else {
            Err(ValidationError::new(Self::NAME, fields))
        }
    }

    /// Serialize for insertion, stamping creation and update time.
    fn to_document(&self, now: DateTime<Utc>) -> Result<Value, serde_json::Error> {
        let mut doc = serde_json::to_value(self)?;
        if let Value::Object(obj) = &mut doc {
            let stamp = serde_json::to_value(now)?;
            obj.insert(CREATED_AT_FIELD.to_string(), stamp.clone());
            obj.insert(UPDATED_AT_FIELD.to_string(), stamp);
        }
        Ok(doc)
    }

    /// Normalize a stored document into the entity, dropping the identifier.
    fn from_document(mut doc: Value) -> SchemaResult<Self> {
        if let Value::Object(obj) = &mut doc {
            obj.remove(ID_FIELD);
        }
        let entity: Self = serde_json::from_value(doc).map_err(|e| {
            ValidationError::new(Self::NAME, vec![FieldError::new("document", e.to_string())])
        })?;
        entity.validated()
    }
}

fn default_true() -> bool {
    true
}

/// A beverage in the catalog. Collection: "beverage".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Beverage {
    /// Beverage name
    pub name: String,

    /// Primary flavor
    pub flavor: String,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Price in local currency
    #[validate(range(min = 0.0, message = "price must be greater than or equal to 0"))]
    pub price: f64,

    /// Bottle size in milliliters
    #[validate(range(min = 50, max = 5000, message = "size_ml must be between 50 and 5000"))]
    pub size_ml: i64,

    /// Product image URL
    #[serde(default)]
    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,

    /// Search/filter tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether the item is available
    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl Beverage {
    /// Start building a beverage from its required fields.
    pub fn builder(
        name: impl Into<String>,
        flavor: impl Into<String>,
        price: f64,
        size_ml: i64,
    ) -> BeverageBuilder {
        BeverageBuilder {
            inner: Beverage {
                name: name.into(),
                flavor: flavor.into(),
                description: None,
                price,
                size_ml,
                image_url: None,
                tags: Vec::new(),
                in_stock: true,
            },
        }
    }

    /// Returns true if the beverage carries the tag exactly
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Entity for Beverage {
    const NAME: &'static str = "Beverage";
    const COLLECTION: &'static str = "beverage";

    fn extra_checks(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !self.price.is_finite() {
            errors.push(FieldError::new("price", "price must be a finite number"));
        }
        if let Some(url) = &self.image_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(FieldError::new(
                    "image_url",
                    "URL scheme should be 'http' or 'https'",
                ));
            }
        }
        errors
    }
}

/// Fluent constructor for [`Beverage`]; `build` validates.
#[derive(Debug, Clone)]
pub struct BeverageBuilder {
    inner: Beverage,
}

impl BeverageBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = Some(description.into());
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.inner.image_url = Some(url.into());
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.inner.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.inner.in_stock = in_stock;
        self
    }

    pub fn build(self) -> SchemaResult<Beverage> {
        self.inner.validated()
    }
}

/// A message sent through the website contact form. Collection: "contactinquiry".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactInquiry {
    /// Sender name
    pub name: String,

    /// Sender email
    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,

    /// Phone number
    #[serde(default)]
    pub phone: Option<String>,

    /// Subject
    pub subject: String,

    /// Message body
    pub message: String,
}

impl ContactInquiry {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> SchemaResult<Self> {
        Self {
            name: name.into(),
            email: email.into(),
            phone,
            subject: subject.into(),
            message: message.into(),
        }
        .validated()
    }
}

impl Entity for ContactInquiry {
    const NAME: &'static str = "ContactInquiry";
    const COLLECTION: &'static str = "contactinquiry";
}

/// Website user account. Collection: "user".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Full name
    pub name: String,

    /// Email address
    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,

    #[serde(default)]
    pub address: Option<String>,

    /// Age in years
    #[serde(default)]
    #[validate(range(min = 0, max = 120, message = "age must be between 0 and 120"))]
    pub age: Option<i64>,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Entity for User {
    const NAME: &'static str = "User";
    const COLLECTION: &'static str = "user";
}

/// Generic product record. Collection: "product".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Price in dollars
    #[validate(range(min = 0.0, message = "price must be greater than or equal to 0"))]
    pub price: f64,

    pub category: String,

    #[serde(default = "default_true")]
    pub in_stock: bool,
}

impl Entity for Product {
    const NAME: &'static str = "Product";
    const COLLECTION: &'static str = "product";

    fn extra_checks(&self) -> Vec<FieldError> {
        if self.price.is_finite() {
            Vec::new()
        } else {
            vec![FieldError::new("price", "price must be a finite number")]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn citrus() -> BeverageBuilder {
        Beverage::builder("Citrus Zing", "Lemon + Lime", 3.99, 500)
    }

    #[test]
    fn test_valid_beverage_builds_with_defaults() {
        let beverage = citrus().build().unwrap();
        assert!(beverage.in_stock);
        assert!(beverage.tags.is_empty());
        assert!(beverage.description.is_none());
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = Beverage::builder("X", "Y", -0.01, 500).build().unwrap_err();
        assert!(err.has_field("price"));
    }

    #[test]
    fn test_size_bounds_are_inclusive() {
        assert!(Beverage::builder("X", "Y", 1.0, 50).build().is_ok());
        assert!(Beverage::builder("X", "Y", 1.0, 5000).build().is_ok());

        let small = Beverage::builder("X", "Y", 1.0, 49).build().unwrap_err();
        assert!(small.has_field("size_ml"));
        let large = Beverage::builder("X", "Y", 1.0, 5001).build().unwrap_err();
        assert!(large.has_field("size_ml"));
    }

    #[test]
    fn test_image_url_must_be_http() {
        assert!(citrus().image_url("https://example.com/a.png").build().is_ok());

        let err = citrus().image_url("not a url").build().unwrap_err();
        assert!(err.has_field("image_url"));

        let err = citrus().image_url("ftp://example.com/a.png").build().unwrap_err();
        assert!(err.has_field("image_url"));
    }

    #[test]
    fn test_all_failures_reported_together() {
        let err = Beverage::builder("X", "Y", -1.0, 10).build().unwrap_err();
        assert_eq!(err.fields.len(), 2);
        assert_eq!(err.entity, "Beverage");
    }

    #[test]
    fn test_from_document_strips_id() {
        let doc = json!({
            "_id": "65f0c0ffee",
            "name": "Mango Bliss",
            "flavor": "Alphonso Mango",
            "price": 4.49,
            "size_ml": 500,
            "tags": ["tropical"],
            "in_stock": true,
            "created_at": "2024-01-01T00:00:00Z"
        });
        let beverage = Beverage::from_document(doc).unwrap();
        let out = serde_json::to_value(&beverage).unwrap();
        assert!(out.get("_id").is_none());
        assert_eq!(out["name"], "Mango Bliss");
    }

    #[test]
    fn test_from_document_rejects_out_of_range() {
        let doc = json!({"name": "A", "flavor": "B", "price": 1.0, "size_ml": 10});
        assert!(Beverage::from_document(doc).is_err());
    }

    #[test]
    fn test_from_document_rejects_missing_field() {
        let doc = json!({"name": "A", "price": 1.0, "size_ml": 500});
        let err = Beverage::from_document(doc).unwrap_err();
        assert!(err.has_field("document"));
    }

    #[test]
    fn test_to_document_stamps_times() {
        let now = Utc::now();
        let doc = citrus().build().unwrap().to_document(now).unwrap();
        assert_eq!(doc[CREATED_AT_FIELD], doc[UPDATED_AT_FIELD]);
        assert!(doc.get(ID_FIELD).is_none());
    }

    #[test]
    fn test_contact_email_validation() {
        assert!(ContactInquiry::new("Ann", "ann@example.com", None, "Hi", "Hello").is_ok());

        let err = ContactInquiry::new("Ann", "not-an-email", None, "Hi", "Hello").unwrap_err();
        assert!(err.has_field("email"));
        assert_eq!(err.fields.len(), 1);
    }

    #[test]
    fn test_user_age_bounds() {
        let user = User {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            address: None,
            age: Some(121),
            is_active: true,
        };
        assert!(user.validated().unwrap_err().has_field("age"));
    }

    #[test]
    fn test_product_defaults() {
        let product: Product =
            serde_json::from_value(json!({"title": "Jar", "price": 2.0, "category": "home"}))
                .unwrap();
        let product = product.validated().unwrap();
        assert!(product.in_stock);
    }

    #[test]
    fn test_collection_names_are_lowercase_type_names() {
        assert_eq!(Beverage::COLLECTION, Beverage::NAME.to_lowercase());
        assert_eq!(ContactInquiry::COLLECTION, ContactInquiry::NAME.to_lowercase());
        assert_eq!(User::COLLECTION, User::NAME.to_lowercase());
        assert_eq!(Product::COLLECTION, Product::NAME.to_lowercase());
    }
}
