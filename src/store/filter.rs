//! # Filter Expressions
//!
//! Typed predicates over JSON documents. A filter can be evaluated directly
//! against a document (in-memory backend) or translated into a MongoDB
//! query document.

use mongodb::bson::{self, doc, Bson, Document};
use serde_json::Value;

use super::errors::StoreResult;

/// A filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document
    All,

    /// Field equals value
    Eq { field: String, value: Value },

    /// Array field has an element equal to value
    Contains { field: String, value: Value },

    /// String field contains the needle, ignoring case
    ContainsIgnoreCase { field: String, needle: String },

    /// Every sub-filter matches
    And(Vec<Filter>),

    /// At least one sub-filter matches
    Or(Vec<Filter>),
}

impl Default for Filter {
    fn default() -> Self {
        Filter::All
    }
}

impl Filter {
    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a set-membership filter on an array field
    pub fn contains(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a case-insensitive substring filter
    pub fn contains_ignore_case(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::ContainsIgnoreCase {
            field: field.into(),
            needle: needle.into(),
        }
    }

    /// Match if any of the filters match
    pub fn any_of(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Or(filters.into_iter().collect())
    }

    /// Combine with another filter using AND logic
    pub fn and(self, other: Filter) -> Self {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::And(mut left), Filter::And(right)) => {
                left.extend(right);
                Filter::And(left)
            }
            (Filter::And(mut left), f) => {
                left.push(f);
                Filter::And(left)
            }
            (f, Filter::And(mut right)) => {
                right.insert(0, f);
                Filter::And(right)
            }
            (a, b) => Filter::And(vec![a, b]),
        }
    }

    /// Check if a document matches this filter
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => match doc.get(field) {
                Some(Value::Array(items)) if !value.is_array() => items.contains(value),
                Some(field_value) => field_value == value,
                None => value.is_null(),
            },
            Filter::Contains { field, value } => match doc.get(field) {
                Some(Value::Array(items)) => items.contains(value),
                Some(field_value) => field_value == value,
                None => false,
            },
            Filter::ContainsIgnoreCase { field, needle } => doc
                .get(field)
                .and_then(Value::as_str)
                .map(|s| s.to_lowercase().contains(&needle.to_lowercase()))
                .unwrap_or(false),
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(doc)),
        }
    }

    /// Translate into a MongoDB query document.
    ///
    /// Substring needles are escaped so they match literally.
    pub fn to_document(&self) -> StoreResult<Document> {
        Ok(match self {
            Filter::All => Document::new(),
            Filter::Eq { field, value } => {
                let mut d = Document::new();
                d.insert(field.as_str(), bson::to_bson(value)?);
                d
            }
            Filter::Contains { field, value } => {
                let value = bson::to_bson(value)?;
                let mut d = Document::new();
                d.insert(field.as_str(), doc! { "$in": [value] });
                d
            }
            Filter::ContainsIgnoreCase { field, needle } => {
                let mut d = Document::new();
                d.insert(
                    field.as_str(),
                    doc! { "$regex": regex::escape(needle), "$options": "i" },
                );
                d
            }
            Filter::And(filters) if filters.is_empty() => Document::new(),
            Filter::And(filters) => {
                let parts = Self::to_documents(filters)?;
                doc! { "$and": parts }
            }
            // Mongo rejects an empty $or
            Filter::Or(filters) if filters.is_empty() => doc! { "$expr": false },
            Filter::Or(filters) => {
                let parts = Self::to_documents(filters)?;
                doc! { "$or": parts }
            }
        })
    }

    fn to_documents(filters: &[Filter]) -> StoreResult<Vec<Bson>> {
        filters
            .iter()
            .map(|f| f.to_document().map(Bson::Document))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_filter() {
        let filter = Filter::eq("in_stock", true);

        assert!(filter.matches(&json!({"in_stock": true})));
        assert!(!filter.matches(&json!({"in_stock": false})));
        assert!(!filter.matches(&json!({"name": "x"})));
    }

    #[test]
    fn test_contains_filter() {
        let filter = Filter::contains("tags", "citrus");

        assert!(filter.matches(&json!({"tags": ["vegan", "citrus"]})));
        assert!(!filter.matches(&json!({"tags": ["citrus-blend"]})));
        assert!(!filter.matches(&json!({"tags": []})));
        assert!(!filter.matches(&json!({})));
    }

    #[test]
    fn test_contains_ignore_case_filter() {
        let filter = Filter::contains_ignore_case("name", "MANGO");

        assert!(filter.matches(&json!({"name": "Mango Bliss"})));
        assert!(filter.matches(&json!({"name": "green mangoes"})));
        assert!(!filter.matches(&json!({"name": "Guava"})));
        assert!(!filter.matches(&json!({"name": null})));
    }

    #[test]
    fn test_or_filter() {
        let filter = Filter::any_of([
            Filter::contains_ignore_case("name", "lime"),
            Filter::contains_ignore_case("flavor", "lime"),
        ]);

        assert!(filter.matches(&json!({"name": "Zing", "flavor": "Lemon + Lime"})));
        assert!(!filter.matches(&json!({"name": "Zing", "flavor": "Orange"})));
        assert!(!Filter::Or(vec![]).matches(&json!({})));
    }

    #[test]
    fn test_and_flattens() {
        let filter = Filter::All
            .and(Filter::eq("in_stock", true))
            .and(Filter::contains("tags", "citrus"))
            .and(Filter::All);

        match &filter {
            Filter::And(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected And, got {:?}", other),
        }
        assert!(filter.matches(&json!({"in_stock": true, "tags": ["citrus"]})));
        assert!(!filter.matches(&json!({"in_stock": false, "tags": ["citrus"]})));
    }

    #[test]
    fn test_translate_to_mongo() {
        let filter = Filter::eq("in_stock", true).and(Filter::contains("tags", "citrus"));
        let d = filter.to_document().unwrap();

        assert_eq!(
            d,
            doc! { "$and": [ { "in_stock": true }, { "tags": { "$in": ["citrus"] } } ] }
        );
    }

    #[test]
    fn test_translate_escapes_regex() {
        let d = Filter::contains_ignore_case("name", "a.b(c")
            .to_document()
            .unwrap();

        assert_eq!(d, doc! { "name": { "$regex": "a\\.b\\(c", "$options": "i" } });
    }

    #[test]
    fn test_translate_empty_composites() {
        assert_eq!(Filter::All.to_document().unwrap(), Document::new());
        assert_eq!(Filter::And(vec![]).to_document().unwrap(), Document::new());
        assert_eq!(
            Filter::Or(vec![]).to_document().unwrap(),
            doc! { "$expr": false }
        );
    }
}
