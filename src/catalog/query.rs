//! Listing query translation
//!
//! Turns the public listing parameters into a store filter:
//!
//! `in_stock = true AND [tag in tags] AND [(name ~ q) OR (flavor ~ q) OR (description ~ q)]`
//!
//! where `~` is a case-insensitive substring match and bracketed parts are
//! only present when the parameter is given.

use crate::store::Filter;

/// Fields searched by the free-text parameter
pub const SEARCH_FIELDS: [&str; 3] = ["name", "flavor", "description"];

/// Query parameters accepted by the beverage listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeverageQuery {
    /// Exact tag to require
    pub tag: Option<String>,

    /// Free-text search over name, flavor and description
    pub q: Option<String>,
}

impl BeverageQuery {
    /// Collect decoded query-string pairs.
    ///
    /// A repeated key keeps its last value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "tag" => query.tag = Some(value),
                "q" => query.q = Some(value),
                _ => {}
            }
        }
        query
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Build the store filter. Empty parameters count as absent.
    pub fn to_filter(&self) -> Filter {
        let mut filter = Filter::eq("in_stock", true);

        if let Some(tag) = non_empty(&self.tag) {
            filter = filter.and(Filter::contains("tags", tag));
        }

        if let Some(q) = non_empty(&self.q) {
            filter = filter.and(Filter::any_of(
                SEARCH_FIELDS
                    .iter()
                    .map(|field| Filter::contains_ignore_case(*field, q)),
            ));
        }

        filter
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
