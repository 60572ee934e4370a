// src/api/types.rs
//! Type definitions for the Reddit API module.
//!
//! A listing request is just an endpoint path plus ordered query
//! parameters; strategies build them, the paginator executes them.

use indexmap::IndexMap;

/// Ordered query parameters for a listing request.
pub type ListingParams = IndexMap<String, String>;

/// An endpoint plus its base parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub endpoint: String,
    pub params: ListingParams,
}

impl ListingQuery {
    /// Creates a query for an endpoint path such as `/r/rust/new`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: ListingParams::new(),
        }
    }

    /// Returns a new query with the parameter set, replacing any previous value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
