// src/api/responses.rs
//! Wire shapes for Reddit responses that are read as typed structs.
//!
//! Listing bodies are deliberately *not* modelled here: their items are
//! heterogeneous and are kept as raw JSON by the normalizer.

use serde::Deserialize;

/// Body of the `/api/v1/access_token` exchange.
///
/// Reddit answers a bad grant with HTTP 200 and an `error` field, so every
/// field is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body Reddit sends with most 4xx/5xx listing responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ErrorBody {
    /// A one-line description, e.g. `Forbidden (private)`.
    pub fn summary(&self) -> Option<String> {
        let message = self.message.as_deref()?;
        Some(match &self.reason {
            Some(reason) => format!("{} ({})", message, reason),
            None => message.to_string(),
        })
    }
}
