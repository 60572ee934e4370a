// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Every variant is fatal to the operation that raised it; nothing here
//! is retried.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Reddit returned HTTP {status} for {url}: {body}")]
    UpstreamRequest {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unknown time window '{0}' (expected one of: all, year, month, week, day, hour)")]
    InvalidWindow(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AppError {
    /// Builds an `UpstreamRequest` error, truncating the body to a preview.
    pub fn upstream(status: reqwest::StatusCode, url: impl Into<String>, body: &str) -> Self {
        AppError::UpstreamRequest {
            status,
            url: url.into(),
            body: preview_body(body),
        }
    }

    /// Whether the failure came from Reddit refusing a request.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::UpstreamRequest { .. })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Cuts a response body down to a loggable preview on a char boundary.
pub(crate) fn preview_body(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_PREVIEW_LENGTH {
        return body.to_string();
    }
    let preview: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
    format!("{}...", preview)
}
