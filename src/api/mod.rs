// src/api/mod.rs
//! Reddit API interaction: reading listings from Reddit.
//!
//! This module keeps I/O (client, session), wire shapes (responses) and
//! parsing apart, so the pagination engine only ever sees the
//! [`ListingSource`] trait.

pub mod auth;
pub mod client;
#[cfg(test)]
pub(crate) mod mock;
pub mod parser;
pub mod responses;
pub mod session;
pub mod types;

use crate::error::AppError;

/// The ability to fetch one raw listing page.
///
/// Pagination, window aggregation and strategies depend on this trait,
/// never on HTTP details. Requests are issued one at a time, so
/// implementations take `&mut self` and may update their own state
/// (for instance, swap in a refreshed credential) between requests.
#[async_trait::async_trait]
pub trait ListingSource: Send {
    async fn get_listing(
        &mut self,
        endpoint: &str,
        params: &types::ListingParams,
    ) -> Result<client::ApiResponse<String>, AppError>;
}

#[async_trait::async_trait]
impl<S: ListingSource + ?Sized> ListingSource for &mut S {
    async fn get_listing(
        &mut self,
        endpoint: &str,
        params: &types::ListingParams,
    ) -> Result<client::ApiResponse<String>, AppError> {
        (**self).get_listing(endpoint, params).await
    }
}

// Re-export the public interface
pub use auth::{ClientSecrets, Credential};
pub use client::{ApiResponse, RedditHttpClient};
pub use session::RedditSession;
pub use types::{ListingParams, ListingQuery};
