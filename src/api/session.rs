// src/api/session.rs
//! An authenticated listing source that keeps its credential fresh.

use super::auth::{authorize, ClientSecrets, Credential};
use super::client::{extract_response_text, ApiResponse, RedditHttpClient};
use super::types::ListingParams;
use super::ListingSource;
use crate::constants::TOKEN_REFRESH_MARGIN_SECS;
use crate::error::AppError;
use chrono::{Duration, Local};

/// Reddit reached over HTTP with a password-grant credential.
///
/// The credential is checked before every request and replaced with a
/// freshly authorized one once it is within the refresh margin of expiry.
pub struct RedditSession {
    client: RedditHttpClient,
    token_url: String,
    secrets: ClientSecrets,
    credential: Credential,
}

impl RedditSession {
    /// Authorizes once and returns a ready session.
    pub async fn connect(
        client: RedditHttpClient,
        token_url: impl Into<String>,
        secrets: ClientSecrets,
    ) -> Result<Self, AppError> {
        let token_url = token_url.into();
        let credential = authorize(&client, &token_url, &secrets).await?;
        Ok(Self {
            client,
            token_url,
            secrets,
            credential,
        })
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn client(&self) -> &RedditHttpClient {
        &self.client
    }

    /// Replaces the current credential with a newly authorized one.
    pub async fn reauthorize(&mut self) -> Result<(), AppError> {
        self.credential = authorize(&self.client, &self.token_url, &self.secrets).await?;
        Ok(())
    }

    async fn ensure_fresh(&mut self) -> Result<(), AppError> {
        let now = Local::now();
        let margin = Duration::seconds(TOKEN_REFRESH_MARGIN_SECS);
        if self.credential.needs_refresh_at(now, margin) {
            log::info!(
                "Access token {}; re-authorizing",
                self.credential.validity_summary(now)
            );
            self.reauthorize().await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ListingSource for RedditSession {
    async fn get_listing(
        &mut self,
        endpoint: &str,
        params: &ListingParams,
    ) -> Result<ApiResponse<String>, AppError> {
        self.ensure_fresh().await?;
        let response = self.client.get(&self.credential, endpoint, params).await?;
        extract_response_text(response).await
    }
}
