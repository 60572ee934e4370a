// src/api/client.rs
//! Pure HTTP client wrapper for the Reddit API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to Reddit. It attaches identification and credentials
//! and surfaces response metadata without parsing or business logic.

use super::auth::Credential;
use super::types::ListingParams;
use crate::error::AppError;
use crate::media::MediaFetcher;
use crate::model::RateLimit;
use reqwest::{header, Client, Response};
use std::time::Duration;

/// A thin wrapper around reqwest Client for Reddit requests.
#[derive(Clone)]
pub struct RedditHttpClient {
    client: Client,
    api_base: String,
}

impl RedditHttpClient {
    /// Creates a client that identifies itself on every request and gives up
    /// on any single request after `timeout`.
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Reddit requests.
    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(crate::constants::USER_AGENT),
        );
        headers
    }

    /// The underlying reqwest client, shared with the token exchange.
    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Makes an authenticated GET request to a listing endpoint.
    ///
    /// # Arguments
    ///
    /// * `credential` - Bearer credential for this request
    /// * `endpoint` - The API endpoint path (without base URL)
    /// * `params` - Query parameters, sent in order
    pub async fn get(
        &self,
        credential: &Credential,
        endpoint: &str,
        params: &ListingParams,
    ) -> Result<Response, AppError> {
        let url = format!("{}{}", self.api_base, endpoint);
        log::debug!("GET {} {:?}", url, params);

        let query: Vec<(&str, &str)> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        let response = self
            .client
            .get(url)
            .bearer_auth(credential.access_token())
            .query(&query)
            .send()
            .await?;

        log::debug!("{} -> {}", endpoint, response.status());
        Ok(response)
    }

    /// Downloads a media file. Media hosts need no credentials.
    pub async fn download(&self, url: &str) -> Result<ApiResponse<Vec<u8>>, AppError> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let final_url = response.url().to_string();
        let rate_limit = rate_limit_from_headers(response.headers());
        let bytes = response.bytes().await?;

        Ok(ApiResponse {
            data: bytes.to_vec(),
            status,
            url: final_url,
            rate_limit,
        })
    }
}

#[async_trait::async_trait]
impl MediaFetcher for RedditHttpClient {
    async fn fetch_media(&self, url: &str) -> Result<Vec<u8>, AppError> {
        let response = self.download(url).await?;
        if !response.status.is_success() {
            let body = String::from_utf8_lossy(&response.data);
            return Err(AppError::upstream(response.status, response.url, &body));
        }
        Ok(response.data)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
    pub rate_limit: RateLimit,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let rate_limit = rate_limit_from_headers(response.headers());
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
        rate_limit,
    })
}

/// Reads Reddit's `x-ratelimit-*` headers. Absent or garbled headers are `None`.
pub fn rate_limit_from_headers(headers: &header::HeaderMap) -> RateLimit {
    fn read<T: std::str::FromStr>(headers: &header::HeaderMap, name: &str) -> Option<T> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    RateLimit {
        remaining: read(headers, "x-ratelimit-remaining"),
        used: read(headers, "x-ratelimit-used"),
        reset_secs: read(headers, "x-ratelimit-reset"),
    }
}
