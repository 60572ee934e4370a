//! Scripted in-memory listing source for unit tests.

use super::client::ApiResponse;
use super::types::ListingParams;
use super::ListingSource;
use crate::error::AppError;
use crate::model::RateLimit;
use reqwest::StatusCode;
use serde_json::json;
use std::collections::{HashMap, VecDeque};

/// One request the source received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub endpoint: String,
    pub params: ListingParams,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Replays queued responses per route; a route is the endpoint plus its `t` window.
#[derive(Default)]
pub struct ScriptedSource {
    routes: HashMap<String, VecDeque<ApiResponse<String>>>,
    pub calls: Vec<RecordedCall>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues successful pages for a route.
    pub fn with_pages(mut self, route: &str, bodies: Vec<String>) -> Self {
        let queue = self.routes.entry(route.to_string()).or_default();
        for body in bodies {
            queue.push_back(ok_response(route, body));
        }
        self
    }

    /// Queues a failing response for a route.
    pub fn with_failure(mut self, route: &str, status: StatusCode, body: &str) -> Self {
        self.routes
            .entry(route.to_string())
            .or_default()
            .push_back(ApiResponse {
                data: body.to_string(),
                status,
                url: route.to_string(),
                rate_limit: RateLimit::default(),
            });
        self
    }

    pub fn windows_requested(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter(|c| c.param("after").is_none())
            .filter_map(|c| c.param("t").map(str::to_string))
            .collect()
    }
}

fn ok_response(route: &str, body: String) -> ApiResponse<String> {
    ApiResponse {
        data: body,
        status: StatusCode::OK,
        url: route.to_string(),
        rate_limit: RateLimit {
            remaining: Some(600.0),
            used: Some(0),
            reset_secs: Some(600),
        },
    }
}

pub fn route_key(endpoint: &str, params: &ListingParams) -> String {
    match params.get("t") {
        Some(window) => format!("{}?t={}", endpoint, window),
        None => endpoint.to_string(),
    }
}

#[async_trait::async_trait]
impl ListingSource for ScriptedSource {
    async fn get_listing(
        &mut self,
        endpoint: &str,
        params: &ListingParams,
    ) -> Result<ApiResponse<String>, AppError> {
        self.calls.push(RecordedCall {
            endpoint: endpoint.to_string(),
            params: params.clone(),
        });

        let key = route_key(endpoint, params);
        self.routes
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| AppError::InternalError {
                message: format!("no scripted response left for {}", key),
                source: None,
            })
    }
}

/// A listing body with `count` posts whose ids start with `prefix`.
pub fn listing_body(prefix: &str, count: usize, after: Option<&str>) -> String {
    let children: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "kind": "t3",
                "data": {
                    "id": format!("{}{}", prefix, i),
                    "author": "someone",
                    "subreddit": "test",
                    "created_utc": 1_700_000_000 + i as i64,
                }
            })
        })
        .collect();

    json!({ "kind": "Listing", "data": { "after": after, "children": children } }).to_string()
}

/// Splits `total` posts into 100-item pages chained by cursors `c1`, `c2`, ...
pub fn paged_listing(prefix: &str, total: usize) -> Vec<String> {
    let page_size = crate::constants::LISTING_PAGE_SIZE;
    let pages = total.div_ceil(page_size).max(1);

    (0..pages)
        .map(|page| {
            let count = (total - page * page_size).min(page_size);
            let after = (page + 1 < pages).then(|| format!("c{}", page + 1));
            listing_body(&format!("{}{}-", prefix, page), count, after.as_deref())
        })
        .collect()
}
