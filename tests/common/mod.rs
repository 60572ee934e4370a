// tests/common/mod.rs
//! Shared helpers: a scripted listing source and listing body builders.

use async_trait::async_trait;
use reddit_harvest::api::ListingParams;
use reddit_harvest::{ApiResponse, AppError, ListingSource, RateLimit};
use reqwest::StatusCode;
use serde_json::json;
use std::collections::{HashMap, VecDeque};

/// Replays queued response bodies per endpoint and records every request.
#[derive(Default)]
pub struct FixtureSource {
    routes: HashMap<String, VecDeque<(StatusCode, String)>>,
    pub requests: Vec<(String, ListingParams)>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for a route: the endpoint, plus `?t=<window>` when windowed.
    pub fn respond(mut self, route: &str, status: StatusCode, body: String) -> Self {
        self.routes
            .entry(route.to_string())
            .or_default()
            .push_back((status, body));
        self
    }

    pub fn pages(mut self, route: &str, bodies: Vec<String>) -> Self {
        for body in bodies {
            self = self.respond(route, StatusCode::OK, body);
        }
        self
    }

    pub fn cursors_sent(&self) -> Vec<Option<&str>> {
        self.requests
            .iter()
            .map(|(_, params)| params.get("after").map(String::as_str))
            .collect()
    }
}

#[async_trait]
impl ListingSource for FixtureSource {
    async fn get_listing(
        &mut self,
        endpoint: &str,
        params: &ListingParams,
    ) -> Result<ApiResponse<String>, AppError> {
        self.requests.push((endpoint.to_string(), params.clone()));

        let route = match params.get("t") {
            Some(t) => format!("{}?t={}", endpoint, t),
            None => endpoint.to_string(),
        };
        let (status, data) = self
            .routes
            .get_mut(&route)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| AppError::InternalError {
                message: format!("unexpected request to {}", route),
                source: None,
            })?;

        Ok(ApiResponse {
            data,
            status,
            url: format!("https://oauth.reddit.com{}", endpoint),
            rate_limit: RateLimit::default(),
        })
    }
}

/// A listing page of `count` link posts with ids `{prefix}{n}`.
pub fn listing(prefix: &str, count: usize, after: Option<&str>) -> String {
    let children: Vec<_> = (0..count)
        .map(|n| {
            json!({"kind": "t3", "data": {
                "id": format!("{}{}", prefix, n),
                "name": format!("t3_{}{}", prefix, n),
                "author": "fixture_author",
                "subreddit": "test",
                "title": format!("post {}", n),
                "score": n,
                "created_utc": 1_690_000_000 + n as i64 * 60,
            }})
        })
        .collect();
    json!({"kind": "Listing", "data": {"after": after, "children": children}}).to_string()
}

/// `total` posts split into full pages chained by cursors.
pub fn full_listing(prefix: &str, total: usize) -> Vec<String> {
    let pages = total.div_ceil(100).max(1);
    (0..pages)
        .map(|page| {
            let count = (total - page * 100).min(100);
            let after = (page + 1 < pages).then(|| format!("{}-cursor-{}", prefix, page + 1));
            listing(&format!("{}{}_", prefix, page), count, after.as_deref())
        })
        .collect()
}

pub fn fixture_page() -> serde_json::Value {
    serde_json::from_str(include_str!("../fixtures/listing_pics_new.json"))
        .expect("fixture is valid JSON")
}
