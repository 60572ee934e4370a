// src/api/parser.rs
//! Turns raw listing responses into normalized pages.

use super::client::ApiResponse;
use super::responses::ErrorBody;
use crate::error::AppError;
use crate::model::ListingPage;
use crate::normalize::normalize;
use serde_json::Value;

/// Parses one listing response into a [`ListingPage`].
///
/// Non-success statuses become `UpstreamRequest`; bodies that are not a
/// listing envelope become `MalformedResponse`.
pub fn parse_listing_response(result: ApiResponse<String>) -> Result<ListingPage, AppError> {
    if !result.status.is_success() {
        let body = serde_json::from_str::<ErrorBody>(&result.data)
            .ok()
            .and_then(|e| e.summary())
            .unwrap_or(result.data);
        log::error!("{} returned HTTP {}", result.url, result.status);
        return Err(AppError::upstream(result.status, result.url, &body));
    }

    let json: Value = serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        AppError::MalformedResponse(format!("{} is not JSON: {}", result.url, e))
    })?;

    let records = normalize(&json)?;
    let after = next_cursor(&json);

    Ok(ListingPage {
        records,
        after,
        rate_limit: result.rate_limit,
    })
}

/// Reads `data.after`. Missing, null and empty cursors all end the listing.
pub fn next_cursor(listing: &Value) -> Option<String> {
    listing
        .get("data")
        .and_then(|data| data.get("after"))
        .and_then(Value::as_str)
        .filter(|cursor| !cursor.is_empty())
        .map(str::to_string)
}
