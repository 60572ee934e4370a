// src/normalize.rs
//! Record normalization: one page of listing JSON into uniform records.
//!
//! A listing body has the shape `{data: {children: [{kind, data: {...}}], after}}`.
//! Each child is unwrapped to its `data` payload, which is kept field-for-field;
//! the only derived value is the local `timestamp` computed from `created_utc`.

use crate::error::AppError;
use crate::model::Record;
use chrono::{DateTime, Local, TimeZone};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Normalizes a listing body into records, in listing order.
pub fn normalize(page_json: &Value) -> Result<Vec<Record>, AppError> {
    let children = page_json
        .get("data")
        .and_then(|data| data.get("children"))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::MalformedResponse("listing has no data.children array".to_string())
        })?;

    children
        .iter()
        .enumerate()
        .map(|(position, child)| {
            let payload = child
                .get("data")
                .and_then(Value::as_object)
                .ok_or_else(|| {
                    AppError::MalformedResponse(format!(
                        "listing child {} has no data object",
                        position
                    ))
                })?;
            normalize_payload(payload)
        })
        .collect()
}

/// Builds a record from one unwrapped item payload.
pub fn normalize_payload(payload: &Map<String, Value>) -> Result<Record, AppError> {
    let epoch = payload
        .get("created_utc")
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            AppError::MalformedResponse(format!(
                "item {} is missing a numeric created_utc",
                payload
                    .get("id")
                    .and_then(Value::as_str)
                    .unwrap_or("<no id>")
            ))
        })?;

    let timestamp = epoch_to_local(epoch)?;
    let fields: IndexMap<String, Value> = payload
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(Record::new(timestamp, fields))
}

/// Converts epoch seconds (possibly fractional) to a local-time instant.
pub fn epoch_to_local(epoch_secs: f64) -> Result<DateTime<Local>, AppError> {
    if !epoch_secs.is_finite() {
        return Err(AppError::MalformedResponse(format!(
            "created_utc {} is not a finite epoch",
            epoch_secs
        )));
    }

    let secs = epoch_secs.floor();
    let nanos = ((epoch_secs - secs) * 1_000_000_000.0).round() as u32;
    Local
        .timestamp_opt(secs as i64, nanos.min(999_999_999))
        .single()
        .ok_or_else(|| {
            AppError::MalformedResponse(format!("created_utc {} is out of range", epoch_secs))
        })
}
