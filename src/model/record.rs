use super::Preview;
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde_json::Value;

/// One listing item with its payload preserved field-for-field.
///
/// Reddit payloads vary by item kind (links, subreddits, crossposts) and
/// grow new fields without notice, so the record keeps them opaquely and
/// only offers typed views for the fields this crate relies on. Every
/// accessor returns `None` for a missing or differently-typed field.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: DateTime<Local>,
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new(timestamp: DateTime<Local>, fields: IndexMap<String, Value>) -> Self {
        Self { timestamp, fields }
    }

    /// Raw access to any payload field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    pub fn i64_field(&self, key: &str) -> Option<i64> {
        let value = self.field(key)?;
        value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
    }

    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.field(key).and_then(Value::as_f64)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// Kind-prefixed identifier, e.g. `t3_abc123`.
    pub fn fullname(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn author(&self) -> Option<&str> {
        self.str_field("author")
    }

    pub fn subreddit(&self) -> Option<&str> {
        self.str_field("subreddit")
    }

    pub fn created_utc(&self) -> Option<f64> {
        self.f64_field("created_utc")
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn flair(&self) -> Option<&str> {
        self.str_field("link_flair_text")
    }

    pub fn post_hint(&self) -> Option<&str> {
        self.str_field("post_hint")
    }

    pub fn url(&self) -> Option<&str> {
        self.str_field("url")
    }

    pub fn domain(&self) -> Option<&str> {
        self.str_field("domain")
    }

    pub fn score(&self) -> Option<i64> {
        self.i64_field("score")
    }

    pub fn num_crossposts(&self) -> Option<i64> {
        self.i64_field("num_crossposts")
    }

    /// Subscriber count; only present on subreddit items.
    pub fn subscribers(&self) -> Option<i64> {
        self.i64_field("subscribers")
    }

    /// The structured media preview, when Reddit generated one.
    pub fn preview(&self) -> Option<Preview> {
        let raw = self.field("preview")?;
        match serde_json::from_value(raw.clone()) {
            Ok(preview) => Some(preview),
            Err(e) => {
                log::debug!(
                    "Ignoring unreadable preview on {}: {}",
                    self.id().unwrap_or("<no id>"),
                    e
                );
                None
            }
        }
    }
}
