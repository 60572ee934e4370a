// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static SUBREDDIT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_]{1,20}$").expect("valid subreddit regex"));

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,20}$").expect("valid username regex"));

/// A subreddit name without the `r/` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubredditName(String);

impl SubredditName {
    /// Parses a subreddit name, accepting `r/name` and `/r/name` forms.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = name.as_ref().trim();
        let stripped = raw
            .trim_start_matches('/')
            .strip_prefix("r/")
            .unwrap_or_else(|| raw.trim_start_matches('/'));

        if stripped.is_empty() {
            return Err(ValidationError::EmptyField("subreddit"));
        }

        if !SUBREDDIT_PATTERN.is_match(stripped) {
            return Err(ValidationError::InvalidSubreddit {
                name: raw.to_string(),
                reason: "expected 2-21 letters, digits or underscores".to_string(),
            });
        }

        Ok(Self(stripped.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubredditName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r/{}", self.0)
    }
}

/// A Reddit account name without the `u/` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Parses a username, accepting `u/name` and `/u/name` forms.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = name.as_ref().trim();
        let stripped = raw
            .trim_start_matches('/')
            .strip_prefix("u/")
            .unwrap_or_else(|| raw.trim_start_matches('/'));

        if stripped.is_empty() {
            return Err(ValidationError::EmptyField("username"));
        }

        if !USERNAME_PATTERN.is_match(stripped) {
            return Err(ValidationError::InvalidUsername {
                name: raw.to_string(),
                reason: "expected 3-20 letters, digits, dashes or underscores".to_string(),
            });
        }

        Ok(Self(stripped.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u/{}", self.0)
    }
}

/// A secret value that never prints itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField("secret"));
        }
        Ok(Self(value))
    }

    /// Exposes the raw value for the one place that needs it: the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}
