use thiserror::Error;

mod domain_types;
mod listing;

pub use domain_types::*;
pub use listing::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid subreddit name: {name} - {reason}")]
    InvalidSubreddit { name: String, reason: String },

    #[error("Invalid username: {name} - {reason}")]
    InvalidUsername { name: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Query parameter '{0}' is managed by the paginator and must not be preset")]
    ReservedParameter(&'static str),

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
}
