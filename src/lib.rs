// src/lib.rs
//! reddit-harvest library: paginates Reddit listings into tables and harvests their media.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `HarvestConfig`, `CommandLineInput`
//! - **Domain model**: `Record`, `Table`, `ListingPage`, `Preview`
//! - **Domain types**: `SubredditName`, `Username`, `TimeWindow`, sort modes
//! - **API client**: `ListingSource`, `RedditSession`, `RedditHttpClient`
//! - **Engine**: `fetch_all_pages`, `aggregate_over_windows`, `Harvester`
//! - **Output**: CSV export, `MediaHarvester`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod harvester;
pub mod media;
pub mod model;
pub mod normalize;
pub mod output;
pub mod pagination;
pub mod popular;
pub mod strategies;
pub mod types;
pub mod windows;

// --- Error Handling ---
pub use crate::error::AppError;
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, HarvestCommand, HarvestConfig};

// --- Domain Model ---
pub use crate::model::{ListingPage, Preview, RateLimit, Record, Table, RECORD_COLUMNS};

// --- Domain Types ---
pub use crate::types::{
    FeedSort, SearchSort, Secret, SubredditName, TimeWindow, Username, WindowedSort,
};

// --- API Client ---
pub use crate::api::{
    ApiResponse, ClientSecrets, Credential, ListingQuery, ListingSource, RedditHttpClient,
    RedditSession,
};

// --- Engine ---
pub use crate::harvester::{AggregateOutcome, Harvester};
pub use crate::normalize::normalize;
pub use crate::pagination::{
    fetch_all_pages, FailurePolicy, FetchOptions, PaginationOutcome, Termination,
};
pub use crate::strategies::SearchRequest;
pub use crate::windows::{aggregate_over_windows, WindowStop, WindowedOutcome};

// --- Output ---
pub use crate::media::{MediaFetcher, MediaHarvester, MediaSelection};
pub use crate::output::OutputReport;
pub use crate::popular::{rank_by_subscribers, RankedSubreddit};
