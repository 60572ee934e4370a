// src/pagination.rs
//! Cursor-driven pagination over one listing.

use crate::api::parser::parse_listing_response;
use crate::api::{ListingQuery, ListingSource};
use crate::constants::{
    CURSOR_PARAM, DEFAULT_MAX_PAGES_PER_LISTING, WINDOW_EXHAUSTION_THRESHOLD,
};
use crate::error::AppError;
use crate::model::Table;
use crate::types::ValidationError;

/// What to do when one unit of work (a window, a feed, a media file) fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Propagate the first error and discard everything fetched so far.
    #[default]
    Abort,
    /// Record the error, keep what was fetched, move on to the next unit.
    CollectPartial,
}

/// Limits and policies shared by every fetch in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Pages fetched per listing before giving up on the cursor; `None` is unbounded.
    pub max_pages: Option<u32>,
    /// Records under which a time window counts as exhausted.
    pub exhaustion_threshold: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_pages: Some(DEFAULT_MAX_PAGES_PER_LISTING),
            exhaustion_threshold: WINDOW_EXHAUSTION_THRESHOLD,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

/// Position in a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Start,
    After(String),
}

/// Why a paginated fetch stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Reddit returned a page without a continuation cursor.
    CursorExhausted,
    /// The page cap was hit while Reddit still offered a cursor.
    PageCapReached { cap: u32 },
}

/// Everything one paginated fetch produced.
#[derive(Debug, Clone)]
pub struct PaginationOutcome {
    pub table: Table,
    pub pages_fetched: u32,
    pub termination: Termination,
}

/// Fetches every page of a listing, following `after` cursors.
///
/// The query must not preset `after`; the paginator owns it. The first
/// request goes out without a cursor, and no request is ever issued after
/// Reddit returns a null cursor. Each page logs progress and rate-limit
/// headroom, neither of which affects when the loop stops.
pub async fn fetch_all_pages<S>(
    source: &mut S,
    query: &ListingQuery,
    options: &FetchOptions,
) -> Result<PaginationOutcome, AppError>
where
    S: ListingSource + ?Sized,
{
    if query.params.contains_key(CURSOR_PARAM) {
        return Err(ValidationError::ReservedParameter(CURSOR_PARAM).into());
    }

    let mut params = query.params.clone();
    let mut cursor = Cursor::Start;
    let mut table = Table::new();
    let mut pages_fetched = 0u32;

    let termination = loop {
        if let Some(cap) = options.max_pages {
            if pages_fetched >= cap {
                log::warn!(
                    "{}: stopping at page cap {} with a live cursor ({} records kept)",
                    query.endpoint,
                    cap,
                    table.len()
                );
                break Termination::PageCapReached { cap };
            }
        }

        if let Cursor::After(after) = &cursor {
            params.insert(CURSOR_PARAM.to_string(), after.clone());
        }

        let response = source.get_listing(&query.endpoint, &params).await?;
        let page = parse_listing_response(response)?;
        pages_fetched += 1;
        table.extend(page.records);

        log::info!(
            "{}: {} records after {} page(s), rate limit {}",
            query.endpoint,
            table.len(),
            pages_fetched,
            page.rate_limit
        );

        match page.after {
            Some(next) => cursor = Cursor::After(next),
            None => break Termination::CursorExhausted,
        }
    };

    log::debug!("{}: finished ({:?})", query.endpoint, termination);

    Ok(PaginationOutcome {
        table,
        pages_fetched,
        termination,
    })
}
