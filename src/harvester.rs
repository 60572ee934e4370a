// src/harvester.rs
//! Runs endpoint strategies against a listing source.
//!
//! Each method builds a query with [`crate::strategies`] and executes it
//! with the paginator, or the window aggregator for windowed sorts.

use crate::api::ListingSource;
use crate::error::AppError;
use crate::model::Table;
use crate::pagination::{fetch_all_pages, FailurePolicy, FetchOptions};
use crate::popular::{rank_by_subscribers, RankedSubreddit};
use crate::strategies::{self, SearchRequest};
use crate::types::{FeedSort, SubredditName, TimeWindow, Username, WindowedSort};
use crate::windows::{aggregate_over_windows, WindowFailure, WindowedOutcome};

/// Starting window for [`Harvester::aggregate`].
pub const AGGREGATE_START_WINDOW: TimeWindow = TimeWindow::Month;

/// One listing of an aggregate run that could not be fetched.
#[derive(Debug)]
pub struct FeedFailure {
    /// Sort name, plus the window for windowed sorts.
    pub feed: String,
    pub error: AppError,
}

/// Result of [`Harvester::aggregate`].
#[derive(Debug)]
pub struct AggregateOutcome {
    /// Every feed's records concatenated in fetch order.
    pub table: Table,
    pub failures: Vec<FeedFailure>,
}

/// Fetches whole listings from a [`ListingSource`].
pub struct Harvester<S: ListingSource> {
    source: S,
    options: FetchOptions,
}

impl<S: ListingSource> Harvester<S> {
    pub fn new(source: S, options: FetchOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// A `rising`, `new` or `hot` feed of one subreddit.
    pub async fn subreddit(
        &mut self,
        subreddit: &SubredditName,
        sort: FeedSort,
    ) -> Result<Table, AppError> {
        let query = strategies::subreddit_feed(subreddit, sort);
        let outcome = fetch_all_pages(&mut self.source, &query, &self.options).await?;
        log::info!(
            "{} {}: {} records in {} page(s)",
            subreddit,
            sort,
            outcome.table.len(),
            outcome.pages_fetched
        );
        Ok(outcome.table)
    }

    /// A `top` or `controversial` listing from `upto` down to `hour`.
    pub async fn subreddit_windowed(
        &mut self,
        subreddit: &SubredditName,
        sort: WindowedSort,
        upto: &str,
    ) -> Result<WindowedOutcome, AppError> {
        let query = strategies::subreddit_windowed(subreddit, sort);
        aggregate_over_windows(&mut self.source, &query, upto, &self.options).await
    }

    pub async fn search(&mut self, request: &SearchRequest) -> Result<Table, AppError> {
        let query = strategies::search(request);
        let outcome = fetch_all_pages(&mut self.source, &query, &self.options).await?;
        Ok(outcome.table)
    }

    pub async fn user_submissions(&mut self, user: &Username) -> Result<Table, AppError> {
        let query = strategies::user_submissions(user);
        let outcome = fetch_all_pages(&mut self.source, &query, &self.options).await?;
        Ok(outcome.table)
    }

    /// Popular subreddits ranked by subscriber count.
    pub async fn popular_subreddits(&mut self) -> Result<Vec<RankedSubreddit>, AppError> {
        let query = strategies::popular_subreddits();
        let outcome = fetch_all_pages(&mut self.source, &query, &self.options).await?;
        Ok(rank_by_subscribers(&outcome.table))
    }

    /// Every feed of a subreddit: `rising`, `new`, `hot`, then `top` and
    /// `controversial` from the past month down.
    pub async fn aggregate(
        &mut self,
        subreddit: &SubredditName,
    ) -> Result<AggregateOutcome, AppError> {
        let collect = self.options.failure_policy == FailurePolicy::CollectPartial;
        let mut tables = Vec::new();
        let mut failures = Vec::new();

        for sort in FeedSort::ALL {
            log::info!("Getting {} for {}", sort, subreddit);
            match self.subreddit(subreddit, sort).await {
                Ok(table) => tables.push(table),
                Err(error) if collect => {
                    log::warn!("{} feed of {} failed, continuing: {}", sort, subreddit, error);
                    failures.push(FeedFailure {
                        feed: sort.to_string(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        for sort in WindowedSort::ALL {
            let windowed = self
                .subreddit_windowed(subreddit, sort, AGGREGATE_START_WINDOW.as_str())
                .await?;
            tables.push(windowed.table);
            failures.extend(
                windowed
                    .failures
                    .into_iter()
                    .map(|WindowFailure { window, error }| FeedFailure {
                        feed: format!("{}?t={}", sort, window),
                        error,
                    }),
            );
        }

        Ok(AggregateOutcome {
            table: Table::concat(tables),
            failures,
        })
    }
}
