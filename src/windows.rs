// src/windows.rs
//! Time-window aggregation for `top` and `controversial` listings.
//!
//! Reddit serves at most ~1000 items per listing, so one window rarely
//! holds everything. The aggregator walks from a starting window toward
//! `hour`, fetching each, and stops as soon as a window comes back under
//! the exhaustion threshold: a window that did not fill up already holds
//! every item the finer windows could offer.
//!
//! The stop is a heuristic. A sparse listing can stop early even though a
//! finer window would surface a few more items; it never keeps going once
//! a window is exhausted.

use crate::api::{ListingQuery, ListingSource};
use crate::constants::WINDOW_PARAM;
use crate::error::AppError;
use crate::model::Table;
use crate::pagination::{fetch_all_pages, FailurePolicy, FetchOptions, Termination};
use crate::types::TimeWindow;

/// Why window iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStop {
    /// This window returned fewer records than the exhaustion threshold.
    ExhaustedAt(TimeWindow),
    /// Every window down to `hour` was fetched.
    FinestReached,
}

/// What one window contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowReport {
    pub window: TimeWindow,
    pub records: usize,
    pub pages_fetched: u32,
    pub termination: Termination,
}

/// A window whose fetch failed under [`FailurePolicy::CollectPartial`].
#[derive(Debug)]
pub struct WindowFailure {
    pub window: TimeWindow,
    pub error: AppError,
}

/// Merged result of a windowed aggregation.
#[derive(Debug)]
pub struct WindowedOutcome {
    /// All window tables concatenated in window order. Not de-duplicated.
    pub table: Table,
    pub reports: Vec<WindowReport>,
    pub failures: Vec<WindowFailure>,
    pub stop: WindowStop,
}

impl WindowedOutcome {
    /// Windows that were fetched successfully, in order.
    pub fn windows_fetched(&self) -> Vec<TimeWindow> {
        self.reports.iter().map(|r| r.window).collect()
    }
}

/// Fetches `query` for each window from `starting_window` down to `hour`.
pub async fn aggregate_over_windows<S>(
    source: &mut S,
    query: &ListingQuery,
    starting_window: &str,
    options: &FetchOptions,
) -> Result<WindowedOutcome, AppError>
where
    S: ListingSource + ?Sized,
{
    let start: TimeWindow = starting_window
        .parse()
        .map_err(|_| AppError::InvalidWindow(starting_window.to_string()))?;

    let mut tables = Vec::new();
    let mut reports = Vec::new();
    let mut failures = Vec::new();
    let mut stop = WindowStop::FinestReached;

    for &window in start.through_finest() {
        log::info!("Getting {} for {}", query.endpoint, window);
        let windowed = query.clone().with_param(WINDOW_PARAM, window.as_str());

        let outcome = match fetch_all_pages(source, &windowed, options).await {
            Ok(outcome) => outcome,
            Err(error) if options.failure_policy == FailurePolicy::CollectPartial => {
                log::warn!(
                    "{} window of {} failed, continuing: {}",
                    window,
                    query.endpoint,
                    error
                );
                failures.push(WindowFailure { window, error });
                continue;
            }
            Err(error) => return Err(error),
        };

        let records = outcome.table.len();
        reports.push(WindowReport {
            window,
            records,
            pages_fetched: outcome.pages_fetched,
            termination: outcome.termination,
        });
        tables.push(outcome.table);

        if records < options.exhaustion_threshold {
            log::info!(
                "{} contains all recent results ({} < {})",
                window,
                records,
                options.exhaustion_threshold
            );
            stop = WindowStop::ExhaustedAt(window);
            break;
        }
    }

    Ok(WindowedOutcome {
        table: Table::concat(tables),
        reports,
        failures,
        stop,
    })
}
