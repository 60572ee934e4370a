// src/strategies.rs
//! Endpoint strategies: pure builders mapping a request to `(endpoint, params)`.
//!
//! Nothing here performs I/O. The [`crate::harvester::Harvester`] runs the
//! queries built here through the paginator or the window aggregator.

use crate::api::ListingQuery;
use crate::constants::{LISTING_PAGE_SIZE, WINDOW_PARAM};
use crate::types::{
    FeedSort, SearchSort, SubredditName, TimeWindow, Username, ValidationError, WindowedSort,
};

fn base(endpoint: String) -> ListingQuery {
    ListingQuery::new(endpoint).with_param("limit", LISTING_PAGE_SIZE)
}

/// `rising`, `new` or `hot` for one subreddit.
pub fn subreddit_feed(subreddit: &SubredditName, sort: FeedSort) -> ListingQuery {
    base(format!("/r/{}/{}", subreddit.as_str(), sort.as_str())).with_param("show", "all")
}

/// `top` or `controversial` for one subreddit, without a window.
///
/// The window aggregator adds `t` for each window it visits.
pub fn subreddit_windowed(subreddit: &SubredditName, sort: WindowedSort) -> ListingQuery {
    base(format!("/r/{}/{}", subreddit.as_str(), sort.as_str())).with_param("show", "all")
}

/// A search, optionally restricted to one subreddit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    pub subreddit: Option<SubredditName>,
    pub sort: SearchSort,
    pub window: TimeWindow,
}

impl SearchRequest {
    /// A site-wide search sorted by comments over the past month.
    pub fn new(query: impl Into<String>) -> Result<Self, ValidationError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(ValidationError::EmptyField("search query"));
        }
        Ok(Self {
            query,
            subreddit: None,
            sort: SearchSort::default(),
            window: TimeWindow::Month,
        })
    }

    pub fn in_subreddit(mut self, subreddit: SubredditName) -> Self {
        self.subreddit = Some(subreddit);
        self
    }

    pub fn sorted_by(mut self, sort: SearchSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn within(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

pub fn search(request: &SearchRequest) -> ListingQuery {
    let (endpoint, restrict) = match &request.subreddit {
        Some(sub) => (format!("/r/{}/search", sub.as_str()), true),
        None => ("/search".to_string(), false),
    };

    let query = ListingQuery::new(endpoint)
        .with_param("q", &request.query)
        .with_param("limit", LISTING_PAGE_SIZE)
        .with_param("restrict_sr", restrict)
        .with_param("show", "all")
        .with_param("sort", request.sort)
        .with_param(WINDOW_PARAM, request.window);

    if restrict {
        query.with_param("type", "link")
    } else {
        query
    }
}

/// Everything a user has submitted, newest first.
pub fn user_submissions(user: &Username) -> ListingQuery {
    base(format!("/user/{}/submitted", user.as_str()))
        .with_param("context", 2)
        .with_param("show", "given")
        .with_param("sort", "new")
        .with_param(WINDOW_PARAM, TimeWindow::All)
        .with_param("type", "all")
        .with_param("raw_json", 1)
}

pub fn popular_subreddits() -> ListingQuery {
    base("/subreddits/popular".to_string())
        .with_param("show", "all")
        .with_param("sr_detail", true)
}
