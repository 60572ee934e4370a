// src/types/listing.rs
//! Listing vocabulary: sort modes and time windows.

use super::ValidationError;
use std::fmt;
use std::str::FromStr;

/// A named time bucket used by windowed sorts, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    All,
    Year,
    Month,
    Week,
    Day,
    Hour,
}

impl TimeWindow {
    /// Every window from coarsest to finest. Iteration order of the aggregator.
    pub const ORDERED: [TimeWindow; 6] = [
        TimeWindow::All,
        TimeWindow::Year,
        TimeWindow::Month,
        TimeWindow::Week,
        TimeWindow::Day,
        TimeWindow::Hour,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }

    /// Position of a window name within [`TimeWindow::ORDERED`].
    pub fn position_of(name: &str) -> Option<usize> {
        Self::ORDERED.iter().position(|w| w.as_str() == name)
    }

    /// The windows from `self` down to `Hour`, inclusive.
    pub fn through_finest(self) -> &'static [TimeWindow] {
        let start = Self::ORDERED
            .iter()
            .position(|w| *w == self)
            .unwrap_or(Self::ORDERED.len() - 1);
        &Self::ORDERED[start..]
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::position_of(s)
            .map(|idx| Self::ORDERED[idx])
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "time window",
                value: s.to_string(),
            })
    }
}

/// Non-windowed subreddit feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSort {
    Rising,
    New,
    Hot,
}

impl FeedSort {
    pub const ALL: [FeedSort; 3] = [FeedSort::Rising, FeedSort::New, FeedSort::Hot];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::New => "new",
            Self::Hot => "hot",
        }
    }
}

/// Subreddit sorts that are scoped by a [`TimeWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowedSort {
    Top,
    Controversial,
}

impl WindowedSort {
    pub const ALL: [WindowedSort; 2] = [WindowedSort::Top, WindowedSort::Controversial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Controversial => "controversial",
        }
    }
}

/// Result ordering for search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchSort {
    Relevance,
    Hot,
    Top,
    New,
    #[default]
    Comments,
}

impl SearchSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Hot => "hot",
            Self::Top => "top",
            Self::New => "new",
            Self::Comments => "comments",
        }
    }
}

macro_rules! impl_sort_parsing {
    ($ty:ty, $kind:literal, [$($variant:expr),+]) => {
        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v: &$ty| v.as_str() == s)
                    .ok_or_else(|| ValidationError::UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_sort_parsing!(FeedSort, "feed sort", [FeedSort::Rising, FeedSort::New, FeedSort::Hot]);
impl_sort_parsing!(
    WindowedSort,
    "windowed sort",
    [WindowedSort::Top, WindowedSort::Controversial]
);
impl_sort_parsing!(
    SearchSort,
    "search sort",
    [
        SearchSort::Relevance,
        SearchSort::Hot,
        SearchSort::Top,
        SearchSort::New,
        SearchSort::Comments
    ]
);
