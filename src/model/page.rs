use super::Record;
use std::fmt;

/// One normalized listing response.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub records: Vec<Record>,
    /// Continuation cursor; `None` means the listing ended with this page.
    pub after: Option<String>,
    pub rate_limit: RateLimit,
}

/// Rate-limit headroom reported by Reddit's `x-ratelimit-*` headers.
///
/// Observed for diagnostics only; nothing throttles on it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateLimit {
    pub remaining: Option<f64>,
    pub used: Option<u32>,
    /// Seconds until the window resets.
    pub reset_secs: Option<u64>,
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.remaining, self.reset_secs) {
            (Some(remaining), Some(reset)) => {
                write!(f, "{} remaining, resets in {}s", remaining, reset)
            }
            (Some(remaining), None) => write!(f, "{} remaining", remaining),
            _ => write!(f, "unreported"),
        }
    }
}
