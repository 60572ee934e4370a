// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you how the harvester
//! talks to Reddit: where it connects, how much it asks for per page, and
//! when it decides a listing has run dry.

// ---------------------------------------------------------------------------
// Reddit API endpoints
// ---------------------------------------------------------------------------

/// Origin for every authenticated listing request.
pub const REDDIT_API_BASE_URL: &str = "https://oauth.reddit.com";

/// Token endpoint for the resource-owner password grant.
pub const REDDIT_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Identification string Reddit requires on every request.
pub const USER_AGENT: &str = "rust:reddit-harvest:v0.1.0 (by /u/reddit-harvest)";

// ---------------------------------------------------------------------------
// Listing boundaries
// ---------------------------------------------------------------------------

/// How many items a listing returns per page.
///
/// Reddit's maximum is 100; asking for the maximum minimizes round-trips.
pub const LISTING_PAGE_SIZE: usize = 100;

/// How many pages Reddit serves for one listing before it stops handing out
/// cursors (roughly 1000 items).
pub const ASSUMED_MAX_LISTING_PAGES: usize = 10;

/// Record count under which a time window is treated as exhausted.
///
/// A window that returned fewer than this many items already captured
/// everything Reddit would show, so finer windows add nothing new.
pub const WINDOW_EXHAUSTION_THRESHOLD: usize =
    LISTING_PAGE_SIZE * (ASSUMED_MAX_LISTING_PAGES - 1);

/// Safety bound on pages fetched for a single listing.
///
/// Reddit nulls the cursor well before this; the cap only matters when the
/// upstream misbehaves and keeps handing out cursors forever.
pub const DEFAULT_MAX_PAGES_PER_LISTING: u32 = 100;

/// Name of the continuation query parameter. Owned by the paginated fetcher.
pub const CURSOR_PARAM: &str = "after";

/// Name of the time-window query parameter used by windowed sorts.
pub const WINDOW_PARAM: &str = "t";

// ---------------------------------------------------------------------------
// Credentials and transport
// ---------------------------------------------------------------------------

/// Lifetime assumed for a bearer token when the exchange omits `expires_in`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// A token this close to expiry is refreshed before the next request.
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Per-request timeout applied to every outbound HTTP call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
