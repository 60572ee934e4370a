//! Tabular domain model: records, pages of records, and merged tables.

mod page;
mod preview;
mod record;
mod table;

pub use page::{ListingPage, RateLimit};
pub use preview::{ImageSource, Preview, PreviewImage, VideoPreview};
pub use record::Record;
pub use table::Table;

/// Standard record columns, in export order.
pub const RECORD_COLUMNS: [&str; 25] = [
    "timestamp",
    "title",
    "post_hint",
    "link_flair_text",
    "selftext",
    "ups",
    "downs",
    "upvote_ratio",
    "num_comments",
    "num_crossposts",
    "total_awards_received",
    "score",
    "gilded",
    "archived",
    "subreddit_name_prefixed",
    "subreddit_subscribers",
    "domain",
    "url_overridden_by_dest",
    "preview",
    "url",
    "permalink",
    "id",
    "name",
    "author_fullname",
    "created_utc",
];
