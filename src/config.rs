use crate::api::ClientSecrets;
use crate::constants::{
    DEFAULT_MAX_PAGES_PER_LISTING, DEFAULT_REQUEST_TIMEOUT_SECS, REDDIT_API_BASE_URL,
    REDDIT_TOKEN_URL,
};
use crate::error::AppError;
use crate::media::MediaSelection;
use crate::pagination::{FailurePolicy, FetchOptions};
use crate::strategies::SearchRequest;
use crate::types::{FeedSort, SubredditName, TimeWindow, Username, ValidationError, WindowedSort};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the API origin.
pub const API_BASE_ENV: &str = "REDDIT_API_BASE_URL";
/// Environment variable overriding the token endpoint.
pub const TOKEN_URL_ENV: &str = "REDDIT_TOKEN_URL";

/// Parsed command-line input, before validation.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Write the resulting table to this CSV file
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Drop repeated posts (same id) before writing the table
    #[arg(long, global = true, default_value_t = false)]
    pub dedupe: bool,

    /// Keep going past failing windows, feeds and downloads instead of aborting
    #[arg(long, global = true, default_value_t = false)]
    pub partial: bool,

    /// Maximum pages fetched per listing (0 = no cap)
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_PAGES_PER_LISTING)]
    pub max_pages: u32,

    /// Per-request timeout in seconds (must be at least 1)
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a rising, new or hot feed of a subreddit
    Feed {
        subreddit: String,
        #[arg(long, default_value = "new")]
        sort: String,
    },
    /// Fetch top or controversial posts, window by window down to the past hour
    Windowed {
        subreddit: String,
        #[arg(long, default_value = "top")]
        sort: String,
        /// Coarsest window to start from (all, year, month, week, day, hour)
        #[arg(long, default_value = "month")]
        upto: String,
    },
    /// Search posts site-wide or within one subreddit
    Search {
        query: String,
        #[arg(long)]
        subreddit: Option<String>,
        #[arg(long, default_value = "comments")]
        sort: String,
        #[arg(long, default_value = "month")]
        window: String,
    },
    /// Fetch a user's submissions and optionally download their media
    User {
        username: String,
        /// Download images
        #[arg(long, default_value_t = false)]
        pics: bool,
        /// Download gif-host videos
        #[arg(long, default_value_t = false)]
        vids: bool,
        #[arg(long, default_value = "Profiles")]
        media_dir: String,
    },
    /// Rank popular subreddits and write a dated snapshot
    Popular {
        #[arg(long, default_value = "popular")]
        out_dir: String,
    },
    /// Fetch every feed and windowed sort of a subreddit
    Aggregate { subreddit: String },
}

/// A validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestCommand {
    Feed {
        subreddit: SubredditName,
        sort: FeedSort,
    },
    Windowed {
        subreddit: SubredditName,
        sort: WindowedSort,
        upto: TimeWindow,
    },
    Search(SearchRequest),
    User {
        user: Username,
        media: MediaSelection,
        media_dir: PathBuf,
    },
    Popular {
        out_dir: PathBuf,
    },
    Aggregate {
        subreddit: SubredditName,
    },
}

impl HarvestCommand {
    fn resolve(command: Command) -> Result<Self, AppError> {
        Ok(match command {
            Command::Feed { subreddit, sort } => HarvestCommand::Feed {
                subreddit: SubredditName::new(subreddit)?,
                sort: sort.parse()?,
            },
            Command::Windowed {
                subreddit,
                sort,
                upto,
            } => HarvestCommand::Windowed {
                subreddit: SubredditName::new(subreddit)?,
                sort: sort.parse()?,
                upto: upto
                    .parse()
                    .map_err(|_| AppError::InvalidWindow(upto.clone()))?,
            },
            Command::Search {
                query,
                subreddit,
                sort,
                window,
            } => {
                let mut request = SearchRequest::new(query)?
                    .sorted_by(sort.parse()?)
                    .within(window.parse()?);
                if let Some(sub) = subreddit {
                    request = request.in_subreddit(SubredditName::new(sub)?);
                }
                HarvestCommand::Search(request)
            }
            Command::User {
                username,
                pics,
                vids,
                media_dir,
            } => HarvestCommand::User {
                user: Username::new(username)?,
                media: MediaSelection {
                    images: pics,
                    videos: vids,
                },
                media_dir: PathBuf::from(media_dir),
            },
            Command::Popular { out_dir } => HarvestCommand::Popular {
                out_dir: PathBuf::from(out_dir),
            },
            Command::Aggregate { subreddit } => HarvestCommand::Aggregate {
                subreddit: SubredditName::new(subreddit)?,
            },
        })
    }
}

/// Resolved configuration, validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub command: HarvestCommand,
    pub secrets: ClientSecrets,
    pub api_base: String,
    pub token_url: String,
    pub timeout: Duration,
    pub fetch: FetchOptions,
    pub output_file: Option<PathBuf>,
    pub dedupe: bool,
    pub verbose: bool,
}

impl HarvestConfig {
    /// Resolves a complete configuration from CLI input and the environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Like [`HarvestConfig::resolve`], reading variables through `lookup`.
    pub fn resolve_with<F>(cli: CommandLineInput, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let command = HarvestCommand::resolve(cli.command)?;
        let secrets = ClientSecrets::from_lookup(&lookup)?;

        if cli.timeout_secs == 0 {
            return Err(ValidationError::NotPositive("--timeout-secs").into());
        }

        let failure_policy = if cli.partial {
            FailurePolicy::CollectPartial
        } else {
            FailurePolicy::Abort
        };

        Ok(HarvestConfig {
            command,
            secrets,
            api_base: lookup(API_BASE_ENV).unwrap_or_else(|| REDDIT_API_BASE_URL.to_string()),
            token_url: lookup(TOKEN_URL_ENV).unwrap_or_else(|| REDDIT_TOKEN_URL.to_string()),
            timeout: Duration::from_secs(cli.timeout_secs),
            fetch: FetchOptions {
                max_pages: (cli.max_pages > 0).then_some(cli.max_pages),
                failure_policy,
                ..FetchOptions::default()
            },
            output_file: cli.output.map(PathBuf::from),
            dedupe: cli.dedupe,
            verbose: cli.verbose,
        })
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        let secrets = ClientSecrets::from_lookup(|name| Some(format!("{}-for-testing", name)))
            .expect("Default secrets should be valid");
        Self {
            command: HarvestCommand::Aggregate {
                subreddit: SubredditName::new("rust").expect("Default subreddit should be valid"),
            },
            secrets,
            api_base: REDDIT_API_BASE_URL.to_string(),
            token_url: REDDIT_TOKEN_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            fetch: FetchOptions::default(),
            output_file: None,
            dedupe: false,
            verbose: false,
        }
    }
}
