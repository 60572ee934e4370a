// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use reddit_harvest::output::csv::{write_popular_snapshot, write_table_csv};
use reddit_harvest::{
    CommandLineInput, Harvester, HarvestCommand, HarvestConfig, MediaHarvester, OutputReport,
    RedditHttpClient, RedditSession, Table, RECORD_COLUMNS,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("reddit_harvest.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs the configured command and returns the table it produced, if any.
async fn run_command(
    config: &HarvestConfig,
    harvester: &mut Harvester<RedditSession>,
) -> anyhow::Result<Option<Table>> {
    let table = match &config.command {
        HarvestCommand::Feed { subreddit, sort } => harvester
            .subreddit(subreddit, *sort)
            .await
            .with_context(|| format!("fetching {} of {}", sort, subreddit))?,

        HarvestCommand::Windowed {
            subreddit,
            sort,
            upto,
        } => {
            let outcome = harvester
                .subreddit_windowed(subreddit, *sort, upto.as_str())
                .await
                .with_context(|| format!("fetching {} of {} from {}", sort, subreddit, upto))?;
            for report in &outcome.reports {
                println!(
                    "  {}: {} records in {} page(s)",
                    report.window, report.records, report.pages_fetched
                );
            }
            for failure in &outcome.failures {
                eprintln!("⚠️  {} window failed: {}", failure.window, failure.error);
            }
            log::info!("Window iteration stopped: {:?}", outcome.stop);
            outcome.table
        }

        HarvestCommand::Search(request) => harvester
            .search(request)
            .await
            .with_context(|| format!("searching for '{}'", request.query()))?,

        HarvestCommand::User {
            user,
            media,
            media_dir,
        } => {
            let table = harvester
                .user_submissions(user)
                .await
                .with_context(|| format!("fetching submissions of {}", user))?;
            if !media.is_empty() {
                let session = harvester.source();
                let media_harvester =
                    MediaHarvester::new(session.client(), media_dir, config.fetch.failure_policy);
                let report = media_harvester
                    .harvest(&table, *media)
                    .await
                    .context("downloading media")?;
                print_report("media file", &report);
            }
            table
        }

        HarvestCommand::Popular { out_dir } => {
            let ranked = harvester
                .popular_subreddits()
                .await
                .context("fetching popular subreddits")?;
            let today = chrono::Local::now().date_naive();
            let path = write_popular_snapshot(out_dir, &ranked, today)
                .context("writing popular snapshot")?;
            println!("✓ {} subreddits ranked into {}", ranked.len(), path.display());
            return Ok(None);
        }

        HarvestCommand::Aggregate { subreddit } => {
            let outcome = harvester
                .aggregate(subreddit)
                .await
                .with_context(|| format!("aggregating {}", subreddit))?;
            for failure in &outcome.failures {
                eprintln!("⚠️  {} failed: {}", failure.feed, failure.error);
            }
            outcome.table
        }
    };

    Ok(Some(table))
}

fn print_report(noun: &str, report: &OutputReport) {
    println!(
        "✓ Saved {} {}(s), {} bytes",
        report.stats.operations_completed, noun, report.stats.bytes_written
    );
    for failed in &report.failed {
        eprintln!("⚠️  {}: {}", failed.subject, failed.error);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    let config = HarvestConfig::resolve(cli).context("resolving configuration")?;

    setup_logging(config.verbose).context("initializing logging")?;

    let client = RedditHttpClient::new(&config.api_base, config.timeout)
        .context("building HTTP client")?;
    let session = RedditSession::connect(client, &config.token_url, config.secrets.clone())
        .await
        .context("authorizing with Reddit")?;
    log::info!(
        "Access token {}",
        session.credential().validity_summary(chrono::Local::now())
    );

    let mut harvester = Harvester::new(session, config.fetch.clone());
    let Some(mut table) = run_command(&config, &mut harvester).await? else {
        return Ok(());
    };

    if config.dedupe {
        let removed = table.dedup_by_id();
        log::info!("Removed {} duplicate record(s)", removed);
    }
    println!("📄 Fetched {} records.", table.len());

    if let Some(path) = &config.output_file {
        write_table_csv(path, &table, &RECORD_COLUMNS)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("✓ Table saved to {}", path.display());
    }

    Ok(())
}
