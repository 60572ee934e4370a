// Normalization, media selection and exports over a recorded /r/pics page.

use crate::common::fixture_page;
use async_trait::async_trait;
use chrono::{Local, NaiveDate, TimeZone};
use pretty_assertions::assert_eq;
use reddit_harvest::media::{image_ref, video_ref, MediaKind};
use reddit_harvest::output::csv::{write_popular_snapshot, write_table_csv};
use reddit_harvest::{
    normalize, rank_by_subscribers, AppError, FailurePolicy, MediaFetcher, MediaHarvester,
    MediaSelection, Table, RECORD_COLUMNS,
};
use std::sync::atomic::{AtomicUsize, Ordering};

fn fixture_table() -> Table {
    Table::from_records(normalize(&fixture_page()).expect("fixture normalizes"))
}

#[test]
fn fixture_page_normalizes_every_post() {
    let table = fixture_table();

    assert_eq!(table.len(), 4);
    let first = &table.records()[0];
    assert_eq!(first.id(), Some("17w1a0b"));
    assert_eq!(first.author(), Some("harbour_light"));
    assert_eq!(first.score(), Some(1532));
    assert_eq!(first.num_crossposts(), Some(2));
    assert_eq!(
        first.timestamp,
        Local.timestamp_opt(1_700_056_800, 0).unwrap()
    );
    assert_eq!(table.records()[1].flair(), Some("Article"));
    assert_eq!(table.records()[3].flair(), Some("Meta"));
}

#[test]
fn media_selection_over_fixture() {
    let table = fixture_table();
    let records = table.records();

    let direct = image_ref(&records[0]).expect("hosted image");
    assert_eq!(direct.url, "https://i.redd.it/q8k2v0x1s30c1.jpg");

    let preview = image_ref(&records[1]).expect("link preview");
    assert_eq!(
        preview.url,
        "https://external-preview.redd.it/lh7Qd.jpg?auto=webp&s=2b9c1f"
    );

    let video = video_ref(&records[2]).expect("gif host video");
    assert_eq!(video.kind, MediaKind::Video);
    assert_eq!(
        video.url,
        "https://v.redd.it/2kq9c8/DASH_480.mp4?source=fallback"
    );

    assert_eq!(image_ref(&records[3]), None);
    assert_eq!(video_ref(&records[3]), None);
}

struct CountingFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl MediaFetcher for CountingFetcher {
    async fn fetch_media(&self, url: &str) -> Result<Vec<u8>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("bytes of {}", url).into_bytes())
    }
}

#[tokio::test]
async fn harvesting_fixture_media_files_by_author_and_subreddit() {
    let dir = tempfile::tempdir().expect("temp dir");
    let fetcher = CountingFetcher {
        calls: AtomicUsize::new(0),
    };
    let harvester = MediaHarvester::new(&fetcher, dir.path().join("Profiles"), FailurePolicy::Abort);
    let selection = MediaSelection {
        images: true,
        videos: true,
    };

    let report = harvester
        .harvest(&fixture_table(), selection)
        .await
        .expect("harvest succeeds");

    assert_eq!(report.stats.operations_completed, 3);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);
    assert!(report.is_success());

    let mut extensions: Vec<_> = report
        .completed
        .iter()
        .map(|done| {
            assert!(done
                .path
                .starts_with(dir.path().join("Profiles")));
            done.path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string()
        })
        .collect();
    extensions.sort();
    assert_eq!(extensions, vec!["jpg", "jpg", "mp4"]);

    let seal_dir = dir.path().join("Profiles/harbour_light/pics");
    assert_eq!(std::fs::read_dir(seal_dir).expect("author dir").count(), 2);
}

#[test]
fn fixture_exports_to_csv_with_standard_columns() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("pics.csv");

    write_table_csv(&path, &fixture_table(), &RECORD_COLUMNS).expect("csv written");

    let mut reader = csv::Reader::from_path(&path).expect("csv readable");
    let headers: Vec<String> = reader
        .headers()
        .expect("header row")
        .iter()
        .map(str::to_string)
        .collect();
    assert_eq!(headers, RECORD_COLUMNS.to_vec());

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 4);

    let title = headers.iter().position(|h| h == "title").expect("title column");
    assert_eq!(&rows[0][title], "Sunrise over the harbour this morning");
}

#[test]
fn popular_snapshot_from_subreddit_listing() {
    let page = serde_json::json!({"data": {"after": null, "children": [
        {"kind": "t5", "data": {"name": "t5_2qh0u", "url": "/r/pics/", "title": "Reddit Pics",
                                "subscribers": 30_000_000, "created_utc": 1_201_233_135}},
        {"kind": "t5", "data": {"name": "t5_2qh1i", "url": "/r/AskReddit/", "title": "Ask Reddit...",
                                "subscribers": 45_000_000, "created_utc": 1_201_233_135}},
    ]}});
    let table = Table::from_records(normalize(&page).expect("normalizes"));
    let ranked = rank_by_subscribers(&table);
    let dir = tempfile::tempdir().expect("temp dir");
    let date = NaiveDate::from_ymd_opt(2023, 11, 15).expect("valid date");

    let path = write_popular_snapshot(dir.path(), &ranked, date).expect("snapshot written");

    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("2023-11-15_popular.csv")
    );
    let text = std::fs::read_to_string(path).expect("snapshot readable");
    assert_eq!(
        text,
        "name,url,title,subscribers,subs_rank\n\
         t5_2qh0u,/r/pics/,Reddit Pics,30000000,2.0\n\
         t5_2qh1i,/r/AskReddit/,Ask Reddit...,45000000,1.0\n"
    );
}
