// Listing flows from strategy to merged table.

use crate::common::{full_listing, listing, FixtureSource};
use pretty_assertions::assert_eq;
use reddit_harvest::{
    aggregate_over_windows, fetch_all_pages, strategies, AppError, FailurePolicy, FeedSort,
    FetchOptions, Harvester, SubredditName, Termination, TimeWindow, WindowStop, WindowedSort,
};
use reqwest::StatusCode;

fn test_sub() -> SubredditName {
    SubredditName::new("test").expect("valid subreddit")
}

#[tokio::test]
async fn new_feed_of_140_posts_takes_two_fetches() {
    let source = FixtureSource::new().pages(
        "/r/test/new",
        vec![listing("a", 100, Some("x")), listing("b", 40, None)],
    );
    let mut harvester = Harvester::new(source, FetchOptions::default());

    let table = harvester
        .subreddit(&test_sub(), FeedSort::New)
        .await
        .expect("feed fetch succeeds");

    assert_eq!(table.len(), 140);
    let source = harvester.into_source();
    assert_eq!(source.requests.len(), 2);
    assert_eq!(source.cursors_sent(), vec![None, Some("x")]);
    assert!(source
        .requests
        .iter()
        .all(|(endpoint, params)| endpoint == "/r/test/new"
            && params.get("limit").map(String::as_str) == Some("100")
            && params.get("show").map(String::as_str) == Some("all")));
}

#[tokio::test]
async fn records_keep_fetch_order_across_pages() {
    let mut source = FixtureSource::new().pages("/r/test/hot", full_listing("h", 250));
    let query = strategies::subreddit_feed(&test_sub(), FeedSort::Hot);

    let outcome = fetch_all_pages(&mut source, &query, &FetchOptions::default())
        .await
        .expect("fetch succeeds");

    let ids: Vec<_> = outcome.table.iter().filter_map(|r| r.id()).collect();
    assert_eq!(ids.len(), 250);
    assert_eq!(ids[0], "h0_0");
    assert_eq!(ids[99], "h0_99");
    assert_eq!(ids[100], "h1_0");
    assert_eq!(ids[249], "h2_49");
    assert_eq!(outcome.termination, Termination::CursorExhausted);
    assert_eq!(
        source.cursors_sent(),
        vec![None, Some("h-cursor-1"), Some("h-cursor-2")]
    );
}

#[tokio::test]
async fn windowed_top_walks_month_to_hour() {
    let source = FixtureSource::new()
        .pages("/r/test/top?t=month", full_listing("m", 1000))
        .pages("/r/test/top?t=week", full_listing("w", 980))
        .pages("/r/test/top?t=day", full_listing("d", 900))
        .pages("/r/test/top?t=hour", full_listing("o", 930));
    let mut harvester = Harvester::new(source, FetchOptions::default());

    let outcome = harvester
        .subreddit_windowed(&test_sub(), WindowedSort::Top, "month")
        .await
        .expect("windowed fetch succeeds");

    assert_eq!(
        outcome.windows_fetched(),
        vec![
            TimeWindow::Month,
            TimeWindow::Week,
            TimeWindow::Day,
            TimeWindow::Hour
        ]
    );
    assert_eq!(outcome.stop, WindowStop::FinestReached);
    assert_eq!(outcome.table.len(), 1000 + 980 + 900 + 930);

    let windows: Vec<_> = harvester
        .source()
        .requests
        .iter()
        .filter(|(_, params)| !params.contains_key("after"))
        .map(|(_, params)| params["t"].clone())
        .collect();
    assert_eq!(windows, vec!["month", "week", "day", "hour"]);
}

#[tokio::test]
async fn sparse_first_window_is_the_only_one_fetched() {
    let mut source =
        FixtureSource::new().pages("/r/test/controversial?t=month", full_listing("m", 899));
    let query = strategies::subreddit_windowed(&test_sub(), WindowedSort::Controversial);

    let outcome = aggregate_over_windows(&mut source, &query, "month", &FetchOptions::default())
        .await
        .expect("windowed fetch succeeds");

    assert_eq!(outcome.stop, WindowStop::ExhaustedAt(TimeWindow::Month));
    assert_eq!(outcome.table.len(), 899);
    assert_eq!(source.requests.len(), 9);
}

#[tokio::test]
async fn unknown_window_fails_without_network() {
    let mut source = FixtureSource::new();
    let query = strategies::subreddit_windowed(&test_sub(), WindowedSort::Top);

    let err = aggregate_over_windows(&mut source, &query, "fortnight", &FetchOptions::default())
        .await
        .expect_err("unknown window is rejected");

    assert!(matches!(err, AppError::InvalidWindow(_)));
    assert!(source.requests.is_empty());
}

#[tokio::test]
async fn upstream_error_carries_status_and_url() {
    let mut source = FixtureSource::new().respond(
        "/r/test/rising",
        StatusCode::FORBIDDEN,
        r#"{"reason": "private", "message": "Forbidden", "error": 403}"#.to_string(),
    );
    let query = strategies::subreddit_feed(&test_sub(), FeedSort::Rising);

    let err = fetch_all_pages(&mut source, &query, &FetchOptions::default())
        .await
        .expect_err("forbidden listing fails");

    match err {
        AppError::UpstreamRequest { status, url, .. } => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(url, "https://oauth.reddit.com/r/test/rising");
        }
        other => panic!("Expected UpstreamRequest, got {:?}", other),
    }
}

#[tokio::test]
async fn page_cap_stops_a_cursor_that_never_ends() {
    let pages = (0..5)
        .map(|n| listing(&format!("loop{}_", n), 100, Some("same-cursor")))
        .collect();
    let mut source = FixtureSource::new().pages("/r/test/new", pages);
    let query = strategies::subreddit_feed(&test_sub(), FeedSort::New);
    let options = FetchOptions {
        max_pages: Some(3),
        ..FetchOptions::default()
    };

    let outcome = fetch_all_pages(&mut source, &query, &options)
        .await
        .expect("capped fetch still succeeds");

    assert_eq!(outcome.termination, Termination::PageCapReached { cap: 3 });
    assert_eq!(outcome.table.len(), 300);
    assert_eq!(source.requests.len(), 3);
}

#[tokio::test]
async fn partial_aggregate_keeps_what_succeeded() {
    let source = FixtureSource::new()
        .pages("/r/test/rising", vec![listing("r", 4, None)])
        .pages("/r/test/new", vec![listing("n", 4, None)])
        .respond(
            "/r/test/hot",
            StatusCode::SERVICE_UNAVAILABLE,
            "upstream connect error".to_string(),
        )
        .pages("/r/test/top?t=month", vec![listing("t", 4, None)])
        .respond(
            "/r/test/controversial?t=month",
            StatusCode::INTERNAL_SERVER_ERROR,
            "oops".to_string(),
        )
        .pages("/r/test/controversial?t=week", vec![listing("c", 2, None)]);
    let options = FetchOptions {
        failure_policy: FailurePolicy::CollectPartial,
        ..FetchOptions::default()
    };
    let mut harvester = Harvester::new(source, options);

    let outcome = harvester
        .aggregate(&test_sub())
        .await
        .expect("partial aggregate succeeds");

    assert_eq!(outcome.table.len(), 4 + 4 + 4 + 2);
    let failed: Vec<_> = outcome.failures.iter().map(|f| f.feed.as_str()).collect();
    assert_eq!(failed, vec!["hot", "controversial?t=month"]);
}
