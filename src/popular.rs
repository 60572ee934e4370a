// src/popular.rs
//! Ranking of popular subreddits by subscriber count.

use crate::model::{Record, Table};
use serde::Serialize;

/// One row of the popular-subreddits snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSubreddit {
    pub name: String,
    pub url: String,
    pub title: String,
    pub subscribers: Option<i64>,
    /// 1 is the largest subreddit; ties share their average rank.
    pub subs_rank: Option<f64>,
}

impl RankedSubreddit {
    fn from_record(record: &Record) -> Self {
        Self {
            name: record.fullname().unwrap_or_default().to_string(),
            url: record.url().unwrap_or_default().to_string(),
            title: record.title().unwrap_or_default().to_string(),
            subscribers: record.subscribers(),
            subs_rank: None,
        }
    }
}

/// Ranks subreddits by subscribers, largest first, keeping table order.
pub fn rank_by_subscribers(table: &Table) -> Vec<RankedSubreddit> {
    let mut ranked: Vec<RankedSubreddit> =
        table.iter().map(RankedSubreddit::from_record).collect();

    let mut counted: Vec<(usize, i64)> = ranked
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| row.subscribers.map(|subs| (idx, subs)))
        .collect();
    counted.sort_by(|a, b| b.1.cmp(&a.1));

    let mut start = 0;
    while start < counted.len() {
        let subs = counted[start].1;
        let end = counted[start..]
            .iter()
            .position(|&(_, s)| s != subs)
            .map_or(counted.len(), |offset| start + offset);

        // Positions start..end share ranks start+1..=end.
        let rank = (start + 1 + end) as f64 / 2.0;
        for &(idx, _) in &counted[start..end] {
            ranked[idx].subs_rank = Some(rank);
        }
        start = end;
    }

    ranked
}
