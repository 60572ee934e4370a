// src/output/csv.rs
//! CSV export for tables and popular-subreddit snapshots.

use super::types::{CompletedOperation, DeliveryTarget};
use super::writer::execute;
use crate::error::AppError;
use crate::model::{Record, Table};
use crate::popular::RankedSubreddit;
use chrono::NaiveDate;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Renders one cell of a record. Missing and null fields are empty.
fn cell(record: &Record, column: &str) -> String {
    if column == "timestamp" {
        return record.timestamp.to_rfc3339();
    }
    match record.field(column) {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, AppError> {
    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

/// Serializes `table` with a header row of `columns`.
pub fn table_to_csv<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let header: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
    writer.write_record(&header)?;
    for record in table {
        writer.write_record(columns.iter().map(|c| cell(record, c.as_ref())))?;
    }
    finish(writer)
}

/// Writes `table` to `path` as CSV.
pub fn write_table_csv<S: AsRef<str>>(
    path: &Path,
    table: &Table,
    columns: &[S],
) -> Result<CompletedOperation, AppError> {
    let bytes = table_to_csv(table, columns)?;
    execute(&DeliveryTarget::WriteFile {
        path: path.to_path_buf(),
        bytes,
    })
}

/// `2024-03-01_popular.csv`
pub fn snapshot_file_name(date: NaiveDate) -> String {
    format!("{}_popular.csv", date.format("%Y-%m-%d"))
}

/// Writes the dated popular snapshot into `dir` and returns its path.
pub fn write_popular_snapshot(
    dir: &Path,
    ranked: &[RankedSubreddit],
    date: NaiveDate,
) -> Result<PathBuf, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in ranked {
        writer.serialize(row)?;
    }
    if ranked.is_empty() {
        writer.write_record(["name", "url", "title", "subscribers", "subs_rank"])?;
    }

    execute(&DeliveryTarget::CreateDirectory {
        path: dir.to_path_buf(),
    })?;
    let done = execute(&DeliveryTarget::WriteFile {
        path: dir.join(snapshot_file_name(date)),
        bytes: finish(writer)?,
    })?;
    Ok(done.path)
}
