// src/output/paths.rs
//! Pure functions for path calculations and filename generation.

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Extension used when a media URL does not carry a usable one.
pub const FALLBACK_EXTENSION: &str = "bin";

static EXTENSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{1,5}$").expect("extension pattern is valid"));

/// Sanitizes a string to be safe for use as a filename.
pub fn sanitize_filename(name: &str) -> String {
    let mut safe_name = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>();

    // Trim whitespace and dots
    safe_name = safe_name.trim().trim_matches('.').to_string();

    if safe_name.len() > 100 {
        let mut cut = 100;
        while !safe_name.is_char_boundary(cut) {
            cut -= 1;
        }
        safe_name.truncate(cut);
    }

    if safe_name.is_empty() {
        safe_name = "unnamed".to_string();
    }

    safe_name
}

/// Lowercased extension of the last path segment of `url`, if it looks like one.
pub fn extension_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let last = parsed.path_segments()?.next_back()?;
    let (_, ext) = last.rsplit_once('.')?;
    EXTENSION_PATTERN
        .is_match(ext)
        .then(|| ext.to_ascii_lowercase())
}

/// File name for a downloaded media item: its creation time plus extension.
///
/// `2023-11-14 22:13:20` becomes `2023-11-14 22-13-20.jpg`.
pub fn media_file_name(timestamp: &DateTime<Local>, url: &str) -> String {
    let stamp = timestamp.format("%Y-%m-%d %H:%M:%S").to_string().replace(':', "-");
    let ext = extension_from_url(url).unwrap_or_else(|| FALLBACK_EXTENSION.to_string());
    format!("{}.{}", sanitize_filename(&stamp), ext)
}

/// `{root}/{author}/{subreddit}/{file_name}` with each segment sanitized.
pub fn media_path(root: &Path, author: &str, subreddit: &str, file_name: &str) -> PathBuf {
    root.join(sanitize_filename(author))
        .join(sanitize_filename(subreddit))
        .join(file_name)
}

/// `path` with `_{suffix}` appended to its file stem, keeping the extension.
///
/// `pics/2023-11-14 22-13-20.jpg` with suffix `b` becomes
/// `pics/2023-11-14 22-13-20_b.jpg`.
pub fn with_name_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{}_{}", stem, sanitize_filename(suffix));
    if let Some(ext) = path.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    path.with_file_name(name)
}
