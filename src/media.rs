// src/media.rs
//! Media selection and download for harvested posts.
//!
//! Selection is a set of pure functions over a [`Record`]; the
//! [`MediaHarvester`] downloads what they select and files it under
//! `{root}/{author}/{subreddit}/`.

use crate::error::AppError;
use crate::model::{Record, Table};
use crate::output::{
    execute, media_file_name, media_path, with_name_suffix, CompletedOperation, DeliveryTarget,
    FailedOperation, OutputReport,
};
use crate::pagination::FailurePolicy;
use std::collections::HashSet;
use std::path::PathBuf;

const IMAGE_HOST: &str = "i.redd.it";
const GIF_HOST: &str = "redgifs.com";
const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".png", ".jpeg"];

/// The ability to download one media file.
#[async_trait::async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch_media(&self, url: &str) -> Result<Vec<u8>, AppError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// A downloadable media URL selected from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub url: String,
    pub kind: MediaKind,
}

impl MediaRef {
    fn new(url: &str, kind: MediaKind) -> Self {
        Self {
            url: url.replace("&amp;", "&"),
            kind,
        }
    }
}

/// A post whose own URL is an image.
pub fn direct_image(record: &Record) -> Option<MediaRef> {
    let url = record.url()?;
    let hosted = record.domain() == Some(IMAGE_HOST);
    let looks_like_image = IMAGE_EXTENSIONS.iter().any(|ext| url.contains(ext));
    (hosted || looks_like_image).then(|| MediaRef::new(url, MediaKind::Image))
}

/// The preview image Reddit generated for a link post.
pub fn link_preview_image(record: &Record) -> Option<MediaRef> {
    if record.post_hint() != Some("link") {
        return None;
    }
    let preview = record.preview()?;
    let image = preview.images.first()?;
    Some(MediaRef::new(&image.source.url, MediaKind::Image))
}

pub fn image_ref(record: &Record) -> Option<MediaRef> {
    direct_image(record).or_else(|| link_preview_image(record))
}

/// The transcoded fallback video of a gif-host post.
pub fn video_ref(record: &Record) -> Option<MediaRef> {
    if record.domain() != Some(GIF_HOST) {
        return None;
    }
    let url = record.preview()?.reddit_video_preview?.fallback_url?;
    Some(MediaRef::new(&url, MediaKind::Video))
}

/// Which kinds of media to harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MediaSelection {
    pub images: bool,
    pub videos: bool,
}

impl MediaSelection {
    pub fn is_empty(&self) -> bool {
        !self.images && !self.videos
    }

    /// Everything this selection picks out of one record.
    pub fn select(&self, record: &Record) -> Vec<MediaRef> {
        let image = self.images.then(|| image_ref(record)).flatten();
        let video = self.videos.then(|| video_ref(record)).flatten();
        image.into_iter().chain(video).collect()
    }
}

/// Downloads selected media for every distinct post of a table.
pub struct MediaHarvester<'a, F: MediaFetcher + ?Sized> {
    fetcher: &'a F,
    root: PathBuf,
    policy: FailurePolicy,
}

impl<'a, F: MediaFetcher + ?Sized> MediaHarvester<'a, F> {
    pub fn new(fetcher: &'a F, root: impl Into<PathBuf>, policy: FailurePolicy) -> Self {
        Self {
            fetcher,
            root: root.into(),
            policy,
        }
    }

    /// Target path for one media item of `record`.
    pub fn path_for(&self, record: &Record, media: &MediaRef) -> PathBuf {
        media_path(
            &self.root,
            record.author().unwrap_or("[unknown]"),
            record.subreddit().unwrap_or("[unknown]"),
            &media_file_name(&record.timestamp, &media.url),
        )
    }

    /// Downloads and writes every selected media file, once per post id.
    ///
    /// Posts that would land on a path already written in this run get the
    /// post id appended to their file name.
    pub async fn harvest(
        &self,
        table: &Table,
        selection: MediaSelection,
    ) -> Result<OutputReport, AppError> {
        let mut report = OutputReport::new();
        let mut seen = HashSet::new();
        let mut claimed = HashSet::new();

        for record in table {
            if let Some(id) = record.id() {
                if !seen.insert(id) {
                    continue;
                }
            }

            for media in selection.select(record) {
                let path = unclaimed_path(self.path_for(record, &media), record, &claimed);
                claimed.insert(path.clone());
                match self.save(&media, path).await {
                    Ok(done) => {
                        log::info!("saved {}", done.path.display());
                        report = report.with_completed(done);
                    }
                    Err(error) if self.policy == FailurePolicy::CollectPartial => {
                        log::warn!("Could not save {}: {}", media.url, error);
                        report = report.with_failed(FailedOperation {
                            subject: media.url,
                            error: error.to_string(),
                        });
                    }
                    Err(error) => return Err(error),
                }
            }
        }

        Ok(report)
    }

    async fn save(
        &self,
        media: &MediaRef,
        path: PathBuf,
    ) -> Result<CompletedOperation, AppError> {
        log::debug!("Downloading {}", media.url);
        let bytes = self.fetcher.fetch_media(&media.url).await?;
        execute(&DeliveryTarget::WriteFile { path, bytes })
    }
}

fn unclaimed_path(path: PathBuf, record: &Record, claimed: &HashSet<PathBuf>) -> PathBuf {
    if !claimed.contains(&path) {
        return path;
    }
    let tag = record.id().unwrap_or("post");
    let mut candidate = with_name_suffix(&path, tag);
    let mut n = 2;
    while claimed.contains(&candidate) {
        candidate = with_name_suffix(&path, &format!("{}-{}", tag, n));
        n += 1;
    }
    candidate
}
