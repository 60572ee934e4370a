use serde::Deserialize;

/// Reddit's generated media preview for a post.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
    #[serde(default)]
    pub reddit_video_preview: Option<VideoPreview>,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PreviewImage {
    pub source: ImageSource,
    #[serde(default)]
    pub resolutions: Vec<ImageSource>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageSource {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Transcoded video preview (used for gif hosts).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoPreview {
    #[serde(default)]
    pub fallback_url: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub is_gif: bool,
}
