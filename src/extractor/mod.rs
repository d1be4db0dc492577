//! Link extraction: turns a third-party redirect/embed URL into playable links.
//!
//! The provider only hands a redirect target to an [`Extractor`] together with
//! two sinks; whatever the extractor finds is pushed into those sinks.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

mod direct;

pub use direct::DirectExtractor;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractorLink {
    pub source: String,
    pub name: String,
    pub url: String,
    pub referer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u32>,
    pub is_m3u8: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleFile {
    pub lang: String,
    pub url: String,
}

pub type SubtitleSink = Arc<dyn Fn(SubtitleFile) + Send + Sync>;
pub type LinkSink = Arc<dyn Fn(ExtractorLink) + Send + Sync>;

#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(
        &self,
        url: &str,
        subtitles: SubtitleSink,
        links: LinkSink,
    ) -> Result<(), ExtractorError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractorError {
    Unsupported { url: String },
    Failed(String),
}

impl std::fmt::Display for ExtractorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractorError::Unsupported { url } => write!(f, "no extractor for {url}"),
            ExtractorError::Failed(msg) => write!(f, "extraction failed: {msg}"),
        }
    }
}

impl std::error::Error for ExtractorError {}
