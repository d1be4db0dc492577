use async_trait::async_trait;
use url::Url;

use super::{Extractor, ExtractorError, ExtractorLink, LinkSink, SubtitleSink};

/// Fallback extractor: reports the redirect target itself as the playable link.
///
/// Hosts plug their own resolvers in through [`Extractor`]; this one keeps the
/// CLI usable on its own.
#[derive(Debug, Clone, Default)]
pub struct DirectExtractor {
    referer: String,
}

impl DirectExtractor {
    pub fn new(referer: impl Into<String>) -> Self {
        Self { referer: referer.into() }
    }
}

#[async_trait]
impl Extractor for DirectExtractor {
    async fn extract(
        &self,
        url: &str,
        _subtitles: SubtitleSink,
        links: LinkSink,
    ) -> Result<(), ExtractorError> {
        let parsed = Url::parse(url).map_err(|_| ExtractorError::Unsupported { url: url.to_string() })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ExtractorError::Unsupported { url: url.to_string() });
        }
        let host = parsed.host_str().unwrap_or_default().trim_start_matches("www.").to_string();

        links(ExtractorLink {
            source: host.clone(),
            name: host,
            url: parsed.to_string(),
            referer: self.referer.clone(),
            quality: None,
            is_m3u8: parsed.path().ends_with(".m3u8"),
        });
        Ok(())
    }
}
