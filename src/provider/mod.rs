//! Ekino (ekino-tv.pl) content provider: catalog, search, title details and links.
//!
//! Every operation is a fresh fetch + parse; `Provider` holds no per-request state
//! and can be cloned into as many concurrent tasks as needed.

use std::sync::Arc;

use tracing::Instrument;
use url::Url;

use crate::extractor::{Extractor, LinkSink, SubtitleSink};
use crate::fetch::{Fetcher, Page};
use crate::telemetry;
use crate::telemetry::ops::catalog::Phase as CatalogPhase;
use crate::telemetry::ops::links::Phase as LinksPhase;
use crate::telemetry::ops::load::Phase as LoadPhase;
use crate::telemetry::ops::search::Phase as SearchPhase;

mod catalog;
mod detail;
mod error;
mod links;
mod normalize;
mod search;
mod selectors;
pub mod types;

pub use error::ProviderError;
pub use links::{DispatchReport, LinkDispatch};
pub use types::{CategoryListing, ContentType, MediaSummary, ProviderInfo, TitleDetail};

pub const PROVIDER_NAME: &str = "Ekino";
pub const PROVIDER_LANG: &str = "pl";
pub const DEFAULT_BASE_URL: &str = "https://ekino-tv.pl/";

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub base_url: Url,
}

impl SiteConfig {
    /// The base always ends with `/` so relative hrefs join under it.
    pub fn new(base: &str) -> Result<Self, ProviderError> {
        let mut raw = base.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|_| ProviderError::InvalidUrl { url: base.to_string() })?;
        Ok(Self { base_url })
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        match std::env::var("EKINO_BASE_URL") {
            Ok(base) if !base.trim().is_empty() => Self::new(&base),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }
}

#[derive(Clone)]
pub struct Provider {
    site: SiteConfig,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
}

impl Provider {
    pub fn new(site: SiteConfig, fetcher: Arc<dyn Fetcher>, extractor: Arc<dyn Extractor>) -> Self {
        Self { site, fetcher, extractor }
    }

    pub fn info(&self) -> ProviderInfo {
        ProviderInfo {
            name: PROVIDER_NAME,
            lang: PROVIDER_LANG,
            main_url: self.site.base_url.to_string(),
            has_main_page: true,
            supported_types: vec![ContentType::Series, ContentType::Movie],
        }
    }

    /// Landing page shelves.
    pub async fn catalog(&self) -> Result<Vec<CategoryListing>, ProviderError> {
        let log = telemetry::catalog();
        let root = log.root_span_kv([("url", self.site.base_url.to_string())]);
        async {
            let page = self
                .fetch(self.site.base_url.as_str())
                .instrument(log.span(&CatalogPhase::FetchPage))
                .await?;
            let categories = {
                let _s = log.span(&CatalogPhase::ParseBlocks).entered();
                catalog::parse_catalog(&page.html, &self.site.base_url)
            };
            let items: usize = categories.iter().map(|c| c.items.len()).sum();
            log.info_kv("catalog parsed", [("categories", categories.len().to_string()), ("items", items.to_string())]);
            Ok::<_, ProviderError>(categories)
        }
        .instrument(root)
        .await
    }

    /// Movies first, then series; an unexpected results page is an empty list.
    pub async fn search(&self, query: &str) -> Result<Vec<MediaSummary>, ProviderError> {
        let log = telemetry::search();
        let root = log.root_span_kv([("query", query.to_string())]);
        async {
            let url = search::search_url(&self.site.base_url, query)
                .ok_or_else(|| ProviderError::InvalidUrl { url: format!("{}search/qf/", self.site.base_url) })?;
            let page = self
                .fetch(url.as_str())
                .instrument(log.span_kv(&SearchPhase::FetchResults, [("url", url.to_string())]))
                .await?;
            let hits = {
                let _s = log.span(&SearchPhase::ParseResults).entered();
                search::parse_search(&page.html, &self.site.base_url)
            };
            if hits.is_empty() {
                log.info("no results");
            } else {
                log.info_kv("search parsed", [("hits", hits.len().to_string())]);
            }
            Ok::<_, ProviderError>(hits)
        }
        .instrument(root)
        .await
    }

    /// Title page -> details; login-gated pages fail with [`ProviderError::LoginWall`].
    pub async fn load(&self, url: &str) -> Result<TitleDetail, ProviderError> {
        let log = telemetry::load();
        let root = log.root_span_kv([("url", url.to_string())]);
        async {
            let page = self.fetch(url).instrument(log.span(&LoadPhase::FetchTitle)).await?;
            let parsed = {
                let _s = log.span(&LoadPhase::ParseTitle).entered();
                detail::parse_detail(&page.html, url, &self.site.base_url)
            };
            match &parsed {
                Ok(d) => log.info_kv(
                    "title parsed",
                    [("type", format!("{:?}", d.content_type)), ("episodes", d.episodes.len().to_string())],
                ),
                Err(e) => log.warn(e.to_string()),
            }
            parsed
        }
        .instrument(root)
        .await
    }

    /// Fan the player's source tabs out to the extractor.
    ///
    /// `data` is either a title's `player_payload` or a URL whose page holds the
    /// player. Returns once every tab has been dispatched; per-source results are
    /// only visible through [`LinkDispatch::join`].
    pub async fn load_links(
        &self,
        data: &str,
        subtitles: SubtitleSink,
        links: LinkSink,
    ) -> Result<LinkDispatch, ProviderError> {
        let log = telemetry::links();
        let root = log.root_span();
        async {
            let payload = if data.starts_with("http") {
                let page = self
                    .fetch(data)
                    .instrument(log.span_kv(&LinksPhase::FetchPlayer, [("url", data.to_string())]))
                    .await?;
                detail::parse_player_page(&page.html, data)?.unwrap_or_else(|| {
                    log.warn("page has no player container");
                    String::new()
                })
            } else {
                data.to_string()
            };

            let tabs = {
                let _s = log.span(&LinksPhase::ParseTabs).entered();
                links::parse_source_tabs(&payload, &self.site.base_url)
            };

            let _s = log.span(&LinksPhase::Dispatch).entered();
            let dispatch = LinkDispatch::spawn(tabs, self.extractor.clone(), subtitles, links);
            if dispatch.is_empty() {
                log.warn("no source tabs found");
            } else {
                let names: Vec<&str> = dispatch.sources().map(|t| t.name.as_str()).collect();
                log.info_kv("sources dispatched", [("tabs", dispatch.len().to_string()), ("sources", names.join(","))]);
            }
            Ok::<_, ProviderError>(dispatch)
        }
        .instrument(root)
        .await
    }

    async fn fetch(&self, url: &str) -> Result<Page, ProviderError> {
        match self.fetcher.get(url).await {
            Ok(page) => {
                if page.url != url {
                    tracing::debug!(from = %url, to = %page.url, "followed redirect");
                }
                Ok(page)
            }
            Err(e) => {
                tracing::warn!(url = %url, retryable = e.is_retryable(), error = %e, "fetch failed");
                Err(e.into())
            }
        }
    }
}
