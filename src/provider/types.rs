use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
}

/// Lightweight hit produced by the catalog and search pages. Keyed by `detail_url`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSummary {
    pub name: String,
    pub detail_url: String,
    pub poster_url: Option<String>,
    pub year: Option<u32>,
    pub content_type: ContentType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryListing {
    pub title: String,
    pub items: Vec<MediaSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeRef {
    pub episode_url: String,
    pub label: String,
    pub season_number: u32,
    pub episode_number: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleDetail {
    pub title: String,
    pub source_url: String,
    pub poster_url: Option<String>,
    pub year: Option<u32>,
    pub synopsis: String,
    pub content_type: ContentType,
    /// Raw player markup; only meaningful as input to `Provider::load_links`.
    pub player_payload: String,
    pub episodes: Vec<EpisodeRef>,
}

/// Parts of a title page before the content type is known.
#[derive(Debug, Clone, Default)]
pub struct TitleFields {
    pub title: String,
    pub source_url: String,
    pub poster_url: Option<String>,
    pub year: Option<u32>,
    pub synopsis: String,
    pub player_payload: String,
}

impl TitleDetail {
    /// Series iff at least one episode survived parsing.
    pub fn new(fields: TitleFields, episodes: Vec<EpisodeRef>) -> Self {
        let content_type = if episodes.is_empty() { ContentType::Movie } else { ContentType::Series };
        TitleDetail {
            title: fields.title,
            source_url: fields.source_url,
            poster_url: fields.poster_url,
            year: fields.year,
            synopsis: fields.synopsis,
            content_type,
            player_payload: fields.player_payload,
            episodes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderInfo {
    pub name: &'static str,
    pub lang: &'static str,
    pub main_url: String,
    pub has_main_page: bool,
    pub supported_types: Vec<ContentType>,
}
