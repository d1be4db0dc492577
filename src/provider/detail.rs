use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use url::Url;

use super::error::ProviderError;
use super::normalize::{absolute_url, collapse_whitespace, parse_year, poster_url, text_of};
use super::selectors::*;
use super::types::{EpisodeRef, TitleDetail, TitleFields};

const LOGIN_MARKER: &str = "Logowanie";

static BRACKET_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").unwrap_or_else(|e| panic!("invalid regex: {e}")));

/// Title page -> [`TitleDetail`]; fails on the site's login page.
pub fn parse_detail(html: &str, source_url: &str, base: &Url) -> Result<TitleDetail, ProviderError> {
    let doc = Html::parse_document(html);
    check_login_wall(&doc, source_url)?;

    let first_text = |sel: &scraper::Selector| doc.select(sel).next().map(text_of).unwrap_or_default();

    let fields = TitleFields {
        title: first_text(&DETAIL_TITLE),
        source_url: source_url.to_string(),
        poster_url: doc
            .select(&POSTER)
            .next()
            .and_then(|img| img.value().attr("src"))
            .and_then(|src| poster_url(base, src)),
        year: parse_year(&first_text(&CAT_BOX_YEAR)),
        synopsis: first_text(&SYNOPSIS),
        player_payload: player_markup(&doc).unwrap_or_default(),
    };

    let episodes = doc.select(&EPISODE_LINK).filter_map(|a| parse_episode(a, base)).collect();

    Ok(TitleDetail::new(fields, episodes))
}

/// Player container markup of a whole page, for link loading from a title URL.
pub fn parse_player_page(html: &str, source_url: &str) -> Result<Option<String>, ProviderError> {
    let doc = Html::parse_document(html);
    check_login_wall(&doc, source_url)?;
    Ok(player_markup(&doc))
}

/// The site serves its login form in place of gated titles.
fn check_login_wall(doc: &Html, url: &str) -> Result<(), ProviderError> {
    let doc_title = doc.select(&DOC_TITLE).next().map(text_of).unwrap_or_default();
    if doc_title.starts_with(LOGIN_MARKER) {
        return Err(ProviderError::LoginWall { url: url.to_string() });
    }
    Ok(())
}

fn player_markup(doc: &Html) -> Option<String> {
    doc.select(&PLAYER).next().map(|el| el.html())
}

fn parse_episode(anchor: ElementRef<'_>, base: &Url) -> Option<EpisodeRef> {
    let raw = text_of(anchor);
    let Some((season_number, episode_number)) = season_and_episode(&raw) else {
        tracing::warn!(label = %raw, "episode row without [season] [episode] numbers skipped");
        return None;
    };
    let Some(episode_url) = anchor.value().attr("href").and_then(|h| absolute_url(base, h)) else {
        tracing::warn!(label = %raw, "episode row without usable link skipped");
        return None;
    };

    Some(EpisodeRef { episode_url, label: episode_label(&raw), season_number, episode_number })
}

/// First two `[n]` tokens, left to right, as (season, episode). Extra tokens are ignored.
pub fn season_and_episode(label: &str) -> Option<(u32, u32)> {
    let mut numbers = BRACKET_NUMBER
        .captures_iter(label)
        .map(|c| c[1].parse::<u32>().ok().filter(|n| *n > 0));
    let season = numbers.next()??;
    let episode = numbers.next()??;
    Some((season, episode))
}

fn episode_label(raw: &str) -> String {
    let stripped = collapse_whitespace(&BRACKET_NUMBER.replace_all(raw, " "));
    if stripped.is_empty() { raw.to_string() } else { stripped }
}
