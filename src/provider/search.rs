use scraper::{ElementRef, Html};
use url::Url;

use super::normalize::{absolute_url, parse_year, poster_url, text_of};
use super::selectors::*;
use super::types::{ContentType, MediaSummary};

const MENU_CLASS: &str = "menu";

/// Search URL for a query, e.g. `https://ekino-tv.pl/search/qf/?q=dark`.
pub fn search_url(base: &Url, query: &str) -> Option<Url> {
    let mut url = base.join("search/qf/").ok()?;
    url.query_pairs_mut().append_pair("q", query);
    Some(url)
}

/// Results page -> movies (container 0) followed by series (container 1).
///
/// Missing containers mean zero results of that kind.
pub fn parse_search(html: &str, base: &Url) -> Vec<MediaSummary> {
    let doc = Html::parse_document(html);
    let Some(area) = doc.select(&SEARCH_AREA).next() else {
        return Vec::new();
    };

    let containers: Vec<ElementRef<'_>> = area
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| !el.value().classes().any(|c| c == MENU_CLASS))
        .collect();

    [ContentType::Movie, ContentType::Series]
        .into_iter()
        .enumerate()
        .flat_map(|(idx, kind)| {
            containers
                .get(idx)
                .map(|c| parse_container(*c, base, kind))
                .unwrap_or_default()
        })
        .collect()
}

fn parse_container(container: ElementRef<'_>, base: &Url, kind: ContentType) -> Vec<MediaSummary> {
    container.select(&SEARCH_ROW).filter_map(|row| parse_row(row, base, kind)).collect()
}

fn parse_row(row: ElementRef<'_>, base: &Url, kind: ContentType) -> Option<MediaSummary> {
    let detail_url = row
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|h| absolute_url(base, h))?;
    let name = row.select(&TITLE).next().map(text_of).filter(|t| !t.is_empty())?;

    let poster = row
        .select(&IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| poster_url(base, src));
    let year = row.select(&CATES).next().map(text_of).and_then(|t| parse_year(&t));

    Some(MediaSummary { name, detail_url, poster_url: poster, year, content_type: kind })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://ekino-tv.pl/").unwrap()
    }

    fn row(href: &str, title: &str, year: &str) -> String {
        format!(
            r#"<div class="movie-wrap">
                 <a href="{href}"><img src="//img.ekino-tv.pl/thumb/{title}.jpg"></a>
                 <div class="title">{title}</div>
                 <div class="info-categories"><span class="cates">{year}</span></div>
               </div>"#
        )
    }

    #[test]
    fn search_url_encodes_query() {
        let url = search_url(&base(), "gra o tron").unwrap();
        assert_eq!(url.as_str(), "https://ekino-tv.pl/search/qf/?q=gra+o+tron");
    }

    #[test]
    fn empty_movies_and_three_series() {
        let html = format!(
            r#"<div id="advanced-search">
                 <div class="menu"><a href="/">Filmy</a></div>
                 <div class="movies"></div>
                 <div class="series">{}{}{}</div>
               </div>"#,
            row("/serie/show/a/1", "Alfa", "2001"),
            row("/serie/show/b/2", "Beta", ""),
            row("/serie/show/c/3", "Gamma", "x"),
        );
        let hits = parse_search(&html, &base());
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| h.content_type == ContentType::Series));
        let names: Vec<_> = hits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["Alfa", "Beta", "Gamma"]);
        assert_eq!(hits[0].year, Some(2001));
        assert_eq!(hits[1].year, None);
        assert_eq!(hits[2].year, None);
        assert_eq!(hits[0].poster_url.as_deref(), Some("https://img.ekino-tv.pl/normal/Alfa.jpg"));
    }

    #[test]
    fn movies_come_before_series() {
        let html = format!(
            r#"<div id="advanced-search">
                 <div class="movies">{}</div>
                 <div class="series">{}</div>
               </div>"#,
            row("/movie/show/m/1", "Film", "1999"),
            row("/serie/show/s/2", "Serial", "2005"),
        );
        let hits = parse_search(&html, &base());
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].content_type, ContentType::Movie);
        assert_eq!(hits[0].detail_url, "https://ekino-tv.pl/movie/show/m/1");
        assert_eq!(hits[1].content_type, ContentType::Series);
    }

    #[test]
    fn rows_without_link_or_title_are_skipped() {
        let html = r#"<div id="advanced-search"><div>
            <div class="movie-wrap"><div class="title">No link</div></div>
            <div class="movie-wrap"><a href="/movie/show/x/1"></a><div class="title">  </div></div>
            <div class="movie-wrap"><a href="/movie/show/ok/2"></a><div class="title">Ok</div></div>
        </div></div>"#;
        let hits = parse_search(html, &base());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ok");
        assert_eq!(hits[0].poster_url, None);
    }

    #[test]
    fn missing_containers_are_empty_not_errors() {
        assert!(parse_search("<html><body></body></html>", &base()).is_empty());
        assert!(parse_search(r#"<div id="advanced-search"><div class="menu"></div></div>"#, &base()).is_empty());
    }
}
