//! String and URL rules shared by every page parser.

use scraper::ElementRef;
use url::Url;

const THUMB_SEGMENT: &str = "/thumb/";
const FULL_SIZE_SEGMENT: &str = "/normal/";
const SERIES_MARKER: &str = "serial";

/// Resolve an href/src found in site markup against the site base.
///
/// Site-relative paths get the base prefix, protocol-relative `//host/..` the base
/// scheme, absolute URLs pass through. Blank input is absent.
pub fn absolute_url(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    base.join(raw).ok().map(String::from)
}

/// Like [`absolute_url`], but points thumbnails at the full-size image.
pub fn poster_url(base: &Url, raw: &str) -> Option<String> {
    absolute_url(base, raw).map(|u| u.replace(THUMB_SEGMENT, FULL_SIZE_SEGMENT))
}

/// Blank or non-numeric text is absent, never zero.
pub fn parse_year(text: &str) -> Option<u32> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<u32>().ok().filter(|y| *y > 0)
}

pub fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Category heading plus optional qualifier, e.g. "Nowe Filmy" + "HD" -> "Nowe filmy Hd".
pub fn compose_title(heading: &str, small: Option<&str>) -> String {
    let mut title = capitalize(heading);
    if let Some(suffix) = small.map(capitalize).filter(|s| !s.is_empty()) {
        if !title.is_empty() {
            title.push(' ');
        }
        title.push_str(&suffix);
    }
    title
}

pub fn is_series_title(title: &str) -> bool {
    title.to_lowercase().contains(SERIES_MARKER)
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All descendant text of an element, whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

/// Descendant text of an element, leaving out the subtrees of nested `skip` tags.
pub fn text_without(el: ElementRef<'_>, skip: &str) -> String {
    let root = el.id();
    let raw: String = el
        .descendants()
        .filter(|n| {
            !n.ancestors()
                .take_while(|a| a.id() != root)
                .any(|a| a.value().as_element().is_some_and(|e| e.name() == skip))
        })
        .filter_map(|n| n.value().as_text().map(|t| t.to_string()))
        .collect();
    collapse_whitespace(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://ekino-tv.pl/").unwrap()
    }

    #[test]
    fn capitalize_lowercases_rest_and_trims() {
        assert_eq!(capitalize("  NOWE Filmy "), "Nowe filmy");
        assert_eq!(capitalize("hd"), "Hd");
        assert_eq!(capitalize("świeże"), "Świeże");
        assert_eq!(capitalize("   "), "");
    }

    #[test]
    fn compose_title_appends_capitalized_suffix() {
        assert_eq!(compose_title("Nowe Filmy", Some("HD")), "Nowe filmy Hd");
        assert_eq!(compose_title("Nowe Filmy", Some("  ")), "Nowe filmy");
        assert_eq!(compose_title("Nowe Filmy", None), "Nowe filmy");
    }

    #[test]
    fn series_marker_is_case_insensitive() {
        assert!(is_series_title("Popularne Seriale"));
        assert!(is_series_title("nowe seriale hd"));
        assert!(!is_series_title("Nowe filmy"));
    }

    #[test]
    fn year_blank_or_garbage_is_absent() {
        assert_eq!(parse_year("2019"), Some(2019));
        assert_eq!(parse_year(" 2021 \n"), Some(2021));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("   "), None);
        assert_eq!(parse_year("Komedia"), None);
        assert_eq!(parse_year("0"), None);
    }

    #[test]
    fn relative_and_protocol_relative_urls_become_absolute() {
        let b = base();
        assert_eq!(absolute_url(&b, "/movie/show/x/123").as_deref(), Some("https://ekino-tv.pl/movie/show/x/123"));
        assert_eq!(absolute_url(&b, "movie/show/x/123").as_deref(), Some("https://ekino-tv.pl/movie/show/x/123"));
        assert_eq!(absolute_url(&b, "//img.ekino-tv.pl/a.jpg").as_deref(), Some("https://img.ekino-tv.pl/a.jpg"));
        assert_eq!(absolute_url(&b, "https://other.example/x").as_deref(), Some("https://other.example/x"));
        assert_eq!(absolute_url(&b, "  "), None);
    }

    #[test]
    fn poster_thumbnail_is_rewritten_to_full_size() {
        let got = poster_url(&base(), "//img.ekino-tv.pl/static/thumb/12345.jpg").unwrap();
        assert_eq!(got, "https://img.ekino-tv.pl/static/normal/12345.jpg");
        assert!(got.starts_with("https:"));
    }

    #[test]
    fn text_without_drops_only_the_skipped_subtree() {
        let sel = scraper::Selector::parse("h4").unwrap();
        let frag = scraper::Html::parse_fragment("<h4>Nowe Filmy <small>HD</small></h4>");
        let h4 = frag.select(&sel).next().unwrap();
        assert_eq!(text_without(h4, "small"), "Nowe Filmy");
        assert_eq!(text_of(h4), "Nowe Filmy HD");

        let frag = scraper::Html::parse_fragment("<h4><a href=\"/seriale\">Popularne <b>Seriale</b></a> <small>HD</small></h4>");
        let h4 = frag.select(&sel).next().unwrap();
        assert_eq!(text_without(h4, "small"), "Popularne Seriale");
    }
}
