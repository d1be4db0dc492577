use scraper::{ElementRef, Html};
use url::Url;

use super::normalize::{absolute_url, compose_title, is_series_title, parse_year, poster_url, text_of, text_without};
use super::selectors::*;
use super::types::{CategoryListing, ContentType, MediaSummary};

const QUALIFIER_TAG: &str = "small";

/// Landing page -> one listing per `.mostPopular` block, page order.
pub fn parse_catalog(html: &str, base: &Url) -> Vec<CategoryListing> {
    let doc = Html::parse_document(html);
    doc.select(&POPULAR_BLOCK).map(|block| parse_block(block, base)).collect()
}

fn parse_block(block: ElementRef<'_>, base: &Url) -> CategoryListing {
    let heading = block
        .select(&BLOCK_HEADING)
        .next()
        .map(|h| text_without(h, QUALIFIER_TAG))
        .unwrap_or_default();
    let small = block.select(&BLOCK_SMALL).next().map(text_of);
    let title = compose_title(&heading, small.as_deref());

    // The catalog only knows the type per shelf, not per item.
    let content_type = if is_series_title(&title) { ContentType::Series } else { ContentType::Movie };

    let items = block
        .select(&ROW)
        .filter_map(|row| parse_row(row, base, content_type))
        .collect();

    CategoryListing { title, items }
}

fn parse_row(row: ElementRef<'_>, base: &Url, content_type: ContentType) -> Option<MediaSummary> {
    let left = row.select(&SCOPE_LEFT).next();
    let right = row.select(&SCOPE_RIGHT).next();

    let href = left.and_then(|l| l.select(&LINK).next()).and_then(|a| a.value().attr("href"));
    let Some(detail_url) = href.and_then(|h| absolute_url(base, h)) else {
        tracing::debug!("catalog row without link skipped");
        return None;
    };

    let poster = left
        .and_then(|l| l.select(&IMAGE).next())
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| poster_url(base, src));

    let name = right.and_then(|r| r.select(&TITLE).next()).map(text_of).unwrap_or_default();
    let year = right.and_then(|r| r.select(&CATES).next()).map(text_of).and_then(|t| parse_year(&t));

    Some(MediaSummary { name, detail_url, poster_url: poster, year, content_type })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANDING: &str = r#"
    <html><body>
      <div class="mostPopular">
        <h4>Nowe Filmy <small>HD</small></h4>
        <ul>
          <li>
            <div class="scope_left">
              <a href="/movie/show/incepcja-inception/1234"><img src="//img.ekino-tv.pl/movie/thumb/1234.jpg"></a>
            </div>
            <div class="scope_right">
              <div class="title"><a href="/movie/show/incepcja-inception/1234">Incepcja</a></div>
              <div class="cates">2010</div>
            </div>
          </li>
          <li>
            <div class="scope_left"><a href="/movie/show/bez-roku/99"></a></div>
            <div class="scope_right">
              <div class="title"><a href="/movie/show/bez-roku/99">Bez roku</a></div>
              <div class="cates">  </div>
            </div>
          </li>
        </ul>
      </div>
      <div class="mostPopular">
        <h4>POPULARNE SERIALE</h4>
        <ul>
          <li>
            <div class="scope_left"><a href="/serie/show/dark/77"><img src="//img.ekino-tv.pl/serie/thumb/77.jpg"></a></div>
            <div class="scope_right">
              <div class="title"><a href="/serie/show/dark/77">Dark</a></div>
              <div class="cates">Dramat</div>
            </div>
          </li>
        </ul>
      </div>
    </body></html>
    "#;

    fn base() -> Url {
        Url::parse("https://ekino-tv.pl/").unwrap()
    }

    #[test]
    fn categories_keep_page_order_and_composed_titles() {
        let cats = parse_catalog(LANDING, &base());
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].title, "Nowe filmy Hd");
        assert_eq!(cats[1].title, "Popularne seriale");
    }

    #[test]
    fn rows_are_normalized() {
        let cats = parse_catalog(LANDING, &base());
        let first = &cats[0].items[0];
        assert_eq!(first.name, "Incepcja");
        assert_eq!(first.detail_url, "https://ekino-tv.pl/movie/show/incepcja-inception/1234");
        assert_eq!(first.poster_url.as_deref(), Some("https://img.ekino-tv.pl/movie/normal/1234.jpg"));
        assert_eq!(first.year, Some(2010));
        assert_eq!(first.content_type, ContentType::Movie);

        let second = &cats[0].items[1];
        assert_eq!(second.poster_url, None);
        assert_eq!(second.year, None);
    }

    #[test]
    fn series_shelf_tags_every_item_as_series() {
        let cats = parse_catalog(LANDING, &base());
        let dark = &cats[1].items[0];
        assert_eq!(dark.content_type, ContentType::Series);
        // non-numeric category text is not a year
        assert_eq!(dark.year, None);
    }

    #[test]
    fn rows_without_link_are_dropped() {
        let html = r#"<div class="mostPopular"><h4>Filmy</h4><ul>
            <li><div class="scope_left"></div><div class="scope_right"><div class="title">Nic</div></div></li>
        </ul></div>"#;
        let cats = parse_catalog(html, &base());
        assert_eq!(cats.len(), 1);
        assert!(cats[0].items.is_empty());
    }

    #[test]
    fn heading_text_inside_a_link_is_kept() {
        let html = r#"<div class="mostPopular"><h4><a href="/seriale">Popularne Seriale</a> <small>HD</small></h4><ul>
            <li><div class="scope_left"><a href="/serie/show/dark/77"></a></div>
                <div class="scope_right"><div class="title">Dark</div></div></li>
        </ul></div>"#;
        let cats = parse_catalog(html, &base());
        assert_eq!(cats[0].title, "Popularne seriale Hd");
        assert_eq!(cats[0].items[0].content_type, ContentType::Series);
    }

    #[test]
    fn page_without_blocks_has_no_categories() {
        assert!(parse_catalog("<html><body><p>maintenance</p></body></html>", &base()).is_empty());
    }
}
