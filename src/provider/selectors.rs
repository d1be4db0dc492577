use std::sync::LazyLock;

use scraper::Selector;

fn sel(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

macro_rules! selectors {
    ($($name:ident = $css:literal;)*) => {
        $(pub static $name: LazyLock<Selector> = LazyLock::new(|| sel($css));)*
    };
}

selectors! {
    // landing page
    POPULAR_BLOCK = ".mostPopular";
    BLOCK_HEADING = "h4";
    BLOCK_SMALL = "h4 small";
    ROW = "li";
    SCOPE_LEFT = ".scope_left";
    SCOPE_RIGHT = ".scope_right";
    LINK = "a[href]";
    IMAGE = "img[src]";
    TITLE = ".title";
    CATES = ".cates";

    // search
    SEARCH_AREA = "#advanced-search";
    SEARCH_ROW = ".movie-wrap";

    // title page
    DOC_TITLE = "title";
    DETAIL_TITLE = "h1.title";
    PLAYER = ".playerContainer";
    POSTER = ".moviePoster";
    CAT_BOX_YEAR = ".catBox .cates";
    SYNOPSIS = ".descriptionMovie";
    EPISODE_LINK = ".list-series a[href]";

    // player markup
    SOURCE_TAB = ".players a[href^=\"#\"]";
    PANE = "[id]";
    OPEN_SOURCE = "a.buttonprch[href]";
}
