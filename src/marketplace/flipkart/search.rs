use eyre::Result;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use super::BASE_URL;
use crate::marketplace::selectors;

static PRODUCT_BLOCK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div[data-id]").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static PRODUCT_LINKS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| selectors(&[r#"a[href*="/p/"]"#, r#"a[class*="_1fQZEK"]"#]));

/// Builds the search URL for `query` on results page `page`.
pub fn search_url(query: &str, page: u32) -> Result<Url> {
    let url = Url::parse_with_params(
        "https://www.flipkart.com/search?marketplace=FLIPKART",
        &[("q", query.to_owned()), ("page", page.to_string())],
    )?;
    Ok(url)
}

/// Collects product page links from a results page, in page order and
/// without repeats.
pub fn product_links(html: &str) -> Vec<Url> {
    let document = Html::parse_document(html);
    let base = Url::parse(BASE_URL).ok();

    // result cards first, then any stray product anchors
    let in_blocks = document
        .select(&PRODUCT_BLOCK)
        .filter_map(|block| block.select(&LINK).next())
        .filter_map(|link| link.value().attr("href"));
    let anchors = PRODUCT_LINKS
        .iter()
        .flat_map(|selector| document.select(selector))
        .filter_map(|link| link.value().attr("href"));

    let mut links: Vec<Url> = Vec::new();
    for href in in_blocks.chain(anchors) {
        if !href.contains("/p/") {
            continue;
        }
        let Some(url) = base.as_ref().and_then(|base| base.join(href).ok()) else {
            continue;
        };
        if !links.contains(&url) {
            links.push(url);
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_carries_query_and_page() {
        let url = search_url("gaming laptop", 3).unwrap();
        let pairs: Vec<_> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("q".into(), "gaming laptop".into())));
        assert!(pairs.contains(&("page".into(), "3".into())));
        assert_eq!(url.domain(), Some("www.flipkart.com"));
    }

    #[test]
    fn links_are_resolved_and_deduplicated() {
        let html = r#"
            <div data-id="A1"><a href="/acme-phone/p/itm111?pid=A1">Acme</a></div>
            <div data-id="B2"><a href="https://www.flipkart.com/bolt-tab/p/itm222">Bolt</a></div>
            <a class="_1fQZEK" href="/acme-phone/p/itm111?pid=A1">again</a>
            <a href="/help/cancellation">help</a>
            <a href="/cool-watch/p/itm333">watch</a>
        "#;
        let links: Vec<String> = product_links(html).into_iter().map(String::from).collect();
        assert_eq!(
            links,
            vec![
                "https://www.flipkart.com/acme-phone/p/itm111?pid=A1",
                "https://www.flipkart.com/bolt-tab/p/itm222",
                "https://www.flipkart.com/cool-watch/p/itm333",
            ]
        );
    }
}
