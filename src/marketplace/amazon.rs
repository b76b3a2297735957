use eyre::{bail, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

use super::{full_text, Listing, Marketplace};
use crate::reconcile::{normalize_text, RawExtraction};
use crate::schema::RowFilter;

const BASE_URL: &str = "https://www.amazon.in";
const SPONSORED_PREFIX: &str = "Sponsored Ad - ";

static RESULT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-component-type='s-search-result']").unwrap());
static TITLE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    super::selectors(&[
        "h2.a-size-mini.a-spacing-none.a-color-base.s-line-clamp-2 a span",
        "h2.a-size-medium.a-text-normal",
        "span.a-text-normal",
    ])
});
static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());
static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img.s-image").unwrap());
static BRAND: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h5.s-line-clamp-1 span.a-size-base-plus.a-color-base").unwrap()
});
static CURRENT_PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-price span.a-offscreen").unwrap());
static MRP: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-text-price span.a-offscreen").unwrap());
static RATING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.a-icon-alt").unwrap());
static REVIEWS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.a-size-base.s-underline-text").unwrap());
static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2 a").unwrap());
static ANY_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.a-link-normal").unwrap());
static DP_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(/dp/[\w\d]+)/?").unwrap());

/// Amazon India: search result cards carry every field, product pages are
/// never fetched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Amazon;

impl Marketplace for Amazon {
    fn name(&self) -> &'static str {
        "amazon"
    }

    fn search_url(&self, query: &str, page: u32) -> Result<Url> {
        let url = Url::parse_with_params(
            &format!("{BASE_URL}/s"),
            &[("k", query.to_owned()), ("page", page.to_string())],
        )?;
        Ok(url)
    }

    fn parse_listing(&self, _page_url: &Url, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);
        document
            .select(&RESULT)
            .filter_map(parse_card)
            .map(Listing::Extracted)
            .collect()
    }

    fn parse_product(&self, url: &Url, _html: &str) -> Result<RawExtraction> {
        bail!("Amazon product pages are not scraped: {url}");
    }

    /// Cards without a price are out-of-stock or ads.
    fn row_filter(&self) -> RowFilter {
        RowFilter {
            require_complete_pricing: true,
        }
    }
}

/// Reads one search result card. Placeholder cards and cards without a
/// title yield nothing.
fn parse_card(card: ElementRef) -> Option<RawExtraction> {
    let image = card
        .select(&IMAGE)
        .next()
        .and_then(|img| img.value().attr("src"));
    if image.is_some_and(|src| src.contains("grey-pixel.gif")) {
        return None;
    }

    let title = card_title(card)?;
    if title == "More like this" {
        return None;
    }
    let title = title
        .strip_prefix(SPONSORED_PREFIX)
        .map(|t| t.trim().to_string())
        .unwrap_or(title);

    let first_word = || title.split_whitespace().next().map(capitalize);
    let brand = card
        .select(&BRAND)
        .next()
        .and_then(|elem| normalize_text(Some(&full_text(elem))))
        .map(|brand| capitalize(&brand))
        .or_else(first_word)
        .map(|brand| {
            if brand.to_lowercase().contains("sponsored") {
                first_word().unwrap_or(brand)
            } else {
                brand
            }
        });

    let text_of = |selector: &Selector| card.select(selector).next().map(full_text);

    Some(RawExtraction {
        url: card_link(card).unwrap_or_default(),
        brand,
        mrp: text_of(&MRP),
        current_price: text_of(&CURRENT_PRICE),
        discount: None,
        rating: text_of(&RATING),
        reviews: text_of(&REVIEWS),
        specs: Default::default(),
        title: Some(title),
    })
}

fn card_title(card: ElementRef) -> Option<String> {
    let from_heading = TITLE.iter().find_map(|selector| card.select(selector).next());
    let title = match from_heading {
        // a nested span holds the title without the "Sponsored" badge
        Some(elem) => elem
            .select(&SPAN)
            .next()
            .map(full_text)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| full_text(elem)),
        None => card
            .select(&IMAGE)
            .next()?
            .value()
            .attr("alt")?
            .to_string(),
    };
    normalize_text(Some(&title))
}

/// Canonical `/dp/<ASIN>` link of a card, unwrapping sponsored redirects.
fn card_link(card: ElementRef) -> Option<String> {
    let href = card
        .select(&TITLE_LINK)
        .next()
        .or_else(|| card.select(&ANY_LINK).next())?
        .value()
        .attr("href")?;

    let base = Url::parse(BASE_URL).ok()?;
    let redirect_target = base.join(href).ok().and_then(|url| {
        url.query_pairs()
            .find(|(key, _)| key == "url")
            .map(|(_, value)| value.into_owned())
    });
    let dp_path = redirect_target
        .as_deref()
        .and_then(|target| DP_PATH.captures(target))
        .or_else(|| DP_PATH.captures(href))
        .map(|caps| caps[1].to_string());

    Some(match dp_path {
        Some(path) => format!("{BASE_URL}{path}"),
        None if href.starts_with("http") => href.to_string(),
        None => format!("{BASE_URL}{href}"),
    })
}

/// Upper-cases the first letter and lower-cases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
