use eyre::{bail, eyre, Result};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use super::specs::parse_specs;
use crate::marketplace::{first_own_text, first_own_text_where, has_digit, selectors};
use crate::reconcile::RawExtraction;

static TITLE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        r#"span[class*="VU-ZEz"]"#,
        r#"h1[class*="_6EBuvT"] span"#,
        "h1 span",
        "h1",
    ])
});
static RATING: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        r#"div[class*="XQDdHH"]"#,
        r#"div[class*="rating"]"#,
        r#"span[class*="rating"]"#,
    ])
});
static REVIEWS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        r#"span[class*="Wphh3N"] span"#,
        r#"span[class*="review"]"#,
        r#"span[class*="Rating"]"#,
    ])
});
static CURRENT_PRICE: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        r#"div[class*="Nx9bqj"]"#,
        r#"div[class*="price"]"#,
        r#"span[class*="price"]"#,
    ])
});
static MRP: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        r#"div[class*="yRaY8j"]"#,
        r#"div[class*="MRP"]"#,
        r#"span[class*="MRP"]"#,
    ])
});
static DISCOUNT: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        r#"div[class*="UkUFwK"] span"#,
        r#"div[class*="discount"]"#,
        r#"span[class*="discount"]"#,
    ])
});
static BRAND_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w\-]+").unwrap());

/// Reads the raw fields of a Flipkart product page.
///
/// Fails when `url` is not a Flipkart link or the page is one of Flipkart's
/// error pages instead of a product.
pub fn parse_product(url: &Url, body: &str) -> Result<RawExtraction> {
    if !url
        .domain()
        .ok_or_else(|| eyre!("Domain name invalid."))?
        .contains("flipkart.com")
    {
        bail!("Only flipkart.com is supported");
    }
    if body.contains("has been moved or deleted") || body.contains("not right!") {
        bail!("Link provided doesn't corresponds to any product");
    }
    if body.contains("Internal Server Error") {
        bail!("Internal Server Error. Host is down or is blocking use of this library.");
    }

    let document = Html::parse_document(body);
    let root = document.root_element();

    let title = first_own_text(root, &TITLE);
    let specs = parse_specs(root);
    // brand is rarely labelled; the title usually starts with it
    let brand = title
        .as_deref()
        .and_then(|title| BRAND_WORD.find(title.trim()))
        .map(|m| m.as_str().to_string())
        .or_else(|| specs.get("Brand").cloned());

    Ok(RawExtraction {
        url: url.to_string(),
        title,
        brand,
        mrp: first_own_text_where(root, &MRP, has_digit),
        current_price: first_own_text_where(root, &CURRENT_PRICE, has_digit),
        discount: first_own_text_where(root, &DISCOUNT, has_digit),
        rating: first_own_text_where(root, &RATING, has_digit),
        reviews: first_own_text_where(root, &REVIEWS, has_digit),
        specs,
    })
}
