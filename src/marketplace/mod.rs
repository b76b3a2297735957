//! Marketplace adapters.
//!
//! An adapter knows how to build search URLs for one site and how to pull
//! raw strings out of its pages. It never touches the numbers; every
//! [`RawExtraction`] goes through the shared reconciler.

mod amazon;
mod flipkart;

pub use amazon::Amazon;
pub use flipkart::Flipkart;

use eyre::Result;
use scraper::{ElementRef, Selector};
use url::Url;

use crate::reconcile::RawExtraction;
use crate::schema::RowFilter;

/// Something found on a search results page.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    /// The result card already carries every field.
    Extracted(RawExtraction),
    /// The fields live on a product page that has to be fetched.
    Detail(Url),
}

/// What a site adapter has to supply.
pub trait Marketplace: Send + Sync {
    /// Short lowercase name, used in file names and logs.
    fn name(&self) -> &'static str;

    /// URL of the `page`-th (1-based) results page for `query`.
    fn search_url(&self, query: &str, page: u32) -> Result<Url>;

    /// Everything usable on one search results page.
    fn parse_listing(&self, page_url: &Url, html: &str) -> Vec<Listing>;

    /// Raw fields of a product page reached through [`Listing::Detail`].
    fn parse_product(&self, url: &Url, html: &str) -> Result<RawExtraction>;

    /// Which reconciled items are fit for export.
    fn row_filter(&self) -> RowFilter {
        RowFilter::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
/// Sites with an adapter.
pub enum MarketplaceKind {
    Amazon,
    Flipkart,
}

impl MarketplaceKind {
    pub fn adapter(self) -> Box<dyn Marketplace> {
        match self {
            MarketplaceKind::Amazon => Box::new(Amazon),
            MarketplaceKind::Flipkart => Box::new(Flipkart),
        }
    }
}

pub(crate) fn selectors(list: &[&str]) -> Vec<Selector> {
    list.iter().map(|s| Selector::parse(s).unwrap()).collect()
}

/// Text nodes directly under `elem`, not those of its descendants.
pub(crate) fn own_text(elem: ElementRef) -> String {
    elem.children()
        .filter_map(|child| child.value().as_text().map(|t| t.to_string()))
        .collect()
}

/// All text under `elem`.
pub(crate) fn full_text(elem: ElementRef) -> String {
    elem.text().collect()
}

/// First non-blank own text of an element matched by any of `selectors`,
/// tried in order.
pub(crate) fn first_own_text(root: ElementRef, selectors: &[Selector]) -> Option<String> {
    first_own_text_where(root, selectors, |_| true)
}

/// Like [`first_own_text`], skipping texts `accept` rejects.
pub(crate) fn first_own_text_where(
    root: ElementRef,
    selectors: &[Selector],
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    selectors.iter().find_map(|selector| {
        root.select(selector)
            .map(own_text)
            .find(|text| !text.trim().is_empty() && accept(text))
    })
}

pub(crate) fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn first_own_text_tries_selectors_in_order() {
        let html = Html::parse_document(
            r#"<div><span class="a"> </span><span class="b">Save <b>x</b>15%</span><span class="c">Deal</span></div>"#,
        );
        let list = selectors(&["span.missing", "span.a", "span.c", "span.b"]);
        let root = html.root_element();
        assert_eq!(first_own_text(root, &list).as_deref(), Some("Deal"));
        assert_eq!(
            first_own_text_where(root, &list, has_digit).as_deref(),
            Some("Save 15%")
        );
        assert_eq!(first_own_text(root, &selectors(&["span.missing"])), None);
    }
}
