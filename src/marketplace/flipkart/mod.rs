mod product;
mod search;
mod specs;

use eyre::Result;
use url::Url;

use super::{Listing, Marketplace};
use crate::reconcile::RawExtraction;

const BASE_URL: &str = "https://www.flipkart.com";

/// Flipkart: search pages only link to products, every field is read from
/// the product page.
#[derive(Debug, Default, Clone, Copy)]
pub struct Flipkart;

impl Marketplace for Flipkart {
    fn name(&self) -> &'static str {
        "flipkart"
    }

    fn search_url(&self, query: &str, page: u32) -> Result<Url> {
        search::search_url(query, page)
    }

    fn parse_listing(&self, _page_url: &Url, html: &str) -> Vec<Listing> {
        search::product_links(html)
            .into_iter()
            .map(Listing::Detail)
            .collect()
    }

    fn parse_product(&self, url: &Url, html: &str) -> Result<RawExtraction> {
        product::parse_product(url, html)
    }
}
