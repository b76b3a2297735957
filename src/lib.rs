//! Scrape Amazon and Flipkart search results into one flat table.
//!
//! Marketplace adapters pull raw strings out of pages. Every item then goes
//! through the same [`reconcile`](reconcile::reconcile) step, which turns
//! the scraped MRP, price, discount, rating and review texts into a
//! consistent record, and a [`SchemaAccumulator`] decides which free-form
//! specification keys are common enough to become columns of the export.
//!
//! Feature Flags:
//! - `serde`: Enables serde support for the structs. (default)

pub mod config;
pub mod export;
pub mod insights;
pub mod marketplace;
pub mod reconcile;
pub mod runner;
pub mod schema;
pub mod session;

use header::{HeaderMap, HeaderValue};
use reqwest::{header, Client};

pub use config::Config;
pub use marketplace::{Marketplace, MarketplaceKind};
pub use reconcile::{reconcile, RawExtraction, ReconciledRecord};
pub use schema::{FinalSchema, FlatTable, RowFilter, SchemaAccumulator};
pub use session::ScrapeSession;
pub use url::Url;

/// Builds the default headers for the client.
fn build_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/118.0",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-IN,en;q=0.9"),
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers
}

/// HTTP client shared by all fetches of a run.
fn build_client() -> eyre::Result<Client> {
    let client = Client::builder()
        .default_headers(build_headers())
        .build()?;
    Ok(client)
}
