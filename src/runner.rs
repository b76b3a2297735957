use eyre::Result;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{info, warn};
use url::Url;

use crate::marketplace::Listing;
use crate::session::ScrapeSession;

/// Walks search result pages and feeds what it finds into a session.
///
/// Each page is fetched once; failed fetches are logged and skipped.
pub struct Scraper {
    client: Client,
    concurrency: usize,
}

impl Scraper {
    pub fn new(concurrency: usize) -> Result<Self> {
        Ok(Scraper {
            client: crate::build_client()?,
            concurrency: concurrency.max(1),
        })
    }

    pub async fn fetch(&self, url: &Url) -> Result<String> {
        let webpage = self
            .client
            .get(url.to_owned())
            .send()
            .await?
            .error_for_status()?;
        Ok(webpage.text().await?)
    }

    /// Scrapes the first `pages` result pages of the session's query.
    pub async fn run(&self, session: &mut ScrapeSession, pages: u32) -> Result<()> {
        for page in 1..=pages {
            let url = session.marketplace().search_url(session.query(), page)?;
            info!(url = %url, page, "fetching results page");
            let body = match self.fetch(&url).await {
                Ok(body) => body,
                Err(err) => {
                    warn!(url = %url, error = %err, "results page failed");
                    continue;
                }
            };

            let listings = session.marketplace().parse_listing(&url, &body);
            if listings.is_empty() {
                warn!(url = %url, "no results on page");
            }
            let details = absorb_listings(session, listings);
            self.scrape_details(session, details).await;
        }
        Ok(())
    }

    async fn scrape_details(&self, session: &mut ScrapeSession, urls: Vec<Url>) {
        let mut pages = stream::iter(urls)
            .map(|url| async move {
                let body = self.fetch(&url).await;
                (url, body)
            })
            .buffer_unordered(self.concurrency);

        while let Some((url, body)) = pages.next().await {
            let raw = body.and_then(|body| session.marketplace().parse_product(&url, &body));
            match raw {
                Ok(raw) => session.record(raw),
                Err(err) => warn!(url = %url, error = %err, "product page skipped"),
            }
        }
    }
}

/// Records every card that carries its own fields and returns the product
/// links not queued before.
pub fn absorb_listings(session: &mut ScrapeSession, listings: Vec<Listing>) -> Vec<Url> {
    let mut details = Vec::new();
    for listing in listings {
        match listing {
            Listing::Extracted(raw) => {
                session.discovered();
                session.record(raw);
            }
            Listing::Detail(url) => {
                if session.queue(url.clone()) {
                    details.push(url);
                }
            }
        }
    }
    details
}
