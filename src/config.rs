use clap::Parser;
use std::path::PathBuf;

use crate::marketplace::MarketplaceKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "insightify")]
#[command(about = "Scrape Amazon or Flipkart search results into a reconciled CSV table")]
pub struct Args {
    /// Marketplace to scrape.
    #[arg(value_enum)]
    pub marketplace: MarketplaceKind,

    /// Search query, e.g. "gaming laptop".
    pub query: String,

    /// Number of search result pages to walk.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Directory the CSV file is written to.
    #[arg(long, default_value = "data")]
    pub out_dir: PathBuf,

    /// Product pages fetched at the same time.
    #[arg(long, default_value_t = 16)]
    pub concurrency: usize,

    /// Only export items with MRP, current price and discount all known.
    /// Defaults to the marketplace's own policy.
    #[arg(long, action = clap::ArgAction::Set)]
    pub require_pricing: Option<bool>,
}

/// Settings of one scrape run.
#[derive(Debug, Clone)]
pub struct Config {
    pub marketplace: MarketplaceKind,
    pub query: String,
    pub pages: u32,
    pub out_dir: PathBuf,
    pub concurrency: usize,
    pub require_pricing: Option<bool>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            marketplace: args.marketplace,
            query: args.query.trim().to_string(),
            pages: args.pages,
            out_dir: args.out_dir,
            concurrency: args.concurrency.max(1),
            require_pricing: args.require_pricing,
        }
    }
}
