use clap::Parser;
use eyre::Result;
use insightify::config::{Args, Config};
use insightify::runner::Scraper;
use insightify::{export, RowFilter, ScrapeSession};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .try_init();

    let config = Config::from(Args::parse());
    let marketplace = config.marketplace.adapter();
    info!(marketplace = marketplace.name(), query = %config.query, pages = config.pages, "starting scrape");

    let mut session = ScrapeSession::new(marketplace, config.query.clone());
    if let Some(require_complete_pricing) = config.require_pricing {
        session = session.with_row_filter(RowFilter {
            require_complete_pricing,
        });
    }

    let progress = session.progress();
    let ticker = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(2));
        loop {
            interval.tick().await;
            let snapshot = progress.snapshot();
            info!(
                found = snapshot.found,
                scraped = snapshot.scraped,
                percent = snapshot.percent(),
                "progress"
            );
        }
    });

    let scraper = Scraper::new(config.concurrency)?;
    let outcome = scraper.run(&mut session, config.pages).await;
    ticker.abort();
    outcome?;

    let output = session.finish();
    let path = export::save(
        &output.table,
        &config.out_dir,
        session.marketplace().name(),
        session.query(),
    )?;
    info!(
        items = session.accumulator().len(),
        exported = output.table.rows().len(),
        columns = output.table.schema.width(),
        "scraping completed"
    );

    println!("{}", output.overview);
    println!("Saved to {}", path.display());
    Ok(())
}
