use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::insights::Overview;
use crate::marketplace::Marketplace;
use crate::reconcile::{reconcile, RawExtraction};
use crate::schema::{FlatTable, RowFilter, SchemaAccumulator};

/// Counters of a running scrape, readable from any thread.
///
/// Purely observational: nothing in the session reads them back.
#[derive(Debug, Default)]
pub struct Progress {
    found: AtomicUsize,
    scraped: AtomicUsize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Items discovered so far.
    pub found: usize,
    /// Items reconciled so far.
    pub scraped: usize,
}

impl Progress {
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            found: self.found.load(Ordering::Relaxed),
            scraped: self.scraped.load(Ordering::Relaxed),
        }
    }

    fn add_found(&self, n: usize) {
        self.found.fetch_add(n, Ordering::Relaxed);
    }

    fn add_scraped(&self) {
        self.scraped.fetch_add(1, Ordering::Relaxed);
    }
}

impl ProgressSnapshot {
    /// Share of discovered items already reconciled.
    pub fn percent(&self) -> u8 {
        if self.found == 0 {
            return 0;
        }
        (self.scraped.min(self.found) * 100 / self.found) as u8
    }
}

/// What a finished session hands to the export layer.
#[derive(Debug, Clone)]
pub struct SessionOutput {
    pub table: FlatTable,
    pub overview: Overview,
}

/// State of one scrape run: the marketplace adapter, every reconciled item
/// and the product links already queued.
pub struct ScrapeSession {
    marketplace: Box<dyn Marketplace>,
    query: String,
    row_filter: RowFilter,
    accumulator: SchemaAccumulator,
    queued: HashSet<Url>,
    progress: Arc<Progress>,
}

impl ScrapeSession {
    pub fn new(marketplace: Box<dyn Marketplace>, query: impl Into<String>) -> Self {
        let row_filter = marketplace.row_filter();
        Self {
            marketplace,
            query: query.into(),
            row_filter,
            accumulator: SchemaAccumulator::new(),
            queued: HashSet::new(),
            progress: Arc::default(),
        }
    }

    /// Overrides the marketplace's default row filter.
    pub fn with_row_filter(mut self, row_filter: RowFilter) -> Self {
        self.row_filter = row_filter;
        self
    }

    pub fn marketplace(&self) -> &dyn Marketplace {
        self.marketplace.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Handle for observers; cloning it is cheap.
    pub fn progress(&self) -> Arc<Progress> {
        Arc::clone(&self.progress)
    }

    pub fn accumulator(&self) -> &SchemaAccumulator {
        &self.accumulator
    }

    /// Remembers a product link. Returns `false` when it was queued before.
    pub fn queue(&mut self, url: Url) -> bool {
        let fresh = self.queued.insert(url);
        if fresh {
            self.progress.add_found(1);
        }
        fresh
    }

    /// Counts an item that arrived without a separate fetch.
    pub fn discovered(&mut self) {
        self.progress.add_found(1);
    }

    /// Reconciles one raw extraction and keeps the result.
    pub fn record(&mut self, raw: RawExtraction) {
        let record = reconcile(raw);
        debug!(url = %record.url, brand = %record.brand, "reconciled item");
        self.accumulator.push(record);
        self.progress.add_scraped();
    }

    /// Builds the final table over everything recorded so far.
    pub fn finish(&self) -> SessionOutput {
        let table = self.accumulator.finalize(&self.row_filter);
        let eligible = self
            .accumulator
            .items()
            .iter()
            .filter(|item| self.row_filter.accepts(item));
        let overview = Overview::new(eligible, &table);
        SessionOutput { table, overview }
    }
}
