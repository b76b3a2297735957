use std::collections::{BTreeSet, HashMap};

use crate::reconcile::ReconciledRecord;
use crate::schema::{FinalSchema, FlatTable, CONSTANT_COLUMNS};

/// Share of eligible items, as a fraction `numerator / denominator`, that
/// must carry a spec key for it to become a column.
pub const SPEC_PRESENCE_THRESHOLD: (usize, usize) = (2, 5);

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
/// Which items make it into the export.
pub struct RowFilter {
    /// Drop items missing any of MRP, current price and discount.
    pub require_complete_pricing: bool,
}

impl RowFilter {
    /// An empty brand marks a failed parse and is always dropped.
    pub fn accepts(&self, record: &ReconciledRecord) -> bool {
        !record.brand.trim().is_empty()
            && (!self.require_complete_pricing || record.has_complete_pricing())
    }
}

/// Collects reconciled items of one session together with every spec key
/// seen on them.
#[derive(Default, Debug)]
pub struct SchemaAccumulator {
    items: Vec<ReconciledRecord>,
    spec_keys: BTreeSet<String>,
}

impl SchemaAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ReconciledRecord) {
        self.spec_keys.extend(record.specs.keys().cloned());
        self.items.push(record);
    }

    pub fn items(&self) -> &[ReconciledRecord] {
        &self.items
    }

    pub fn spec_keys(&self) -> &BTreeSet<String> {
        &self.spec_keys
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Builds the final schema and one row per eligible item.
    ///
    /// Spec keys are counted over the items `filter` accepts, and kept when
    /// present with a non-blank value on at least 40% of them, rounded up
    /// (and at least one). A key named like a constant column never becomes
    /// a second column of that name.
    pub fn finalize(&self, filter: &RowFilter) -> FlatTable {
        let eligible: Vec<&ReconciledRecord> =
            self.items.iter().filter(|item| filter.accepts(item)).collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for item in &eligible {
            for (key, value) in &item.specs {
                if !value.trim().is_empty() {
                    *counts.entry(key.as_str()).or_default() += 1;
                }
            }
        }

        let threshold = presence_threshold(eligible.len());
        // BTreeSet iteration is already sorted and unique
        let spec_keys = self
            .spec_keys
            .iter()
            .filter(|key| !CONSTANT_COLUMNS.contains(&key.as_str()))
            .filter(|key| counts.get(key.as_str()).copied().unwrap_or(0) >= threshold)
            .cloned()
            .collect();

        let schema = FinalSchema { spec_keys };
        let rows = eligible.iter().map(|item| schema.materialize(item)).collect();
        FlatTable { schema, rows }
    }
}

/// Minimum number of items a spec key must appear on.
pub fn presence_threshold(eligible: usize) -> usize {
    let (num, den) = SPEC_PRESENCE_THRESHOLD;
    (eligible * num).div_ceil(den).max(1)
}
