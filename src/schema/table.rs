use std::collections::BTreeMap;

use crate::reconcile::ReconciledRecord;

/// Written into every cell whose value is missing or blank.
pub const PLACEHOLDER: &str = "N/A";

/// Columns every export starts with, in order.
pub const CONSTANT_COLUMNS: [&str; 8] = [
    "URL",
    "Title",
    "Brand",
    "MRP",
    "Current Price",
    "Discount %",
    "Rating",
    "Reviews",
];

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
/// Column layout of an export: the constant columns followed by the
/// retained specification keys in alphabetical order.
pub struct FinalSchema {
    pub spec_keys: Vec<String>,
}

impl FinalSchema {
    /// All column names, constant ones first.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        CONSTANT_COLUMNS
            .iter()
            .copied()
            .chain(self.spec_keys.iter().map(String::as_str))
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        CONSTANT_COLUMNS.len() + self.spec_keys.len()
    }

    /// Lays one record out under this schema, filling gaps with
    /// [`PLACEHOLDER`].
    pub fn materialize(&self, record: &ReconciledRecord) -> Vec<String> {
        let constant = [
            Some(record.url.clone()),
            Some(record.title.clone()),
            Some(record.brand.clone()),
            record.mrp.map(|v| v.to_string()),
            record.current_price.map(|v| v.to_string()),
            record.discount.map(|v| v.to_string()),
            record.rating_text(),
            record.reviews.map(|v| v.to_string()),
        ];
        let specs = self
            .spec_keys
            .iter()
            .map(|key| record.specs.get(key).cloned());

        constant
            .into_iter()
            .chain(specs)
            .map(|cell| match cell {
                Some(value) if !value.trim().is_empty() => value,
                _ => PLACEHOLDER.to_string(),
            })
            .collect()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Debug, Clone)]
/// The flattened result of a scrape session, ready for export.
pub struct FlatTable {
    pub schema: FinalSchema,
    pub rows: Vec<Vec<String>>,
}

impl FlatTable {
    pub fn headers(&self) -> Vec<String> {
        self.schema.columns().map(String::from).collect()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// One column-name to value mapping per row, for analysis layers that
    /// want named access.
    pub fn records(&self) -> Vec<BTreeMap<String, String>> {
        let headers = self.headers();
        self.rows
            .iter()
            .map(|row| headers.iter().cloned().zip(row.iter().cloned()).collect())
            .collect()
    }

    /// Share of cells holding the placeholder, in percent.
    pub fn missing_cells_pct(&self) -> f64 {
        let total = self.rows.len() * self.schema.width();
        if total == 0 {
            return 0.0;
        }
        let missing = self
            .rows
            .iter()
            .flatten()
            .filter(|cell| cell.as_str() == PLACEHOLDER)
            .count();
        missing as f64 / total as f64 * 100.0
    }
}
