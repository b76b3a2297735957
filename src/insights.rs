//! Summary figures of a finished scrape.

use std::fmt;

use crate::reconcile::ReconciledRecord;
use crate::schema::FlatTable;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, PartialEq)]
/// Headline numbers over the exported items.
pub struct Overview {
    pub total_products: usize,
    /// Mean current price, two decimals.
    pub avg_price: Option<f64>,
    pub median_price: Option<f64>,
    /// Mean over rated items only; a zero rating means "unrated".
    pub avg_rating: Option<f64>,
    /// Share of placeholder cells in the exported table, in percent.
    pub missing_values_pct: f64,
}

impl Overview {
    pub fn new<'a>(records: impl IntoIterator<Item = &'a ReconciledRecord>, table: &FlatTable) -> Self {
        let mut total_products = 0;
        let mut prices = Vec::new();
        let mut ratings = Vec::new();
        for record in records {
            total_products += 1;
            prices.extend(record.current_price.map(|p| p as f64));
            ratings.extend(record.rating.filter(|r| *r > 0.0).map(f64::from));
        }

        Overview {
            total_products,
            avg_price: mean(&prices).map(round2),
            median_price: median(&mut prices).map(round2),
            avg_rating: mean(&ratings).map(round2),
            missing_values_pct: round2(table.missing_cells_pct()),
        }
    }
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |value: Option<f64>| value.map_or_else(|| "N/A".to_string(), |v| v.to_string());
        writeln!(f, "Products:       {}", self.total_products)?;
        writeln!(f, "Average price:  {}", show(self.avg_price))?;
        writeln!(f, "Median price:   {}", show(self.median_price))?;
        writeln!(f, "Average rating: {}", show(self.avg_rating))?;
        write!(f, "Missing values: {}%", self.missing_values_pct)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(price: Option<i64>, rating: f32) -> ReconciledRecord {
        ReconciledRecord {
            current_price: price,
            rating: Some(rating),
            ..Default::default()
        }
    }

    #[test]
    fn summarises_prices_and_ratings() {
        let records = [
            priced(Some(100), 4.0),
            priced(Some(300), 0.0),
            priced(Some(250), 4.5),
            priced(None, 3.0),
        ];
        let overview = Overview::new(&records, &FlatTable::default());
        assert_eq!(overview.total_products, 4);
        assert_eq!(overview.avg_price, Some(216.67));
        assert_eq!(overview.median_price, Some(250.0));
        assert_eq!(overview.avg_rating, Some(3.83));
        assert_eq!(overview.missing_values_pct, 0.0);
    }

    #[test]
    fn empty_input_has_no_averages() {
        let overview = Overview::new(std::iter::empty(), &FlatTable::default());
        assert_eq!(overview, Overview::default());
        assert!(overview.to_string().contains("Average price:  N/A"));
    }
}
