use std::collections::HashMap;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Debug, Clone, PartialEq)]
/// Raw strings scraped for one product block, before any cleanup.
///
/// Every field is whatever text the page held, or `None` when the
/// selector found nothing.
pub struct RawExtraction {
    /// Link to the product page.
    pub url: String,
    /// Product title.
    pub title: Option<String>,
    /// Brand, either scraped or inferred from the title.
    pub brand: Option<String>,
    /// List price text, e.g. `₹1,299`.
    pub mrp: Option<String>,
    /// Selling price text.
    pub current_price: Option<String>,
    /// Discount text, e.g. `23% off`.
    pub discount: Option<String>,
    /// Rating text, e.g. `4.3 out of 5 stars`.
    pub rating: Option<String>,
    /// Review count text, e.g. `1,204 Ratings`.
    pub reviews: Option<String>,
    /// Free-form specification table of the product.
    pub specs: HashMap<String, String>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Debug, Clone, PartialEq)]
/// A product after reconciliation.
///
/// Built by [`reconcile`](crate::reconcile::reconcile). Price legs are whole
/// currency units and discount is a percentage in `0..=100`.
pub struct ReconciledRecord {
    pub url: String,
    pub title: String,
    pub brand: String,
    /// Maximum retail price.
    pub mrp: Option<i64>,
    pub current_price: Option<i64>,
    /// Discount in percent.
    pub discount: Option<i64>,
    /// Rating in `0.0..=5.0`.
    pub rating: Option<f32>,
    pub reviews: Option<u64>,
    pub specs: HashMap<String, String>,
}

impl ReconciledRecord {
    /// Whether MRP, current price and discount are all known.
    pub fn has_complete_pricing(&self) -> bool {
        self.mrp.is_some() && self.current_price.is_some() && self.discount.is_some()
    }

    /// Rating as exported text, always carrying at least one decimal.
    pub fn rating_text(&self) -> Option<String> {
        self.rating.map(|rating| {
            if rating.fract() == 0.0 {
                format!("{rating:.1}")
            } else {
                rating.to_string()
            }
        })
    }

    /// Renders the record back into raw strings, so it can be fed through
    /// the reconciler again.
    pub fn to_raw(&self) -> RawExtraction {
        RawExtraction {
            url: self.url.clone(),
            title: Some(self.title.clone()),
            brand: Some(self.brand.clone()),
            mrp: self.mrp.map(|v| v.to_string()),
            current_price: self.current_price.map(|v| v.to_string()),
            discount: self.discount.map(|v| format!("{v}%")),
            rating: self.rating_text(),
            reviews: self.reviews.map(|v| v.to_string()),
            specs: self.specs.clone(),
        }
    }
}
