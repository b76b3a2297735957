//! Cleanup of scraped price, discount and rating signals.
//!
//! [`reconcile`] never fails: text it cannot read is treated as missing,
//! and repairs that would divide by zero are skipped.

mod extract;
mod record;
mod repair;

pub use extract::{extract_discount, extract_price, extract_rating, extract_reviews, normalize_text};
pub use record::{RawExtraction, ReconciledRecord};
pub use repair::{expected_price, Triangle, PRICE_TOLERANCE};

/// Normalizes one raw extraction into a consistent record.
pub fn reconcile(raw: RawExtraction) -> ReconciledRecord {
    let title = normalize_text(raw.title.as_deref()).unwrap_or_default();
    let brand = normalize_text(raw.brand.as_deref()).unwrap_or_default();

    let triangle = Triangle {
        mrp: normalize_text(raw.mrp.as_deref()).and_then(|t| extract_price(&t)),
        current: normalize_text(raw.current_price.as_deref()).and_then(|t| extract_price(&t)),
        discount: normalize_text(raw.discount.as_deref()).and_then(|t| extract_discount(&t)),
    }
    .repair();

    let rating = normalize_text(raw.rating.as_deref()).and_then(|t| extract_rating(&t));
    let reviews = normalize_text(raw.reviews.as_deref()).and_then(|t| extract_reviews(&t));
    let (rating, reviews) = repair::default_rating_reviews(rating, reviews);

    ReconciledRecord {
        url: raw.url,
        title,
        brand,
        mrp: triangle.mrp,
        current_price: triangle.current,
        discount: triangle.discount,
        rating,
        reviews,
        specs: raw.specs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(mrp: &str, current: &str, discount: &str) -> RawExtraction {
        let field = |text: &str| (!text.is_empty()).then(|| text.to_string());
        RawExtraction {
            url: "https://www.flipkart.com/p/itm1".into(),
            title: Some("  Acme   Phone ".into()),
            brand: Some("Acme".into()),
            mrp: field(mrp),
            current_price: field(current),
            discount: field(discount),
            ..Default::default()
        }
    }

    fn pricing(record: &ReconciledRecord) -> (Option<i64>, Option<i64>, Option<i64>) {
        (record.mrp, record.current_price, record.discount)
    }

    #[test]
    fn missing_mrp_uses_current_price() {
        let record = reconcile(raw("", "999", ""));
        assert_eq!(pricing(&record), (Some(999), Some(999), Some(0)));
    }

    #[test]
    fn missing_current_price_is_derived() {
        let record = reconcile(raw("1000", "", "20"));
        assert_eq!(pricing(&record), (Some(1000), Some(800), Some(20)));
    }

    #[test]
    fn derived_halves_round_to_even() {
        assert_eq!(reconcile(raw("10", "", "15")).current_price, Some(8));
        assert_eq!(reconcile(raw("400", "390", "")).discount, Some(2));
    }

    #[test]
    fn implausible_current_price_is_replaced() {
        let record = reconcile(raw("1000", "950", "20"));
        assert_eq!(record.current_price, Some(800));
    }

    #[test]
    fn missing_rating_defaults_when_reviews_known() {
        let record = reconcile(RawExtraction {
            rating: Some(String::new()),
            reviews: Some("120".into()),
            ..Default::default()
        });
        assert_eq!(record.rating, Some(0.0));
        assert_eq!(record.reviews, Some(120));
    }

    #[test]
    fn scraped_text_is_cleaned() {
        let record = reconcile(RawExtraction {
            title: Some(" Acme \n Phone\t(Black, 128 GB) ".into()),
            brand: Some(" Acme ".into()),
            mrp: Some("₹54,999".into()),
            current_price: Some("₹41,249".into()),
            discount: Some("25% off".into()),
            rating: Some("4.4".into()),
            reviews: Some("12,304 Ratings & 1,002 Reviews".into()),
            ..Default::default()
        });
        assert_eq!(record.title, "Acme Phone (Black, 128 GB)");
        assert_eq!(record.brand, "Acme");
        assert_eq!(pricing(&record), (Some(54999), Some(41249), Some(25)));
        assert_eq!(record.rating, Some(4.4));
        assert_eq!(record.reviews, Some(12304));
    }

    #[test]
    fn full_discount_without_prices_leaves_them_absent() {
        let record = reconcile(raw("", "", "100%"));
        assert_eq!(pricing(&record), (None, None, Some(100)));
    }

    #[test]
    fn garbled_prices_are_treated_as_missing() {
        let record = reconcile(raw("price on request", "see offers", "12"));
        assert_eq!(pricing(&record), (None, None, Some(12)));
    }

    #[test]
    fn reconciling_twice_changes_nothing() {
        let inputs = [
            raw("", "999", ""),
            raw("1000", "", "20"),
            raw("1000", "950", "20"),
            raw("1299", "999", ""),
            raw("500", "650", ""),
            raw("", "", "100"),
            raw("₹2,499", "₹1,874", "25% off"),
        ];
        for input in inputs {
            let once = reconcile(input);
            let twice = reconcile(once.to_raw());
            assert_eq!(pricing(&twice), pricing(&once), "{once:?}");
            assert_eq!(twice.rating, once.rating);
            assert_eq!(twice.reviews, once.reviews);
        }
    }

    #[test]
    fn reconciled_records_hold_invariants() {
        let inputs = [
            raw("1000", "100", "20"),
            raw("0", "0", "0"),
            raw("3000", "2999", "-5%"),
            raw("", "120", "60"),
            raw("799", "1299", ""),
        ];
        for input in inputs {
            let record = reconcile(input);
            if let (Some(mrp), Some(current), Some(discount)) =
                (record.mrp, record.current_price, record.discount)
            {
                let expected = expected_price(mrp, discount) as f64;
                assert!((current as f64 - expected).abs() <= PRICE_TOLERANCE * expected);
            }
            assert!(record.discount.unwrap_or_default() >= 0);
            let rating = record.rating.unwrap_or_default();
            assert!((0.0..=5.0).contains(&rating));
        }
    }
}
