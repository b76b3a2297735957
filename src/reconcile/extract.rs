//! Turning scraped text into numbers.
//!
//! Every function here is total: text that cannot be read as the wanted
//! number yields `None`.

use regex::Regex;
use std::sync::LazyLock;

static RATING_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").unwrap());
static REVIEWS_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d,]*").unwrap());

/// Trims and collapses runs of whitespace into a single space.
///
/// Blank text becomes `None`.
pub fn normalize_text(text: Option<&str>) -> Option<String> {
    let text = text?.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Reads a price such as `₹1,299.00`, keeping digits and decimal points
/// and truncating to whole units.
pub fn extract_price(text: &str) -> Option<i64> {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let price = digits.parse::<f64>().ok()?;
    price.is_finite().then_some(price.trunc() as i64)
}

/// Reads a discount such as `-23% off` as a percentage. Sign and symbols
/// are dropped; anything above 100 is rejected.
pub fn extract_discount(text: &str) -> Option<i64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<i64>().ok().filter(|d| *d <= 100)
}

/// Reads the first number of a rating such as `4.3 out of 5 stars`.
pub fn extract_rating(text: &str) -> Option<f32> {
    let rating = RATING_PATTERN.find(text)?.as_str().parse::<f32>().ok()?;
    (0.0..=5.0).contains(&rating).then_some(rating)
}

/// Reads the first digit group of a review count such as `1,204 Ratings`.
pub fn extract_reviews(text: &str) -> Option<u64> {
    REVIEWS_PATTERN
        .find(text)?
        .as_str()
        .replace(',', "")
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(
            normalize_text(Some("  Apple \n iPhone\t15  ")).as_deref(),
            Some("Apple iPhone 15")
        );
        assert_eq!(normalize_text(Some(" \n ")), None);
        assert_eq!(normalize_text(None), None);
    }

    #[test]
    fn prices_drop_currency_and_separators() {
        assert_eq!(extract_price("₹1,299"), Some(1299));
        assert_eq!(extract_price("₹54,999.00"), Some(54999));
        assert_eq!(extract_price("₹1.299.00"), None);
        assert_eq!(extract_price("N/A"), None);
    }

    #[test]
    fn discount_ignores_sign_and_suffix() {
        assert_eq!(extract_discount("23% off"), Some(23));
        assert_eq!(extract_discount("-15%"), Some(15));
        assert_eq!(extract_discount("100%"), Some(100));
        assert_eq!(extract_discount("150% off"), None);
        assert_eq!(extract_discount("off"), None);
    }

    #[test]
    fn rating_takes_first_number() {
        assert_eq!(extract_rating("4.3 out of 5 stars"), Some(4.3));
        assert_eq!(extract_rating("4"), Some(4.0));
        assert_eq!(extract_rating("Rated 42"), None);
        assert_eq!(extract_rating("no rating"), None);
    }

    #[test]
    fn reviews_strip_commas() {
        assert_eq!(extract_reviews("1,204 Ratings & 98 Reviews"), Some(1204));
        assert_eq!(extract_reviews("(87)"), Some(87));
        assert_eq!(extract_reviews("no reviews yet"), None);
    }
}
