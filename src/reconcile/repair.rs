/// Allowed relative deviation of the observed price from the price implied
/// by MRP and discount.
pub const PRICE_TOLERANCE: f64 = 0.05;

/// MRP, current price and discount of one product.
///
/// Any two legs determine the third; the repair passes restore that
/// relation when legs are missing or disagree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub mrp: Option<i64>,
    pub current: Option<i64>,
    pub discount: Option<i64>,
}

impl Triangle {
    /// Fills and fixes what it can, in the fixed rule order.
    pub fn repair(mut self) -> Self {
        self.repair_missing_mrp();
        self.repair_negative_discount();
        self.fill_missing_leg();
        self.repair_negative_discount();
        self.correct_current();
        self
    }

    /// A positive price without an MRP is sold at list price.
    fn repair_missing_mrp(&mut self) {
        let mrp_missing = matches!(self.mrp, None | Some(0));
        if mrp_missing && matches!(self.current, Some(current) if current > 0) {
            self.mrp = self.current;
            self.discount = Some(0);
        }
    }

    fn repair_negative_discount(&mut self) {
        if matches!(self.discount, Some(d) if d < 0) && self.mrp.is_some() {
            self.current = self.mrp;
            self.discount = Some(0);
        }
    }

    /// Derives exactly one missing leg from the other two. Degenerate
    /// divisions leave the leg missing.
    fn fill_missing_leg(&mut self) {
        match (self.mrp, self.current, self.discount) {
            (Some(mrp), None, Some(discount)) => {
                self.current = Some(expected_price(mrp, discount));
            }
            (Some(mrp), Some(current), None) if mrp != 0 => {
                let discount = (mrp - current) as f64 / mrp as f64 * 100.0;
                self.discount = Some(discount.round_ties_even() as i64);
            }
            (None, Some(current), Some(discount)) if discount != 100 => {
                let mrp = current as f64 / (1.0 - discount as f64 / 100.0);
                self.mrp = Some(mrp.round_ties_even() as i64);
            }
            _ => {}
        }
    }

    /// MRP and discount outrank the observed price.
    fn correct_current(&mut self) {
        if let (Some(mrp), Some(current), Some(discount)) = (self.mrp, self.current, self.discount)
        {
            let expected = expected_price(mrp, discount);
            let lower = expected as f64 * (1.0 - PRICE_TOLERANCE);
            let upper = expected as f64 * (1.0 + PRICE_TOLERANCE);
            if !(lower..=upper).contains(&(current as f64)) {
                self.current = Some(expected);
            }
        }
    }
}

/// `round(mrp * (1 - discount / 100))`, halves going to the even neighbour.
pub fn expected_price(mrp: i64, discount: i64) -> i64 {
    (mrp as f64 * (1.0 - discount as f64 / 100.0)).round_ties_even() as i64
}

/// Zero-defaults for rating and review count. A missing side defaults to
/// zero whether or not the other side is known.
pub fn default_rating_reviews(
    rating: Option<f32>,
    reviews: Option<u64>,
) -> (Option<f32>, Option<u64>) {
    (Some(rating.unwrap_or(0.0)), Some(reviews.unwrap_or(0)))
}
