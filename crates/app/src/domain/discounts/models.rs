//! Discount Models

use chairside::{discounts::Recommendation, pricing::Quote};

use crate::domain::discounts::records::DiscountRecord;

/// A discount that applies, with the price it produces.
#[derive(Debug, Clone)]
pub struct AppliedDiscount {
    pub discount: DiscountRecord,
    pub quote: Quote,
}

/// A discount evaluated for a prospective booking.
pub type DiscountRecommendation = Recommendation<DiscountRecord>;
