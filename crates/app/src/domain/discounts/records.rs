//! Discount Records

use chairside::discounts::DiscountRule;
use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Discount UUID
pub type DiscountUuid = TypedUuid<DiscountRecord>;

/// Redemption marker.
#[derive(Debug)]
pub struct Redemption;

/// Redemption UUID
pub type RedemptionUuid = TypedUuid<Redemption>;

/// Discount Record
#[derive(Debug, Clone)]
pub struct DiscountRecord {
    pub uuid: DiscountUuid,
    pub code: String,
    pub name: String,
    pub rule: DiscountRule,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
