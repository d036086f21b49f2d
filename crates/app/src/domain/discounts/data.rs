//! Discounts Data

use chairside::discounts::{DiscountKind, DiscountScope};
use jiff::Timestamp;

use crate::domain::{
    bookings::records::BookingUuid,
    catalog::records::ServiceUuid,
    discounts::records::{DiscountUuid, RedemptionUuid},
    identities::{BarberUuid, CustomerUuid},
};

/// New Discount Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiscount {
    pub uuid: DiscountUuid,
    pub code: String,
    pub name: String,
    pub kind: DiscountKind,
    pub min_order_amount: u64,
    pub valid_from: Option<Timestamp>,
    pub valid_until: Option<Timestamp>,
    pub max_uses: Option<u32>,
    pub max_uses_per_customer: Option<u32>,
    pub is_active: bool,
    pub scope: DiscountScope,
}

/// A code checked against a prospective booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountRequest {
    pub code: String,
    pub barber: BarberUuid,
    pub service: ServiceUuid,
    pub original_price: u64,
    pub customer: CustomerUuid,
}

/// A prospective booking to find discounts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub barber: BarberUuid,
    pub service: ServiceUuid,
    pub original_price: u64,
    pub customer: Option<CustomerUuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewRedemption {
    pub uuid: RedemptionUuid,
    pub discount: DiscountUuid,
    pub customer: CustomerUuid,
    pub booking: BookingUuid,
    pub amount: u64,
}
