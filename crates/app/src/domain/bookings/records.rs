//! Booking Records

use chairside::{
    bookings::{BookingStatus, PaymentStatus},
    pricing::Quote,
    windows::TimeWindow,
};
use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{
        catalog::records::ServiceUuid,
        discounts::records::DiscountUuid,
        identities::{BarberUuid, CustomerUuid},
    },
    uuids::TypedUuid,
};

/// Booking UUID
pub type BookingUuid = TypedUuid<BookingRecord>;

/// Booking Record
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub uuid: BookingUuid,
    pub barber: BarberUuid,
    pub customer: CustomerUuid,
    pub service: ServiceUuid,

    /// Appointment date in the shop's time zone.
    pub date: Date,

    /// Appointment time on `date`, end exclusive.
    pub window: TimeWindow,

    pub status: BookingStatus,
    pub original_price: u64,
    pub discount: Option<DiscountUuid>,
    pub discount_amount: u64,
    pub total_price: u64,
    pub payment_status: PaymentStatus,

    /// Opaque reference issued by the payment gateway.
    pub payment_reference: Option<String>,

    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl BookingRecord {
    #[must_use]
    pub fn quote(&self) -> Quote {
        Quote {
            original_price: self.original_price,
            discount_amount: self.discount_amount,
            total_price: self.total_price,
        }
    }
}
