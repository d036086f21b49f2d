//! Bookings Data

use chairside::{
    bookings::{BookingStatus, PaymentStatus},
    pricing::Quote,
    windows::TimeWindow,
};
use jiff::{
    Timestamp,
    civil::{Date, Time},
};

use crate::domain::{
    bookings::records::BookingUuid,
    catalog::records::ServiceUuid,
    discounts::records::DiscountUuid,
    identities::{BarberUuid, CustomerUuid},
};

/// A customer's request for an appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub uuid: BookingUuid,
    pub barber: BarberUuid,
    pub customer: CustomerUuid,
    pub service: ServiceUuid,
    pub date: Date,
    pub start_time: Time,
    pub notes: Option<String>,
    pub discount_code: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct BookingInsert {
    pub uuid: BookingUuid,
    pub barber: BarberUuid,
    pub customer: CustomerUuid,
    pub service: ServiceUuid,
    pub date: Date,
    pub window: TimeWindow,
    pub quote: Quote,
    pub discount: Option<DiscountUuid>,
    pub notes: Option<String>,
}

/// A status change applied only if the booking is still in `from`.
#[derive(Debug, Clone)]
pub(crate) struct StatusChange {
    pub from: BookingStatus,
    pub to: BookingStatus,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<Timestamp>,
}

/// A payment settlement applied only if the payment is still in `from`.
#[derive(Debug, Clone)]
pub(crate) struct PaymentChange {
    pub from: PaymentStatus,
    pub to: PaymentStatus,
    pub status: StatusChange,
}
