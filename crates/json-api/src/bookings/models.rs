//! Booking Models

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chairside_app::domain::bookings::records::BookingRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingResponse {
    pub uuid: Uuid,
    pub barber: Uuid,
    pub customer: Uuid,
    pub service: Uuid,

    /// Appointment date, `YYYY-MM-DD` in the shop's time zone
    pub date: String,

    /// `HH:MM`
    pub start_time: String,

    /// `HH:MM`, exclusive
    pub end_time: String,

    /// `pending`, `confirmed`, `in_progress`, `completed` or `cancelled`
    pub status: String,

    /// Price before discount, in minor units
    pub original_price: u64,

    pub discount: Option<Uuid>,
    pub discount_amount: u64,

    /// Amount owed, in minor units
    pub total_price: u64,

    /// `pending`, `paid` or `failed`
    pub payment_status: String,

    pub payment_reference: Option<String>,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BookingRecord> for BookingResponse {
    fn from(booking: BookingRecord) -> Self {
        Self {
            uuid: booking.uuid.into_uuid(),
            barber: booking.barber.into_uuid(),
            customer: booking.customer.into_uuid(),
            service: booking.service.into_uuid(),
            date: booking.date.to_string(),
            start_time: booking.window.start().strftime("%H:%M").to_string(),
            end_time: booking.window.end().strftime("%H:%M").to_string(),
            status: booking.status.to_string(),
            original_price: booking.original_price,
            discount: booking.discount.map(|discount| discount.into_uuid()),
            discount_amount: booking.discount_amount,
            total_price: booking.total_price,
            payment_status: booking.payment_status.to_string(),
            payment_reference: booking.payment_reference,
            notes: booking.notes,
            cancellation_reason: booking.cancellation_reason,
            cancelled_at: booking.cancelled_at.as_ref().map(ToString::to_string),
            created_at: booking.created_at.to_string(),
            updated_at: booking.updated_at.to_string(),
        }
    }
}
