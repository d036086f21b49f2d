//! Get Booking Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use chairside_app::domain::{
    bookings::records::{BookingRecord, BookingUuid},
    identities::CustomerUuid,
};

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse},
    extensions::*,
    state::State,
};

/// Load a booking, hiding bookings that belong to other customers.
pub(crate) async fn customer_booking(
    state: &State,
    booking: BookingUuid,
    customer: CustomerUuid,
) -> Result<BookingRecord, StatusError> {
    let record = state
        .app
        .bookings
        .get_booking(booking)
        .await
        .map_err(into_status_error)?;

    if record.customer != customer {
        return Err(StatusError::not_found().brief("Booking not found"));
    }

    Ok(record)
}

/// Get Booking Handler
#[endpoint(
    tags("bookings"),
    summary = "Get Booking",
    responses(
        (status_code = StatusCode::OK, description = "Booking found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing customer identity"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let record =
        customer_booking(state, BookingUuid::from_uuid(booking.into_inner()), customer).await?;

    Ok(Json(record.into()))
}
