//! Cancel Booking Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chairside_app::domain::bookings::records::BookingUuid;

use crate::{
    bookings::{errors::into_status_error, handlers::get::customer_booking, models::BookingResponse},
    extensions::*,
    state::State,
};

/// Cancel Booking Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CancelBookingRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Read the optional cancellation body. An empty body cancels without a reason.
async fn cancel_request(req: &mut Request) -> Result<CancelBookingRequest, StatusError> {
    let payload = req
        .payload()
        .await
        .or_400("Invalid cancellation payload")?;

    if payload.iter().all(u8::is_ascii_whitespace) {
        return Ok(CancelBookingRequest::default());
    }

    serde_json::from_slice(payload).or_400("Invalid cancellation payload")
}

/// Cancel Booking Handler
///
/// Pending and confirmed bookings can be cancelled up to 30 minutes before they start.
#[endpoint(
    tags("bookings"),
    summary = "Cancel Booking",
    request_body = Option<CancelBookingRequest>,
    responses(
        (status_code = StatusCode::OK, description = "Booking cancelled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed cancellation body"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing customer identity"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::CONFLICT, description = "Cancellation window closed or booking not cancellable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let uuid = BookingUuid::from_uuid(booking.into_inner());

    customer_booking(state, uuid, customer).await?;

    let reason = cancel_request(req)
        .await?
        .reason
        .filter(|reason| !reason.trim().is_empty());

    let cancelled = state
        .app
        .bookings
        .cancel_booking(uuid, reason)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cancelled.into()))
}
