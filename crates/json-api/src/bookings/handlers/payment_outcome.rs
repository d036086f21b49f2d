//! Payment Outcome Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use chairside::bookings::PaymentOutcome;
use chairside_app::domain::bookings::records::BookingUuid;

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse},
    extensions::*,
    state::State,
};

/// Outcome reported by the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Outcome {
    Success,
    Pending,
    Failure,
}

impl From<Outcome> for PaymentOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => PaymentOutcome::Success,
            Outcome::Pending => PaymentOutcome::Pending,
            Outcome::Failure => PaymentOutcome::Failure,
        }
    }
}

/// Payment Outcome Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentOutcomeRequest {
    pub outcome: Outcome,
}

/// Payment Outcome Handler
///
/// Called by the payment gateway. A success confirms a pending booking, a failure cancels it.
/// Repeating an outcome is a no-op.
#[endpoint(
    tags("bookings"),
    summary = "Record Payment Outcome",
    responses(
        (status_code = StatusCode::OK, description = "Outcome recorded"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid gateway secret"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::CONFLICT, description = "A different outcome was already recorded"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    json: JsonBody<PaymentOutcomeRequest>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let outcome = json.into_inner().outcome;
    let uuid = BookingUuid::from_uuid(booking.into_inner());

    let updated = state
        .app
        .bookings
        .apply_payment_outcome(uuid, outcome.into())
        .await
        .map_err(into_status_error)?;

    info!(booking_uuid = %uuid, ?outcome, payment_status = %updated.payment_status, "payment outcome recorded");

    Ok(Json(updated.into()))
}
