//! Booking Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chairside::bookings::BookingStatus;
use chairside_app::domain::bookings::records::BookingUuid;

use crate::{
    bookings::{errors::into_status_error, models::BookingResponse},
    extensions::*,
    state::State,
};

/// Booking Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookingStatusRequest {
    /// `confirmed`, `in_progress` or `completed`
    pub status: String,
}

/// Booking Status Handler
///
/// Moves a booking forward through its lifecycle. Cancellation has its own endpoint.
#[endpoint(
    tags("bookings"),
    summary = "Change Booking Status",
    responses(
        (status_code = StatusCode::OK, description = "Status changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid staff secret"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Cancellation requested"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    json: JsonBody<BookingStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = json
        .into_inner()
        .status
        .parse::<BookingStatus>()
        .or_400("unknown booking status")?;

    let updated = state
        .app
        .bookings
        .transition_booking(BookingUuid::from_uuid(booking.into_inner()), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use chairside::bookings::TransitionError;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use chairside_app::domain::bookings::{
        BookingsServiceError, MockBookingsService, records::BookingRecord,
    };

    use crate::test_helpers::{bookings_service, make_booking};

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        bookings_service(
            bookings,
            Router::with_path("bookings/{booking}/status").post(handler),
        )
    }

    fn only_transitions(bookings: &mut MockBookingsService) {
        bookings.expect_create_booking().never();
        bookings.expect_get_booking().never();
        bookings.expect_cancel_booking().never();
        bookings.expect_apply_payment_outcome().never();
    }

    #[tokio::test]
    async fn booking_moves_to_the_requested_status() -> TestResult {
        let uuid = BookingUuid::new();
        let confirmed = BookingRecord {
            status: BookingStatus::Confirmed,
            ..make_booking(uuid)?
        };

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_transition_booking()
            .once()
            .withf(move |requested, status| {
                *requested == uuid && *status == BookingStatus::Confirmed
            })
            .return_once(move |_, _| Ok(confirmed));

        only_transitions(&mut bookings);

        let mut res = TestClient::post(format!("http://example.com/bookings/{uuid}/status"))
            .json(&json!({ "status": "confirmed" }))
            .send(&make_service(bookings))
            .await;

        let body: BookingResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "confirmed");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_status_returns_400() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings.expect_transition_booking().never();
        only_transitions(&mut bookings);

        let res = TestClient::post(format!(
            "http://example.com/bookings/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "no_show" }))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn backwards_transition_returns_409() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_transition_booking()
            .once()
            .return_once(|_, _| {
                Err(TransitionError::InvalidTransition {
                    from: BookingStatus::Completed,
                    to: BookingStatus::InProgress,
                }
                .into())
            });

        only_transitions(&mut bookings);

        let res = TestClient::post(format!(
            "http://example.com/bookings/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "in_progress" }))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn cancelling_through_status_returns_422() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_transition_booking()
            .once()
            .return_once(|_, _| Err(BookingsServiceError::CancellationRequired));

        only_transitions(&mut bookings);

        let res = TestClient::post(format!(
            "http://example.com/bookings/{}/status",
            Uuid::now_v7()
        ))
        .json(&json!({ "status": "cancelled" }))
        .send(&make_service(bookings))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}
