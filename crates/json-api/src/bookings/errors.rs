//! Booking Errors

use chairside::bookings::TransitionError;
use salvo::http::StatusError;
use tracing::error;

use chairside_app::domain::bookings::BookingsServiceError;

pub(crate) fn into_status_error(error: BookingsServiceError) -> StatusError {
    match error {
        BookingsServiceError::NotFound => StatusError::not_found().brief("Booking not found"),
        BookingsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Booking already exists")
        }
        BookingsServiceError::ServiceNotOffered => StatusError::unprocessable_entity()
            .brief("service_not_offered")
            .detail("The barber does not offer this service"),
        BookingsServiceError::SlotUnavailable => StatusError::conflict()
            .brief("slot_unavailable")
            .detail("The requested time is no longer available, pick another slot"),
        BookingsServiceError::DiscountIneligible(reason) => StatusError::unprocessable_entity()
            .brief("discount_ineligible")
            .detail(reason.as_str()),
        BookingsServiceError::Lifecycle(TransitionError::CancellationWindowClosed) => {
            StatusError::conflict()
                .brief("cancellation_window_closed")
                .detail("Bookings can only be cancelled more than 30 minutes before they start")
        }
        BookingsServiceError::Lifecycle(error @ TransitionError::InvalidTransition { .. }) => {
            StatusError::conflict()
                .brief("invalid_transition")
                .detail(error.to_string())
        }
        BookingsServiceError::Lifecycle(error @ TransitionError::PaymentAlreadySettled(_)) => {
            StatusError::conflict()
                .brief("payment_already_settled")
                .detail(error.to_string())
        }
        BookingsServiceError::CancellationRequired => StatusError::unprocessable_entity()
            .brief("cancellation_required")
            .detail("Use the cancel endpoint to cancel a booking"),
        BookingsServiceError::StatusChanged => StatusError::conflict()
            .brief("booking_changed")
            .detail("The booking changed while the request was processed, retry"),
        BookingsServiceError::InvalidTime(source) => StatusError::unprocessable_entity()
            .brief("invalid_time")
            .detail(source.to_string()),
        BookingsServiceError::InvalidReference
        | BookingsServiceError::MissingRequiredData
        | BookingsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid booking payload")
        }
        BookingsServiceError::Discount(source) => {
            error!("failed to calculate booking discount: {source}");

            StatusError::internal_server_error()
        }
        BookingsServiceError::Sql(source) => {
            error!("failed to persist booking: {source}");

            StatusError::internal_server_error()
        }
    }
}

/// Metric label for a failed booking attempt.
pub(crate) const fn outcome(error: &BookingsServiceError) -> &'static str {
    match error {
        BookingsServiceError::SlotUnavailable => "slot_unavailable",
        BookingsServiceError::DiscountIneligible(_) => "discount_ineligible",
        BookingsServiceError::ServiceNotOffered => "service_not_offered",
        BookingsServiceError::Sql(_) | BookingsServiceError::Discount(_) => "error",
        _ => "rejected",
    }
}

#[cfg(test)]
mod tests {
    use chairside::{bookings::BookingStatus, discounts::Ineligibility};
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn recoverable_errors_map_to_client_statuses() {
        let cases = [
            (BookingsServiceError::SlotUnavailable, StatusCode::CONFLICT),
            (
                BookingsServiceError::DiscountIneligible(Ineligibility::Expired),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                TransitionError::CancellationWindowClosed.into(),
                StatusCode::CONFLICT,
            ),
            (
                TransitionError::InvalidTransition {
                    from: BookingStatus::Completed,
                    to: BookingStatus::Confirmed,
                }
                .into(),
                StatusCode::CONFLICT,
            ),
            (BookingsServiceError::NotFound, StatusCode::NOT_FOUND),
            (
                BookingsServiceError::Sql(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let label = error.to_string();

            assert_eq!(
                into_status_error(error).code,
                expected,
                "unexpected status for {label}"
            );
        }
    }

    #[test]
    fn ineligible_discount_names_its_reason() {
        let status = into_status_error(BookingsServiceError::DiscountIneligible(
            Ineligibility::UsageExhausted,
        ));

        assert_eq!(status.brief, "discount_ineligible");
        assert_eq!(status.detail.as_deref(), Some("usage-exhausted"));
    }
}
