//! Create Booking Handler

use std::sync::Arc;

use jiff::civil::{Date, Time};
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use chairside_app::domain::{
    bookings::{data::NewBooking, records::BookingUuid},
    catalog::records::ServiceUuid,
    identities::{BarberUuid, CustomerUuid},
};

use crate::{
    bookings::{
        errors::{into_status_error, outcome},
        models::BookingResponse,
    },
    extensions::*,
    observability::observe_booking_attempt,
    state::State,
};

const NOTES_MAX_CHARS: usize = 1_000;
const DISCOUNT_CODE_MAX_CHARS: usize = 50;

/// Create Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBookingRequest {
    pub barber: Uuid,
    pub service: Uuid,

    /// `YYYY-MM-DD` in the shop's time zone
    pub date: String,

    /// `HH:MM` in the shop's time zone
    pub start_time: String,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub discount_code: Option<String>,
}

/// A request field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldError {
    field: &'static str,
    message: &'static str,
}

impl CreateBookingRequest {
    fn into_new_booking(self, customer: CustomerUuid) -> Result<NewBooking, Vec<FieldError>> {
        let mut errors = Vec::new();

        let date = self.date.trim().parse::<Date>().ok();

        if date.is_none() {
            errors.push(FieldError {
                field: "date",
                message: "must be a date formatted YYYY-MM-DD",
            });
        }

        let start_time = self.start_time.trim().parse::<Time>().ok();

        if start_time.is_none() {
            errors.push(FieldError {
                field: "start_time",
                message: "must be a time formatted HH:MM",
            });
        }

        let notes = non_blank(self.notes);

        if notes
            .as_ref()
            .is_some_and(|notes| notes.chars().count() > NOTES_MAX_CHARS)
        {
            errors.push(FieldError {
                field: "notes",
                message: "must be at most 1000 characters",
            });
        }

        let discount_code = non_blank(self.discount_code);

        if discount_code
            .as_ref()
            .is_some_and(|code| code.chars().count() > DISCOUNT_CODE_MAX_CHARS)
        {
            errors.push(FieldError {
                field: "discount_code",
                message: "must be at most 50 characters",
            });
        }

        match (date, start_time) {
            (Some(date), Some(start_time)) if errors.is_empty() => Ok(NewBooking {
                uuid: BookingUuid::new(),
                barber: BarberUuid::from_uuid(self.barber),
                customer,
                service: ServiceUuid::from_uuid(self.service),
                date,
                start_time,
                notes,
                discount_code,
            }),
            _ => Err(errors),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn validation_error(errors: &[FieldError]) -> StatusError {
    let detail = errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join("; ");

    StatusError::unprocessable_entity()
        .brief("validation_failed")
        .detail(detail)
}

/// Create Booking Handler
///
/// Re-checks the slot and discount against committed state and books the appointment. The
/// booking starts pending until the payment gateway reports an outcome.
#[endpoint(
    tags("bookings"),
    summary = "Create Booking",
    responses(
        (status_code = StatusCode::CREATED, description = "Booking created"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing customer identity"),
        (status_code = StatusCode::CONFLICT, description = "Slot no longer available"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid fields, ineligible discount or service not offered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let booking = json
        .into_inner()
        .into_new_booking(customer)
        .map_err(|errors| {
            observe_booking_attempt("invalid");

            validation_error(&errors)
        })?;

    let created = state
        .app
        .bookings
        .create_booking(booking)
        .await
        .map_err(|error| {
            observe_booking_attempt(outcome(&error));

            into_status_error(error)
        })?;

    observe_booking_attempt("created");

    info!(booking_uuid = %created.uuid, "booking accepted");

    res.add_header(LOCATION, format!("/bookings/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}
