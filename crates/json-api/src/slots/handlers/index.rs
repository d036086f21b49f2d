//! Slot Index Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use chairside::slots::Slot;
use chairside_app::domain::{catalog::records::ServiceUuid, identities::BarberUuid};

use crate::{extensions::*, slots::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SlotResponse {
    /// Start time, `HH:MM` in the shop's time zone
    pub time: String,

    /// Whether the slot can be booked right now
    pub available: bool,
}

impl From<Slot> for SlotResponse {
    fn from(slot: Slot) -> Self {
        Self {
            time: slot.time.strftime("%H:%M").to_string(),
            available: slot.available,
        }
    }
}

/// Slot Index Handler
///
/// Lists candidate start times for a service with a barber on a date. An empty list means the
/// barber is not working that day.
#[endpoint(
    tags("slots"),
    summary = "List Slots",
    responses(
        (status_code = StatusCode::OK, description = "Slots in ascending order"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed query"),
        (status_code = StatusCode::NOT_FOUND, description = "Service not offered by this barber"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    barber: PathParam<Uuid>,
    date: QueryParam<String, true>,
    service: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<Vec<SlotResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let date = date
        .into_inner()
        .parse::<Date>()
        .or_400("date must be formatted YYYY-MM-DD")?;

    let slots = state
        .app
        .slots
        .generate_slots(
            BarberUuid::from_uuid(barber.into_inner()),
            date,
            ServiceUuid::from_uuid(service.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(slots.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use chairside_app::domain::slots::{MockSlotsService, SlotsServiceError};

    use crate::test_helpers::slots_service;

    use super::*;

    fn make_service(slots: MockSlotsService) -> Service {
        slots_service(slots, Router::with_path("barbers/{barber}/slots").get(handler))
    }

    #[tokio::test]
    async fn slots_are_listed_with_availability() -> TestResult {
        let barber = Uuid::now_v7();
        let service = Uuid::now_v7();

        let mut slots = MockSlotsService::new();

        slots
            .expect_generate_slots()
            .once()
            .withf(move |b, d, s| {
                b.into_uuid() == barber && *d == date(2030, 1, 7) && s.into_uuid() == service
            })
            .return_once(|_, _, _| {
                Ok(vec![
                    Slot {
                        time: time(9, 30, 0, 0),
                        available: true,
                    },
                    Slot {
                        time: time(10, 0, 0, 0),
                        available: false,
                    },
                ])
            });

        let mut res = TestClient::get(format!(
            "http://example.com/barbers/{barber}/slots?date=2030-01-07&service={service}"
        ))
        .send(&make_service(slots))
        .await;

        let body: Vec<SlotResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 2);
        assert_eq!(body.first().map(|slot| slot.time.as_str()), Some("09:30"));
        assert_eq!(body.get(1).map(|slot| slot.available), Some(false));

        Ok(())
    }

    #[tokio::test]
    async fn day_off_returns_an_empty_list() -> TestResult {
        let mut slots = MockSlotsService::new();

        slots
            .expect_generate_slots()
            .once()
            .return_once(|_, _, _| Ok(Vec::new()));

        let mut res = TestClient::get(format!(
            "http://example.com/barbers/{}/slots?date=2030-01-07&service={}",
            Uuid::now_v7(),
            Uuid::now_v7()
        ))
        .send(&make_service(slots))
        .await;

        let body: Vec<SlotResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.is_empty(), "expected no slots on a day off");

        Ok(())
    }

    #[tokio::test]
    async fn malformed_date_returns_400() -> TestResult {
        let mut slots = MockSlotsService::new();

        slots.expect_generate_slots().never();

        let res = TestClient::get(format!(
            "http://example.com/barbers/{}/slots?date=07-01-2030&service={}",
            Uuid::now_v7(),
            Uuid::now_v7()
        ))
        .send(&make_service(slots))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_service_returns_404() -> TestResult {
        let mut slots = MockSlotsService::new();

        slots
            .expect_generate_slots()
            .once()
            .return_once(|_, _, _| Err(SlotsServiceError::ServiceNotFound));

        let res = TestClient::get(format!(
            "http://example.com/barbers/{}/slots?date=2030-01-07&service={}",
            Uuid::now_v7(),
            Uuid::now_v7()
        ))
        .send(&make_service(slots))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
