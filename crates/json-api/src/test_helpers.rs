//! Test helpers.

use std::sync::Arc;

use chairside::{
    bookings::{BookingStatus, PaymentStatus},
    discounts::{DiscountKind, DiscountRule, DiscountScope},
    windows::TimeWindow,
};
use jiff::{
    Timestamp,
    civil::{date, time},
};
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;
use uuid::Uuid;

use chairside_app::{
    context::AppContext,
    domain::{
        bookings::{
            MockBookingsService,
            records::{BookingRecord, BookingUuid},
        },
        catalog::{MockCatalogService, records::ServiceUuid},
        discounts::{
            MockDiscountsService,
            records::{DiscountRecord, DiscountUuid},
        },
        identities::{BarberUuid, CustomerUuid},
        schedules::MockSchedulesService,
        slots::MockSlotsService,
    },
};

use crate::{callers::CallerTokens, customers::middleware, state::State};

pub(crate) const TEST_CUSTOMER_UUID: CustomerUuid = CustomerUuid::from_uuid(Uuid::from_u128(
    0x0190_c3d2_7a4b_7c1e_9f00_3a1b_2c3d_4e5f,
));

fn strict_schedules_mock() -> MockSchedulesService {
    let mut schedules = MockSchedulesService::new();

    schedules.expect_set_schedule_day().never();
    schedules.expect_list_schedule().never();
    schedules.expect_add_time_off().never();
    schedules.expect_list_time_off().never();
    schedules.expect_remove_time_off().never();

    schedules
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_create_service().never();
    catalog.expect_set_barber_price().never();
    catalog.expect_get_service_price().never();

    catalog
}

fn strict_slots_mock() -> MockSlotsService {
    let mut slots = MockSlotsService::new();

    slots.expect_generate_slots().never();

    slots
}

fn strict_discounts_mock() -> MockDiscountsService {
    let mut discounts = MockDiscountsService::new();

    discounts.expect_validate_discount().never();
    discounts.expect_recommend_discounts().never();
    discounts.expect_create_discount().never();

    discounts
}

fn strict_bookings_mock() -> MockBookingsService {
    let mut bookings = MockBookingsService::new();

    bookings.expect_create_booking().never();
    bookings.expect_get_booking().never();
    bookings.expect_cancel_booking().never();
    bookings.expect_transition_booking().never();
    bookings.expect_apply_payment_outcome().never();

    bookings
}

fn state(
    slots: MockSlotsService,
    discounts: MockDiscountsService,
    bookings: MockBookingsService,
) -> Arc<State> {
    State::new(
        AppContext {
            schedules: Arc::new(strict_schedules_mock()),
            catalog: Arc::new(strict_catalog_mock()),
            slots: Arc::new(slots),
            discounts: Arc::new(discounts),
            bookings: Arc::new(bookings),
        },
        CallerTokens::default(),
    )
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(middleware::optional)
            .push(route),
    )
}

pub(crate) fn slots_service(slots: MockSlotsService, route: Router) -> Service {
    service(
        state(slots, strict_discounts_mock(), strict_bookings_mock()),
        route,
    )
}

pub(crate) fn discounts_service(discounts: MockDiscountsService, route: Router) -> Service {
    service(
        state(strict_slots_mock(), discounts, strict_bookings_mock()),
        route,
    )
}

pub(crate) fn bookings_service(bookings: MockBookingsService, route: Router) -> Service {
    service(
        state(strict_slots_mock(), strict_discounts_mock(), bookings),
        route,
    )
}

/// A pending 10:00 to 10:30 booking on Monday 2030-01-07 owned by [`TEST_CUSTOMER_UUID`].
pub(crate) fn make_booking(uuid: BookingUuid) -> TestResult<BookingRecord> {
    Ok(BookingRecord {
        uuid,
        barber: BarberUuid::new(),
        customer: TEST_CUSTOMER_UUID,
        service: ServiceUuid::new(),
        date: date(2030, 1, 7),
        window: TimeWindow::new(time(10, 0, 0, 0), time(10, 30, 0, 0))?,
        status: BookingStatus::Pending,
        original_price: 100_000,
        discount: None,
        discount_amount: 0,
        total_price: 100_000,
        payment_status: PaymentStatus::Pending,
        payment_reference: None,
        notes: None,
        cancellation_reason: None,
        cancelled_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    })
}

pub(crate) fn make_discount(code: &str, kind: DiscountKind) -> DiscountRecord {
    DiscountRecord {
        uuid: DiscountUuid::new(),
        code: code.to_string(),
        name: code.to_lowercase(),
        rule: DiscountRule {
            kind,
            min_order_amount: 0,
            valid_from: None,
            valid_until: None,
            max_uses: None,
            max_uses_per_customer: None,
            usage_count: 0,
            is_active: true,
            scope: DiscountScope::All,
        },
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
