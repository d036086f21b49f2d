//! Bookings service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use chairside::{
    bookings::{BookingStatus, PaymentOutcome, settle_payment},
    discounts::Ineligibility,
    pricing::Quote,
    slots::SlotGenerator,
};
use mockall::automock;
use tracing::{error, info, warn};

use crate::{
    clock::ShopClock,
    database::Db,
    domain::{
        bookings::{
            data::{BookingInsert, NewBooking, PaymentChange, StatusChange},
            errors::BookingsServiceError,
            records::{BookingRecord, BookingUuid},
            repository::PgBookingsRepository,
        },
        catalog::repository::PgCatalogRepository,
        discounts::{
            data::{DiscountRequest, NewRedemption},
            evaluate_code,
            records::RedemptionUuid,
            repository::PgDiscountsRepository,
        },
        slots::repository::PgDayPlanRepository,
    },
    payments::{PaymentGateway, PaymentRequest},
};

const PAYMENT_FAILED_REASON: &str = "payment failed";

#[derive(Clone)]
pub struct PgBookingsService {
    db: Db,
    bookings: PgBookingsRepository,
    plans: PgDayPlanRepository,
    catalog: PgCatalogRepository,
    discounts: PgDiscountsRepository,
    generator: SlotGenerator,
    clock: ShopClock,
    payments: Arc<dyn PaymentGateway>,
}

impl fmt::Debug for PgBookingsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgBookingsService")
            .field("db", &self.db)
            .field("generator", &self.generator)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl PgBookingsService {
    #[must_use]
    pub fn new(
        db: Db,
        generator: SlotGenerator,
        clock: ShopClock,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            db,
            bookings: PgBookingsRepository::new(),
            plans: PgDayPlanRepository::new(),
            catalog: PgCatalogRepository::new(),
            discounts: PgDiscountsRepository::new(),
            generator,
            clock,
            payments,
        }
    }

    /// Ask the gateway for a payment reference and store it.
    ///
    /// Runs after the booking has committed. Failures leave the booking pending without a
    /// reference.
    async fn request_payment(&self, booking: BookingRecord) -> BookingRecord {
        let request = PaymentRequest {
            booking: booking.uuid,
            amount: booking.total_price,
        };

        let reference = match self.payments.request_payment(request).await {
            Ok(reference) => reference,
            Err(error) => {
                warn!(
                    booking_uuid = %booking.uuid,
                    error = %error,
                    "payment reference request failed, booking left pending"
                );

                return booking;
            }
        };

        match self.store_payment_reference(booking.uuid, &reference.0).await {
            Ok(Some(updated)) => updated,
            Ok(None) => booking,
            Err(error) => {
                error!(
                    booking_uuid = %booking.uuid,
                    error = %error,
                    "failed to store payment reference"
                );

                booking
            }
        }
    }

    async fn store_payment_reference(
        &self,
        booking: BookingUuid,
        reference: &str,
    ) -> Result<Option<BookingRecord>, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .bookings
            .attach_payment_reference(&mut tx, booking, reference)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[async_trait]
impl BookingsService for PgBookingsService {
    #[tracing::instrument(
        name = "bookings.service.create_booking",
        skip(self, booking),
        fields(
            booking_uuid = %booking.uuid,
            barber_uuid = %booking.barber,
            service_uuid = %booking.service,
            date = %booking.date,
            start_time = %booking.start_time,
        ),
        err
    )]
    async fn create_booking(
        &self,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let now = self.clock.now();
        let mut tx = self.db.begin().await?;

        let priced = self
            .catalog
            .get_priced_service(&mut tx, booking.service, booking.barber)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => BookingsServiceError::ServiceNotOffered,
                error => error.into(),
            })?;

        let plan = self
            .plans
            .load_day_plan(&mut tx, booking.barber, booking.date)
            .await?;

        let window = self
            .generator
            .check_window(
                &plan,
                booking.date,
                booking.start_time,
                priced.service.duration(),
                self.clock.local_now(),
            )
            .map_err(|rejection| {
                warn!(reason = %rejection, "requested window is not bookable");

                BookingsServiceError::SlotUnavailable
            })?;

        let original_price = priced.price.resolve();

        let applied = match &booking.discount_code {
            Some(code) => {
                let request = DiscountRequest {
                    code: code.clone(),
                    barber: booking.barber,
                    service: booking.service,
                    original_price,
                    customer: booking.customer,
                };

                let applied = evaluate_code(&self.discounts, &mut tx, &request, now)
                    .await
                    .inspect_err(|error| warn!(error = %error, "discount rejected"))?;

                Some(applied)
            }
            None => None,
        };

        let quote = applied
            .as_ref()
            .map_or(Quote::undiscounted(original_price), |applied| applied.quote);

        let created = self
            .bookings
            .create_booking(
                &mut tx,
                BookingInsert {
                    uuid: booking.uuid,
                    barber: booking.barber,
                    customer: booking.customer,
                    service: booking.service,
                    date: booking.date,
                    window,
                    quote,
                    discount: applied.as_ref().map(|applied| applied.discount.uuid),
                    notes: booking.notes,
                },
            )
            .await
            .map_err(BookingsServiceError::from)
            .inspect_err(|error| {
                if matches!(error, BookingsServiceError::SlotUnavailable) {
                    warn!("slot taken by a concurrent booking");
                }
            })?;

        if let Some(applied) = &applied {
            let discount = applied.discount.uuid;

            if self.discounts.increment_usage(&mut tx, discount).await? == 0 {
                warn!(discount_uuid = %discount, "discount used up by a concurrent booking");

                return Err(BookingsServiceError::DiscountIneligible(
                    Ineligibility::UsageExhausted,
                ));
            }

            self.discounts
                .create_redemption(
                    &mut tx,
                    NewRedemption {
                        uuid: RedemptionUuid::new(),
                        discount,
                        customer: booking.customer,
                        booking: created.uuid,
                        amount: quote.discount_amount,
                    },
                )
                .await?;

            // The usage increment holds the discount's row lock, so this count includes every
            // committed competitor.
            if let Some(limit) = applied.discount.rule.max_uses_per_customer {
                let redeemed = self
                    .discounts
                    .count_customer_redemptions(&mut tx, discount, booking.customer)
                    .await?;

                if redeemed > limit {
                    warn!(discount_uuid = %discount, "customer limit reached concurrently");

                    return Err(BookingsServiceError::DiscountIneligible(
                        Ineligibility::CustomerLimitReached,
                    ));
                }
            }
        }

        tx.commit().await?;

        info!(
            total_price = created.total_price,
            discount_amount = created.discount_amount,
            "booking created"
        );

        Ok(self.request_payment(created).await)
    }

    async fn get_booking(&self, booking: BookingUuid) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.bookings.get_booking(&mut tx, booking).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "bookings.service.cancel_booking",
        skip(self, reason),
        fields(booking_uuid = %booking),
        err
    )]
    async fn cancel_booking(
        &self,
        booking: BookingUuid,
        reason: Option<String>,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let now = self.clock.now();
        let mut tx = self.db.begin().await?;

        let current = self.bookings.get_booking(&mut tx, booking).await?;

        let start = self
            .clock
            .instant_of(current.date, current.window.start())
            .map_err(BookingsServiceError::InvalidTime)?;

        let next = current.status.cancel(start, now)?;

        let updated = self
            .bookings
            .update_status(
                &mut tx,
                booking,
                StatusChange {
                    from: current.status,
                    to: next,
                    cancellation_reason: reason,
                    cancelled_at: Some(now),
                },
            )
            .await?
            .ok_or(BookingsServiceError::StatusChanged)?;

        tx.commit().await?;

        info!(previous_status = %current.status, "booking cancelled");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "bookings.service.transition_booking",
        skip(self),
        fields(booking_uuid = %booking, status = %status),
        err
    )]
    async fn transition_booking(
        &self,
        booking: BookingUuid,
        status: BookingStatus,
    ) -> Result<BookingRecord, BookingsServiceError> {
        if status == BookingStatus::Cancelled {
            return Err(BookingsServiceError::CancellationRequired);
        }

        let mut tx = self.db.begin().await?;

        let current = self.bookings.get_booking(&mut tx, booking).await?;
        let next = current.status.transition(status)?;

        let updated = self
            .bookings
            .update_status(
                &mut tx,
                booking,
                StatusChange {
                    from: current.status,
                    to: next,
                    cancellation_reason: None,
                    cancelled_at: None,
                },
            )
            .await?
            .ok_or(BookingsServiceError::StatusChanged)?;

        tx.commit().await?;

        info!(previous_status = %current.status, "booking status changed");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "bookings.service.apply_payment_outcome",
        skip(self),
        fields(booking_uuid = %booking, outcome = ?outcome),
        err
    )]
    async fn apply_payment_outcome(
        &self,
        booking: BookingUuid,
        outcome: PaymentOutcome,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.bookings.lock_booking(&mut tx, booking).await?;

        let Some(settlement) = settle_payment(current.payment_status, current.status, outcome)?
        else {
            tx.commit().await?;

            return Ok(current);
        };

        let cancelled_here =
            settlement.booking == BookingStatus::Cancelled && current.status != settlement.booking;

        let updated = self
            .bookings
            .settle_payment(
                &mut tx,
                booking,
                PaymentChange {
                    from: current.payment_status,
                    to: settlement.payment,
                    status: StatusChange {
                        from: current.status,
                        to: settlement.booking,
                        cancellation_reason: cancelled_here
                            .then(|| PAYMENT_FAILED_REASON.to_string()),
                        cancelled_at: cancelled_here.then(|| self.clock.now()),
                    },
                },
            )
            .await?
            .ok_or(BookingsServiceError::StatusChanged)?;

        tx.commit().await?;

        info!(
            payment_status = %updated.payment_status,
            status = %updated.status,
            "payment outcome applied"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Re-validates the slot and discount against committed state and books the appointment.
    ///
    /// The booking starts pending with pending payment. A payment reference is requested
    /// once the booking has committed.
    async fn create_booking(
        &self,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Retrieve a single booking.
    async fn get_booking(&self, booking: BookingUuid) -> Result<BookingRecord, BookingsServiceError>;

    /// Cancels a pending or confirmed booking more than 30 minutes before it starts.
    async fn cancel_booking(
        &self,
        booking: BookingUuid,
        reason: Option<String>,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Moves a booking forward through its lifecycle.
    async fn transition_booking(
        &self,
        booking: BookingUuid,
        status: BookingStatus,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Folds a payment gateway outcome into the booking. Repeating an outcome is a no-op.
    async fn apply_payment_outcome(
        &self,
        booking: BookingUuid,
        outcome: PaymentOutcome,
    ) -> Result<BookingRecord, BookingsServiceError>;
}

#[cfg(test)]
mod tests {
    use chairside::{
        bookings::{PaymentStatus, TransitionError},
        discounts::DiscountKind,
    };
    use jiff::civil::{Time, date, time};
    use testresult::TestResult;

    use crate::{
        domain::{
            catalog::{CatalogService, data::BarberPrice, records::ServiceUuid},
            discounts::DiscountsService,
            identities::{BarberUuid, CustomerUuid},
        },
        payments::{MockPaymentGateway, PaymentGatewayError},
        test::{MONDAY, TestContext, discount},
    };

    use super::*;

    fn request(barber: BarberUuid, service: ServiceUuid, start_time: Time) -> NewBooking {
        NewBooking {
            uuid: BookingUuid::new(),
            barber,
            customer: CustomerUuid::new(),
            service,
            date: MONDAY,
            start_time,
            notes: None,
            discount_code: None,
        }
    }

    #[tokio::test]
    async fn new_booking_is_pending_with_a_payment_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let booking = ctx
            .book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        assert_eq!(booking.window.end(), time(10, 30, 0, 0));
        assert_eq!(booking.quote(), Quote::undiscounted(100_000));
        assert_eq!(
            booking.payment_reference,
            Some(format!("pay_{}", booking.uuid))
        );

        let stored = ctx.bookings.get_booking(booking.uuid).await?;

        assert_eq!(stored.payment_reference, booking.payment_reference);

        Ok(())
    }

    #[tokio::test]
    async fn barber_price_and_discount_are_applied() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        ctx.catalog
            .set_barber_price(BarberPrice {
                barber: shop.barber,
                service: shop.service,
                custom_price: Some(120_000),
            })
            .await?;

        let welcome = ctx
            .discounts
            .create_discount(discount("WELCOME", DiscountKind::Fixed { amount: 20_000 }))
            .await?;

        let booking = ctx
            .book_with(
                CustomerUuid::new(),
                shop.barber,
                shop.service,
                MONDAY,
                time(9, 0, 0, 0),
                Some(" welcome "),
            )
            .await?;

        assert_eq!(booking.discount, Some(welcome.uuid));
        assert_eq!(booking.quote(), Quote::discounted(120_000, 20_000));
        assert_eq!(booking.total_price, 100_000);

        let usage_count: i32 =
            sqlx::query_scalar("SELECT usage_count FROM discounts WHERE uuid = $1")
                .bind(welcome.uuid.into_uuid())
                .fetch_one(ctx.db.pool())
                .await?;

        assert_eq!(usage_count, 1);

        Ok(())
    }

    #[tokio::test]
    async fn ineligible_discount_rejects_the_booking() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let result = ctx
            .bookings
            .create_booking(NewBooking {
                discount_code: Some("MISSING".to_string()),
                ..request(shop.barber, shop.service, time(9, 0, 0, 0))
            })
            .await;

        assert!(matches!(
            result,
            Err(BookingsServiceError::DiscountIneligible(
                Ineligibility::CodeNotFound
            ))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn overlapping_request_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        ctx.book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        let result = ctx
            .bookings
            .create_booking(request(shop.barber, shop.service, time(10, 15, 0, 0)))
            .await;

        assert!(matches!(result, Err(BookingsServiceError::SlotUnavailable)));

        // Back to back is fine.
        ctx.book(shop.barber, shop.service, MONDAY, time(10, 30, 0, 0))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn times_outside_working_hours_are_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let too_late = ctx
            .bookings
            .create_booking(request(shop.barber, shop.service, time(17, 45, 0, 0)))
            .await;

        assert!(matches!(too_late, Err(BookingsServiceError::SlotUnavailable)));

        let tuesday = ctx
            .bookings
            .create_booking(NewBooking {
                date: date(2030, 1, 8),
                ..request(shop.barber, shop.service, time(10, 0, 0, 0))
            })
            .await;

        assert!(matches!(tuesday, Err(BookingsServiceError::SlotUnavailable)));

        Ok(())
    }

    #[tokio::test]
    async fn service_the_barber_does_not_offer_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;
        let other = ctx.create_service("Beard trim", 20, 35_000).await?;

        for service in [other.uuid, ServiceUuid::new()] {
            let result = ctx
                .bookings
                .create_booking(request(shop.barber, service, time(10, 0, 0, 0)))
                .await;

            assert!(matches!(result, Err(BookingsServiceError::ServiceNotOffered)));
        }

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_requests_for_one_slot_book_it_once() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let (first, second) = tokio::join!(
            ctx.bookings
                .create_booking(request(shop.barber, shop.service, time(10, 0, 0, 0))),
            ctx.bookings
                .create_booking(request(shop.barber, shop.service, time(10, 0, 0, 0))),
        );

        let created = [&first, &second]
            .into_iter()
            .filter(|result| result.is_ok())
            .count();

        assert_eq!(created, 1, "exactly one booking should win the slot");
        assert!(
            [first, second]
                .into_iter()
                .any(|result| matches!(result, Err(BookingsServiceError::SlotUnavailable)))
        );

        Ok(())
    }

    #[tokio::test]
    async fn last_use_of_a_discount_goes_to_one_booking() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let mut last_one = discount("LASTONE", DiscountKind::Fixed { amount: 10_000 });
        last_one.max_uses = Some(1);

        let created = ctx.discounts.create_discount(last_one).await?;

        let with_code = |start_time| NewBooking {
            discount_code: Some("LASTONE".to_string()),
            ..request(shop.barber, shop.service, start_time)
        };

        let (first, second) = tokio::join!(
            ctx.bookings.create_booking(with_code(time(10, 0, 0, 0))),
            ctx.bookings.create_booking(with_code(time(11, 0, 0, 0))),
        );

        let outcomes = [first, second];

        assert_eq!(outcomes.iter().filter(|result| result.is_ok()).count(), 1);
        assert!(outcomes.iter().any(|result| matches!(
            result,
            Err(BookingsServiceError::DiscountIneligible(
                Ineligibility::UsageExhausted
            ))
        )));

        let usage_count: i32 =
            sqlx::query_scalar("SELECT usage_count FROM discounts WHERE uuid = $1")
                .bind(created.uuid.into_uuid())
                .fetch_one(ctx.db.pool())
                .await?;

        let bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(usage_count, 1);
        assert_eq!(bookings, 1, "the losing booking must be rolled back");

        Ok(())
    }

    #[tokio::test]
    async fn one_customer_cannot_redeem_twice_concurrently() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let mut once_each = discount("ONCE", DiscountKind::Fixed { amount: 10_000 });
        once_each.max_uses_per_customer = Some(1);

        let created = ctx.discounts.create_discount(once_each).await?;
        let customer = CustomerUuid::new();

        let with_code = |start_time| NewBooking {
            customer,
            discount_code: Some("ONCE".to_string()),
            ..request(shop.barber, shop.service, start_time)
        };

        let (first, second) = tokio::join!(
            ctx.bookings.create_booking(with_code(time(10, 0, 0, 0))),
            ctx.bookings.create_booking(with_code(time(11, 0, 0, 0))),
        );

        let outcomes = [first, second];

        assert_eq!(outcomes.iter().filter(|result| result.is_ok()).count(), 1);
        assert!(outcomes.iter().any(|result| matches!(
            result,
            Err(BookingsServiceError::DiscountIneligible(
                Ineligibility::CustomerLimitReached
            ))
        )));

        let redemptions: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM discount_redemptions WHERE discount_uuid = $1 AND customer_uuid = $2",
        )
        .bind(created.uuid.into_uuid())
        .bind(customer.into_uuid())
        .fetch_one(ctx.db.pool())
        .await?;

        let usage_count: i32 =
            sqlx::query_scalar("SELECT usage_count FROM discounts WHERE uuid = $1")
                .bind(created.uuid.into_uuid())
                .fetch_one(ctx.db.pool())
                .await?;

        assert_eq!(redemptions, 1);
        assert_eq!(usage_count, 1, "the losing redemption must be rolled back");

        Ok(())
    }

    #[tokio::test]
    async fn cancellation_ten_minutes_before_start_is_refused() -> TestResult {
        let ctx = TestContext::at("2030-01-07T09:50:00Z".parse()?).await;
        let shop = ctx.open_shop(30).await?;

        let booking = ctx
            .book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        let result = ctx.bookings.cancel_booking(booking.uuid, None).await;

        assert!(matches!(
            result,
            Err(BookingsServiceError::Lifecycle(
                TransitionError::CancellationWindowClosed
            ))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn cancellation_with_notice_records_reason_and_time() -> TestResult {
        let ctx = TestContext::at("2030-01-07T08:00:00Z".parse()?).await;
        let shop = ctx.open_shop(30).await?;

        let booking = ctx
            .book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        let cancelled = ctx
            .bookings
            .cancel_booking(booking.uuid, Some("running late".to_string()))
            .await?;

        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(cancelled.cancellation_reason.as_deref(), Some("running late"));
        assert_eq!(cancelled.cancelled_at, Some(ctx.now()));

        let again = ctx.bookings.cancel_booking(booking.uuid, None).await;

        assert!(matches!(
            again,
            Err(BookingsServiceError::Lifecycle(
                TransitionError::InvalidTransition { .. }
            ))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn lifecycle_runs_forward_to_completion() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let booking = ctx
            .book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        for status in [
            BookingStatus::Confirmed,
            BookingStatus::InProgress,
            BookingStatus::Completed,
        ] {
            let updated = ctx.bookings.transition_booking(booking.uuid, status).await?;

            assert_eq!(updated.status, status);
        }

        let backwards = ctx
            .bookings
            .transition_booking(booking.uuid, BookingStatus::Confirmed)
            .await;

        assert!(matches!(
            backwards,
            Err(BookingsServiceError::Lifecycle(
                TransitionError::InvalidTransition { .. }
            ))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn status_change_cannot_cancel() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let booking = ctx
            .book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        let result = ctx
            .bookings
            .transition_booking(booking.uuid, BookingStatus::Cancelled)
            .await;

        assert!(matches!(
            result,
            Err(BookingsServiceError::CancellationRequired)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn successful_payment_confirms_once() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let booking = ctx
            .book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        let paid = ctx
            .bookings
            .apply_payment_outcome(booking.uuid, PaymentOutcome::Success)
            .await?;

        assert_eq!(paid.payment_status, PaymentStatus::Paid);
        assert_eq!(paid.status, BookingStatus::Confirmed);

        let repeated = ctx
            .bookings
            .apply_payment_outcome(booking.uuid, PaymentOutcome::Success)
            .await?;

        assert_eq!(repeated.updated_at, paid.updated_at, "repeat must not write");

        let conflicting = ctx
            .bookings
            .apply_payment_outcome(booking.uuid, PaymentOutcome::Failure)
            .await;

        assert!(matches!(
            conflicting,
            Err(BookingsServiceError::Lifecycle(
                TransitionError::PaymentAlreadySettled(PaymentStatus::Paid)
            ))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn failed_payment_cancels_and_frees_the_slot() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let booking = ctx
            .book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        let failed = ctx
            .bookings
            .apply_payment_outcome(booking.uuid, PaymentOutcome::Failure)
            .await?;

        assert_eq!(failed.payment_status, PaymentStatus::Failed);
        assert_eq!(failed.status, BookingStatus::Cancelled);
        assert_eq!(
            failed.cancellation_reason.as_deref(),
            Some(PAYMENT_FAILED_REASON)
        );

        ctx.book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn failed_payment_leaves_a_confirmed_booking_in_place() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let booking = ctx
            .book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        ctx.bookings
            .transition_booking(booking.uuid, BookingStatus::Confirmed)
            .await?;

        let failed = ctx
            .bookings
            .apply_payment_outcome(booking.uuid, PaymentOutcome::Failure)
            .await?;

        assert_eq!(failed.payment_status, PaymentStatus::Failed);
        assert_eq!(failed.status, BookingStatus::Confirmed);
        assert_eq!(failed.cancellation_reason, None);
        assert_eq!(failed.cancelled_at, None);

        Ok(())
    }

    #[tokio::test]
    async fn pending_outcome_changes_nothing() -> TestResult {
        let ctx = TestContext::new().await;
        let shop = ctx.open_shop(30).await?;

        let booking = ctx
            .book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        let unchanged = ctx
            .bookings
            .apply_payment_outcome(booking.uuid, PaymentOutcome::Pending)
            .await?;

        assert_eq!(unchanged.payment_status, PaymentStatus::Pending);
        assert_eq!(unchanged.status, BookingStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn gateway_failure_leaves_the_booking_pending() -> TestResult {
        let mut gateway = MockPaymentGateway::new();

        gateway.expect_request_payment().times(1).returning(|_| {
            Err(PaymentGatewayError::UnexpectedResponse(
                "503 Service Unavailable".to_string(),
            ))
        });

        let ctx = TestContext::with_gateway(gateway).await;
        let shop = ctx.open_shop(30).await?;

        let booking = ctx
            .book(shop.barber, shop.service, MONDAY, time(10, 0, 0, 0))
            .await?;

        assert_eq!(booking.payment_reference, None);

        let stored = ctx.bookings.get_booking(booking.uuid).await?;

        assert_eq!(stored.payment_status, PaymentStatus::Pending);
        assert_eq!(stored.status, BookingStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_booking_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.bookings.get_booking(BookingUuid::new()).await;

        assert!(matches!(result, Err(BookingsServiceError::NotFound)));
    }
}
