//! Bookings Repository

use chairside::{
    bookings::{BookingStatus, PaymentStatus},
    windows::TimeWindow,
};
use jiff_sqlx::{Date as SqlxDate, Time as SqlxTime, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::{amount_from_db, amount_to_db, column_error},
    domain::{
        bookings::{
            data::{BookingInsert, PaymentChange, StatusChange},
            records::{BookingRecord, BookingUuid},
        },
        catalog::records::ServiceUuid,
        discounts::records::DiscountUuid,
        identities::{BarberUuid, CustomerUuid},
    },
};

const CREATE_BOOKING_SQL: &str = include_str!("sql/create_booking.sql");
const GET_BOOKING_SQL: &str = include_str!("sql/get_booking.sql");
const LOCK_BOOKING_SQL: &str = include_str!("sql/lock_booking.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const SETTLE_PAYMENT_SQL: &str = include_str!("sql/settle_payment.sql");
const ATTACH_PAYMENT_REFERENCE_SQL: &str = include_str!("sql/attach_payment_reference.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBookingsRepository;

impl PgBookingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingInsert,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(CREATE_BOOKING_SQL)
            .bind(booking.uuid.into_uuid())
            .bind(booking.barber.into_uuid())
            .bind(booking.customer.into_uuid())
            .bind(booking.service.into_uuid())
            .bind(SqlxDate::from(booking.date))
            .bind(SqlxTime::from(booking.window.start()))
            .bind(SqlxTime::from(booking.window.end()))
            .bind(amount_to_db("original_price", booking.quote.original_price)?)
            .bind(booking.discount.map(DiscountUuid::into_uuid))
            .bind(amount_to_db("discount_amount", booking.quote.discount_amount)?)
            .bind(amount_to_db("total_price", booking.quote.total_price)?)
            .bind(booking.notes)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(GET_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Read a booking and hold its row lock until the transaction ends.
    pub(crate) async fn lock_booking(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
    ) -> Result<BookingRecord, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(LOCK_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns `None` when the booking is no longer in `change.from`.
    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        change: StatusChange,
    ) -> Result<Option<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(UPDATE_STATUS_SQL)
            .bind(booking.into_uuid())
            .bind(change.from.as_str())
            .bind(change.to.as_str())
            .bind(change.cancellation_reason)
            .bind(change.cancelled_at.map(SqlxTimestamp::from))
            .fetch_optional(&mut **tx)
            .await
    }

    /// Returns `None` when the payment or booking status moved on.
    pub(crate) async fn settle_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        change: PaymentChange,
    ) -> Result<Option<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(SETTLE_PAYMENT_SQL)
            .bind(booking.into_uuid())
            .bind(change.from.as_str())
            .bind(change.to.as_str())
            .bind(change.status.from.as_str())
            .bind(change.status.to.as_str())
            .bind(change.status.cancellation_reason)
            .bind(change.status.cancelled_at.map(SqlxTimestamp::from))
            .fetch_optional(&mut **tx)
            .await
    }

    /// Returns `None` when a reference was already attached.
    pub(crate) async fn attach_payment_reference(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        booking: BookingUuid,
        reference: &str,
    ) -> Result<Option<BookingRecord>, sqlx::Error> {
        query_as::<Postgres, BookingRecord>(ATTACH_PAYMENT_REFERENCE_SQL)
            .bind(booking.into_uuid())
            .bind(reference)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for BookingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let window = TimeWindow::new(
            row.try_get::<SqlxTime, _>("start_time")?.to_jiff(),
            row.try_get::<SqlxTime, _>("end_time")?.to_jiff(),
        )
        .map_err(|error| column_error("end_time", error))?;

        let status = row
            .try_get::<String, _>("status")?
            .parse::<BookingStatus>()
            .map_err(|error| column_error("status", error))?;

        let payment_status = row
            .try_get::<String, _>("payment_status")?
            .parse::<PaymentStatus>()
            .map_err(|error| column_error("payment_status", error))?;

        Ok(Self {
            uuid: BookingUuid::from_uuid(row.try_get("uuid")?),
            barber: BarberUuid::from_uuid(row.try_get("barber_uuid")?),
            customer: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            service: ServiceUuid::from_uuid(row.try_get("service_uuid")?),
            date: row.try_get::<SqlxDate, _>("booking_date")?.to_jiff(),
            window,
            status,
            original_price: amount_from_db("original_price", row.try_get("original_price")?)?,
            discount: row
                .try_get::<Option<Uuid>, _>("discount_uuid")?
                .map(DiscountUuid::from_uuid),
            discount_amount: amount_from_db("discount_amount", row.try_get("discount_amount")?)?,
            total_price: amount_from_db("total_price", row.try_get("total_price")?)?,
            payment_status,
            payment_reference: row.try_get("payment_reference")?,
            notes: row.try_get("notes")?,
            cancellation_reason: row.try_get("cancellation_reason")?,
            cancelled_at: row
                .try_get::<Option<SqlxTimestamp>, _>("cancelled_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
