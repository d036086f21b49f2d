//! Schedules Repository

use chairside::schedule::{DayOfWeek, ScheduleDay, TimeOff};
use jiff_sqlx::{Date as SqlxDate, Time as SqlxTime, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::column_error,
    domain::{
        identities::BarberUuid,
        schedules::{
            data::{NewScheduleDay, NewTimeOff},
            records::{ScheduleDayRecord, ScheduleDayUuid, TimeOffRecord, TimeOffUuid},
        },
    },
};

const UPSERT_SCHEDULE_DAY_SQL: &str = include_str!("sql/upsert_schedule_day.sql");
const LIST_SCHEDULE_SQL: &str = include_str!("sql/list_schedule.sql");
const CREATE_TIME_OFF_SQL: &str = include_str!("sql/create_time_off.sql");
const LIST_TIME_OFF_SQL: &str = include_str!("sql/list_time_off.sql");
const DELETE_TIME_OFF_SQL: &str = include_str!("sql/delete_time_off.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSchedulesRepository;

impl PgSchedulesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn upsert_schedule_day(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        day: NewScheduleDay,
    ) -> Result<ScheduleDayRecord, sqlx::Error> {
        query_as::<Postgres, ScheduleDayRecord>(UPSERT_SCHEDULE_DAY_SQL)
            .bind(day.uuid.into_uuid())
            .bind(day.barber.into_uuid())
            .bind(i16::from(day.day.get()))
            .bind(SqlxTime::from(day.start_time))
            .bind(SqlxTime::from(day.end_time))
            .bind(day.is_available)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_schedule(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        barber: BarberUuid,
    ) -> Result<Vec<ScheduleDayRecord>, sqlx::Error> {
        query_as::<Postgres, ScheduleDayRecord>(LIST_SCHEDULE_SQL)
            .bind(barber.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_time_off(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        time_off: NewTimeOff,
    ) -> Result<TimeOffRecord, sqlx::Error> {
        query_as::<Postgres, TimeOffRecord>(CREATE_TIME_OFF_SQL)
            .bind(time_off.uuid.into_uuid())
            .bind(time_off.barber.into_uuid())
            .bind(SqlxDate::from(time_off.start_date))
            .bind(SqlxDate::from(time_off.end_date))
            .bind(time_off.reason)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_time_off(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        barber: BarberUuid,
    ) -> Result<Vec<TimeOffRecord>, sqlx::Error> {
        query_as::<Postgres, TimeOffRecord>(LIST_TIME_OFF_SQL)
            .bind(barber.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_time_off(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        time_off: TimeOffUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_TIME_OFF_SQL)
            .bind(time_off.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ScheduleDayRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let day = DayOfWeek::new(row.try_get("day_of_week")?)
            .map_err(|error| column_error("day_of_week", error))?;

        let day = ScheduleDay::new(
            day,
            row.try_get::<SqlxTime, _>("start_time")?.to_jiff(),
            row.try_get::<SqlxTime, _>("end_time")?.to_jiff(),
            row.try_get("is_available")?,
        )
        .map_err(|error| column_error("end_time", error))?;

        Ok(Self {
            uuid: ScheduleDayUuid::from_uuid(row.try_get("uuid")?),
            barber: BarberUuid::from_uuid(row.try_get("barber_uuid")?),
            day,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TimeOffRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let period = TimeOff::new(
            row.try_get::<SqlxDate, _>("start_date")?.to_jiff(),
            row.try_get::<SqlxDate, _>("end_date")?.to_jiff(),
        )
        .map_err(|error| column_error("end_date", error))?;

        Ok(Self {
            uuid: TimeOffUuid::from_uuid(row.try_get("uuid")?),
            barber: BarberUuid::from_uuid(row.try_get("barber_uuid")?),
            period,
            reason: row.try_get("reason")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
