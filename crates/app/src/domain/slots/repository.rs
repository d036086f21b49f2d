//! Day plan repository
//!
//! Reads everything the slot generator needs to know about one barber on one date.

use chairside::{schedule::DayOfWeek, slots::DayPlan, windows::TimeWindow};
use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Time as SqlxTime};
use sqlx::{Postgres, Row, Transaction, query, query_as};

use crate::{
    database::column_error,
    domain::{
        identities::BarberUuid,
        schedules::records::{ScheduleDayRecord, TimeOffRecord},
    },
};

const GET_SCHEDULE_DAY_SQL: &str = include_str!("sql/get_schedule_day.sql");
const LIST_TIME_OFF_COVERING_SQL: &str = include_str!("sql/list_time_off_covering.sql");
const LIST_BOOKED_WINDOWS_SQL: &str = include_str!("sql/list_booked_windows.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDayPlanRepository;

impl PgDayPlanRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn load_day_plan(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        barber: BarberUuid,
        date: Date,
    ) -> Result<DayPlan, sqlx::Error> {
        let schedule = query_as::<Postgres, ScheduleDayRecord>(GET_SCHEDULE_DAY_SQL)
            .bind(barber.into_uuid())
            .bind(i16::from(DayOfWeek::of(date).get()))
            .fetch_optional(&mut **tx)
            .await?
            .map(|record| record.day);

        let time_off = query_as::<Postgres, TimeOffRecord>(LIST_TIME_OFF_COVERING_SQL)
            .bind(barber.into_uuid())
            .bind(SqlxDate::from(date))
            .fetch_all(&mut **tx)
            .await?
            .into_iter()
            .map(|record| record.period)
            .collect();

        let booked = query(LIST_BOOKED_WINDOWS_SQL)
            .bind(barber.into_uuid())
            .bind(SqlxDate::from(date))
            .fetch_all(&mut **tx)
            .await?
            .iter()
            .map(|row| {
                TimeWindow::new(
                    row.try_get::<SqlxTime, _>("start_time")?.to_jiff(),
                    row.try_get::<SqlxTime, _>("end_time")?.to_jiff(),
                )
                .map_err(|error| column_error("end_time", error))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DayPlan {
            schedule,
            time_off,
            booked,
        })
    }
}
