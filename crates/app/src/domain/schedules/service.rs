//! Schedules service.

use async_trait::async_trait;
use chairside::schedule::{ScheduleDay, TimeOff};
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        identities::BarberUuid,
        schedules::{
            data::{NewScheduleDay, NewTimeOff},
            errors::SchedulesServiceError,
            records::{ScheduleDayRecord, TimeOffRecord, TimeOffUuid},
            repository::PgSchedulesRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgSchedulesService {
    db: Db,
    repository: PgSchedulesRepository,
}

impl PgSchedulesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSchedulesRepository::new(),
        }
    }
}

#[async_trait]
impl SchedulesService for PgSchedulesService {
    #[tracing::instrument(
        name = "schedules.service.set_schedule_day",
        skip(self, day),
        fields(barber_uuid = %day.barber, day_of_week = day.day.get()),
        err
    )]
    async fn set_schedule_day(
        &self,
        day: NewScheduleDay,
    ) -> Result<ScheduleDayRecord, SchedulesServiceError> {
        ScheduleDay::new(day.day, day.start_time, day.end_time, day.is_available)?;

        let mut tx = self.db.begin().await?;

        let record = self.repository.upsert_schedule_day(&mut tx, day).await?;

        tx.commit().await?;

        info!(schedule_day_uuid = %record.uuid, "schedule day saved");

        Ok(record)
    }

    async fn list_schedule(
        &self,
        barber: BarberUuid,
    ) -> Result<Vec<ScheduleDayRecord>, SchedulesServiceError> {
        let mut tx = self.db.begin().await?;

        let days = self.repository.list_schedule(&mut tx, barber).await?;

        tx.commit().await?;

        Ok(days)
    }

    #[tracing::instrument(
        name = "schedules.service.add_time_off",
        skip(self, time_off),
        fields(barber_uuid = %time_off.barber),
        err
    )]
    async fn add_time_off(
        &self,
        time_off: NewTimeOff,
    ) -> Result<TimeOffRecord, SchedulesServiceError> {
        TimeOff::new(time_off.start_date, time_off.end_date)?;

        let mut tx = self.db.begin().await?;

        let record = self.repository.create_time_off(&mut tx, time_off).await?;

        tx.commit().await?;

        info!(time_off_uuid = %record.uuid, "time off added");

        Ok(record)
    }

    async fn list_time_off(
        &self,
        barber: BarberUuid,
    ) -> Result<Vec<TimeOffRecord>, SchedulesServiceError> {
        let mut tx = self.db.begin().await?;

        let ranges = self.repository.list_time_off(&mut tx, barber).await?;

        tx.commit().await?;

        Ok(ranges)
    }

    #[tracing::instrument(
        name = "schedules.service.remove_time_off",
        skip(self),
        fields(time_off_uuid = %time_off),
        err
    )]
    async fn remove_time_off(&self, time_off: TimeOffUuid) -> Result<(), SchedulesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_time_off(&mut tx, time_off).await?;

        if rows_affected == 0 {
            return Err(SchedulesServiceError::NotFound);
        }

        tx.commit().await?;

        info!("time off removed");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SchedulesService: Send + Sync {
    /// Sets a barber's hours for one weekday, replacing any existing row for that day.
    async fn set_schedule_day(
        &self,
        day: NewScheduleDay,
    ) -> Result<ScheduleDayRecord, SchedulesServiceError>;

    /// Lists a barber's weekly schedule ordered by day of week.
    async fn list_schedule(
        &self,
        barber: BarberUuid,
    ) -> Result<Vec<ScheduleDayRecord>, SchedulesServiceError>;

    /// Records a range of dates the barber is away.
    async fn add_time_off(
        &self,
        time_off: NewTimeOff,
    ) -> Result<TimeOffRecord, SchedulesServiceError>;

    /// Lists a barber's time off ordered by start date.
    async fn list_time_off(
        &self,
        barber: BarberUuid,
    ) -> Result<Vec<TimeOffRecord>, SchedulesServiceError>;

    /// Removes a time-off range.
    async fn remove_time_off(&self, time_off: TimeOffUuid) -> Result<(), SchedulesServiceError>;
}
