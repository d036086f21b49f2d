//! Schedules Data

use chairside::schedule::DayOfWeek;
use jiff::civil::{Date, Time};

use crate::domain::{
    identities::BarberUuid,
    schedules::records::{ScheduleDayUuid, TimeOffUuid},
};

/// Working hours for one weekday. Replaces any existing row for that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleDay {
    pub uuid: ScheduleDayUuid,
    pub barber: BarberUuid,
    pub day: DayOfWeek,
    pub start_time: Time,
    pub end_time: Time,
    pub is_available: bool,
}

/// New Time Off Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTimeOff {
    pub uuid: TimeOffUuid,
    pub barber: BarberUuid,
    pub start_date: Date,
    pub end_date: Date,
    pub reason: Option<String>,
}
