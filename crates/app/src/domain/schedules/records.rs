//! Schedule Records

use chairside::schedule::{ScheduleDay, TimeOff};
use jiff::Timestamp;

use crate::{domain::identities::BarberUuid, uuids::TypedUuid};

/// Schedule Day UUID
pub type ScheduleDayUuid = TypedUuid<ScheduleDayRecord>;

/// Time Off UUID
pub type TimeOffUuid = TypedUuid<TimeOffRecord>;

/// One weekday row of a barber's recurring schedule.
#[derive(Debug, Clone)]
pub struct ScheduleDayRecord {
    pub uuid: ScheduleDayUuid,
    pub barber: BarberUuid,
    pub day: ScheduleDay,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A range of dates a barber is away.
#[derive(Debug, Clone)]
pub struct TimeOffRecord {
    pub uuid: TimeOffUuid,
    pub barber: BarberUuid,
    pub period: TimeOff,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}
