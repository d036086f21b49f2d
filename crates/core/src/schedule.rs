//! Weekly schedules and time off.

use jiff::civil::{Date, Time, Weekday};
use thiserror::Error;

use crate::windows::{TimeWindow, WindowError};

/// Errors raised when building schedule data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Day of week must be in `0..=6`.
    #[error("day of week {0} is out of range")]
    DayOfWeek(i16),

    /// Working hours must end after they start.
    #[error("invalid working hours")]
    Hours(#[from] WindowError),

    /// Time off must end on or after the day it starts.
    #[error("time off ends before it starts")]
    TimeOffRange,
}

/// Day of week numbered from Sunday (`0`) to Saturday (`6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayOfWeek(i8);

impl DayOfWeek {
    /// Build from a stored `0..=6` value.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::DayOfWeek`] for values outside `0..=6`.
    pub fn new(value: i16) -> Result<Self, ScheduleError> {
        i8::try_from(value)
            .ok()
            .filter(|day| (0..=6).contains(day))
            .map(Self)
            .ok_or(ScheduleError::DayOfWeek(value))
    }

    /// The day of week `date` falls on.
    pub fn of(date: Date) -> Self {
        Self::from(date.weekday())
    }

    /// Stored numeric value.
    pub const fn get(self) -> i8 {
        self.0
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        Self(weekday.to_sunday_zero_offset())
    }
}

/// A barber's working hours for one day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleDay {
    /// Day these hours apply to.
    pub day: DayOfWeek,

    /// Working hours.
    pub hours: TimeWindow,

    /// When `false` the barber does not work this day at all.
    pub is_available: bool,
}

impl ScheduleDay {
    /// Build a schedule row.
    ///
    /// # Errors
    ///
    /// Returns an error when `end` is not after `start`.
    pub fn new(
        day: DayOfWeek,
        start: Time,
        end: Time,
        is_available: bool,
    ) -> Result<Self, ScheduleError> {
        Ok(Self {
            day,
            hours: TimeWindow::new(start, end)?,
            is_available,
        })
    }

    /// Working hours if the barber works this day.
    pub fn working_hours(&self) -> Option<TimeWindow> {
        self.is_available.then_some(self.hours)
    }
}

/// An inclusive range of dates a barber is away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOff {
    start: Date,
    end: Date,
}

impl TimeOff {
    /// Build a time-off range covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::TimeOffRange`] when `end` precedes `start`.
    pub fn new(start: Date, end: Date) -> Result<Self, ScheduleError> {
        if end < start {
            return Err(ScheduleError::TimeOffRange);
        }

        Ok(Self { start, end })
    }

    /// First day away.
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last day away (inclusive).
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Whether the range includes `date`.
    pub fn covers(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}
