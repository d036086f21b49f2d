//! Slot generation
//!
//! A slot is a candidate start time whose window is exactly one service long. Candidates are
//! enumerated from the barber's working hours at a fixed granularity and then marked
//! unavailable when they collide with a booking or have already started.

use jiff::{
    SignedDuration,
    civil::{Date, DateTime, Time},
};
use thiserror::Error;

use crate::{
    schedule::{ScheduleDay, TimeOff},
    windows::{TimeWindow, WindowError},
};

/// Default distance between candidate start times.
pub const DEFAULT_GRANULARITY: SignedDuration = SignedDuration::from_mins(30);

/// A single candidate start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Start time.
    pub time: Time,

    /// Whether the slot can currently be booked.
    pub available: bool,
}

/// Everything known about one barber on one date.
#[derive(Debug, Clone, Default)]
pub struct DayPlan {
    /// Weekly schedule row for the date's day of week, if any.
    pub schedule: Option<ScheduleDay>,

    /// Time-off ranges for the barber. Ranges not covering the date are ignored.
    pub time_off: Vec<TimeOff>,

    /// Windows of committed, non-cancelled bookings on the date.
    pub booked: Vec<TimeWindow>,
}

impl DayPlan {
    /// Working hours on `date`, or `None` when the barber is not working or is away.
    pub fn working_hours(&self, date: Date) -> Option<TimeWindow> {
        if self.time_off.iter().any(|away| away.covers(date)) {
            return None;
        }

        self.schedule.as_ref().and_then(ScheduleDay::working_hours)
    }

    fn is_booked(&self, window: &TimeWindow) -> bool {
        self.booked.iter().any(|booked| booked.overlaps(window))
    }
}

/// Why a requested window cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SlotRejection {
    /// The barber does not work on that day or is on time off.
    #[error("barber is not working on that date")]
    NotWorking,

    /// The window falls outside working hours.
    #[error("requested time is outside working hours")]
    OutsideHours,

    /// The window has already started.
    #[error("requested time has already passed")]
    InPast,

    /// The window overlaps an existing booking.
    #[error("requested time overlaps an existing booking")]
    Overlaps,

    /// The window is malformed.
    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Generates slots at a fixed granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGenerator {
    granularity: SignedDuration,
}

impl Default for SlotGenerator {
    fn default() -> Self {
        Self {
            granularity: DEFAULT_GRANULARITY,
        }
    }
}

impl SlotGenerator {
    /// Create a generator stepping by `granularity_minutes`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Empty`] for a zero granularity.
    pub fn new(granularity_minutes: u16) -> Result<Self, WindowError> {
        if granularity_minutes == 0 {
            return Err(WindowError::Empty);
        }

        Ok(Self {
            granularity: SignedDuration::from_mins(i64::from(granularity_minutes)),
        })
    }

    /// Enumerate slots for `date` in ascending order.
    ///
    /// Returns an empty list when the barber is not working that date. `now` is the current
    /// shop-local time; on `now`'s date, slots that have started are flagged unavailable, and
    /// on earlier dates every slot is.
    pub fn generate(
        &self,
        plan: &DayPlan,
        date: Date,
        duration: SignedDuration,
        now: DateTime,
    ) -> Vec<Slot> {
        let Some(hours) = plan.working_hours(date) else {
            return Vec::new();
        };

        if !duration.is_positive() {
            return Vec::new();
        }

        let mut slots = Vec::new();
        let mut start = hours.start();

        while let Ok(window) = TimeWindow::starting_at(start, duration) {
            if window.end() > hours.end() {
                break;
            }

            let available = !plan.is_booked(&window) && !has_started(date, start, now);

            slots.push(Slot {
                time: start,
                available,
            });

            match start.checked_add(self.granularity) {
                Ok(next) if next > start => start = next,
                _ => break,
            }
        }

        slots
    }

    /// Check that a specific window can be booked right now.
    ///
    /// Unlike [`Self::generate`], the start does not need to sit on the granularity grid.
    ///
    /// # Errors
    ///
    /// Returns the first [`SlotRejection`] that applies.
    pub fn check_window(
        &self,
        plan: &DayPlan,
        date: Date,
        start: Time,
        duration: SignedDuration,
        now: DateTime,
    ) -> Result<TimeWindow, SlotRejection> {
        let hours = plan.working_hours(date).ok_or(SlotRejection::NotWorking)?;
        let window = TimeWindow::starting_at(start, duration)?;

        if !hours.contains(&window) {
            return Err(SlotRejection::OutsideHours);
        }

        if has_started(date, start, now) {
            return Err(SlotRejection::InPast);
        }

        if plan.is_booked(&window) {
            return Err(SlotRejection::Overlaps);
        }

        Ok(window)
    }
}

fn has_started(date: Date, start: Time, now: DateTime) -> bool {
    date.to_datetime(start) <= now
}
