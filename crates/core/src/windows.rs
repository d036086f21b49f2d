//! Time windows
//!
//! Appointments occupy half-open intervals of civil time within a single day.

use jiff::{SignedDuration, civil::Time};
use thiserror::Error;

/// Errors raised while building a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowError {
    /// The window would end at or before it starts.
    #[error("window must end after it starts")]
    Empty,

    /// The window would run past midnight.
    #[error("window crosses midnight")]
    CrossesMidnight,
}

/// A half-open `[start, end)` interval of civil time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeWindow {
    start: Time,
    end: Time,
}

impl TimeWindow {
    /// Create a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Empty`] when `end` is not after `start`.
    pub fn new(start: Time, end: Time) -> Result<Self, WindowError> {
        if end <= start {
            return Err(WindowError::Empty);
        }

        Ok(Self { start, end })
    }

    /// Create a window starting at `start` and lasting `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::CrossesMidnight`] when the end would fall on the next day and
    /// [`WindowError::Empty`] for non-positive durations.
    pub fn starting_at(start: Time, duration: SignedDuration) -> Result<Self, WindowError> {
        if !duration.is_positive() {
            return Err(WindowError::Empty);
        }

        let end = start
            .checked_add(duration)
            .map_err(|_overflow| WindowError::CrossesMidnight)?;

        Self::new(start, end)
    }

    /// Window start (inclusive).
    pub const fn start(&self) -> Time {
        self.start
    }

    /// Window end (exclusive).
    pub const fn end(&self) -> Time {
        self.end
    }

    /// Two half-open windows overlap iff each starts before the other ends.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `other` lies entirely inside this window.
    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn adjacent_windows_do_not_overlap() -> TestResult {
        let first = TimeWindow::new(time(10, 0, 0, 0), time(10, 30, 0, 0))?;
        let second = TimeWindow::new(time(10, 30, 0, 0), time(11, 0, 0, 0))?;

        assert!(!first.overlaps(&second), "touching windows must not overlap");
        assert!(!second.overlaps(&first), "overlap must be symmetric");

        Ok(())
    }

    #[test]
    fn partially_covering_windows_overlap() -> TestResult {
        let first = TimeWindow::new(time(10, 0, 0, 0), time(10, 45, 0, 0))?;
        let second = TimeWindow::new(time(10, 30, 0, 0), time(11, 0, 0, 0))?;

        assert!(first.overlaps(&second), "expected overlap");
        assert!(second.overlaps(&first), "overlap must be symmetric");

        Ok(())
    }

    #[test]
    fn starting_at_adds_duration() -> TestResult {
        let window = TimeWindow::starting_at(time(9, 30, 0, 0), SignedDuration::from_mins(45))?;

        assert_eq!(window.end(), time(10, 15, 0, 0));

        Ok(())
    }

    #[test]
    fn starting_at_rejects_midnight_crossing() {
        let result = TimeWindow::starting_at(time(23, 30, 0, 0), SignedDuration::from_mins(45));

        assert_eq!(result, Err(WindowError::CrossesMidnight));
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        let result = TimeWindow::new(time(11, 0, 0, 0), time(10, 0, 0, 0));

        assert_eq!(result, Err(WindowError::Empty));
    }
}
