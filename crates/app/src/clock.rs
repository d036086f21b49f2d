//! Clocks
//!
//! Every "now" comparison goes through a [`Clock`] so services can be tested at fixed instants.
//! Appointment dates and times are civil times in the shop's time zone; [`ShopClock`] converts
//! between the two.

use std::{fmt::Debug, sync::Arc};

use jiff::{
    Timestamp,
    civil::{Date, DateTime, Time},
    tz::TimeZone,
};

/// Source of the current instant.
pub trait Clock: Debug + Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// A clock paired with the shop's time zone.
#[derive(Debug, Clone)]
pub struct ShopClock {
    clock: Arc<dyn Clock>,
    zone: TimeZone,
}

impl ShopClock {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, zone: TimeZone) -> Self {
        Self { clock, zone }
    }

    /// System clock in UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self::new(Arc::new(SystemClock), TimeZone::UTC)
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// The current civil time at the shop.
    #[must_use]
    pub fn local_now(&self) -> DateTime {
        self.now().to_zoned(self.zone.clone()).datetime()
    }

    /// The instant an appointment at `date` and `time` begins.
    ///
    /// # Errors
    ///
    /// Returns an error when the civil time cannot be represented in the shop's zone.
    pub fn instant_of(&self, date: Date, time: Time) -> Result<Timestamp, jiff::Error> {
        date.to_datetime(time)
            .to_zoned(self.zone.clone())
            .map(|zoned| zoned.timestamp())
    }
}
