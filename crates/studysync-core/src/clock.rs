//! Date providers.
//!
//! Everything date-relative takes "today" as an explicit argument. The
//! [`Clock`] trait is the seam the workspace uses to obtain it.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    /// Current local date-time, time zone already applied.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall clock in the process's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant. Used by tests and by the CLI `--today` flag.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self(now)
    }

    /// Midnight of the given date.
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
