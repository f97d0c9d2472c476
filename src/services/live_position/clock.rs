// Clock module
// Wall-clock source for the now marker

use chrono::{Local, NaiveDateTime};

/// Source of wall-clock time for the now marker.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
