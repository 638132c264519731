//! Time source abstraction
//!
//! Every write takes its timestamp from a [`Clock`], and rotation uses the
//! same clock to decide what "today" is. Production code uses [`SystemClock`];
//! tests inject a [`FixedClock`] so rotation boundaries are deterministic.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use std::sync::Mutex;

/// Source of the current date-time for writes and rotation.
pub trait Clock: Send + Sync {
    /// Current date-time (naive, UTC).
    fn now(&self) -> NaiveDateTime;

    /// Current calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall clock, in UTC so "today" is unambiguous for archive naming.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// Manually controlled clock for tests.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    /// Create a clock pinned to the given instant.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock().unwrap() = now;
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, delta: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock_set_and_advance() {
        let start = NaiveDate::from_ymd_opt(2018, 10, 22)
            .unwrap()
            .and_hms_opt(17, 49, 10)
            .unwrap();
        let clock = FixedClock::new(start);

        assert_eq!(clock.now(), start);
        assert_eq!(clock.today(), start.date());

        clock.advance(chrono::Duration::days(1));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2018, 10, 23).unwrap());

        let later = start + chrono::Duration::hours(3);
        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
