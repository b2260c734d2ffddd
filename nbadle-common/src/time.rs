//! Calendar utilities
//!
//! The daily answer is keyed by the server's local calendar day. The
//! [`Clock`] trait lets the selector be driven across day boundaries in tests.

use chrono::{Days, Local, NaiveDate};
use std::sync::Mutex;

/// Source of "today" for the daily selection cache
pub trait Clock: Send + Sync {
    /// Current calendar day
    fn today(&self) -> NaiveDate;

    /// Current calendar day as a cache key (`YYYY-MM-DD`)
    fn today_key(&self) -> String {
        day_key(self.today())
    }
}

/// Wall clock in the server's local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock
///
/// Holds a settable calendar day. Used by tests to simulate day rollover.
#[derive(Debug)]
pub struct FixedClock {
    day: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day: Mutex::new(day),
        }
    }

    /// Jump to an arbitrary day
    pub fn set(&self, day: NaiveDate) {
        *self.day.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = day;
    }

    /// Move forward by `days` calendar days
    pub fn advance_days(&self, days: u64) {
        let mut day = self.day.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(next) = day.checked_add_days(Days::new(days)) {
            *day = next;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.day.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Format a calendar day as a cache key
pub fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
