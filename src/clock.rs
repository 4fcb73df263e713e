//! Calendar day source used as the cache freshness key

use chrono::{Local, NaiveDate};

/// Produces today's day string (`YYYY-MM-DD`)
pub trait Clock: Send + Sync {
    fn today(&self) -> String;
}

/// Reads the day from the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> String {
        day_string(Local::now().date_naive())
    }
}

/// Always reports the same day
#[derive(Debug, Clone)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> String {
        day_string(self.0)
    }
}

/// Formats a date as the day string stored alongside cached content
pub fn day_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
