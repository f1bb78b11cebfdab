//! Source of "today" for due-date status

use chrono::{Local, NaiveDate};

/// Supplies the current calendar date
pub trait Clock {
    /// Today's date
    fn today(&self) -> NaiveDate;
}

/// The local system date
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
