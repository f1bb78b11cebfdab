//! Month view of due dates

use crate::core::models::DueDate;
use crate::core::RecordError;
use chrono::{Datelike, Months, NaiveDate};
use std::collections::BTreeMap;

/// Due dates of one calendar month, bucketed by day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    /// Year shown
    pub year: i32,
    /// Month shown (1-12)
    pub month: u32,
    /// Empty cells before the 1st in a Sunday-first week
    pub leading_blanks: u32,
    /// Number of days in the month
    pub days_in_month: u32,
    /// Due dates keyed by day of month; days without entries are absent
    pub days: BTreeMap<u32, Vec<DueDate>>,
}

impl CalendarMonth {
    /// First and last day of a month
    ///
    /// # Errors
    /// [`RecordError::InvalidMonth`] when the month is not 1-12 or the year is
    /// out of range
    pub fn bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), RecordError> {
        let invalid = || RecordError::InvalidMonth { year, month };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;
        Ok((first, last))
    }

    /// Lay out `due_dates` (already restricted to the month) on the grid
    pub(crate) fn build(
        year: i32,
        month: u32,
        due_dates: Vec<DueDate>,
    ) -> Result<Self, RecordError> {
        let (first, last) = Self::bounds(year, month)?;
        let mut days: BTreeMap<u32, Vec<DueDate>> = BTreeMap::new();
        for due in due_dates {
            days.entry(due.due_date.day()).or_default().push(due);
        }
        Ok(Self {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days_in_month: last.day(),
            days,
        })
    }

    /// Due dates on one day of the month
    #[must_use]
    pub fn on(&self, day: u32) -> &[DueDate] {
        self.days.get(&day).map_or(&[], Vec::as_slice)
    }

    /// Total due dates in the month
    #[must_use]
    pub fn total(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let (first, last) = CalendarMonth::bounds(2024, 2).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (_, last) = CalendarMonth::bounds(2025, 12).unwrap();
        assert_eq!(last.day(), 31);
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(
            CalendarMonth::bounds(2025, 13),
            Err(RecordError::InvalidMonth {
                year: 2025,
                month: 13
            })
        );
        assert!(CalendarMonth::bounds(2025, 0).is_err());
    }

    #[test]
    fn test_empty_month_layout() {
        // October 2025 starts on a Wednesday
        let month = CalendarMonth::build(2025, 10, Vec::new()).unwrap();
        assert_eq!(month.leading_blanks, 3);
        assert_eq!(month.days_in_month, 31);
        assert_eq!(month.total(), 0);
        assert!(month.on(15).is_empty());

        // June 2025 starts on a Sunday
        assert_eq!(CalendarMonth::build(2025, 6, Vec::new()).unwrap().leading_blanks, 0);
    }
}
