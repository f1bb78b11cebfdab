//! Calendar command handler: one month of due dates

use super::load_gradebook;
use chrono::{Datelike, NaiveDate};
use grade_tracker::config::Config;
use grade_tracker::core::repository::CalendarMonth;
use std::path::Path;

/// Print a month grid followed by the due dates of each day
///
/// `month` is `YYYY-MM`; the current month is used when omitted.
///
/// # Returns
/// `false` if the month is malformed or the gradebook cannot be loaded
pub fn run(file: Option<&Path>, month: Option<&str>, config: &Config) -> bool {
    let Some(book) = load_gradebook(file, config) else {
        return false;
    };

    let (year, month) = match month {
        Some(text) => match parse_month(text) {
            Some(ym) => ym,
            None => {
                eprintln!("✗ Expected a month as YYYY-MM, got '{text}'");
                return false;
            }
        },
        None => {
            let today = book.due_dates.today();
            (today.year(), today.month())
        }
    };

    match book.due_dates.calendar_month(year, month) {
        Ok(calendar) => {
            print!("{}", render(&calendar, book.due_dates.today()));
            true
        }
        Err(e) => {
            eprintln!("✗ {e}");
            false
        }
    }
}

fn parse_month(text: &str) -> Option<(i32, u32)> {
    let (year, month) = text.trim().split_once('-')?;
    Some((year.parse().ok()?, month.parse().ok()?))
}

/// Sunday-first grid; days with due dates are marked with `*`
///
/// Entry statuses are computed as of `today`.
fn render(calendar: &CalendarMonth, today: NaiveDate) -> String {
    let mut out = format!("\n      {:04}-{:02}\n", calendar.year, calendar.month);
    out.push_str("Su  Mo  Tu  We  Th  Fr  Sa\n");

    let mut column = calendar.leading_blanks;
    out.push_str(&"    ".repeat(column as usize));
    for day in 1..=calendar.days_in_month {
        let mark = if calendar.on(day).is_empty() { ' ' } else { '*' };
        out.push_str(&format!("{day:>2}{mark} "));
        column += 1;
        if column % 7 == 0 {
            out.push('\n');
        }
    }
    if column % 7 != 0 {
        out.push('\n');
    }

    for (day, entries) in &calendar.days {
        out.push_str(&format!("\n{:04}-{:02}-{day:02}\n", calendar.year, calendar.month));
        for due in entries {
            out.push_str(&format!("  {}\n", due.display_on(today)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use grade_tracker::core::models::{DueDate, Priority};

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-10"), Some((2025, 10)));
        assert_eq!(parse_month(" 2024-2 "), Some((2024, 2)));
        assert_eq!(parse_month("2025/10"), None);
        assert_eq!(parse_month("oct-2025"), None);
    }

    #[test]
    fn test_render_empty_month() {
        let calendar = CalendarMonth {
            year: 2025,
            month: 6,
            leading_blanks: 0,
            days_in_month: 30,
            days: std::collections::BTreeMap::new(),
        };
        let text = render(&calendar, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert!(text.contains("2025-06"));
        assert!(text.contains(" 1   2   3   4   5   6   7  \n"));
        assert!(!text.contains('*'));
    }

    #[test]
    fn test_render_lists_entries_with_status_as_of_today() {
        let due = DueDate::new(
            "d-1",
            "c-1",
            "Fundies",
            "PS3",
            "",
            NaiveDate::from_ymd_opt(2025, 10, 17).unwrap(),
            Priority::High,
        );
        let calendar = CalendarMonth {
            year: 2025,
            month: 10,
            leading_blanks: 3,
            days_in_month: 31,
            days: std::collections::BTreeMap::from([(17, vec![due])]),
        };

        let text = render(&calendar, NaiveDate::from_ymd_opt(2025, 10, 15).unwrap());
        assert!(text.contains("17*"));
        assert!(text.contains("2025-10-17\n  Due Soon: PS3 [General] (Fundies) - 10/17/2025\n"));

        let text = render(&calendar, NaiveDate::from_ymd_opt(2025, 10, 20).unwrap());
        assert!(text.contains("  Overdue: PS3"));
    }
}
