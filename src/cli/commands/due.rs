//! Due command handler: a student's due dates through the view filters

use super::{date_format, load_gradebook};
use grade_tracker::config::Config;
use grade_tracker::core::repository::DueDateFilter;
use grade_tracker::{debug, info};
use std::path::Path;

/// Print the student's due dates matching `filter`
///
/// # Returns
/// `false` if the filter tag is unknown, the gradebook cannot be loaded or
/// the student is unknown
pub fn run(
    file: Option<&Path>,
    student_id: &str,
    filter: &str,
    course_id: Option<&str>,
    config: &Config,
) -> bool {
    let filter = match filter.parse::<DueDateFilter>() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("✗ {e}");
            return false;
        }
    };
    let Some(book) = load_gradebook(file, config) else {
        return false;
    };
    if book.students.get(student_id).is_none() {
        eprintln!("✗ No student with ID {student_id}");
        return false;
    }

    let today = book.due_dates.today();
    let entries = book
        .due_dates
        .view(student_id, course_id, filter, &book.courses);
    info!("{} due date(s) for {student_id} ({filter})", entries.len());

    if entries.is_empty() {
        println!("No due dates ({filter})");
        return true;
    }

    let format = date_format(config);
    for due in &entries {
        let days = due.days_remaining_on(today);
        println!(
            "{:<10} {}  {} [{}] ({}) - {} priority, {}",
            due.status_on(today).as_str(),
            due.formatted_due_date(format),
            due.assignment_name,
            due.module_name,
            due.course_name,
            due.priority,
            describe_days(days)
        );
        if !due.description.is_empty() {
            debug!("{}: {}", due.id(), due.description);
        }
    }
    true
}

fn describe_days(days: i64) -> String {
    match days {
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        -1 => "1 day late".to_string(),
        d if d < 0 => format!("{} days late", d.unsigned_abs()),
        d => format!("{d} days left"),
    }
}

#[cfg(test)]
mod tests {
    use super::describe_days;

    #[test]
    fn test_describe_days() {
        assert_eq!(describe_days(0), "due today");
        assert_eq!(describe_days(1), "due tomorrow");
        assert_eq!(describe_days(5), "5 days left");
        assert_eq!(describe_days(-1), "1 day late");
        assert_eq!(describe_days(-12), "12 days late");
    }
}
