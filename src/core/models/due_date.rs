//! Due date model

use super::module::GENERAL_MODULE_NAME;
use crate::core::clock::{Clock, SystemClock};
use crate::core::RecordError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A due date this many days away (or fewer) is "Due Soon"
pub const DUE_SOON_DAYS: i64 = 3;

/// Default display format for due dates
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Assignment priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// High priority
    High,
    /// Medium priority
    Medium,
    /// Low priority
    Low,
}

impl Priority {
    /// Display tag ("High", "Medium", "Low")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl FromStr for Priority {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(RecordError::UnknownPriority(s.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a due date stands relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DueStatus {
    /// Marked completed, whatever the date
    Completed,
    /// Past the due date and not completed
    Overdue,
    /// Due within [`DUE_SOON_DAYS`] days
    DueSoon,
    /// Due later than that
    Upcoming,
}

impl DueStatus {
    /// Display tag ("Completed", "Overdue", "Due Soon", "Upcoming")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
            Self::DueSoon => "Due Soon",
            Self::Upcoming => "Upcoming",
        }
    }

    /// Classify a due date from its completion flag and days remaining
    #[must_use]
    pub const fn classify(completed: bool, days_remaining: i64) -> Self {
        if completed {
            Self::Completed
        } else if days_remaining < 0 {
            Self::Overdue
        } else if days_remaining <= DUE_SOON_DAYS {
            Self::DueSoon
        } else {
            Self::Upcoming
        }
    }
}

impl FromStr for DueStatus {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(Self::Completed),
            "overdue" => Ok(Self::Overdue),
            "due soon" | "due-soon" | "due_soon" => Ok(Self::DueSoon),
            "upcoming" => Ok(Self::Upcoming),
            _ => Err(RecordError::UnknownStatus(s.to_string())),
        }
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dated assignment for a course
///
/// Status and days remaining are derived from the current state on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDate {
    id: String,

    /// Course the assignment belongs to
    pub course_id: String,

    /// Cached course display name
    pub course_name: String,

    /// Module id; empty when not filed under a module
    pub module_id: String,

    /// Cached module display name
    pub module_name: String,

    /// Assignment name
    pub assignment_name: String,

    /// Assignment description
    pub description: String,

    /// Calendar date the assignment is due
    pub due_date: NaiveDate,

    /// Whether the assignment has been handed in
    pub completed: bool,

    /// Priority
    pub priority: Priority,
}

impl DueDate {
    /// Create an incomplete due date filed under no module ("General")
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        course_id: impl Into<String>,
        course_name: impl Into<String>,
        assignment_name: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            course_id: course_id.into(),
            course_name: course_name.into(),
            module_id: String::new(),
            module_name: GENERAL_MODULE_NAME.to_string(),
            assignment_name: assignment_name.into(),
            description: description.into(),
            due_date,
            completed: false,
            priority,
        }
    }

    /// File the due date under a module
    #[must_use]
    pub fn with_module(mut self, module_id: impl Into<String>, module_name: impl Into<String>) -> Self {
        self.module_id = module_id.into();
        self.module_name = module_name.into();
        self
    }

    /// The due date id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Signed number of days from `today` to the due date (negative when past)
    #[must_use]
    pub fn days_remaining_on(&self, today: NaiveDate) -> i64 {
        (self.due_date - today).num_days()
    }

    /// Days remaining as of the local system date
    #[must_use]
    pub fn days_remaining(&self) -> i64 {
        self.days_remaining_on(SystemClock.today())
    }

    /// Status as of `today`
    #[must_use]
    pub fn status_on(&self, today: NaiveDate) -> DueStatus {
        DueStatus::classify(self.completed, self.days_remaining_on(today))
    }

    /// Status as of the local system date
    #[must_use]
    pub fn status(&self) -> DueStatus {
        self.status_on(SystemClock.today())
    }

    /// Due date rendered with a chrono format string
    #[must_use]
    pub fn formatted_due_date(&self, format: &str) -> String {
        self.due_date.format(format).to_string()
    }
}

/// A due date rendered with its status as of a fixed day
///
/// Returned by [`DueDate::display_on`].
#[derive(Debug, Clone, Copy)]
pub struct DueDateLine<'a> {
    due: &'a DueDate,
    today: NaiveDate,
}

impl fmt::Display for DueDateLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let due = self.due;
        write!(f, "{}: {}", due.status_on(self.today), due.assignment_name)?;
        if !due.module_name.is_empty() {
            write!(f, " [{}]", due.module_name)?;
        }
        write!(
            f,
            " ({}) - {}",
            due.course_name,
            due.formatted_due_date(DEFAULT_DATE_FORMAT)
        )
    }
}

impl DueDate {
    /// Render as "`Status: Assignment [Module] (Course) - date`" with the
    /// status as of `today`
    ///
    /// Pass a repository's `today()` so the text agrees with its queries.
    #[must_use]
    pub const fn display_on(&self, today: NaiveDate) -> DueDateLine<'_> {
        DueDateLine { due: self, today }
    }
}

/// Uses the local system date for the status; see [`DueDate::display_on`]
/// for an injected day.
impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_on(SystemClock.today()).fmt(f)
    }
}
