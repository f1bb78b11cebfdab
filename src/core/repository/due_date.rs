//! Due date repository: sorted queries, status filters and the month view

use super::{CalendarMonth, CourseRepository};
use crate::core::clock::{Clock, SystemClock};
use crate::core::models::{DueDate, DueStatus, Priority};
use crate::core::RecordError;
use crate::{debug, warn};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Filter offered by the due date view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DueDateFilter {
    /// Everything
    #[default]
    All,
    /// Only entries with this derived status
    Status(DueStatus),
    /// Only entries with this priority
    Priority(Priority),
}

impl DueDateFilter {
    /// Whether `due` passes the filter as of `today`
    #[must_use]
    pub fn matches(self, due: &DueDate, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Status(DueStatus::Completed) => due.completed,
            Self::Status(status) => due.status_on(today) == status,
            Self::Priority(priority) => due.priority == priority,
        }
    }
}

impl FromStr for DueDateFilter {
    type Err = RecordError;

    /// Parse "All", a status tag ("Due Soon") or "<Priority> Priority"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if let Ok(status) = tag.parse::<DueStatus>() {
            return Ok(Self::Status(status));
        }
        let lower = tag.to_lowercase();
        if let Some(priority) = lower.strip_suffix(" priority") {
            if let Ok(priority) = priority.parse::<Priority>() {
                return Ok(Self::Priority(priority));
            }
        }
        Err(RecordError::UnknownFilter(s.to_string()))
    }
}

impl fmt::Display for DueDateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Status(status) => write!(f, "{status}"),
            Self::Priority(priority) => write!(f, "{priority} Priority"),
        }
    }
}

/// Owns every due date
///
/// All list-returning queries hand back a fresh copy sorted by date. Entries
/// sharing a date keep their insertion order. Date-relative queries use the
/// injected [`Clock`].
pub struct DueDateRepository {
    due_dates: Vec<DueDate>,
    clock: Box<dyn Clock>,
}

impl Default for DueDateRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted(mut due_dates: Vec<DueDate>) -> Vec<DueDate> {
    due_dates.sort_by_key(|d| d.due_date);
    due_dates
}

impl DueDateRepository {
    /// Empty repository reading today's date from the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Empty repository reading today's date from `clock`
    #[must_use]
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            due_dates: Vec::new(),
            clock,
        }
    }

    /// Today's date according to the repository clock
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Add a due date
    ///
    /// # Returns
    /// `false` if a due date with the same id is already stored
    pub fn add(&mut self, due: DueDate) -> bool {
        if self.get(due.id()).is_some() {
            warn!("Due date '{}' already exists; not added", due.id());
            return false;
        }
        debug!("Adding due date {} ({})", due.id(), due.assignment_name);
        self.due_dates.push(due);
        true
    }

    /// Look up a due date by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DueDate> {
        self.due_dates.iter().find(|d| d.id() == id)
    }

    /// Mutable lookup, e.g. to mark an entry completed
    pub fn get_mut(&mut self, id: &str) -> Option<&mut DueDate> {
        self.due_dates.iter_mut().find(|d| d.id() == id)
    }

    /// Replace the due date stored under `id`
    ///
    /// # Returns
    /// `false` if no due date has that id, or if `due` carries the id of
    /// another stored due date
    pub fn update(&mut self, id: &str, due: DueDate) -> bool {
        if due.id() != id && self.get(due.id()).is_some() {
            warn!("Due date '{}' already exists; update of {id} rejected", due.id());
            return false;
        }
        match self.get_mut(id) {
            Some(slot) => {
                debug!("Updating due date {id}");
                *slot = due;
                true
            }
            None => false,
        }
    }

    /// Remove the due date stored under `id`
    ///
    /// # Returns
    /// `false` if no due date has that id
    pub fn remove(&mut self, id: &str) -> bool {
        if let Some(pos) = self.due_dates.iter().position(|d| d.id() == id) {
            debug!("Removing due date {id}");
            self.due_dates.remove(pos);
            true
        } else {
            false
        }
    }

    /// Number of due dates
    #[must_use]
    pub fn len(&self) -> usize {
        self.due_dates.len()
    }

    /// Whether there are no due dates
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.due_dates.is_empty()
    }

    fn filtered(&self, pred: impl Fn(&DueDate) -> bool) -> Vec<DueDate> {
        sorted(self.due_dates.iter().filter(|d| pred(d)).cloned().collect())
    }

    /// Every due date, by date
    #[must_use]
    pub fn list(&self) -> Vec<DueDate> {
        sorted(self.due_dates.clone())
    }

    /// Due dates of one course
    #[must_use]
    pub fn for_course(&self, course_id: &str) -> Vec<DueDate> {
        self.filtered(|d| d.course_id == course_id)
    }

    /// Due dates filed under one module
    #[must_use]
    pub fn for_module(&self, module_id: &str) -> Vec<DueDate> {
        self.filtered(|d| d.module_id == module_id)
    }

    /// Whether any due date is filed under `module_id`
    #[must_use]
    pub fn references_module(&self, module_id: &str) -> bool {
        self.due_dates.iter().any(|d| d.module_id == module_id)
    }

    /// Due dates between `start` and `end`, both inclusive
    #[must_use]
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<DueDate> {
        self.filtered(|d| d.due_date >= start && d.due_date <= end)
    }

    /// Due dates of every course the student is enrolled in
    #[must_use]
    pub fn for_student(&self, student_id: &str, courses: &CourseRepository) -> Vec<DueDate> {
        let enrolled = courses.courses_for_student(student_id);
        self.filtered(|d| enrolled.iter().any(|c| c.id() == d.course_id))
    }

    /// Due dates of one module, provided the student takes its course
    #[must_use]
    pub fn for_student_in_module(
        &self,
        student_id: &str,
        module_id: &str,
        courses: &CourseRepository,
    ) -> Vec<DueDate> {
        self.filtered(|d| {
            d.module_id == module_id
                && courses
                    .get(&d.course_id)
                    .is_some_and(|c| c.is_enrolled(student_id))
        })
    }

    /// Due dates whose current status is `status`
    #[must_use]
    pub fn by_status(&self, status: DueStatus) -> Vec<DueDate> {
        let today = self.today();
        self.filtered(|d| d.status_on(today) == status)
    }

    /// Due dates with the given priority
    #[must_use]
    pub fn by_priority(&self, priority: Priority) -> Vec<DueDate> {
        self.filtered(|d| d.priority == priority)
    }

    /// Incomplete due dates that are today or later
    #[must_use]
    pub fn upcoming(&self) -> Vec<DueDate> {
        let today = self.today();
        self.filtered(|d| !d.completed && d.days_remaining_on(today) >= 0)
    }

    /// Incomplete due dates that have passed
    #[must_use]
    pub fn overdue(&self) -> Vec<DueDate> {
        let today = self.today();
        self.filtered(|d| !d.completed && d.days_remaining_on(today) < 0)
    }

    /// Due dates marked completed
    #[must_use]
    pub fn completed(&self) -> Vec<DueDate> {
        self.filtered(|d| d.completed)
    }

    /// The due date list as the student sees it
    ///
    /// Scoped to `course_id` when given, otherwise to every course the
    /// student is enrolled in, then narrowed by `filter`.
    #[must_use]
    pub fn view(
        &self,
        student_id: &str,
        course_id: Option<&str>,
        filter: DueDateFilter,
        courses: &CourseRepository,
    ) -> Vec<DueDate> {
        let today = self.today();
        let scoped = match course_id {
            Some(course_id) => self.for_course(course_id),
            None => self.for_student(student_id, courses),
        };
        scoped
            .into_iter()
            .filter(|d| filter.matches(d, today))
            .collect()
    }

    /// Due dates of one month, bucketed by day of month
    ///
    /// # Errors
    /// [`RecordError::InvalidMonth`] when `month` is not 1-12
    pub fn calendar_month(&self, year: i32, month: u32) -> Result<CalendarMonth, RecordError> {
        let (first, last) = CalendarMonth::bounds(year, month)?;
        CalendarMonth::build(year, month, self.in_range(first, last))
    }

    /// Rewrite the cached module name on every due date filed under `module_id`
    ///
    /// # Returns
    /// Number of due dates changed
    pub fn propagate_module_name(&mut self, module_id: &str, name: &str) -> usize {
        let mut changed = 0;
        for due in self
            .due_dates
            .iter_mut()
            .filter(|d| d.module_id == module_id && d.module_name != name)
        {
            due.module_name = name.to_string();
            changed += 1;
        }
        debug!("Renamed module {module_id} on {changed} due date(s)");
        changed
    }
}
