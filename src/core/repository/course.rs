//! Course repository

use crate::core::models::Course;
use crate::{debug, warn};

/// Owns every course and answers catalog queries
#[derive(Debug, Clone, Default)]
pub struct CourseRepository {
    courses: Vec<Course>,
}

impl CourseRepository {
    /// Create an empty repository
    #[must_use]
    pub const fn new() -> Self {
        Self {
            courses: Vec::new(),
        }
    }

    /// Add a course
    ///
    /// # Returns
    /// `false` if a course with the same id is already stored
    pub fn add(&mut self, course: Course) -> bool {
        if self.get(course.id()).is_some() {
            warn!("Course '{}' already exists; not added", course.id());
            return false;
        }
        debug!("Adding course {} ({})", course.code, course.id());
        self.courses.push(course);
        true
    }

    /// Look up a course by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == id)
    }

    /// Mutable lookup, used for enrollment changes
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| c.id() == id)
    }

    /// Copy of every course in insertion order
    #[must_use]
    pub fn list(&self) -> Vec<Course> {
        self.courses.clone()
    }

    /// Replace the course stored under `id`
    ///
    /// # Returns
    /// `false` if no course has that id, or if `course` carries the id of
    /// another stored course
    pub fn update(&mut self, id: &str, course: Course) -> bool {
        if course.id() != id && self.get(course.id()).is_some() {
            warn!("Course '{}' already exists; update of {id} rejected", course.id());
            return false;
        }
        match self.get_mut(id) {
            Some(slot) => {
                debug!("Updating course {id}");
                *slot = course;
                true
            }
            None => false,
        }
    }

    /// Remove the course stored under `id`
    ///
    /// # Returns
    /// `false` if no course has that id
    pub fn remove(&mut self, id: &str) -> bool {
        if let Some(pos) = self.courses.iter().position(|c| c.id() == id) {
            debug!("Removing course {id}");
            self.courses.remove(pos);
            true
        } else {
            false
        }
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether there are no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Courses whose name or code contains `term` (case-insensitive)
    #[must_use]
    pub fn find_by_name_or_code(&self, term: &str) -> Vec<Course> {
        let term = term.to_lowercase();
        self.courses
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&term) || c.code.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    /// Courses taught by `instructor` (exact, case-insensitive)
    #[must_use]
    pub fn by_instructor(&self, instructor: &str) -> Vec<Course> {
        self.filtered(|c| c.instructor.to_lowercase() == instructor.to_lowercase())
    }

    /// Courses offered in `semester` (exact, case-insensitive)
    #[must_use]
    pub fn by_semester(&self, semester: &str) -> Vec<Course> {
        self.filtered(|c| c.semester.to_lowercase() == semester.to_lowercase())
    }

    /// Courses that list `student_id` as enrolled
    #[must_use]
    pub fn courses_for_student(&self, student_id: &str) -> Vec<Course> {
        self.filtered(|c| c.is_enrolled(student_id))
    }

    fn filtered(&self, pred: impl Fn(&Course) -> bool) -> Vec<Course> {
        self.courses.iter().filter(|c| pred(c)).cloned().collect()
    }
}
