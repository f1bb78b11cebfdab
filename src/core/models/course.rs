//! Course model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a course offering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique id, fixed at creation
    id: String,

    /// Course name (e.g., "Introduction to Computer Science")
    pub name: String,

    /// Course code (e.g., "CS101")
    pub code: String,

    /// Credit hours
    pub credits: u32,

    /// Instructor name
    pub instructor: String,

    /// Semester label (e.g., "Fall 2025")
    pub semester: String,

    /// Enrolled student ids, in enrollment order, without duplicates
    #[serde(default)]
    enrolled_student_ids: Vec<String>,
}

impl Course {
    /// Create a new course
    ///
    /// # Arguments
    /// * `id` - Unique course id (see [`crate::core::ids`])
    /// * `name` - Full course name
    /// * `code` - Course code
    /// * `credits` - Credit hours
    /// * `instructor` - Instructor name
    /// * `semester` - Semester label
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
        credits: u32,
        instructor: impl Into<String>,
        semester: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            credits,
            instructor: instructor.into(),
            semester: semester.into(),
            enrolled_student_ids: Vec::new(),
        }
    }

    /// The course id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Enroll a student
    ///
    /// # Returns
    /// `false` if the student is already enrolled (membership unchanged)
    pub fn enroll(&mut self, student_id: &str) -> bool {
        if self.is_enrolled(student_id) {
            return false;
        }
        self.enrolled_student_ids.push(student_id.to_string());
        true
    }

    /// Remove a student from the course
    ///
    /// # Returns
    /// `false` if the student was not enrolled
    pub fn unenroll(&mut self, student_id: &str) -> bool {
        if let Some(pos) = self
            .enrolled_student_ids
            .iter()
            .position(|s| s == student_id)
        {
            self.enrolled_student_ids.remove(pos);
            true
        } else {
            false
        }
    }

    /// Whether `student_id` is currently enrolled
    #[must_use]
    pub fn is_enrolled(&self, student_id: &str) -> bool {
        self.enrolled_student_ids.iter().any(|s| s == student_id)
    }

    /// Copy of the enrolled student ids
    #[must_use]
    pub fn enrolled_student_ids(&self) -> Vec<String> {
        self.enrolled_student_ids.clone()
    }

    /// Number of enrolled students
    #[must_use]
    pub fn enrollment_count(&self) -> usize {
        self.enrolled_student_ids.len()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} (Instructor: {}, {})",
            self.code, self.name, self.instructor, self.semester
        )
    }
}
