//! Student model

use crate::core::RecordError;
use serde::Serialize;

/// Length of a student id in digits
pub const STUDENT_ID_LEN: usize = 7;

/// `true` if `id` is exactly seven ASCII digits
#[must_use]
pub fn is_valid_student_id(id: &str) -> bool {
    id.len() == STUDENT_ID_LEN && id.bytes().all(|b| b.is_ascii_digit())
}

/// Check a student id, returning it unchanged on success
///
/// # Errors
/// Returns [`RecordError::InvalidStudentId`] unless `id` is exactly seven ASCII digits
pub fn validate_student_id(id: &str) -> Result<&str, RecordError> {
    if is_valid_student_id(id) {
        Ok(id)
    } else {
        Err(RecordError::InvalidStudentId(id.to_string()))
    }
}

/// Represents a student
///
/// The id is validated on construction and on every later assignment, which is
/// why it is only reachable through [`Student::student_id`] and
/// [`Student::set_student_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    student_id: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Contact email, if given at sign-up
    pub email: Option<String>,

    year_level: Option<u32>,

    /// Number of courses the student has finished
    pub courses_completed: u32,

    /// Course ids in enrollment order; never contains duplicates
    enrolled_course_ids: Vec<String>,
}

impl Student {
    /// Create a new student
    ///
    /// # Errors
    /// Returns [`RecordError::InvalidStudentId`] if `student_id` is not seven digits
    pub fn new(
        student_id: &str,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, RecordError> {
        validate_student_id(student_id)?;
        Ok(Self {
            student_id: student_id.to_string(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: None,
            year_level: None,
            courses_completed: 0,
            enrolled_course_ids: Vec::new(),
        })
    }

    /// The seven-digit student id
    #[must_use]
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// Replace the student id. The old id is kept if the new one is invalid.
    ///
    /// # Errors
    /// Returns [`RecordError::InvalidStudentId`] if `student_id` is not seven digits
    pub fn set_student_id(&mut self, student_id: &str) -> Result<(), RecordError> {
        validate_student_id(student_id)?;
        self.student_id = student_id.to_string();
        Ok(())
    }

    /// "First Last", computed from the current names
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Year of study, if known
    #[must_use]
    pub const fn year_level(&self) -> Option<u32> {
        self.year_level
    }

    /// Set the year of study
    ///
    /// # Errors
    /// Returns [`RecordError::InvalidNumber`] for a year level of zero
    pub fn set_year_level(&mut self, year_level: u32) -> Result<(), RecordError> {
        if year_level == 0 {
            return Err(RecordError::InvalidNumber {
                field: "year level",
                value: year_level.to_string(),
            });
        }
        self.year_level = Some(year_level);
        Ok(())
    }

    /// Record enrollment in a course
    ///
    /// # Returns
    /// `false` if already enrolled (nothing changes), `true` otherwise
    pub fn enroll_in_course(&mut self, course_id: &str) -> bool {
        if self.is_enrolled_in(course_id) {
            return false;
        }
        self.enrolled_course_ids.push(course_id.to_string());
        true
    }

    /// Drop enrollment in a course
    ///
    /// # Returns
    /// `false` if the student was not enrolled
    pub fn unenroll_from_course(&mut self, course_id: &str) -> bool {
        if let Some(pos) = self.enrolled_course_ids.iter().position(|c| c == course_id) {
            self.enrolled_course_ids.remove(pos);
            true
        } else {
            false
        }
    }

    /// Whether the student is enrolled in `course_id`
    #[must_use]
    pub fn is_enrolled_in(&self, course_id: &str) -> bool {
        self.enrolled_course_ids.iter().any(|c| c == course_id)
    }

    /// Copy of the enrolled course ids
    #[must_use]
    pub fn enrolled_course_ids(&self) -> Vec<String> {
        self.enrolled_course_ids.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_creation() {
        let student = Student::new("1234567", "Ada", "Lovelace").unwrap();

        assert_eq!(student.student_id(), "1234567");
        assert_eq!(student.full_name(), "Ada Lovelace");
        assert!(student.email.is_none());
        assert!(student.year_level().is_none());
        assert!(student.enrolled_course_ids().is_empty());
    }

    #[test]
    fn test_valid_ids() {
        for id in ["0000000", "1234567", "9999999", "0012345"] {
            assert!(is_valid_student_id(id), "{id} should be valid");
        }
    }

    #[test]
    fn test_invalid_ids() {
        for id in ["", "123456", "12345678", "12345a7", " 123456", "１２３４５６７", "-123456"] {
            assert!(!is_valid_student_id(id), "{id:?} should be invalid");
            assert!(Student::new(id, "A", "B").is_err());
        }
    }

    #[test]
    fn test_set_student_id_checks_every_assignment() {
        let mut student = Student::new("1234567", "Ada", "Lovelace").unwrap();

        assert!(student.set_student_id("7654321").is_ok());
        assert_eq!(student.student_id(), "7654321");

        let err = student.set_student_id("76543").unwrap_err();
        assert_eq!(err, RecordError::InvalidStudentId("76543".to_string()));
        assert_eq!(student.student_id(), "7654321");
    }

    #[test]
    fn test_full_name_tracks_renames() {
        let mut student = Student::new("1234567", "Ada", "Lovelace").unwrap();
        student.first_name = "Augusta".to_string();
        assert_eq!(student.full_name(), "Augusta Lovelace");
    }

    #[test]
    fn test_year_level_must_be_positive() {
        let mut student = Student::new("1234567", "Ada", "Lovelace").unwrap();
        assert!(student.set_year_level(0).is_err());
        assert!(student.set_year_level(2).is_ok());
        assert_eq!(student.year_level(), Some(2));
    }

    #[test]
    fn test_enrollment_is_add_if_absent() {
        let mut student = Student::new("1234567", "Ada", "Lovelace").unwrap();

        assert!(student.enroll_in_course("course-1"));
        assert!(!student.enroll_in_course("course-1"));
        assert_eq!(student.enrolled_course_ids(), vec!["course-1".to_string()]);

        assert!(student.unenroll_from_course("course-1"));
        assert!(!student.unenroll_from_course("course-1"));
        assert!(!student.is_enrolled_in("course-1"));
    }
}
