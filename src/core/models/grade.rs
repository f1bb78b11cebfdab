//! Grade model

use super::module::GENERAL_MODULE_NAME;
use crate::core::grading::LetterGrade;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One graded assignment for a student in a course
///
/// `module_name` is a cached copy of the module's display name. Renaming a
/// module does not update it; see
/// [`GradeRepository::propagate_module_name`](crate::core::repository::GradeRepository::propagate_module_name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    id: String,

    /// Student the grade belongs to
    pub student_id: String,

    /// Course the grade belongs to
    pub course_id: String,

    /// Module id; empty when the grade is not filed under a module
    pub module_id: String,

    /// Cached module display name
    pub module_name: String,

    /// Assignment name
    pub assignment_name: String,

    /// Points earned (may exceed `max_score`)
    pub score: f64,

    /// Points available
    pub max_score: f64,

    /// Relative weight within the course
    pub weight: f64,

    /// Free-text comments
    pub comments: String,

    /// Submission date as entered; not parsed
    pub date_submitted: String,
}

impl Grade {
    /// Create a grade filed under no module ("General")
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        student_id: impl Into<String>,
        course_id: impl Into<String>,
        assignment_name: impl Into<String>,
        score: f64,
        max_score: f64,
        weight: f64,
        date_submitted: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            student_id: student_id.into(),
            course_id: course_id.into(),
            module_id: String::new(),
            module_name: GENERAL_MODULE_NAME.to_string(),
            assignment_name: assignment_name.into(),
            score,
            max_score,
            weight,
            comments: String::new(),
            date_submitted: date_submitted.into(),
        }
    }

    /// File the grade under a module
    #[must_use]
    pub fn with_module(mut self, module_id: impl Into<String>, module_name: impl Into<String>) -> Self {
        self.module_id = module_id.into();
        self.module_name = module_name.into();
        self
    }

    /// The grade id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `score / max_score`
    #[must_use]
    pub fn proportion(&self) -> f64 {
        self.score / self.max_score
    }

    /// `score / max_score × 100`
    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.proportion() * 100.0
    }

    /// Letter for the current score; derived on every call so it never goes stale
    #[must_use]
    pub fn letter_grade(&self) -> LetterGrade {
        LetterGrade::from_percentage(self.percentage())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}/{} ({}, {:.1}%)",
            self.assignment_name,
            self.module_name,
            self.score,
            self.max_score,
            self.letter_grade(),
            self.percentage()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(score: f64, max: f64) -> Grade {
        Grade::new("g-1", "1234567", "c-1", "Quiz 1", score, max, 10.0, "2025-09-01")
    }

    #[test]
    fn test_defaults_to_general_module() {
        let grade = quiz(9.0, 10.0);
        assert_eq!(grade.module_id, "");
        assert_eq!(grade.module_name, "General");
        assert!(grade.comments.is_empty());
    }

    #[test]
    fn test_letter_follows_score_changes() {
        let mut grade = quiz(95.0, 100.0);
        assert_eq!(grade.letter_grade(), LetterGrade::A);

        grade.score = 72.0;
        assert_eq!(grade.letter_grade(), LetterGrade::C);

        grade.max_score = 80.0;
        assert_eq!(grade.letter_grade(), LetterGrade::A);
    }

    #[test]
    fn test_score_may_exceed_max() {
        let grade = quiz(12.0, 10.0);
        assert!((grade.percentage() - 120.0).abs() < 1e-9);
        assert_eq!(grade.letter_grade(), LetterGrade::A);
    }

    #[test]
    fn test_display() {
        let grade = quiz(45.0, 50.0).with_module("m-1", "Loops");
        assert_eq!(grade.to_string(), "Quiz 1 (Loops): 45/50 (A, 90.0%)");
    }
}
