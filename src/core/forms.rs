//! Validation of raw text entered in the presentation layer
//!
//! Each form parses every field before touching any record, so a rejected
//! form leaves the data unchanged.

use crate::core::models::{CourseModule, Grade, Student};
use crate::core::RecordError;

fn parse_number(field: &'static str, value: &str) -> Result<f64, RecordError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| RecordError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn required(field: &'static str, value: &str) -> Result<String, RecordError> {
    let value = value.trim();
    if value.is_empty() {
        Err(RecordError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

/// Score, maximum and weight of a grade entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreFields {
    /// Points earned
    pub score: f64,
    /// Points available
    pub max_score: f64,
    /// Relative weight
    pub weight: f64,
}

impl ScoreFields {
    /// Check already-numeric values (e.g. from an imported file)
    ///
    /// # Errors
    /// - [`RecordError::InvalidNumber`] for a NaN or infinite value
    /// - [`RecordError::NotPositive`] unless `max_score` is greater than zero
    pub fn new(score: f64, max_score: f64, weight: f64) -> Result<Self, RecordError> {
        for (field, value) in [("score", score), ("max score", max_score), ("weight", weight)] {
            if !value.is_finite() {
                return Err(RecordError::InvalidNumber {
                    field,
                    value: value.to_string(),
                });
            }
        }
        if max_score <= 0.0 {
            return Err(RecordError::NotPositive {
                field: "max score",
                value: max_score.to_string(),
            });
        }
        Ok(Self {
            score,
            max_score,
            weight,
        })
    }

    /// Parse the three numeric fields of a grade form
    ///
    /// # Errors
    /// [`RecordError::InvalidNumber`] naming the first field that is not a
    /// number, or [`RecordError::NotPositive`] for a zero or negative maximum
    pub fn parse(score: &str, max_score: &str, weight: &str) -> Result<Self, RecordError> {
        Self::new(
            parse_number("score", score)?,
            parse_number("max score", max_score)?,
            parse_number("weight", weight)?,
        )
    }

    /// Write the parsed values onto an existing grade
    pub fn apply_to(self, grade: &mut Grade) {
        grade.score = self.score;
        grade.max_score = self.max_score;
        grade.weight = self.weight;
    }
}

/// Fields of the student sign-up form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentSignUp {
    /// Seven-digit student id
    pub student_id: String,
    /// First name (required)
    pub first_name: String,
    /// Last name (required)
    pub last_name: String,
    /// Optional email; blank means none
    pub email: String,
    /// Optional year of study; blank means unknown
    pub year_level: String,
}

impl StudentSignUp {
    /// Validate the form and build the student
    ///
    /// # Errors
    /// - [`RecordError::MissingField`] for a blank first or last name
    /// - [`RecordError::InvalidStudentId`] unless the id is seven digits
    /// - [`RecordError::InvalidNumber`] for a year level that is not a positive integer
    pub fn into_student(self) -> Result<Student, RecordError> {
        let first_name = required("first name", &self.first_name)?;
        let last_name = required("last name", &self.last_name)?;
        let mut student = Student::new(self.student_id.trim(), first_name, last_name)?;

        let email = self.email.trim();
        if !email.is_empty() {
            student.email = Some(email.to_string());
        }

        let year = self.year_level.trim();
        if !year.is_empty() {
            let year_level = year.parse::<u32>().map_err(|_| RecordError::InvalidNumber {
                field: "year level",
                value: year.to_string(),
            })?;
            student.set_year_level(year_level)?;
        }
        Ok(student)
    }
}

/// Fields of the module edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEdit {
    /// Positive module number
    pub number: u32,
    /// Display name; defaults to "Module {number}"
    pub name: String,
    /// Description
    pub description: String,
}

impl ModuleEdit {
    /// Parse the module edit form
    ///
    /// # Errors
    /// [`RecordError::InvalidModuleNumber`] unless `number` is a positive integer
    pub fn parse(number: &str, name: &str, description: &str) -> Result<Self, RecordError> {
        let number = number
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| RecordError::InvalidModuleNumber(number.to_string()))?;
        let name = match name.trim() {
            "" => format!("Module {number}"),
            trimmed => trimmed.to_string(),
        };
        Ok(Self {
            number,
            name,
            description: description.trim().to_string(),
        })
    }

    /// Write the edit onto a module (name, number, description)
    ///
    /// # Errors
    /// Propagates [`RecordError::InvalidModuleNumber`] from the module
    pub fn apply_to(&self, module: &mut CourseModule) -> Result<(), RecordError> {
        module.set_module_number(self.number)?;
        module.name.clone_from(&self.name);
        module.description.clone_from(&self.description);
        Ok(())
    }
}
