//! Grade repository and the averages derived from it

use super::CourseRepository;
use crate::core::grading::{self, or_no_data, weighted_average, LetterGrade};
use crate::core::models::Grade;
use crate::{debug, warn};
use std::collections::BTreeMap;
use std::fmt;

/// Credit-weighted summary of a student's program
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgramAverage {
    /// Credit-weighted mean of course averages (percentage)
    pub average: f64,
    /// Credit-weighted mean of course GPA points
    pub gpa: f64,
    /// Credits that contributed
    pub credits: u32,
    /// Number of courses that contributed
    pub courses: usize,
}

impl ProgramAverage {
    /// Letter for the program average
    #[must_use]
    pub fn letter_grade(&self) -> LetterGrade {
        LetterGrade::from_percentage(self.average)
    }
}

/// Owns every grade
#[derive(Debug, Clone, Default)]
pub struct GradeRepository {
    grades: Vec<Grade>,
}

impl GradeRepository {
    /// Create an empty repository
    #[must_use]
    pub const fn new() -> Self {
        Self { grades: Vec::new() }
    }

    /// Add a grade
    ///
    /// # Returns
    /// `false` if a grade with the same id is already stored
    pub fn add(&mut self, grade: Grade) -> bool {
        if self.get(grade.id()).is_some() {
            warn!("Grade '{}' already exists; not added", grade.id());
            return false;
        }
        debug!(
            "Adding grade {} for student {} in {}",
            grade.id(),
            grade.student_id,
            grade.course_id
        );
        self.grades.push(grade);
        true
    }

    /// Look up a grade by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Grade> {
        self.grades.iter().find(|g| g.id() == id)
    }

    /// Mutable lookup
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Grade> {
        self.grades.iter_mut().find(|g| g.id() == id)
    }

    /// Copy of every grade in insertion order
    #[must_use]
    pub fn list(&self) -> Vec<Grade> {
        self.grades.clone()
    }

    /// Replace the grade stored under `id`
    ///
    /// # Returns
    /// `false` if no grade has that id, or if `grade` carries the id of
    /// another stored grade
    pub fn update(&mut self, id: &str, grade: Grade) -> bool {
        if grade.id() != id && self.get(grade.id()).is_some() {
            warn!("Grade '{}' already exists; update of {id} rejected", grade.id());
            return false;
        }
        match self.get_mut(id) {
            Some(slot) => {
                debug!("Updating grade {id}");
                *slot = grade;
                true
            }
            None => false,
        }
    }

    /// Remove the grade stored under `id`
    ///
    /// # Returns
    /// `false` if no grade has that id
    pub fn remove(&mut self, id: &str) -> bool {
        if let Some(pos) = self.grades.iter().position(|g| g.id() == id) {
            debug!("Removing grade {id}");
            self.grades.remove(pos);
            true
        } else {
            false
        }
    }

    /// Number of grades
    #[must_use]
    pub fn len(&self) -> usize {
        self.grades.len()
    }

    /// Whether there are no grades
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    /// Every grade of a student
    #[must_use]
    pub fn for_student(&self, student_id: &str) -> Vec<Grade> {
        self.filtered(|g| g.student_id == student_id)
    }

    /// Every grade recorded in a course
    #[must_use]
    pub fn for_course(&self, course_id: &str) -> Vec<Grade> {
        self.filtered(|g| g.course_id == course_id)
    }

    /// Every grade filed under a module
    #[must_use]
    pub fn for_module(&self, module_id: &str) -> Vec<Grade> {
        self.filtered(|g| g.module_id == module_id)
    }

    /// A student's grades in one course
    ///
    /// The student id may be given in numeric or string form; both are
    /// compared by their text.
    #[must_use]
    pub fn for_student_in_course(
        &self,
        student_id: impl fmt::Display,
        course_id: &str,
    ) -> Vec<Grade> {
        let student_id = student_id.to_string();
        self.filtered(|g| g.student_id == student_id && g.course_id == course_id)
    }

    /// Whether any grade is filed under `module_id`
    #[must_use]
    pub fn references_module(&self, module_id: &str) -> bool {
        self.grades.iter().any(|g| g.module_id == module_id)
    }

    fn filtered(&self, pred: impl Fn(&Grade) -> bool) -> Vec<Grade> {
        self.grades.iter().filter(|g| pred(g)).cloned().collect()
    }

    /// Weighted average of a student's grades in a course
    ///
    /// # Returns
    /// `None` if the student has no grades there or every weight is zero
    #[must_use]
    pub fn course_average(&self, student_id: impl fmt::Display, course_id: &str) -> Option<f64> {
        let student_id = student_id.to_string();
        weighted_average(
            self.grades
                .iter()
                .filter(|g| g.student_id == student_id && g.course_id == course_id),
        )
    }

    /// [`course_average`](Self::course_average) with [`NO_DATA`](grading::NO_DATA) for "nothing to average"
    #[must_use]
    pub fn calculate_course_average(&self, student_id: impl fmt::Display, course_id: &str) -> f64 {
        or_no_data(self.course_average(student_id, course_id))
    }

    /// Weighted average of a student's grades in one module
    #[must_use]
    pub fn module_average(&self, student_id: &str, module_id: &str) -> Option<f64> {
        weighted_average(
            self.grades
                .iter()
                .filter(|g| g.student_id == student_id && g.module_id == module_id),
        )
    }

    /// [`module_average`](Self::module_average) with the sentinel
    #[must_use]
    pub fn calculate_module_average(&self, student_id: &str, module_id: &str) -> f64 {
        or_no_data(self.module_average(student_id, module_id))
    }

    /// How many of a student's grades in a course earned each letter
    #[must_use]
    pub fn letter_distribution(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> BTreeMap<LetterGrade, usize> {
        let mut counts = BTreeMap::new();
        for grade in self
            .grades
            .iter()
            .filter(|g| g.student_id == student_id && g.course_id == course_id)
        {
            *counts.entry(grade.letter_grade()).or_insert(0) += 1;
        }
        counts
    }

    /// Ids of the courses a student has grades in, in first-seen order
    fn graded_course_ids(&self, student_id: &str) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for grade in self.grades.iter().filter(|g| g.student_id == student_id) {
            if !ids.contains(&grade.course_id.as_str()) {
                ids.push(&grade.course_id);
            }
        }
        ids
    }

    /// Credit-weighted GPA over every course the student has grades in
    ///
    /// Grades in courses missing from `courses` are skipped.
    ///
    /// # Returns
    /// The GPA on the 4.0 scale, or [`NO_DATA`](grading::NO_DATA) when no
    /// credits accumulate
    #[must_use]
    pub fn calculate_gpa(&self, student_id: &str, courses: &CourseRepository) -> f64 {
        let mut points = 0.0;
        let mut credits = 0u32;

        for course_id in self.graded_course_ids(student_id) {
            let Some(course) = courses.get(course_id) else {
                continue;
            };
            let Some(average) = self.course_average(student_id, course_id) else {
                continue;
            };
            points += grading::gpa_points(average) * f64::from(course.credits);
            credits += course.credits;
        }

        if credits == 0 {
            return grading::NO_DATA;
        }
        points / f64::from(credits)
    }

    /// Credit-weighted average and GPA over the courses a student is enrolled in
    ///
    /// Courses without usable grades are left out.
    ///
    /// # Returns
    /// `None` when no enrolled course contributes any credits
    #[must_use]
    pub fn overall_average(
        &self,
        student_id: &str,
        courses: &CourseRepository,
    ) -> Option<ProgramAverage> {
        let mut weighted = 0.0;
        let mut points = 0.0;
        let mut credits = 0u32;
        let mut counted = 0usize;

        for course in courses.courses_for_student(student_id) {
            let Some(average) = self.course_average(student_id, course.id()) else {
                continue;
            };
            let course_credits = f64::from(course.credits);
            weighted += average * course_credits;
            points += grading::gpa_points(average) * course_credits;
            credits += course.credits;
            counted += 1;
        }

        if credits == 0 {
            return None;
        }
        let total = f64::from(credits);
        Some(ProgramAverage {
            average: weighted / total,
            gpa: points / total,
            credits,
            courses: counted,
        })
    }

    /// Rewrite the cached module name on every grade filed under `module_id`
    ///
    /// # Returns
    /// Number of grades changed
    pub fn propagate_module_name(&mut self, module_id: &str, name: &str) -> usize {
        let mut changed = 0;
        for grade in self
            .grades
            .iter_mut()
            .filter(|g| g.module_id == module_id && g.module_name != name)
        {
            grade.module_name = name.to_string();
            changed += 1;
        }
        debug!("Renamed module {module_id} on {changed} grade(s)");
        changed
    }
}
