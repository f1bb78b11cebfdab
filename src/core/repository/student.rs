//! Student repository

use crate::core::models::Student;
use crate::{debug, warn};

/// Owns every student; student ids are unique
#[derive(Debug, Clone, Default)]
pub struct StudentRepository {
    students: Vec<Student>,
}

impl StudentRepository {
    /// Create an empty repository
    #[must_use]
    pub const fn new() -> Self {
        Self {
            students: Vec::new(),
        }
    }

    /// Add a student
    ///
    /// # Returns
    /// `false` if a student with the same id already exists (nothing is inserted)
    pub fn add(&mut self, student: Student) -> bool {
        if self.get(student.student_id()).is_some() {
            warn!("Student {} already exists", student.student_id());
            return false;
        }
        debug!("Adding student {}", student.student_id());
        self.students.push(student);
        true
    }

    /// Look up a student by id
    #[must_use]
    pub fn get(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.student_id() == student_id)
    }

    /// Mutable lookup
    pub fn get_mut(&mut self, student_id: &str) -> Option<&mut Student> {
        self.students
            .iter_mut()
            .find(|s| s.student_id() == student_id)
    }

    /// Copy of every student in insertion order
    #[must_use]
    pub fn list(&self) -> Vec<Student> {
        self.students.clone()
    }

    /// Replace the student stored under `student_id`
    ///
    /// # Returns
    /// `false` if no student has that id, or if `student` carries the id of
    /// another stored student
    pub fn update(&mut self, student_id: &str, student: Student) -> bool {
        if student.student_id() != student_id && self.get(student.student_id()).is_some() {
            warn!(
                "Student {} already exists; update of {student_id} rejected",
                student.student_id()
            );
            return false;
        }
        match self.get_mut(student_id) {
            Some(slot) => {
                debug!("Updating student {student_id}");
                *slot = student;
                true
            }
            None => false,
        }
    }

    /// Remove the student stored under `student_id`
    ///
    /// # Returns
    /// `false` if no student has that id
    pub fn remove(&mut self, student_id: &str) -> bool {
        if let Some(pos) = self
            .students
            .iter()
            .position(|s| s.student_id() == student_id)
        {
            debug!("Removing student {student_id}");
            self.students.remove(pos);
            true
        } else {
            false
        }
    }

    /// Number of students
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether there are no students
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Students whose first, last or full name contains `term` (case-insensitive)
    #[must_use]
    pub fn find_by_name(&self, term: &str) -> Vec<Student> {
        let term = term.to_lowercase();
        self.students
            .iter()
            .filter(|s| {
                s.first_name.to_lowercase().contains(&term)
                    || s.last_name.to_lowercase().contains(&term)
                    || s.full_name().to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }
}
