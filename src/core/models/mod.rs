//! Data models for `GradeTracker`
//!
//! Entities refer to each other only by id.

pub mod course;
pub mod due_date;
pub mod grade;
pub mod module;
pub mod student;

pub use course::Course;
pub use due_date::{DueDate, DueDateLine, DueStatus, Priority};
pub use grade::Grade;
pub use module::CourseModule;
pub use student::Student;
