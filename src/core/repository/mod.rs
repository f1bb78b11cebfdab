//! Repositories owning each entity collection
//!
//! Repositories never hold references to each other. Operations that need a
//! second collection (enrollment lookups, module usage checks) take it as an
//! argument. Every list-returning query hands back an owned copy.

pub mod calendar;
pub mod course;
pub mod due_date;
pub mod grade;
pub mod module;
pub mod student;

pub use calendar::CalendarMonth;
pub use course::CourseRepository;
pub use due_date::{DueDateFilter, DueDateRepository};
pub use grade::{GradeRepository, ProgramAverage};
pub use module::ModuleRepository;
pub use student::StudentRepository;
