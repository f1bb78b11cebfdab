//! Core module: the academic-record engine

pub mod clock;
pub mod config;
pub mod error;
pub mod forms;
pub mod gradebook;
pub mod grading;
pub mod ids;
pub mod models;
pub mod repository;

pub use error::RecordError;
pub use gradebook::Gradebook;

/// Returns the current version of the `GradeTracker` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
