//! Shared library for `GradeTracker`
//! Contains the academic-record engine used by the CLI and any other front end

pub mod core;
pub mod logger;

pub use core::{config, get_version};
