//! Course module model

use crate::core::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Name given to the module every course starts with
pub const GENERAL_MODULE_NAME: &str = "General";

/// Description of the "General" module
pub const GENERAL_MODULE_DESCRIPTION: &str = "General course content";

/// A named subdivision of a course used to group assignments and due dates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    id: String,

    /// Id of the owning course
    pub course_id: String,

    /// Display name
    pub name: String,

    /// Display position within the course; always positive
    module_number: u32,

    /// Free-text description of the material
    pub description: String,
}

impl CourseModule {
    /// Create a new module
    ///
    /// # Errors
    /// Returns [`RecordError::InvalidModuleNumber`] if `module_number` is zero
    pub fn new(
        id: impl Into<String>,
        course_id: impl Into<String>,
        name: impl Into<String>,
        module_number: u32,
        description: impl Into<String>,
    ) -> Result<Self, RecordError> {
        check_number(module_number)?;
        Ok(Self {
            id: id.into(),
            course_id: course_id.into(),
            name: name.into(),
            module_number,
            description: description.into(),
        })
    }

    /// Create a module whose number is already known to be positive
    pub(crate) fn numbered(
        id: impl Into<String>,
        course_id: impl Into<String>,
        name: impl Into<String>,
        module_number: NonZeroU32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            course_id: course_id.into(),
            name: name.into(),
            module_number: module_number.get(),
            description: description.into(),
        }
    }

    /// The module id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Position used for ordering within the course
    #[must_use]
    pub const fn module_number(&self) -> u32 {
        self.module_number
    }

    /// Renumber the module
    ///
    /// # Errors
    /// Returns [`RecordError::InvalidModuleNumber`] if `module_number` is zero
    pub fn set_module_number(&mut self, module_number: u32) -> Result<(), RecordError> {
        check_number(module_number)?;
        self.module_number = module_number;
        Ok(())
    }
}

fn check_number(module_number: u32) -> Result<(), RecordError> {
    if module_number == 0 {
        Err(RecordError::InvalidModuleNumber(module_number.to_string()))
    } else {
        Ok(())
    }
}

impl fmt::Display for CourseModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Module {}: {}", self.module_number, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_creation() {
        let module = CourseModule::new("m-1", "c-1", "Recursion", 4, "Recursive functions").unwrap();

        assert_eq!(module.id(), "m-1");
        assert_eq!(module.course_id, "c-1");
        assert_eq!(module.module_number(), 4);
        assert_eq!(module.to_string(), "Module 4: Recursion");
    }

    #[test]
    fn test_numbers_are_unbounded_but_positive() {
        let mut module = CourseModule::new("m-1", "c-1", "Intro", 1, "").unwrap();

        assert!(module.set_module_number(42).is_ok());
        assert_eq!(module.module_number(), 42);

        assert!(module.set_module_number(0).is_err());
        assert_eq!(module.module_number(), 42);

        assert!(CourseModule::new("m-2", "c-1", "Bad", 0, "").is_err());
    }
}
