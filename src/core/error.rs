//! Error taxonomy for record validation and conflicts
//!
//! Not-found outcomes are reported through `bool` / `Option` by the repositories
//! and never appear here. Averages report missing data through the
//! [`NO_DATA`](crate::core::grading::NO_DATA) sentinel instead.

use thiserror::Error;

/// A rejected operation on academic records.
///
/// Every variant is recoverable; the caller is expected to surface the message
/// to the user and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Student ids must be exactly 7 ASCII digits
    #[error("Invalid student ID '{0}': expected exactly 7 digits")]
    InvalidStudentId(String),

    /// A numeric form field could not be parsed
    #[error("Invalid value for {field}: '{value}' is not a number")]
    InvalidNumber {
        /// Name of the offending field (e.g. "score")
        field: &'static str,
        /// Raw text that failed to parse
        value: String,
    },

    /// A numeric field that must be greater than zero
    #[error("Invalid value for {field}: '{value}' must be greater than zero")]
    NotPositive {
        /// Name of the offending field (e.g. "max score")
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// A required text field was blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Module numbers are positive integers
    #[error("Invalid module number '{0}': expected a positive integer")]
    InvalidModuleNumber(String),

    /// The module is still referenced by grades or due dates
    #[error("Module '{module_id}' still has grades or due dates and cannot be removed")]
    ModuleInUse {
        /// Id of the module that was kept
        module_id: String,
    },

    /// A calendar month outside 1..=12 (or an unrepresentable year)
    #[error("Invalid calendar month {year}-{month:02}")]
    InvalidMonth {
        /// Requested year
        year: i32,
        /// Requested month
        month: u32,
    },

    /// Priority tag other than High/Medium/Low
    #[error("Unknown priority: '{0}'")]
    UnknownPriority(String),

    /// Status tag other than Completed/Overdue/Due Soon/Upcoming
    #[error("Unknown due date status: '{0}'")]
    UnknownStatus(String),

    /// Filter tag not offered by the due-date view
    #[error("Unknown due date filter: '{0}'")]
    UnknownFilter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_input() {
        let err = RecordError::InvalidStudentId("12ab".to_string());
        assert!(err.to_string().contains("12ab"));

        let err = RecordError::InvalidNumber {
            field: "score",
            value: "ten".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for score: 'ten' is not a number"
        );
    }

    #[test]
    fn test_month_is_zero_padded() {
        let err = RecordError::InvalidMonth {
            year: 2025,
            month: 13,
        };
        assert_eq!(err.to_string(), "Invalid calendar month 2025-13");
    }
}
