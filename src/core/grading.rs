//! Percentage, letter grade and GPA arithmetic
//!
//! All averages here are weight-normalised: weights are relative and do not
//! need to add up to 100.

use crate::core::models::Grade;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel returned by the `calculate_*` operations when there is nothing to
/// average (no grades, or every weight is zero).
pub const NO_DATA: f64 = -1.0;

/// Collapse an optional average into the [`NO_DATA`] sentinel form
#[must_use]
pub fn or_no_data(value: Option<f64>) -> f64 {
    value.unwrap_or(NO_DATA)
}

/// Letter grade on the A–F scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    /// 90% and above
    A,
    /// 80% up to 90%
    B,
    /// 70% up to 80%
    C,
    /// 60% up to 70%
    D,
    /// Below 60%
    F,
}

impl LetterGrade {
    /// Map a percentage (0–100, may exceed 100) to a letter
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::A
        } else if percentage >= 80.0 {
            Self::B
        } else if percentage >= 70.0 {
            Self::C
        } else if percentage >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }

    /// Grade points on the 4.0 scale
    #[must_use]
    pub const fn gpa_points(self) -> f64 {
        match self {
            Self::A => 4.0,
            Self::B => 3.0,
            Self::C => 2.0,
            Self::D => 1.0,
            Self::F => 0.0,
        }
    }

    /// Letter as a one-character string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GPA points for a percentage, using the same break points as the letters
#[must_use]
pub fn gpa_points(percentage: f64) -> f64 {
    LetterGrade::from_percentage(percentage).gpa_points()
}

/// Weighted average of a set of grades, as a percentage.
///
/// `Σ(score / max × weight) / Σ(weight) × 100`. Returns `None` when the set is
/// empty or the total weight is zero.
#[allow(clippy::float_cmp)]
pub fn weighted_average<'a, I>(grades: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Grade>,
{
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    let mut any = false;

    for grade in grades {
        any = true;
        weighted_sum += grade.proportion() * grade.weight;
        total_weight += grade.weight;
    }

    if !any || total_weight == 0.0 {
        return None;
    }

    Some(weighted_sum / total_weight * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(score: f64, max: f64, weight: f64) -> Grade {
        Grade::new("g", "1234567", "c", "Quiz", score, max, weight, "2025-01-01")
    }

    #[test]
    fn test_letter_boundaries() {
        assert_eq!(LetterGrade::from_percentage(0.90 * 100.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(0.899_999 * 100.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_percentage(80.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_percentage(70.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_percentage(0.60 * 100.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_percentage(0.599_999 * 100.0), LetterGrade::F);
        assert_eq!(LetterGrade::from_percentage(115.0), LetterGrade::A);
    }

    #[test]
    fn test_gpa_points_follow_letters() {
        assert!((gpa_points(95.0) - 4.0).abs() < f64::EPSILON);
        assert!((gpa_points(85.0) - 3.0).abs() < f64::EPSILON);
        assert!((gpa_points(75.0) - 2.0).abs() < f64::EPSILON);
        assert!((gpa_points(65.0) - 1.0).abs() < f64::EPSILON);
        assert!(gpa_points(59.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weighted_average_equal_weights() {
        let grades = [grade(80.0, 100.0, 50.0), grade(90.0, 100.0, 50.0)];
        let avg = weighted_average(&grades).unwrap();
        assert!((avg - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_self_normalise() {
        // 1:3 weighting, weights sum to 4 not 100
        let grades = [grade(50.0, 100.0, 1.0), grade(100.0, 100.0, 3.0)];
        let avg = weighted_average(&grades).unwrap();
        assert!((avg - 87.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_zero_weight_have_no_data() {
        let none: [Grade; 0] = [];
        assert_eq!(weighted_average(&none), None);

        let zero = [grade(80.0, 100.0, 0.0), grade(90.0, 100.0, 0.0)];
        assert_eq!(weighted_average(&zero), None);
        assert!((or_no_data(weighted_average(&zero)) - NO_DATA).abs() < f64::EPSILON);
    }
}
