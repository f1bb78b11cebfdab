//! Integration smoke tests for `grade_tracker`

use grade_tracker::core::Gradebook;
use grade_tracker::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn empty_gradebook_has_no_records() {
    let book = Gradebook::new();
    assert!(book.courses.is_empty());
    assert!(book.students.is_empty());
    assert!(book.modules.is_empty());
    assert!(book.grades.is_empty());
    assert!(book.due_dates.is_empty());
}
