//! End-to-end tests over the gradebook and its repositories

use chrono::NaiveDate;
use grade_tracker::core::clock::FixedClock;
use grade_tracker::core::forms::{ScoreFields, StudentSignUp};
use grade_tracker::core::grading::{LetterGrade, NO_DATA};
use grade_tracker::core::ids::SequentialIds;
use grade_tracker::core::models::{Course, DueStatus};
use grade_tracker::core::repository::DueDateFilter;
use grade_tracker::core::{Gradebook, RecordError};
use std::path::Path;

const SAMPLE: &str = "samples/gradebook.toml";
const EPS: f64 = 1e-9;

fn fixed_book() -> Gradebook {
    Gradebook::with_services(
        Box::new(SequentialIds::new("module")),
        Box::new(SequentialIds::new("record")),
        Box::new(FixedClock(NaiveDate::from_ymd_opt(2025, 10, 15).unwrap())),
    )
}

fn sample_book() -> Gradebook {
    let mut book = fixed_book();
    let content = std::fs::read_to_string(SAMPLE).expect("sample gradebook should exist");
    book.import_toml(&content).expect("sample gradebook should import");
    book
}

fn ids(list: &[grade_tracker::core::models::DueDate]) -> Vec<&str> {
    list.iter().map(|d| d.id()).collect()
}

#[test]
fn test_single_course_scenario() {
    let mut book = fixed_book();
    book.courses
        .add(Course::new("c", "Fundies", "CS2500", 4, "Dr. Ramsey", "Fall 2025"));
    let student = StudentSignUp {
        student_id: "1234567".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        ..StudentSignUp::default()
    }
    .into_student()
    .unwrap();
    assert!(book.students.add(student));
    assert!(book.enroll("1234567", "c"));

    let a = ScoreFields::parse("45", "50", "30").unwrap();
    let b = ScoreFields::parse("18", "20", "70").unwrap();
    book.record_grade("1234567", "c", None, "A", a, "2025-09-12");
    book.record_grade("1234567", "c", None, "B", b, "2025-09-26");

    let average = book.grades.calculate_course_average("1234567", "c");
    assert!((average - 90.0).abs() < EPS);
    assert_eq!(LetterGrade::from_percentage(average).to_string(), "A");

    let overall = book.grades.overall_average("1234567", &book.courses).unwrap();
    assert!((overall.average - 90.0).abs() < EPS);
    assert_eq!(overall.credits, 4);
    assert!((overall.gpa - 4.0).abs() < EPS);
}

#[test]
fn test_unknown_student_has_no_data() {
    let book = sample_book();
    assert!((book.grades.calculate_course_average("1111111", "cs2500") - NO_DATA).abs() < EPS);
    assert!((book.grades.calculate_gpa("1111111", &book.courses) - NO_DATA).abs() < EPS);
    assert!(book.grades.overall_average("1111111", &book.courses).is_none());
}

#[test]
fn test_sample_loads_from_disk() {
    let book = Gradebook::load(Path::new(SAMPLE)).unwrap();
    assert_eq!(book.courses.len(), 3);
    assert_eq!(book.students.len(), 2);
    assert_eq!(book.grades.len(), 4);
    assert_eq!(book.due_dates.len(), 5);
    // two explicit modules for cs2500, a "General" module for each other course
    assert_eq!(book.modules.len(), 4);
    assert_eq!(book.modules.modules_for_course("cs2501")[0].name, "General");

    assert!(Gradebook::load(Path::new("samples/missing.toml")).is_err());
}

#[test]
fn test_sample_averages() {
    let book = sample_book();
    let ada = "1234567";

    let summaries = book.course_summaries(ada);
    let letters: Vec<Option<LetterGrade>> =
        summaries.iter().map(|s| s.letter_grade()).collect();
    assert_eq!(
        letters,
        vec![Some(LetterGrade::A), Some(LetterGrade::C), None]
    );

    let module = book.grades.module_average(ada, "cs2500-data").unwrap();
    assert!((module - 90.0).abs() < EPS);

    let overall = book.grades.overall_average(ada, &book.courses).unwrap();
    assert_eq!(overall.credits, 5);
    assert_eq!(overall.courses, 2);
    assert!((overall.average - 87.0).abs() < EPS);
    assert!((overall.gpa - 3.6).abs() < EPS);
    assert!((book.grades.calculate_gpa(ada, &book.courses) - 3.6).abs() < EPS);
}

#[test]
fn test_sample_due_dates() {
    let book = sample_book();
    let due = &book.due_dates;

    let all = due.view("1234567", None, DueDateFilter::All, &book.courses);
    assert_eq!(ids(&all), vec!["d-ps1", "d-lab4", "d-ps3", "d-exam1", "d-quiz"]);

    let overdue = due.view("1234567", None, "Overdue".parse().unwrap(), &book.courses);
    assert_eq!(ids(&overdue), vec!["d-lab4"]);

    let soon = due.view("1234567", None, "Due Soon".parse().unwrap(), &book.courses);
    assert_eq!(ids(&soon), vec!["d-ps3"]);
    assert_eq!(soon[0].days_remaining_on(due.today()), 2);

    let high = due.view(
        "1234567",
        Some("cs2500"),
        "High Priority".parse().unwrap(),
        &book.courses,
    );
    assert_eq!(ids(&high), vec!["d-ps3", "d-exam1"]);

    assert_eq!(ids(&due.for_student("7654321", &book.courses)), vec!["d-ps1", "d-ps3", "d-exam1"]);
    assert_eq!(ids(&due.upcoming()), vec!["d-ps3", "d-exam1", "d-quiz"]);
    assert_eq!(ids(&due.by_status(DueStatus::Completed)), vec!["d-ps1"]);
    assert_eq!(
        ids(&due.for_student_in_module("7654321", "cs2500-lists", &book.courses)),
        vec!["d-ps3"]
    );
}

#[test]
fn test_sample_calendar() {
    let book = sample_book();
    let october = book.due_dates.calendar_month(2025, 10).unwrap();
    assert_eq!(october.total(), 3);
    assert_eq!(october.days.keys().copied().collect::<Vec<_>>(), vec![13, 17, 28]);
    assert_eq!(october.leading_blanks, 3);

    assert_eq!(
        book.due_dates.calendar_month(2025, 13).unwrap_err(),
        RecordError::InvalidMonth {
            year: 2025,
            month: 13
        }
    );
}

#[test]
fn test_module_lifecycle() {
    let mut book = sample_book();

    let removal = book
        .modules
        .remove("cs2500-lists", &book.grades, &book.due_dates);
    assert!(matches!(removal, Err(RecordError::ModuleInUse { .. })));

    assert_eq!(book.rename_module("cs2500-lists", "Lists and Trees", 2), Ok(true));
    assert_eq!(book.grades.get("g-ps2").unwrap().module_name, "Lists and Trees");
    assert_eq!(book.due_dates.get("d-ps3").unwrap().module_name, "Lists and Trees");

    let created = book.modules.create_for_course("cs2500", "", "");
    assert_eq!(created.module_number(), 3);
    assert_eq!(created.name, "Module 3");
    assert_eq!(
        book.modules.remove(created.id(), &book.grades, &book.due_dates),
        Ok(true)
    );
}

#[test]
fn test_duplicate_student_rejected() {
    let mut book = sample_book();
    let again = grade_tracker::core::models::Student::new("1234567", "Someone", "Else").unwrap();
    assert!(!book.students.add(again));
    assert_eq!(book.students.get("1234567").unwrap().first_name, "Ada");
}
