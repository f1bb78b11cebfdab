//! Summary command handler: course averages, letters and GPA for one student

use super::load_gradebook;
use grade_tracker::config::Config;
use grade_tracker::core::models::student::validate_student_id;
use grade_tracker::core::Gradebook;
use grade_tracker::{info, verbose};
use std::path::Path;

/// Print a student's academic summary
///
/// # Returns
/// `false` if the student id is invalid, the gradebook cannot be loaded or
/// the student is unknown
pub fn run(file: Option<&Path>, student_id: &str, config: &Config) -> bool {
    if let Err(e) = validate_student_id(student_id) {
        eprintln!("✗ {e}");
        return false;
    }
    let Some(book) = load_gradebook(file, config) else {
        return false;
    };
    let Some(student) = book.students.get(student_id) else {
        eprintln!("✗ No student with ID {student_id}");
        return false;
    };

    info!("Summarizing student {student_id}");
    println!("\n=== {} ({student_id}) ===\n", student.full_name());
    print_courses(&book, student_id);

    println!();
    match book.grades.overall_average(student_id, &book.courses) {
        Some(program) => {
            println!(
                "Program average: {:.2}% ({}) over {} credits in {} course(s)",
                program.average,
                program.letter_grade(),
                program.credits,
                program.courses
            );
            println!("GPA: {:.2}", program.gpa);
        }
        None => println!("Program average: no grades recorded"),
    }
    true
}

fn print_courses(book: &Gradebook, student_id: &str) {
    let summaries = book.course_summaries(student_id);
    if summaries.is_empty() {
        println!("Not enrolled in any courses");
        return;
    }

    for summary in summaries {
        let course = &summary.course;
        match (summary.average, summary.letter_grade()) {
            (Some(average), Some(letter)) => println!(
                "{} - {} ({} cr): {average:.2}% {letter} [{} grade(s)]",
                course.code, course.name, course.credits, summary.grade_count
            ),
            _ => println!(
                "{} - {} ({} cr): no grades",
                course.code, course.name, course.credits
            ),
        }

        for module in book.modules.modules_for_course(course.id()) {
            if let Some(average) = book.grades.module_average(student_id, module.id()) {
                verbose!("    {module}: {average:.2}%");
            }
        }
    }
}
