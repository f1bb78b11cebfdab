//! The gradebook: all five repositories plus the operations that span them
//!
//! A gradebook can be filled programmatically or imported from a TOML file:
//!
//! ```toml
//! [[courses]]
//! id = "cs2500"
//! name = "Fundamentals of Computer Science 1"
//! code = "CS2500"
//! credits = 4
//! students = ["1234567"]
//!
//! [[students]]
//! id = "1234567"
//! first_name = "Ada"
//! last_name = "Lovelace"
//!
//! [[modules]]
//! id = "cs2500-m1"
//! course = "cs2500"
//! name = "Data Design"
//! number = 1
//!
//! [[grades]]
//! student = "1234567"
//! course = "cs2500"
//! module = "cs2500-m1"
//! assignment = "Problem Set 1"
//! score = 45
//! max_score = 50
//! weight = 30
//!
//! [[due_dates]]
//! course = "cs2500"
//! assignment = "Problem Set 2"
//! due = "2025-10-20"
//! priority = "High"
//! ```

use crate::core::clock::{Clock, SystemClock};
use crate::core::forms::ScoreFields;
use crate::core::grading::LetterGrade;
use crate::core::ids::{next_free_id, IdGenerator, RandomIds};
use crate::core::models::module::GENERAL_MODULE_NAME;
use crate::core::models::{Course, CourseModule, DueDate, Grade, Priority, Student};
use crate::core::repository::{
    CourseRepository, DueDateRepository, GradeRepository, ModuleRepository, StudentRepository,
};
use crate::core::RecordError;
use crate::{debug, info, warn};
use chrono::NaiveDate;
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// One course's standing for a student
#[derive(Debug, Clone, PartialEq)]
pub struct CourseSummary {
    /// The course
    pub course: Course,
    /// Weighted average, if the student has usable grades there
    pub average: Option<f64>,
    /// Number of grades recorded
    pub grade_count: usize,
}

impl CourseSummary {
    /// Letter for the average
    #[must_use]
    pub fn letter_grade(&self) -> Option<LetterGrade> {
        self.average.map(LetterGrade::from_percentage)
    }
}

/// All academic records of one installation
pub struct Gradebook {
    /// Courses
    pub courses: CourseRepository,
    /// Students
    pub students: StudentRepository,
    /// Course modules
    pub modules: ModuleRepository,
    /// Grades
    pub grades: GradeRepository,
    /// Due dates
    pub due_dates: DueDateRepository,
    ids: Box<dyn IdGenerator>,
}

impl Default for Gradebook {
    fn default() -> Self {
        Self::new()
    }
}

impl Gradebook {
    /// Empty gradebook with random ids and the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_services(
            Box::new(RandomIds),
            Box::new(RandomIds),
            Box::new(SystemClock),
        )
    }

    /// Empty gradebook with injected id sources and clock
    ///
    /// # Arguments
    /// * `module_ids` - ids for modules the repository creates
    /// * `record_ids` - ids for grades and due dates recorded without one
    /// * `clock` - source of today's date for due date status
    #[must_use]
    pub fn with_services(
        module_ids: Box<dyn IdGenerator>,
        record_ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            courses: CourseRepository::new(),
            students: StudentRepository::new(),
            modules: ModuleRepository::with_id_generator(module_ids),
            grades: GradeRepository::new(),
            due_dates: DueDateRepository::with_clock(clock),
            ids: record_ids,
        }
    }

    /// Enroll a student in a course, recording it on both sides
    ///
    /// The course gets its "General" module if it has none yet.
    ///
    /// # Returns
    /// `false` if either record is missing or the student is already enrolled
    pub fn enroll(&mut self, student_id: &str, course_id: &str) -> bool {
        let Some(student) = self.students.get_mut(student_id) else {
            warn!("Cannot enroll unknown student {student_id}");
            return false;
        };
        let Some(course) = self.courses.get_mut(course_id) else {
            warn!("Cannot enroll in unknown course {course_id}");
            return false;
        };
        if course.is_enrolled(student_id) {
            debug!("Student {student_id} already enrolled in {course_id}");
            return false;
        }
        course.enroll(student_id);
        student.enroll_in_course(course_id);
        self.modules.initialize_for_course(course_id);
        info!("Enrolled student {student_id} in {course_id}");
        true
    }

    /// Remove a student from a course on both sides
    ///
    /// # Returns
    /// `false` if the student was not enrolled
    pub fn unenroll(&mut self, student_id: &str, course_id: &str) -> bool {
        let removed = self
            .courses
            .get_mut(course_id)
            .is_some_and(|c| c.unenroll(student_id));
        if let Some(student) = self.students.get_mut(student_id) {
            student.unenroll_from_course(course_id);
        }
        removed
    }

    /// Rename and renumber a module, then refresh the cached name on its
    /// grades and due dates
    ///
    /// # Returns
    /// `Ok(false)` if no module has that id
    ///
    /// # Errors
    /// [`RecordError::InvalidModuleNumber`] if `number` is zero; nothing changes
    pub fn rename_module(
        &mut self,
        module_id: &str,
        name: &str,
        number: u32,
    ) -> Result<bool, RecordError> {
        let Some(module) = self.modules.get_mut(module_id) else {
            return Ok(false);
        };
        module.set_module_number(number)?;
        module.name = name.to_string();

        let grades = self.grades.propagate_module_name(module_id, name);
        let due = self.due_dates.propagate_module_name(module_id, name);
        info!("Renamed module {module_id} to '{name}' ({grades} grades, {due} due dates)");
        Ok(true)
    }

    /// Record a grade, filing it under `module_id` when given
    ///
    /// The id is drawn from the record id generator, skipping ids already held
    /// by a stored grade, so the grade is always stored.
    ///
    /// # Returns
    /// A copy of the stored grade
    pub fn record_grade(
        &mut self,
        student_id: &str,
        course_id: &str,
        module_id: Option<&str>,
        assignment_name: &str,
        fields: ScoreFields,
        date_submitted: &str,
    ) -> Grade {
        let mut grade = Grade::new(
            self.fresh_grade_id(),
            student_id,
            course_id,
            assignment_name,
            fields.score,
            fields.max_score,
            fields.weight,
            date_submitted,
        );
        if let Some(module_id) = module_id {
            grade = grade.with_module(module_id, self.module_name(module_id));
        }
        self.grades.add(grade.clone());
        grade
    }

    /// Record a due date for a course, filing it under `module_id` when given
    ///
    /// Like [`record_grade`](Self::record_grade), the generated id never
    /// collides with a stored due date.
    ///
    /// # Returns
    /// A copy of the stored due date
    pub fn record_due_date(
        &mut self,
        course_id: &str,
        module_id: Option<&str>,
        assignment_name: &str,
        description: &str,
        due_date: NaiveDate,
        priority: Priority,
    ) -> DueDate {
        let due = self.build_due_date(
            self.fresh_due_date_id(),
            course_id,
            module_id,
            assignment_name,
            description,
            due_date,
            priority,
        );
        self.due_dates.add(due.clone());
        due
    }

    fn fresh_grade_id(&self) -> String {
        next_free_id(self.ids.as_ref(), |id| self.grades.get(id).is_some())
    }

    fn fresh_due_date_id(&self) -> String {
        next_free_id(self.ids.as_ref(), |id| self.due_dates.get(id).is_some())
    }

    #[allow(clippy::too_many_arguments)]
    fn build_due_date(
        &self,
        id: String,
        course_id: &str,
        module_id: Option<&str>,
        assignment_name: &str,
        description: &str,
        due_date: NaiveDate,
        priority: Priority,
    ) -> DueDate {
        let due = DueDate::new(
            id,
            course_id,
            self.course_name(course_id),
            assignment_name,
            description,
            due_date,
            priority,
        );
        match module_id {
            Some(module_id) => due.with_module(module_id, self.module_name(module_id)),
            None => due,
        }
    }

    fn module_name(&self, module_id: &str) -> String {
        self.modules.get(module_id).map_or_else(
            || {
                warn!("Unknown module {module_id}; filing under {GENERAL_MODULE_NAME}");
                GENERAL_MODULE_NAME.to_string()
            },
            |m| m.name.clone(),
        )
    }

    fn course_name(&self, course_id: &str) -> String {
        self.courses
            .get(course_id)
            .map_or_else(|| course_id.to_string(), |c| c.name.clone())
    }

    /// Per-course standing for every course the student is enrolled in
    #[must_use]
    pub fn course_summaries(&self, student_id: &str) -> Vec<CourseSummary> {
        self.courses
            .courses_for_student(student_id)
            .into_iter()
            .map(|course| CourseSummary {
                average: self.grades.course_average(student_id, course.id()),
                grade_count: self.grades.for_student_in_course(student_id, course.id()).len(),
                course,
            })
            .collect()
    }

    /// Import a gradebook file with random ids and the system clock
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or its contents are rejected
    /// by [`import_toml`](Self::import_toml)
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        let book = Self::from_toml_str(&content)?;
        info!("Loaded gradebook from {}", path.display());
        Ok(book)
    }

    /// Import gradebook TOML into a new gradebook
    ///
    /// # Errors
    /// See [`import_toml`](Self::import_toml)
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let mut book = Self::new();
        book.import_toml(toml_str)?;
        Ok(book)
    }

    /// Add the records of a gradebook TOML document to this gradebook
    ///
    /// Every record is checked before anything is added, so a rejected
    /// document leaves the gradebook as it was. Records are then added in
    /// dependency order: courses, students, modules, enrollments, grades, due
    /// dates. Records whose id is already present are skipped with a warning.
    ///
    /// # Errors
    /// Returns an error if the TOML does not parse, a student id is not seven
    /// digits, a module number is zero, a grade has a non-finite value or a
    /// maximum score that is not positive, a priority is unknown, or an
    /// enrollment names an unknown student
    pub fn import_toml(&mut self, toml_str: &str) -> Result<(), Box<dyn Error>> {
        let file: GradebookFile = toml::from_str(toml_str)?;
        let batch = file.validate(&self.students)?;
        self.apply(batch);
        Ok(())
    }

    fn apply(&mut self, batch: ImportBatch) {
        for record in &batch.courses {
            self.courses.add(Course::new(
                &record.id,
                &record.name,
                &record.code,
                record.credits,
                &record.instructor,
                &record.semester,
            ));
        }
        for student in batch.students {
            self.students.add(student);
        }
        for module in batch.modules {
            self.modules.add(module);
        }
        for course in &batch.courses {
            for student_id in &course.students {
                self.enroll(student_id, &course.id);
            }
        }

        for (record, fields) in batch.grades {
            let id = record.id.unwrap_or_else(|| self.fresh_grade_id());
            let mut grade = Grade::new(
                id,
                record.student,
                record.course,
                record.assignment,
                fields.score,
                fields.max_score,
                fields.weight,
                record.date_submitted,
            );
            if let Some(module_id) = record.module {
                let name = self.module_name(&module_id);
                grade = grade.with_module(module_id, name);
            }
            grade.comments = record.comments;
            self.grades.add(grade);
        }

        for (record, priority) in batch.due_dates {
            let id = record.id.unwrap_or_else(|| self.fresh_due_date_id());
            let mut due = self.build_due_date(
                id,
                &record.course,
                record.module.as_deref(),
                &record.assignment,
                &record.description,
                record.due,
                priority,
            );
            due.completed = record.completed;
            self.due_dates.add(due);
        }

        debug!(
            "Imported {} courses, {} students, {} modules, {} grades, {} due dates",
            self.courses.len(),
            self.students.len(),
            self.modules.len(),
            self.grades.len(),
            self.due_dates.len()
        );
    }
}

/// Records of an import that passed validation
struct ImportBatch {
    courses: Vec<CourseRecord>,
    students: Vec<Student>,
    modules: Vec<CourseModule>,
    grades: Vec<(GradeRecord, ScoreFields)>,
    due_dates: Vec<(DueDateRecord, Priority)>,
}

#[derive(Debug, Deserialize)]
struct GradebookFile {
    #[serde(default)]
    courses: Vec<CourseRecord>,
    #[serde(default)]
    students: Vec<StudentRecord>,
    #[serde(default)]
    modules: Vec<ModuleRecord>,
    #[serde(default)]
    grades: Vec<GradeRecord>,
    #[serde(default)]
    due_dates: Vec<DueDateRecord>,
}

#[derive(Debug, Deserialize)]
struct CourseRecord {
    id: String,
    name: String,
    code: String,
    #[serde(default)]
    credits: u32,
    #[serde(default)]
    instructor: String,
    #[serde(default)]
    semester: String,
    #[serde(default)]
    students: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StudentRecord {
    id: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    year_level: Option<u32>,
    #[serde(default)]
    courses_completed: u32,
}

#[derive(Debug, Deserialize)]
struct ModuleRecord {
    id: String,
    course: String,
    name: String,
    number: u32,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct GradeRecord {
    id: Option<String>,
    student: String,
    course: String,
    module: Option<String>,
    assignment: String,
    score: f64,
    max_score: f64,
    weight: f64,
    #[serde(default)]
    date_submitted: String,
    #[serde(default)]
    comments: String,
}

#[derive(Debug, Deserialize)]
struct DueDateRecord {
    id: Option<String>,
    course: String,
    module: Option<String>,
    assignment: String,
    #[serde(default)]
    description: String,
    due: NaiveDate,
    #[serde(default = "default_priority")]
    priority: String,
    #[serde(default)]
    completed: bool,
}

impl GradebookFile {
    /// Check every record; `existing` holds the students already stored
    fn validate(self, existing: &StudentRepository) -> Result<ImportBatch, Box<dyn Error>> {
        let students = self
            .students
            .into_iter()
            .map(StudentRecord::into_student)
            .collect::<Result<Vec<_>, _>>()?;

        let modules = self
            .modules
            .into_iter()
            .map(|r| CourseModule::new(r.id, r.course, r.name, r.number, r.description))
            .collect::<Result<Vec<_>, _>>()?;

        for course in &self.courses {
            for student_id in &course.students {
                let known = existing.get(student_id).is_some()
                    || students.iter().any(|s| s.student_id() == student_id);
                if !known {
                    return Err(format!(
                        "Course '{}' lists unknown student '{student_id}'",
                        course.id
                    )
                    .into());
                }
            }
        }

        let grades = self
            .grades
            .into_iter()
            .map(|r| ScoreFields::new(r.score, r.max_score, r.weight).map(|f| (r, f)))
            .collect::<Result<Vec<_>, _>>()?;

        let due_dates = self
            .due_dates
            .into_iter()
            .map(|r| r.priority.parse::<Priority>().map(|p| (r, p)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ImportBatch {
            courses: self.courses,
            students,
            modules,
            grades,
            due_dates,
        })
    }
}

impl StudentRecord {
    fn into_student(self) -> Result<Student, RecordError> {
        let mut student = Student::new(&self.id, self.first_name, self.last_name)?;
        student.email = self.email;
        student.courses_completed = self.courses_completed;
        if let Some(year) = self.year_level {
            student.set_year_level(year)?;
        }
        Ok(student)
    }
}

fn default_priority() -> String {
    Priority::Medium.to_string()
}
