//! Module repository: per-course modules and their numbering

use super::{DueDateRepository, GradeRepository};
use crate::core::ids::{next_free_id, IdGenerator, RandomIds};
use crate::core::models::module::{GENERAL_MODULE_DESCRIPTION, GENERAL_MODULE_NAME};
use crate::core::models::CourseModule;
use crate::core::RecordError;
use crate::{debug, warn};
use std::num::NonZeroU32;

/// Owns every course module
///
/// New modules get their ids from the injected [`IdGenerator`].
pub struct ModuleRepository {
    modules: Vec<CourseModule>,
    ids: Box<dyn IdGenerator>,
}

impl Default for ModuleRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleRepository {
    /// Empty repository issuing random (uuid) ids
    #[must_use]
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(RandomIds))
    }

    /// Empty repository issuing ids from `ids`
    #[must_use]
    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            modules: Vec::new(),
            ids,
        }
    }

    /// Add an existing module
    ///
    /// # Returns
    /// `false` if a module with the same id is already stored
    pub fn add(&mut self, module: CourseModule) -> bool {
        if self.get(module.id()).is_some() {
            warn!("Module '{}' already exists; not added", module.id());
            return false;
        }
        debug!("Adding module {} to course {}", module, module.course_id);
        self.modules.push(module);
        true
    }

    /// Look up a module by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CourseModule> {
        self.modules.iter().find(|m| m.id() == id)
    }

    /// Mutable lookup
    pub fn get_mut(&mut self, id: &str) -> Option<&mut CourseModule> {
        self.modules.iter_mut().find(|m| m.id() == id)
    }

    /// Copy of every module in insertion order
    #[must_use]
    pub fn list(&self) -> Vec<CourseModule> {
        self.modules.clone()
    }

    /// Number of modules across all courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether there are no modules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules of one course, ordered by module number
    #[must_use]
    pub fn modules_for_course(&self, course_id: &str) -> Vec<CourseModule> {
        let mut modules: Vec<CourseModule> = self
            .modules
            .iter()
            .filter(|m| m.course_id == course_id)
            .cloned()
            .collect();
        modules.sort_by_key(CourseModule::module_number);
        modules
    }

    /// Give a course its "General" module if it has no modules yet
    ///
    /// # Returns
    /// `true` if a module was created, `false` if the course already had one
    pub fn initialize_for_course(&mut self, course_id: &str) -> bool {
        if self.modules.iter().any(|m| m.course_id == course_id) {
            return false;
        }
        let module = CourseModule::numbered(
            self.fresh_id(),
            course_id,
            GENERAL_MODULE_NAME,
            NonZeroU32::MIN,
            GENERAL_MODULE_DESCRIPTION,
        );
        debug!("Initialized course {course_id} with {module}");
        self.modules.push(module);
        true
    }

    /// Create the next module of a course
    ///
    /// The new module is numbered one past the highest number already used in
    /// the course. A blank `name` becomes `"Module {n}"` and a blank
    /// `description` becomes `"Content for module {n}"`.
    ///
    /// # Returns
    /// A copy of the stored module
    pub fn create_for_course(
        &mut self,
        course_id: &str,
        name: &str,
        description: &str,
    ) -> CourseModule {
        let number = self.next_number(course_id);
        let name = if name.trim().is_empty() {
            format!("Module {number}")
        } else {
            name.trim().to_string()
        };
        let description = if description.trim().is_empty() {
            format!("Content for module {number}")
        } else {
            description.to_string()
        };

        let module =
            CourseModule::numbered(self.fresh_id(), course_id, name, number, description);
        debug!("Created {module} for course {course_id}");
        self.modules.push(module.clone());
        module
    }

    /// Generated id not used by any stored module
    fn fresh_id(&self) -> String {
        next_free_id(self.ids.as_ref(), |id| self.get(id).is_some())
    }

    fn next_number(&self, course_id: &str) -> NonZeroU32 {
        let highest = self
            .modules
            .iter()
            .filter(|m| m.course_id == course_id)
            .map(CourseModule::module_number)
            .max()
            .unwrap_or(0);
        NonZeroU32::MIN.saturating_add(highest)
    }

    /// Replace the module stored under `id`
    ///
    /// Cached module names on grades and due dates are left alone; callers
    /// that rename a module follow up with `propagate_module_name` on both
    /// repositories (or use [`Gradebook::rename_module`](crate::core::Gradebook::rename_module)).
    ///
    /// # Returns
    /// `false` if no module has that id, or if the replacement carries the id
    /// of a different stored module
    pub fn update(&mut self, id: &str, module: CourseModule) -> bool {
        if module.id() != id && self.get(module.id()).is_some() {
            warn!("Module id '{}' is taken; update of {id} rejected", module.id());
            return false;
        }
        match self.get_mut(id) {
            Some(slot) => {
                debug!("Updating module {id}");
                *slot = module;
                true
            }
            None => false,
        }
    }

    /// Whether any grade or due date still refers to `module_id`
    #[must_use]
    pub fn has_associated_data(
        &self,
        module_id: &str,
        grades: &GradeRepository,
        due_dates: &DueDateRepository,
    ) -> bool {
        grades.references_module(module_id) || due_dates.references_module(module_id)
    }

    /// Remove a module that nothing refers to anymore
    ///
    /// # Returns
    /// `Ok(true)` when removed, `Ok(false)` when no module has that id
    ///
    /// # Errors
    /// Returns [`RecordError::ModuleInUse`] while grades or due dates still
    /// reference the module; the module is kept.
    pub fn remove(
        &mut self,
        module_id: &str,
        grades: &GradeRepository,
        due_dates: &DueDateRepository,
    ) -> Result<bool, RecordError> {
        let Some(pos) = self.modules.iter().position(|m| m.id() == module_id) else {
            return Ok(false);
        };
        if self.has_associated_data(module_id, grades, due_dates) {
            warn!("Refusing to remove module {module_id}: grades or due dates still use it");
            return Err(RecordError::ModuleInUse {
                module_id: module_id.to_string(),
            });
        }
        debug!("Removing module {module_id}");
        self.modules.remove(pos);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::ids::SequentialIds;
    use crate::core::models::{DueDate, Grade, Priority};
    use chrono::NaiveDate;

    fn repo() -> ModuleRepository {
        ModuleRepository::with_id_generator(Box::new(SequentialIds::new("m")))
    }

    fn due_dates() -> DueDateRepository {
        DueDateRepository::with_clock(Box::new(FixedClock(
            NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
        )))
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut repo = repo();
        assert!(repo.initialize_for_course("c-1"));
        assert!(!repo.initialize_for_course("c-1"));

        let modules = repo.modules_for_course("c-1");
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "General");
        assert_eq!(modules[0].description, "General course content");
        assert_eq!(modules[0].module_number(), 1);
        assert_eq!(modules[0].id(), "m-1");
    }

    #[test]
    fn test_initialize_skips_course_with_modules() {
        let mut repo = repo();
        repo.create_for_course("c-1", "Intro", "");
        assert!(!repo.initialize_for_course("c-1"));
        assert_eq!(repo.modules_for_course("c-1").len(), 1);
    }

    #[test]
    fn test_create_numbers_sequentially() {
        let mut repo = repo();
        let numbers: Vec<u32> = (0..3)
            .map(|_| repo.create_for_course("c-1", "", "").module_number())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        let modules = repo.modules_for_course("c-1");
        assert_eq!(modules[1].name, "Module 2");
        assert_eq!(modules[1].description, "Content for module 2");
    }

    #[test]
    fn test_create_follows_highest_number_per_course() {
        let mut repo = repo();
        repo.add(CourseModule::new("x", "c-1", "Late", 12, "").unwrap());
        repo.create_for_course("c-2", "Other course", "");

        let module = repo.create_for_course("c-1", "  Graphs ", "Trees and graphs");
        assert_eq!(module.module_number(), 13);
        assert_eq!(module.name, "Graphs");
        assert_eq!(module.description, "Trees and graphs");
        assert_eq!(repo.modules_for_course("c-2")[0].module_number(), 1);
    }

    #[test]
    fn test_modules_for_course_sorted_by_number() {
        let mut repo = repo();
        repo.add(CourseModule::new("a", "c-1", "Three", 3, "").unwrap());
        repo.add(CourseModule::new("b", "c-1", "One", 1, "").unwrap());
        repo.add(CourseModule::new("c", "c-1", "Two", 2, "").unwrap());

        let names: Vec<String> = repo
            .modules_for_course("c-1")
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_remove_rejected_while_grades_exist() {
        let mut repo = repo();
        let module = repo.create_for_course("c-1", "Loops", "");
        let mut grades = GradeRepository::new();
        let due = due_dates();

        assert!(!repo.has_associated_data(module.id(), &grades, &due));

        grades.add(
            Grade::new("g-1", "1234567", "c-1", "Quiz", 9.0, 10.0, 10.0, "")
                .with_module(module.id(), &module.name),
        );
        assert!(repo.has_associated_data(module.id(), &grades, &due));
        assert_eq!(
            repo.remove(module.id(), &grades, &due),
            Err(RecordError::ModuleInUse {
                module_id: module.id().to_string()
            })
        );
        assert!(repo.get(module.id()).is_some());

        grades.remove("g-1");
        assert_eq!(repo.remove(module.id(), &grades, &due), Ok(true));
        assert_eq!(repo.remove(module.id(), &grades, &due), Ok(false));
    }

    #[test]
    fn test_remove_rejected_while_due_dates_exist() {
        let mut repo = repo();
        let module = repo.create_for_course("c-1", "Loops", "");
        let grades = GradeRepository::new();
        let mut due = due_dates();

        due.add(
            DueDate::new(
                "d-1",
                "c-1",
                "Fundies",
                "HW 1",
                "",
                NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
                Priority::High,
            )
            .with_module(module.id(), &module.name),
        );
        assert!(repo.has_associated_data(module.id(), &grades, &due));
        assert!(repo.remove(module.id(), &grades, &due).is_err());
    }

    #[test]
    fn test_update_does_not_touch_grades() {
        let mut repo = repo();
        let module = repo.create_for_course("c-1", "Loops", "");
        let mut grades = GradeRepository::new();
        grades.add(
            Grade::new("g-1", "1234567", "c-1", "Quiz", 9.0, 10.0, 10.0, "")
                .with_module(module.id(), "Loops"),
        );

        let mut renamed = module.clone();
        renamed.name = "Iteration".to_string();
        assert!(repo.update(module.id(), renamed));
        assert_eq!(repo.get(module.id()).unwrap().name, "Iteration");
        assert_eq!(grades.get("g-1").unwrap().module_name, "Loops");
    }

    #[test]
    fn test_generated_ids_skip_existing_modules() {
        let mut repo = repo();
        repo.add(CourseModule::new("m-1", "c-1", "Imported", 1, "").unwrap());
        repo.add(CourseModule::new("m-3", "c-2", "Imported", 1, "").unwrap());

        let created = repo.create_for_course("c-1", "Loops", "");
        assert_eq!(created.id(), "m-2");
        assert!(repo.initialize_for_course("c-3"));
        assert_eq!(repo.modules_for_course("c-3")[0].id(), "m-4");

        assert_eq!(repo.len(), 4);
        assert_eq!(repo.get("m-1").unwrap().name, "Imported");
    }

    #[test]
    fn test_update_rejects_id_of_other_module() {
        let mut repo = repo();
        let first = repo.create_for_course("c-1", "One", "");
        let second = repo.create_for_course("c-1", "Two", "");

        let clash = CourseModule::new(first.id(), "c-1", "Clash", 2, "").unwrap();
        assert!(!repo.update(second.id(), clash));
        assert_eq!(repo.get(second.id()).unwrap().name, "Two");
        assert_eq!(repo.len(), 2);
    }
}
