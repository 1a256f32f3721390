//! In-memory project registry.
//!
//! # Ownership
//!
//! [`ProjectRegistry`] owns the authoritative list of projects. Every
//! mutation goes through its methods; lookups hand out shared references,
//! so callers cannot bypass the validation in [`create`].
//!
//! # Failure semantics
//!
//! Hard failures (name validation, duplicate names) are synchronous
//! `Err(RegistryError)` values with no partial mutation. Absent targets are
//! soft: lookups return `Option`, and mutations addressed at a missing
//! project or to-do are silent no-ops.
//!
//! [`create`]: ProjectRegistry::create

use crate::error::RegistryError;
use crate::types::{Project, ProjectDraft, ProjectId, Todo, TodoDraft, TodoId};

/// Minimum number of characters for a project name.
pub const MIN_NAME_LEN: usize = 5;

type ChangeHook = Box<dyn FnMut(&Project)>;

/// The in-memory owner of all projects.
///
/// Registry order is creation order and is preserved by every operation.
#[derive(Default)]
pub struct ProjectRegistry {
    projects: Vec<Project>,
    on_created: Option<ChangeHook>,
    on_deleted: Option<ChangeHook>,
}

impl ProjectRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a previously exported snapshot verbatim.
    ///
    /// Records keep their serialized ids, initials and todos; no validation
    /// runs and no hooks fire. Use [`import_snapshot`] to merge foreign
    /// records instead.
    ///
    /// [`import_snapshot`]: ProjectRegistry::import_snapshot
    pub fn from_snapshot(records: Vec<Project>) -> Self {
        Self {
            projects: records,
            on_created: None,
            on_deleted: None,
        }
    }

    // -----------------------------------------------------------------------
    // 1. Change notification
    // -----------------------------------------------------------------------

    /// Installs the handler fired after each successful [`create`].
    ///
    /// A single slot: assigning again replaces the previous handler.
    ///
    /// [`create`]: ProjectRegistry::create
    pub fn set_on_created(&mut self, hook: impl FnMut(&Project) + 'static) {
        self.on_created = Some(Box::new(hook));
    }

    /// Installs the handler fired after each successful [`delete`].
    ///
    /// A single slot: assigning again replaces the previous handler.
    ///
    /// [`delete`]: ProjectRegistry::delete
    pub fn set_on_deleted(&mut self, hook: impl FnMut(&Project) + 'static) {
        self.on_deleted = Some(Box::new(hook));
    }

    // -----------------------------------------------------------------------
    // 2. Project CRUD
    // -----------------------------------------------------------------------

    /// Validates and creates a new project from `draft`.
    ///
    /// Fails with [`RegistryError::NameTooShort`] below [`MIN_NAME_LEN`]
    /// characters, or [`RegistryError::DuplicateName`] when another project
    /// already carries the same name (compared case-sensitively). On success
    /// the project is appended, the "created" hook fires, and a reference to
    /// the stored record is returned.
    pub fn create(&mut self, draft: ProjectDraft) -> Result<&Project, RegistryError> {
        if draft.name.chars().count() < MIN_NAME_LEN {
            return Err(RegistryError::NameTooShort { name: draft.name });
        }
        if self.projects.iter().any(|p| p.name == draft.name) {
            return Err(RegistryError::DuplicateName { name: draft.name });
        }

        self.projects.push(Project::new(draft));
        let project = self.projects.last().expect("pushed above");
        if let Some(hook) = self.on_created.as_mut() {
            hook(project);
        }
        Ok(project)
    }

    /// Returns the project with `id`, if present.
    ///
    /// Linear scan; id uniqueness makes the first match the only match.
    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Returns the first project whose name equals `name` exactly.
    pub fn get_by_name(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }

    /// Whole-record replacement for the project with `id`.
    ///
    /// The target keeps its `id` and its current `todos`; every other field
    /// is taken from `draft` (the draft's `todos` are dropped) and
    /// `initials` is recomputed. The new name is not re-validated against
    /// the rest of the registry. Returns the updated record, or `None` when
    /// `id` is absent.
    pub fn update(&mut self, id: ProjectId, draft: ProjectDraft) -> Option<&Project> {
        let project = self.projects.iter_mut().find(|p| p.id == id)?;
        project.overwrite(draft);
        Some(project)
    }

    /// Removes and returns the project with `id`, firing the "deleted" hook.
    ///
    /// A missing id is a no-op returning `None`. Removal is permanent; there
    /// is no tombstone.
    pub fn delete(&mut self, id: ProjectId) -> Option<Project> {
        let index = self.projects.iter().position(|p| p.id == id)?;
        let removed = self.projects.remove(index);
        if let Some(hook) = self.on_deleted.as_mut() {
            hook(&removed);
        }
        Some(removed)
    }

    // -----------------------------------------------------------------------
    // 3. Queries and aggregates
    // -----------------------------------------------------------------------

    /// Projects whose name contains `term` case-insensitively, in registry
    /// order. Does not mutate the registry.
    pub fn filter(&self, term: &str) -> Vec<&Project> {
        let needle = term.to_lowercase();
        self.projects
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Sum of all project costs; `0.0` for an empty registry.
    pub fn total_cost(&self) -> f64 {
        self.projects.iter().map(|p| p.cost).sum()
    }

    /// All projects in registry (= creation) order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Number of tracked projects.
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// `true` when no projects are tracked.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    // -----------------------------------------------------------------------
    // 4. To-do operations
    // -----------------------------------------------------------------------

    /// Appends a new to-do to the project with `project_id`.
    ///
    /// Returns the stored to-do, or `None` (without error) when the project
    /// does not exist.
    pub fn add_todo(&mut self, project_id: ProjectId, draft: TodoDraft) -> Option<&Todo> {
        let project = self.projects.iter_mut().find(|p| p.id == project_id)?;
        project.todos.push(Todo::new(draft));
        project.todos.last()
    }

    /// Whole-record overwrite of the to-do with `todo_id` inside the project
    /// with `project_id`, keeping the to-do's id and list position.
    ///
    /// No-op returning `None` when either id is absent.
    pub fn update_todo(
        &mut self,
        project_id: ProjectId,
        todo_id: TodoId,
        draft: TodoDraft,
    ) -> Option<&Todo> {
        let project = self.projects.iter_mut().find(|p| p.id == project_id)?;
        let todo = project.todos.iter_mut().find(|t| t.id == todo_id)?;
        todo.overwrite(draft);
        Some(todo)
    }

    /// Removes and returns a to-do, with the same no-op-if-absent convention
    /// as [`delete`].
    ///
    /// [`delete`]: ProjectRegistry::delete
    pub fn remove_todo(&mut self, project_id: ProjectId, todo_id: TodoId) -> Option<Todo> {
        let project = self.projects.iter_mut().find(|p| p.id == project_id)?;
        let index = project.todos.iter().position(|t| t.id == todo_id)?;
        Some(project.todos.remove(index))
    }

    /// The project's to-dos in insertion (= display) order; empty when the
    /// project does not exist.
    pub fn todos(&self, project_id: ProjectId) -> &[Todo] {
        self.get(project_id).map(|p| p.todos.as_slice()).unwrap_or(&[])
    }

    // -----------------------------------------------------------------------
    // 5. Snapshots
    // -----------------------------------------------------------------------

    /// A serializable copy of the full collection in registry order, all
    /// fields and nested todos included.
    pub fn export_snapshot(&self) -> Vec<Project> {
        self.projects.clone()
    }

    /// Merges `records` into the registry, one record at a time.
    ///
    /// A record whose name matches an existing project takes the update
    /// path: the existing `id` and `todos` are preserved exactly. Any other
    /// record takes the create path with a fresh id, adopting the record's
    /// todos verbatim. A record that fails create validation is skipped and
    /// the rest of the batch still lands.
    pub fn import_snapshot(&mut self, records: Vec<Project>) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for record in records {
            match self.get_by_name(&record.name).map(|p| p.id) {
                Some(id) => {
                    self.update(id, record.into());
                    summary.updated += 1;
                }
                None => match self.create(record.into()) {
                    Ok(_) => summary.created += 1,
                    Err(_) => summary.skipped += 1,
                },
            }
        }
        summary
    }
}

/// Counts from a bulk [`ProjectRegistry::import_snapshot`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Records that created a new project.
    pub created: usize,
    /// Records applied to an existing project by name match.
    pub updated: usize,
    /// Records dropped by validation.
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
