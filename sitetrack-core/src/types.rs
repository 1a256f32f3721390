//! Domain types for the Sitetrack registry.
//!
//! Identifiers are UUID-backed newtypes; date fields use `chrono::NaiveDate`.
//! Every type serializes through serde with the camelCase field names of the
//! on-disk snapshot format.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed identifier for a project.
///
/// Generated once at creation, immutable thereafter, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    /// Generates a fresh random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for ProjectId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for ProjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Uuid>().map(Self)
    }
}

/// A strongly-typed identifier for a to-do item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(pub Uuid);

impl TodoId {
    /// Generates a fresh random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for TodoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Uuid>().map(Self)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Pending,
    Active,
    Finished,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Pending => write!(f, "pending"),
            ProjectStatus::Active => write!(f, "active"),
            ProjectStatus::Finished => write!(f, "finished"),
        }
    }
}

/// The user's role on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Architect,
    Engineer,
    Manager,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Architect => write!(f, "architect"),
            UserRole::Engineer => write!(f, "engineer"),
            UserRole::Manager => write!(f, "manager"),
        }
    }
}

/// Lifecycle status of a to-do item.
///
/// Deliberately disjoint from [`ProjectStatus`]: a to-do moves through its
/// own pending / in-progress / completed lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoStatus::Pending => write!(f, "pending"),
            TodoStatus::InProgress => write!(f, "in progress"),
            TodoStatus::Completed => write!(f, "completed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A single to-do item, owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(default = "TodoId::new")]
    pub id: TodoId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TodoStatus,
    pub due_date: NaiveDate,
}

/// Caller-supplied fields for creating or overwriting a to-do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub name: String,
    pub description: String,
    pub status: TodoStatus,
    pub due_date: NaiveDate,
}

impl Todo {
    /// Builds a to-do with a freshly generated id. No validation here.
    pub fn new(draft: TodoDraft) -> Self {
        Self {
            id: TodoId::new(),
            name: draft.name,
            description: draft.description,
            status: draft.status,
            due_date: draft.due_date,
        }
    }

    /// Whole-record overwrite: every field is taken from `draft`; only the
    /// `id` is kept.
    pub(crate) fn overwrite(&mut self, draft: TodoDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.status = draft.status;
        self.due_date = draft.due_date;
    }
}

/// A tracked construction project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default = "ProjectId::new")]
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub user_role: UserRole,
    pub finish_date: NaiveDate,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub progress: u8,
    /// Derived display label; see [`initials_of`].
    #[serde(default)]
    pub initials: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

/// Caller-supplied fields for creating or replacing a project.
///
/// `todos` is consumed by the create path only; [`update`] keeps the
/// target's existing list.
///
/// [`update`]: crate::registry::ProjectRegistry::update
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub user_role: UserRole,
    pub finish_date: NaiveDate,
    pub cost: f64,
    pub progress: u8,
    pub todos: Vec<Todo>,
}

impl Project {
    /// Builds a well-formed project from `draft`: fresh [`ProjectId`],
    /// `initials` derived from the name, every other field as supplied.
    ///
    /// Validation is the registry's responsibility, not the factory's.
    pub fn new(draft: ProjectDraft) -> Self {
        Self {
            id: ProjectId::new(),
            initials: initials_of(&draft.name),
            name: draft.name,
            description: draft.description,
            status: draft.status,
            user_role: draft.user_role,
            finish_date: draft.finish_date,
            cost: draft.cost,
            progress: draft.progress,
            todos: draft.todos,
        }
    }

    /// Whole-record replacement preserving identity: `id` and `todos` are
    /// kept, every other field is taken from `draft` (its `todos` are
    /// dropped), and `initials` is recomputed from the new name.
    pub(crate) fn overwrite(&mut self, draft: ProjectDraft) {
        self.initials = initials_of(&draft.name);
        self.name = draft.name;
        self.description = draft.description;
        self.status = draft.status;
        self.user_role = draft.user_role;
        self.finish_date = draft.finish_date;
        self.cost = draft.cost;
        self.progress = draft.progress;
    }
}

impl From<Project> for ProjectDraft {
    /// The draft that would recreate this record, todos included.
    fn from(project: Project) -> Self {
        Self {
            name: project.name,
            description: project.description,
            status: project.status,
            user_role: project.user_role,
            finish_date: project.finish_date,
            cost: project.cost,
            progress: project.progress,
            todos: project.todos,
        }
    }
}

/// First letter of each of the first two whitespace-separated tokens of
/// `name`, lower-cased: `"Example Project"` gives `"ep"`, `"Solos"` gives
/// `"s"`.
pub fn initials_of(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|token| token.chars().next())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
