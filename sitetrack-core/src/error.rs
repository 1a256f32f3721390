//! Error types for sitetrack-core.

use thiserror::Error;

/// All errors that can arise from registry mutations.
///
/// Lookups that miss are not errors; they return `None` and callers check
/// before use.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The supplied project name is shorter than the minimum length.
    #[error("project name '{name}' is too short; at least 5 characters required")]
    NameTooShort { name: String },

    /// A project with the same name already exists in the registry.
    #[error("a project named '{name}' already exists")]
    DuplicateName { name: String },
}
