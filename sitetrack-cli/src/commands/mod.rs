//! CLI subcommand implementations and shared data-file plumbing.

pub mod project;
pub mod todo;
pub mod transfer;

use std::path::Path;

use anyhow::{anyhow, Context, Result};

use sitetrack_core::{ProjectId, ProjectRegistry};
use sitetrack_store::{load_records, save_snapshot, StoreError};

/// Loads the working registry from `path`. A missing file is an empty
/// registry (first run), not an error.
pub(crate) fn load_registry(path: &Path) -> Result<ProjectRegistry> {
    match load_records(path) {
        Ok(batch) => {
            if batch.malformed > 0 {
                log::warn!(
                    "{} malformed record(s) ignored in {}",
                    batch.malformed,
                    path.display()
                );
            }
            Ok(ProjectRegistry::from_snapshot(batch.records))
        }
        Err(StoreError::SnapshotNotFound { .. }) => Ok(ProjectRegistry::new()),
        Err(err) => {
            Err(err).with_context(|| format!("failed to load data file {}", path.display()))
        }
    }
}

/// Saves the working registry back to `path`.
pub(crate) fn save_registry(path: &Path, registry: &ProjectRegistry) -> Result<()> {
    save_snapshot(path, registry)
        .with_context(|| format!("failed to save data file {}", path.display()))
}

/// Resolves `reference` to a project id, accepting either a UUID or an
/// exact project name.
pub(crate) fn resolve_project(registry: &ProjectRegistry, reference: &str) -> Result<ProjectId> {
    if let Ok(id) = reference.parse::<ProjectId>() {
        if registry.get(id).is_some() {
            return Ok(id);
        }
    }
    registry
        .get_by_name(reference)
        .map(|p| p.id)
        .ok_or_else(|| anyhow!("no project matches '{reference}' (by id or exact name)"))
}
