//! Snapshot file I/O.
//!
//! A snapshot is an indented JSON array of project records with their
//! nested todos; dates travel as ISO-8601 strings. Loads also accept an
//! object wrapping the array under a `projects` key. Writes follow the
//! atomic flow used everywhere in this workspace: serialize, write a
//! `.tmp` sibling, rename over the target.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use sitetrack_core::{ImportSummary, Project, ProjectRegistry};

use crate::error::{io_err, StoreError};

/// File name used when the caller does not supply one.
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "projects.json";

/// Accepted top-level document shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Records(Vec<Value>),
    Wrapped { projects: Vec<Value> },
}

/// Result of a tolerant load: the records that parsed, plus how many were
/// dropped as malformed.
#[derive(Debug)]
pub struct RecordBatch {
    pub records: Vec<Project>,
    pub malformed: usize,
}

// ---------------------------------------------------------------------------
// Save (atomic)
// ---------------------------------------------------------------------------

/// Writes the registry's full collection to `path` as indented JSON.
///
/// Write flow: serialize → `.tmp` sibling → `rename`. The `.tmp` lives in
/// the target directory, so the rename never crosses filesystems. Missing
/// parent directories are created first.
pub fn save_snapshot(path: &Path, registry: &ProjectRegistry) -> Result<(), StoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }

    let json = serde_json::to_string_pretty(&registry.export_snapshot())?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Load (tolerant)
// ---------------------------------------------------------------------------

/// Reads the records of the snapshot at `path`.
///
/// Returns [`StoreError::SnapshotNotFound`] when the file is absent and
/// [`StoreError::Parse`] when the document itself is unreadable. Individual
/// records that do not deserialize as a project are dropped with a warning
/// so the rest of the file still loads; the drop count is reported in the
/// batch.
pub fn load_records(path: &Path) -> Result<RecordBatch, StoreError> {
    if !path.exists() {
        return Err(StoreError::SnapshotNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let document: SnapshotDocument =
        serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
    let values = match document {
        SnapshotDocument::Records(values) => values,
        SnapshotDocument::Wrapped { projects } => projects,
    };

    let mut batch = RecordBatch {
        records: Vec::with_capacity(values.len()),
        malformed: 0,
    };
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<Project>(value) {
            Ok(record) => batch.records.push(record),
            Err(err) => {
                log::warn!(
                    "skipping malformed record #{index} in {}: {err}",
                    path.display()
                );
                batch.malformed += 1;
            }
        }
    }
    Ok(batch)
}

/// Loads the snapshot at `path` and merges it into `registry`.
///
/// Records matched by name take the registry's update path; the rest are
/// created with fresh ids. Malformed records and records failing registry
/// validation are both counted as `skipped`.
pub fn import_into(
    path: &Path,
    registry: &mut ProjectRegistry,
) -> Result<ImportSummary, StoreError> {
    let batch = load_records(path)?;
    let mut summary = registry.import_snapshot(batch.records);
    summary.skipped += batch.malformed;
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_snapshot_returns_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let err = load_records(&dir.path().join("projects.json")).unwrap_err();
        assert!(matches!(err, StoreError::SnapshotNotFound { .. }), "got: {err}");
        assert!(err.to_string().contains("projects.json"));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join("projects.json");
        save_snapshot(&path, &ProjectRegistry::new()).expect("save");
        assert!(path.exists());
    }

    #[test]
    fn empty_registry_saves_an_empty_array() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("projects.json");
        save_snapshot(&path, &ProjectRegistry::new()).expect("save");
        let contents = std::fs::read_to_string(&path).expect("read");
        assert_eq!(contents.trim(), "[]");
    }
}
