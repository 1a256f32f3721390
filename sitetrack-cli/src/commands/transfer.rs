//! `sitetrack export` and `sitetrack import`: snapshot files.
//!
//! Export writes the working collection to a user-chosen file; import
//! merges a file's records back in, updating projects matched by name and
//! creating the rest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use sitetrack_store::{import_into, save_snapshot, DEFAULT_SNAPSHOT_FILENAME};

use super::{load_registry, save_registry};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Destination file. Defaults to ./projects.json.
    pub path: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Snapshot file to merge into the collection.
    pub path: PathBuf,
}

pub fn export(args: ExportArgs, data_file: &Path) -> Result<()> {
    let registry = load_registry(data_file)?;
    let target = args
        .path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_FILENAME));
    save_snapshot(&target, &registry)
        .with_context(|| format!("failed to export to {}", target.display()))?;
    println!(
        "{} Exported {} project(s) to {}",
        "✓".green().bold(),
        registry.len(),
        target.display()
    );
    Ok(())
}

pub fn import(args: ImportArgs, data_file: &Path) -> Result<()> {
    let mut registry = load_registry(data_file)?;
    let summary = import_into(&args.path, &mut registry)
        .with_context(|| format!("failed to import {}", args.path.display()))?;
    save_registry(data_file, &registry)?;
    println!(
        "{} Imported: {} created, {} updated, {} skipped",
        "✓".green().bold(),
        summary.created,
        summary.updated,
        summary.skipped
    );
    Ok(())
}
