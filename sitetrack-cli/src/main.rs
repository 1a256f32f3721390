//! Sitetrack, a construction project tracker CLI.
//!
//! # Usage
//!
//! ```text
//! sitetrack project add <name> --finish-date <YYYY-MM-DD> [--status ...] [--role ...]
//! sitetrack project list [--search <term>] [--json]
//! sitetrack project show <project>
//! sitetrack project edit <project> [--name ...] [--status ...] [...]
//! sitetrack project delete <project>
//! sitetrack project find <term> [--json]
//! sitetrack todo add <project> <name> --due-date <YYYY-MM-DD> [--status ...]
//! sitetrack todo update <project> <todo-id> [--name ...] [...]
//! sitetrack todo remove <project> <todo-id>
//! sitetrack todo list <project>
//! sitetrack export [path]
//! sitetrack import <path>
//! ```
//!
//! `<project>` is a project id or an exact project name. The working
//! collection lives at `~/.sitetrack/projects.json` unless `--data-file`
//! points elsewhere.

mod commands;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use commands::{
    project::ProjectCommand,
    todo::TodoCommand,
    transfer::{ExportArgs, ImportArgs},
};
use sitetrack_core::{ProjectStatus, TodoStatus, UserRole};
use sitetrack_store::DEFAULT_SNAPSHOT_FILENAME;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "sitetrack",
    version,
    about = "Track construction projects and their to-do lists",
    long_about = None,
)]
struct Cli {
    /// Path to the working data file. Defaults to ~/.sitetrack/projects.json.
    #[arg(long = "data-file", global = true, value_name = "PATH")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create, inspect, edit and delete projects.
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Manage the to-do list of a single project.
    Todo {
        #[command(subcommand)]
        command: TodoCommand,
    },

    /// Write the collection to a snapshot file.
    Export(ExportArgs),

    /// Merge a snapshot file into the collection.
    Import(ImportArgs),
}

// ---------------------------------------------------------------------------
// Enum arguments: parsed from CLI strings, convert to core types
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse [`ProjectStatus`] from CLI args.
#[derive(Debug, Clone, Default)]
pub struct StatusArg(pub ProjectStatus);

impl FromStr for StatusArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self(ProjectStatus::Pending)),
            "active" => Ok(Self(ProjectStatus::Active)),
            "finished" => Ok(Self(ProjectStatus::Finished)),
            other => Err(format!(
                "unknown status '{other}'; expected: pending, active, finished"
            )),
        }
    }
}

impl From<StatusArg> for ProjectStatus {
    fn from(arg: StatusArg) -> Self {
        arg.0
    }
}

/// Thin wrapper so clap can parse [`UserRole`] from CLI args.
#[derive(Debug, Clone, Default)]
pub struct RoleArg(pub UserRole);

impl FromStr for RoleArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "architect" => Ok(Self(UserRole::Architect)),
            "engineer" => Ok(Self(UserRole::Engineer)),
            "manager" => Ok(Self(UserRole::Manager)),
            other => Err(format!(
                "unknown role '{other}'; expected: architect, engineer, manager"
            )),
        }
    }
}

impl From<RoleArg> for UserRole {
    fn from(arg: RoleArg) -> Self {
        arg.0
    }
}

/// Thin wrapper so clap can parse [`TodoStatus`] from CLI args.
#[derive(Debug, Clone, Default)]
pub struct TodoStatusArg(pub TodoStatus);

impl FromStr for TodoStatusArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self(TodoStatus::Pending)),
            "in_progress" | "in-progress" => Ok(Self(TodoStatus::InProgress)),
            "completed" => Ok(Self(TodoStatus::Completed)),
            other => Err(format!(
                "unknown to-do status '{other}'; expected: pending, in_progress, completed"
            )),
        }
    }
}

impl From<TodoStatusArg> for TodoStatus {
    fn from(arg: TodoStatusArg) -> Self {
        arg.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

/// `~/.sitetrack/projects.json`, unless overridden on the command line.
fn data_file_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path);
    }
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(".sitetrack").join(DEFAULT_SNAPSHOT_FILENAME))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let data_file = data_file_path(cli.data_file)?;
    match cli.command {
        Commands::Project { command } => commands::project::run(command, &data_file),
        Commands::Todo { command } => commands::todo::run(command, &data_file),
        Commands::Export(args) => commands::transfer::export(args, &data_file),
        Commands::Import(args) => commands::transfer::import(args, &data_file),
    }
}
