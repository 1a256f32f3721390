//! `sitetrack project`: create, list, inspect, edit and delete projects.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use sitetrack_core::{Project, ProjectDraft, ProjectStatus};

use super::{load_registry, resolve_project, save_registry};
use crate::{RoleArg, StatusArg};

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a new project.
    Add(AddArgs),

    /// List projects, with an optional case-insensitive name search.
    List(ListArgs),

    /// Show one project in full, to-dos included.
    Show(ShowArgs),

    /// Replace a project's fields; its id and to-do list are kept.
    Edit(EditArgs),

    /// Delete a project permanently.
    Delete(DeleteArgs),

    /// Search projects by name substring (case-insensitive).
    Find(FindArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Project name: unique, at least 5 characters.
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// pending | active | finished. Defaults to pending.
    #[arg(long)]
    pub status: Option<StatusArg>,

    /// architect | engineer | manager. Defaults to architect.
    #[arg(long)]
    pub role: Option<RoleArg>,

    /// Planned finish date (YYYY-MM-DD).
    #[arg(long = "finish-date")]
    pub finish_date: NaiveDate,

    #[arg(long, default_value_t = 0.0)]
    pub cost: f64,

    #[arg(long, default_value_t = 0)]
    pub progress: u8,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only projects whose name contains this term (case-insensitive).
    #[arg(long)]
    pub search: Option<String>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project id or exact name.
    pub project: String,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Project id or exact name.
    pub project: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// pending | active | finished.
    #[arg(long)]
    pub status: Option<StatusArg>,

    /// architect | engineer | manager.
    #[arg(long)]
    pub role: Option<RoleArg>,

    /// Planned finish date (YYYY-MM-DD).
    #[arg(long = "finish-date")]
    pub finish_date: Option<NaiveDate>,

    #[arg(long)]
    pub cost: Option<f64>,

    #[arg(long)]
    pub progress: Option<u8>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Project id or exact name.
    pub project: String,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Term to look for in project names.
    pub term: String,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(command: ProjectCommand, data_file: &Path) -> Result<()> {
    match command {
        ProjectCommand::Add(args) => add(args, data_file),
        ProjectCommand::List(args) => list(args, data_file),
        ProjectCommand::Show(args) => show(args, data_file),
        ProjectCommand::Edit(args) => edit(args, data_file),
        ProjectCommand::Delete(args) => delete(args, data_file),
        ProjectCommand::Find(args) => find(args, data_file),
    }
}

fn add(args: AddArgs, data_file: &Path) -> Result<()> {
    let mut registry = load_registry(data_file)?;
    registry.set_on_created(|project| {
        println!(
            "{} Created '{}' ({})",
            "✓".green().bold(),
            project.name,
            project.id
        );
    });

    let draft = ProjectDraft {
        name: args.name,
        description: args.description,
        status: args.status.unwrap_or_default().into(),
        user_role: args.role.unwrap_or_default().into(),
        finish_date: args.finish_date,
        cost: args.cost,
        progress: args.progress,
        todos: Vec::new(),
    };
    registry.create(draft).context("cannot create project")?;
    save_registry(data_file, &registry)
}

#[derive(Tabled)]
struct ProjectTableRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "role")]
    role: String,
    #[tabled(rename = "progress")]
    progress: String,
    #[tabled(rename = "cost")]
    cost: String,
    #[tabled(rename = "finish date")]
    finish_date: String,
    #[tabled(rename = "to-dos")]
    todos: usize,
}

fn list(args: ListArgs, data_file: &Path) -> Result<()> {
    let registry = load_registry(data_file)?;
    let projects: Vec<&Project> = match args.search.as_deref() {
        Some(term) => registry.filter(term),
        None => registry.projects().iter().collect(),
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&projects).context("failed to serialize project list")?
        );
        return Ok(());
    }

    if projects.is_empty() {
        println!("No projects tracked.");
        println!("Run: sitetrack project add <name> --finish-date <YYYY-MM-DD>");
        return Ok(());
    }

    print_project_table(&projects);
    println!(
        "Total cost: ${:.2} across {} project(s)",
        registry.total_cost(),
        registry.len()
    );
    Ok(())
}

fn find(args: FindArgs, data_file: &Path) -> Result<()> {
    let registry = load_registry(data_file)?;
    let matches = registry.filter(&args.term);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&matches).context("failed to serialize matches")?
        );
        return Ok(());
    }

    if matches.is_empty() {
        println!("No project name contains '{}'.", args.term);
        return Ok(());
    }

    print_project_table(&matches);
    println!("{} match(es) for '{}'", matches.len(), args.term);
    Ok(())
}

fn print_project_table(projects: &[&Project]) {
    let rows: Vec<ProjectTableRow> = projects
        .iter()
        .map(|p| ProjectTableRow {
            name: p.name.clone(),
            status: format!("{} {}", status_indicator(p.status), p.status),
            role: p.user_role.to_string(),
            progress: format!("{}%", p.progress),
            cost: format!("${:.2}", p.cost),
            finish_date: p.finish_date.to_string(),
            todos: p.todos.len(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn show(args: ShowArgs, data_file: &Path) -> Result<()> {
    let registry = load_registry(data_file)?;
    let id = resolve_project(&registry, &args.project)?;
    let project = registry.get(id).expect("resolved above");

    println!(
        "{}  {}",
        project.initials.to_uppercase().bold(),
        project.name.bold()
    );
    println!("  id:          {}", project.id);
    println!("  description: {}", project.description);
    println!(
        "  status:      {} {}",
        status_indicator(project.status),
        project.status
    );
    println!("  role:        {}", project.user_role);
    println!("  finish date: {}", project.finish_date);
    println!("  cost:        ${:.2}", project.cost);
    println!("  progress:    {}%", project.progress);
    if project.todos.is_empty() {
        println!("  to-dos:      none");
    } else {
        println!("  to-dos:");
        for todo in &project.todos {
            println!(
                "    [{}] {} (due {}) {}",
                todo.status, todo.name, todo.due_date, todo.id
            );
        }
    }
    Ok(())
}

fn edit(args: EditArgs, data_file: &Path) -> Result<()> {
    let mut registry = load_registry(data_file)?;
    let id = resolve_project(&registry, &args.project)?;
    let current = registry.get(id).expect("resolved above");

    // Unspecified flags keep the current value; the registry's update is a
    // whole-record replacement.
    let draft = ProjectDraft {
        name: args.name.unwrap_or_else(|| current.name.clone()),
        description: args
            .description
            .unwrap_or_else(|| current.description.clone()),
        status: args.status.map(Into::into).unwrap_or(current.status),
        user_role: args.role.map(Into::into).unwrap_or(current.user_role),
        finish_date: args.finish_date.unwrap_or(current.finish_date),
        cost: args.cost.unwrap_or(current.cost),
        progress: args.progress.unwrap_or(current.progress),
        todos: Vec::new(),
    };

    let updated = registry
        .update(id, draft)
        .ok_or_else(|| anyhow!("project disappeared during edit"))?;
    println!("{} Updated '{}'", "✓".green().bold(), updated.name);
    save_registry(data_file, &registry)
}

fn delete(args: DeleteArgs, data_file: &Path) -> Result<()> {
    let mut registry = load_registry(data_file)?;
    registry.set_on_deleted(|project| {
        println!(
            "{} Deleted '{}' ({})",
            "✓".green().bold(),
            project.name,
            project.id
        );
    });

    let id = resolve_project(&registry, &args.project)?;
    registry.delete(id);
    save_registry(data_file, &registry)
}

fn status_indicator(status: ProjectStatus) -> String {
    match status {
        ProjectStatus::Pending => "■".yellow().bold().to_string(),
        ProjectStatus::Active => "■".green().bold().to_string(),
        ProjectStatus::Finished => "■".bright_black().bold().to_string(),
    }
}
