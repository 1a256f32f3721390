//! `sitetrack todo`: manage a project's to-do list.

use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use sitetrack_core::{TodoDraft, TodoId};

use super::{load_registry, resolve_project, save_registry};
use crate::TodoStatusArg;

#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    /// Append a to-do to a project.
    Add(AddArgs),

    /// Overwrite a to-do's fields, keeping its id and position.
    Update(UpdateArgs),

    /// Remove a to-do from its project.
    Remove(RemoveArgs),

    /// List a project's to-dos in display order.
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Project id or exact name.
    pub project: String,

    /// To-do name.
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// pending | in_progress | completed. Defaults to pending.
    #[arg(long)]
    pub status: Option<TodoStatusArg>,

    /// Due date (YYYY-MM-DD).
    #[arg(long = "due-date")]
    pub due_date: NaiveDate,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Project id or exact name.
    pub project: String,

    /// Id of the to-do to overwrite.
    pub todo_id: TodoId,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// pending | in_progress | completed.
    #[arg(long)]
    pub status: Option<TodoStatusArg>,

    /// Due date (YYYY-MM-DD).
    #[arg(long = "due-date")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Project id or exact name.
    pub project: String,

    /// Id of the to-do to remove.
    pub todo_id: TodoId,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project id or exact name.
    pub project: String,
}

pub fn run(command: TodoCommand, data_file: &Path) -> Result<()> {
    match command {
        TodoCommand::Add(args) => add(args, data_file),
        TodoCommand::Update(args) => update(args, data_file),
        TodoCommand::Remove(args) => remove(args, data_file),
        TodoCommand::List(args) => list(args, data_file),
    }
}

fn add(args: AddArgs, data_file: &Path) -> Result<()> {
    let mut registry = load_registry(data_file)?;
    let project_id = resolve_project(&registry, &args.project)?;

    let draft = TodoDraft {
        name: args.name,
        description: args.description,
        status: args.status.unwrap_or_default().into(),
        due_date: args.due_date,
    };
    match registry.add_todo(project_id, draft) {
        Some(todo) => println!(
            "{} Added to-do '{}' ({})",
            "✓".green().bold(),
            todo.name,
            todo.id
        ),
        None => println!("Project not found; nothing added."),
    }
    save_registry(data_file, &registry)
}

fn update(args: UpdateArgs, data_file: &Path) -> Result<()> {
    let mut registry = load_registry(data_file)?;
    let project_id = resolve_project(&registry, &args.project)?;
    let current = registry
        .todos(project_id)
        .iter()
        .find(|t| t.id == args.todo_id)
        .ok_or_else(|| anyhow!("no to-do {} in that project", args.todo_id))?
        .clone();

    let draft = TodoDraft {
        name: args.name.unwrap_or(current.name),
        description: args.description.unwrap_or(current.description),
        status: args.status.map(Into::into).unwrap_or(current.status),
        due_date: args.due_date.unwrap_or(current.due_date),
    };
    registry.update_todo(project_id, args.todo_id, draft);
    println!("{} Updated to-do {}", "✓".green().bold(), args.todo_id);
    save_registry(data_file, &registry)
}

fn remove(args: RemoveArgs, data_file: &Path) -> Result<()> {
    let mut registry = load_registry(data_file)?;
    let project_id = resolve_project(&registry, &args.project)?;

    match registry.remove_todo(project_id, args.todo_id) {
        Some(todo) => println!("{} Removed to-do '{}'", "✓".green().bold(), todo.name),
        None => println!("No such to-do; nothing removed."),
    }
    save_registry(data_file, &registry)
}

#[derive(Tabled)]
struct TodoTableRow {
    #[tabled(rename = "to-do")]
    name: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "due date")]
    due_date: String,
    #[tabled(rename = "id")]
    id: String,
}

fn list(args: ListArgs, data_file: &Path) -> Result<()> {
    let registry = load_registry(data_file)?;
    let project_id = resolve_project(&registry, &args.project)?;

    let todos = registry.todos(project_id);
    if todos.is_empty() {
        println!("No to-dos.");
        return Ok(());
    }

    let rows: Vec<TodoTableRow> = todos
        .iter()
        .map(|t| TodoTableRow {
            name: t.name.clone(),
            status: t.status.to_string(),
            due_date: t.due_date.to_string(),
            id: t.id.to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
