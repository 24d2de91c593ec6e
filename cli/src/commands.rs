//! Command implementations.
//!
//! A failed fetch is reported on `out` and the command still succeeds;
//! only local failures (writing output or an export file) are errors.

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use tmac_core::{stats, ApiClient, TodoItem, TodoSnapshot, Transport, UserSnapshot};
use tracing::info;

use crate::cli::Commands;
use crate::{export, render};

pub type Result<T> = anyhow::Result<T>;

/// Execute a parsed command, writing human-readable output to `out`.
pub fn execute<T: Transport>(
    api: &ApiClient<T>,
    command: Commands,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::List {
            user,
            complete,
            export,
        } => list(api, user.as_deref(), complete, export.as_deref(), out),
        Commands::Stat { user } => stat(api, &user, out),
        Commands::Users { export } => users(api, export.as_deref(), out),
    }
}

fn list<T: Transport>(
    api: &ApiClient<T>,
    user: Option<&str>,
    complete: Option<bool>,
    export_path: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let fetched = match user {
        Some(id) => api.list_todos_for_user(id),
        None => api.list_todos(),
    };
    let todos = match fetched {
        Ok(todos) => todos,
        Err(e) => {
            writeln!(out, "Error fetching todos: {e}")?;
            return Ok(());
        }
    };

    if let Some(id) = user {
        writeln!(out, "Showing todos for user: {id}")?;
    }
    if let Some(complete) = complete {
        writeln!(out, "Filtering by complete: {complete}")?;
    }

    let shown = stats::filter_by_completion(&todos, complete);
    if shown.is_empty() {
        match user {
            Some(id) => writeln!(out, "No todos found for user {id}. Try adjusting your filter")?,
            None => writeln!(out, "No todos found. Try adjusting your filter")?,
        }
        return Ok(());
    }

    writeln!(out)?;
    render::todo_table(&shown, out)?;

    if let Some(path) = export_path {
        let snapshots: Vec<TodoSnapshot> = shown.iter().map(|t| t.snapshot()).collect();
        export::write_json(path, &snapshots)?;
        info!(path = %path.display(), count = snapshots.len(), "exported todos");
        writeln!(out, "Exported {} todos to {}", snapshots.len(), path.display())?;
    }
    Ok(())
}

fn stat<T: Transport>(api: &ApiClient<T>, user: &str, out: &mut dyn Write) -> Result<()> {
    let todos = match api.list_todos_for_user(user) {
        Ok(todos) => todos,
        Err(e) => {
            writeln!(out, "Error fetching todos: {e}")?;
            return Ok(());
        }
    };
    if todos.is_empty() {
        writeln!(out, "No todos found for user {user}")?;
        return Ok(());
    }

    let totals = stats::statistics(&todos);
    let overdue = stats::overdue_at(&todos, Utc::now()).len();
    render::statistics(user, &totals, overdue, out)?;
    Ok(())
}

fn users<T: Transport>(
    api: &ApiClient<T>,
    export_path: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let users = match api.list_users() {
        Ok(users) => users,
        Err(e) => {
            writeln!(out, "Error fetching users: {e}")?;
            return Ok(());
        }
    };
    if users.is_empty() {
        writeln!(out, "No users found")?;
        return Ok(());
    }

    render::user_table(&users, out)?;

    if let Some(path) = export_path {
        let snapshots: Vec<UserSnapshot> = users.iter().map(|u| u.snapshot()).collect();
        export::write_json(path, &snapshots)?;
        info!(path = %path.display(), count = snapshots.len(), "exported users");
        writeln!(out, "Exported {} users to {}", snapshots.len(), path.display())?;
    }
    Ok(())
}
