//! Plain-text tables for terminal output.

use std::io::{self, Write};

use tmac_core::{RecordId, TodoItem, TodoStatistics, User};

pub fn todo_table<T: TodoItem>(todos: &[&T], out: &mut dyn Write) -> io::Result<()> {
    let rows: Vec<[String; 3]> = todos
        .iter()
        .map(|t| {
            let todo = t.todo();
            [
                describe(todo.id.as_ref()),
                t.status().to_string(),
                todo.title.clone().unwrap_or_default(),
            ]
        })
        .collect();
    write_table(["id", "status", "title"], &rows, out)
}

pub fn user_table(users: &[User], out: &mut dyn Write) -> io::Result<()> {
    let rows: Vec<[String; 4]> = users
        .iter()
        .map(|u| {
            [
                describe(u.id.as_ref()),
                u.name.clone().unwrap_or_default(),
                u.email.clone().unwrap_or_default(),
                u.todos().len().to_string(),
            ]
        })
        .collect();
    write_table(["id", "name", "email", "todos"], &rows, out)
}

pub fn statistics(
    user: &str,
    totals: &TodoStatistics,
    overdue: usize,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "Statistics for user {user}")?;
    writeln!(out, "  total       {}", totals.total)?;
    writeln!(out, "  completed   {}", totals.completed_count)?;
    writeln!(out, "  pending     {}", totals.pending_count)?;
    writeln!(out, "  completion  {:.1}%", totals.completion_rate() * 100.0)?;
    writeln!(out, "  overdue     {overdue}")
}

fn describe(id: Option<&RecordId>) -> String {
    id.map(ToString::to_string).unwrap_or_else(|| "-".to_string())
}

fn write_table<const N: usize>(
    headers: [&str; N],
    rows: &[[String; N]],
    out: &mut dyn Write,
) -> io::Result<()> {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(headers.iter().copied(), &widths, out)?;
    write_row(widths.iter().map(|w| "-".repeat(*w)), &widths, out)?;
    for row in rows {
        write_row(row.iter(), &widths, out)?;
    }
    Ok(())
}

fn write_row<S: AsRef<str>>(
    cells: impl Iterator<Item = S>,
    widths: &[usize],
    out: &mut dyn Write,
) -> io::Result<()> {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}
