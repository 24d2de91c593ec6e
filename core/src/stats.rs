//! Pure aggregation over todo collections.
//!
//! Every function borrows its input and works for any `TodoItem`, so the
//! same code serves `Vec<Todo>` from the API and a user's `Vec<Task>`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::id::RecordId;
use crate::todo::{Status, TodoItem};

/// Totals for a todo collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoStatistics {
    pub total: usize,
    pub completed_count: usize,
    pub pending_count: usize,
}

impl TodoStatistics {
    /// `completed / total`, or `0.0` for an empty collection.
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed_count as f64 / self.total as f64
    }
}

/// Entries whose status equals `status`, in their original order.
pub fn filter_by_status<T: TodoItem>(todos: &[T], status: Status) -> Vec<&T> {
    todos.iter().filter(|t| t.status() == status).collect()
}

/// Tri-state completion filter: `None` keeps everything.
pub fn filter_by_completion<T: TodoItem>(todos: &[T], completed: Option<bool>) -> Vec<&T> {
    todos
        .iter()
        .filter(|t| completed.is_none_or(|c| t.todo().completed == c))
        .collect()
}

/// Entries overdue at `now`.
pub fn overdue_at<T: TodoItem>(todos: &[T], now: DateTime<Utc>) -> Vec<&T> {
    todos.iter().filter(|t| t.is_overdue_at(now)).collect()
}

pub fn statistics<T: TodoItem>(todos: &[T]) -> TodoStatistics {
    let completed_count = todos
        .iter()
        .filter(|t| t.status() == Status::Complete)
        .count();
    TodoStatistics {
        total: todos.len(),
        completed_count,
        pending_count: todos.len() - completed_count,
    }
}

/// Buckets entries by owner. Entries without an owner share the `None`
/// bucket; each bucket keeps input order.
pub fn group_by_owner<T: TodoItem>(todos: &[T]) -> BTreeMap<Option<RecordId>, Vec<&T>> {
    let mut groups: BTreeMap<Option<RecordId>, Vec<&T>> = BTreeMap::new();
    for todo in todos {
        groups.entry(todo.owner().cloned()).or_default().push(todo);
    }
    groups
}
