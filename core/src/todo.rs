//! Todo entities.
//!
//! # Design
//! A todo comes in two variants: a plain `Todo` and a `PriorityTodo` that
//! adds an ordering hint and an optional due date. `Task` is the sum type
//! over both and is what users own. Every variant implements `TodoItem`,
//! the shared capability set (status, toggle, ownership, overdue check,
//! snapshot), so aggregation code is written once against the trait.
//!
//! Snapshots always have the plain `{id, title, completed, userId}` shape.
//! Priority and due date are not part of it, for either variant.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::error::ModelError;
use crate::id::RecordId;
use crate::record;

/// Completion status, derived from the completion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    Complete,
}

impl Status {
    pub fn from_completed(completed: bool) -> Self {
        if completed {
            Status::Complete
        } else {
            Status::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    /// Accepts exactly `PENDING` or `COMPLETE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Status::Pending),
            "COMPLETE" => Ok(Status::Complete),
            _ => Err(format!("unknown status: {s}")),
        }
    }
}

/// Capabilities shared by every todo variant.
pub trait TodoItem {
    /// The base attributes.
    fn todo(&self) -> &Todo;

    fn todo_mut(&mut self) -> &mut Todo;

    /// Overdue check against an explicit clock.
    fn is_overdue_at(&self, now: DateTime<Utc>) -> bool;

    fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now())
    }

    fn status(&self) -> Status {
        Status::from_completed(self.todo().completed)
    }

    fn toggle(&mut self) {
        let todo = self.todo_mut();
        todo.completed = !todo.completed;
    }

    fn owner(&self) -> Option<&RecordId> {
        self.todo().user_id.as_ref()
    }

    /// Strict comparison: `1` is not owned by `"1"`, and a todo without an
    /// owner is owned by nobody.
    fn is_owned_by(&self, candidate: &RecordId) -> bool {
        self.owner() == Some(candidate)
    }

    /// Plain `{id, title, completed, userId}` view. Variant-specific fields
    /// are intentionally left out.
    fn snapshot(&self) -> TodoSnapshot {
        let todo = self.todo();
        TodoSnapshot {
            id: todo.id.clone(),
            title: todo.title.clone(),
            completed: todo.completed,
            user_id: todo.user_id.clone(),
        }
    }
}

/// Serializable view of a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoSnapshot {
    pub id: Option<RecordId>,
    pub title: Option<String>,
    pub completed: bool,
    pub user_id: Option<RecordId>,
}

/// A unit of work with a completion flag and an owner reference.
///
/// Fields are public and unvalidated; any of them may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: Option<RecordId>,
    pub title: Option<String>,
    pub completed: bool,
    pub user_id: Option<RecordId>,
}

impl Todo {
    pub fn new(
        id: impl Into<RecordId>,
        title: impl Into<String>,
        completed: bool,
        user_id: impl Into<RecordId>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            completed,
            user_id: Some(user_id.into()),
        }
    }

    /// Reads a record, logging and returning `None` when it is unusable.
    pub fn from_record(record: &Value) -> Option<Self> {
        Self::try_from_record(record)
            .map_err(|e| error!(error = %e, "couldn't create todo from record"))
            .ok()
    }

    /// Reads a record. Missing fields become `None`; `completed` is coerced
    /// with [`record::truthy`].
    pub fn try_from_record(record: &Value) -> Result<Self, ModelError> {
        let fields = record::fields(record)?;
        Ok(Self {
            id: record::id(fields, "id")?,
            title: record::string(fields, "title")?,
            completed: record::flag(fields, "completed"),
            user_id: record::id(fields, "userId")?,
        })
    }
}

impl TodoItem for Todo {
    fn todo(&self) -> &Todo {
        self
    }

    fn todo_mut(&mut self) -> &mut Todo {
        self
    }

    fn is_overdue_at(&self, _now: DateTime<Utc>) -> bool {
        false
    }
}

/// A todo with an ordering hint and an optional deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityTodo {
    pub todo: Todo,
    pub priority: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
}

impl PriorityTodo {
    pub fn new(todo: Todo, priority: Option<i64>, due_date: Option<DateTime<Utc>>) -> Self {
        Self {
            todo,
            priority,
            due_date,
        }
    }

    pub fn try_from_record(record: &Value) -> Result<Self, ModelError> {
        let todo = Todo::try_from_record(record)?;
        let fields = record::fields(record)?;
        Ok(Self {
            todo,
            priority: record::integer(fields, "priority")?,
            due_date: record::timestamp(fields, "dueDate")?,
        })
    }
}

impl TodoItem for PriorityTodo {
    fn todo(&self) -> &Todo {
        &self.todo
    }

    fn todo_mut(&mut self) -> &mut Todo {
        &mut self.todo
    }

    /// Due strictly before `now` and still open.
    fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due < now && !self.todo.completed,
            None => false,
        }
    }
}

/// Either todo variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Plain(Todo),
    Priority(PriorityTodo),
}

impl Task {
    pub fn from_record(record: &Value) -> Option<Self> {
        Self::try_from_record(record)
            .map_err(|e| error!(error = %e, "couldn't create task from record"))
            .ok()
    }

    /// Records carrying `priority` or `dueDate` become `Task::Priority`.
    pub fn try_from_record(record: &Value) -> Result<Self, ModelError> {
        let fields = record::fields(record)?;
        if fields.contains_key("priority") || fields.contains_key("dueDate") {
            PriorityTodo::try_from_record(record).map(Task::Priority)
        } else {
            Todo::try_from_record(record).map(Task::Plain)
        }
    }

    pub fn priority(&self) -> Option<i64> {
        match self {
            Task::Plain(_) => None,
            Task::Priority(p) => p.priority,
        }
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Task::Plain(_) => None,
            Task::Priority(p) => p.due_date,
        }
    }
}

impl TodoItem for Task {
    fn todo(&self) -> &Todo {
        match self {
            Task::Plain(t) => t,
            Task::Priority(p) => &p.todo,
        }
    }

    fn todo_mut(&mut self) -> &mut Todo {
        match self {
            Task::Plain(t) => t,
            Task::Priority(p) => &mut p.todo,
        }
    }

    fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        match self {
            Task::Plain(t) => t.is_overdue_at(now),
            Task::Priority(p) => p.is_overdue_at(now),
        }
    }
}

impl From<Todo> for Task {
    fn from(todo: Todo) -> Self {
        Task::Plain(todo)
    }
}

impl From<PriorityTodo> for Task {
    fn from(todo: PriorityTodo) -> Self {
        Task::Priority(todo)
    }
}
