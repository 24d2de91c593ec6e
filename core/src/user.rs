//! The user aggregate.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::error::ModelError;
use crate::id::RecordId;
use crate::record;
use crate::stats;
use crate::todo::{Status, Task, TodoItem, TodoSnapshot};

/// Serializable view of a user and its todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub todos: Vec<TodoSnapshot>,
}

/// A user and the ordered collection of tasks it owns.
///
/// Every task added through [`User::add_todo`] or read from a record is
/// owned by this user. [`User::new`] stores its input untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub email: Option<String>,
    todos: Vec<Task>,
}

impl User {
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        email: impl Into<String>,
        todos: Vec<Task>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            email: Some(email.into()),
            todos,
        }
    }

    pub fn todos(&self) -> &[Task] {
        &self.todos
    }

    /// Appends a task, refusing one that belongs to another user.
    pub fn add_todo(&mut self, todo: impl Into<Task>) -> Result<(), ModelError> {
        let todo = todo.into();
        if todo.owner() != self.id.as_ref() {
            return Err(ModelError::ownership(self.id.as_ref(), todo.owner()));
        }
        self.todos.push(todo);
        Ok(())
    }

    /// Fraction of tasks that are complete; `0.0` for a user without tasks.
    pub fn completion_rate(&self) -> f64 {
        stats::statistics(&self.todos).completion_rate()
    }

    pub fn todos_by_status(&self, status: Status) -> Vec<&Task> {
        stats::filter_by_status(&self.todos, status)
    }

    /// Like [`User::todos_by_status`], but for a raw label such as
    /// `"COMPLETE"`. Matching is exact; labels that name no status, including
    /// case variants, match nothing.
    pub fn todos_by_status_label(&self, label: &str) -> Vec<&Task> {
        match label.parse() {
            Ok(status) => self.todos_by_status(status),
            Err(_) => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> UserSnapshot {
        UserSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            todos: self.todos.iter().map(TodoItem::snapshot).collect(),
        }
    }

    /// Reads a record, logging and returning `None` when it is unusable.
    pub fn from_record(record: &Value) -> Option<Self> {
        Self::try_from_record(record)
            .map_err(|e| error!(error = %e, "couldn't create user from record"))
            .ok()
    }

    /// Reads a record. A missing or `null` `todos` field means no todos;
    /// embedded todos must belong to the user.
    pub fn try_from_record(record: &Value) -> Result<Self, ModelError> {
        let fields = record::fields(record)?;
        let mut user = Self {
            id: record::id(fields, "id")?,
            name: record::string(fields, "name")?,
            email: record::string(fields, "email")?,
            todos: Vec::new(),
        };

        match fields.get("todos") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for item in items {
                    user.add_todo(Task::try_from_record(item)?)?;
                }
            }
            Some(_) => {
                return Err(ModelError::InvalidField {
                    field: "todos",
                    expected: "an array",
                })
            }
        }
        Ok(user)
    }
}
