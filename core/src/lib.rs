//! Domain model and API client for the public todo/user REST API.
//!
//! # Overview
//! Fetches users and todos, reads them into entities and derives views over
//! them: completion status and rate, status and owner grouping, overdue
//! flags.
//!
//! # Design
//! - `TodoClient` is stateless: `build_*` produces a request, `parse_*`
//!   consumes a response, so the I/O boundary is explicit.
//! - `Transport` performs the round-trip; `ApiClient` wires both together
//!   and logs failures.
//! - `Task` is the sum of the two todo variants; `TodoItem` is the capability
//!   set they share and that `stats` is written against.
//! - Records are read leniently (absent fields stay `None`) but the
//!   user/todo ownership invariant is enforced.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod id;
pub mod record;
pub mod stats;
pub mod todo;
pub mod transport;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use api::ApiClient;
pub use client::{TodoClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ModelError, Result};
pub use http::{HttpRequest, HttpResponse};
pub use id::RecordId;
pub use stats::TodoStatistics;
pub use todo::{PriorityTodo, Status, Task, Todo, TodoItem, TodoSnapshot};
pub use transport::{Transport, UreqTransport};
pub use user::{User, UserSnapshot};
