//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each read operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! `ApiClient` wires the two together through a `Transport`.
//!
//! List endpoints read records one by one. A record that cannot become an
//! entity is dropped with one logged error and the rest of the batch is kept.

use serde_json::Value;
use tracing::error;

use crate::error::{ApiError, ModelError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::todo::Task;
use crate::user::User;

/// The public API every installation talks to.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl Default for TodoClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.get("/users")
    }

    /// Fails with `InvalidUserId` unless `id` reads as a finite number.
    pub fn build_get_user(&self, id: &str) -> Result<HttpRequest> {
        let id = validated_user_id(id)?;
        Ok(self.get(&format!("/users/{id}")))
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.get("/todos")
    }

    /// Fails with `InvalidUserId` unless `user_id` reads as a finite number.
    pub fn build_list_todos_for_user(&self, user_id: &str) -> Result<HttpRequest> {
        let id = validated_user_id(user_id)?;
        Ok(self.get(&format!("/users/{id}/todos")))
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>> {
        let records = parse_array(response)?;
        Ok(collect_records(&records, "user", User::try_from_record))
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User> {
        let record = parse_body(response)?;
        Ok(User::try_from_record(&record)?)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Task>> {
        let records = parse_array(response)?;
        Ok(collect_records(&records, "todo", Task::try_from_record))
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            url: format!("{}{path}", self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// Map non-success status codes to `ApiError::Http`.
/// Trimmed id, provided it reads as a finite number.
fn validated_user_id(raw: &str) -> Result<&str> {
    let id = raw.trim();
    match id.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(id),
        _ => Err(ApiError::InvalidUserId(raw.to_string())),
    }
}

fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        status_text: response.status_text.clone(),
        body: response.body.clone(),
    })
}

fn parse_body(response: HttpResponse) -> Result<Value> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn parse_array(response: HttpResponse) -> Result<Vec<Value>> {
    match parse_body(response)? {
        Value::Array(records) => Ok(records),
        other => Err(ApiError::Deserialization(format!(
            "expected a JSON array, found {other}"
        ))),
    }
}

fn collect_records<T>(
    records: &[Value],
    kind: &str,
    read: impl Fn(&Value) -> std::result::Result<T, ModelError>,
) -> Vec<T> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match read(record) {
            Ok(entity) => Some(entity),
            Err(e) => {
                error!(kind, index, error = %e, "dropping malformed record");
                None
            }
        })
        .collect()
}
