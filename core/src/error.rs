//! Error types for the todo API client and the entity model.
//!
//! # Design
//! `ApiError` covers everything that can go wrong between building a request
//! and handing back entities: bad caller input, transport failures, non-2xx
//! responses and unusable bodies. `ModelError` is narrower and describes why
//! a single JSON record could not become an entity, or why an entity
//! operation would break the user/todo ownership invariant. A malformed
//! record on a single-record endpoint surfaces as `ApiError::Record`.

use thiserror::Error;

use crate::id::RecordId;

/// Errors returned by `TodoClient` parse methods and `ApiClient` calls.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The user id is not numeric; no request was sent.
    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),

    /// No response was received (DNS, connection refused, timeout, ...).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("API request failed: {status} {status_text} - {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The response body was not JSON, or not the expected JSON shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The response held a record that could not become an entity.
    #[error("malformed record: {0}")]
    Record(#[from] ModelError),
}

impl ApiError {
    /// Returns true when the server reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }
}

/// Errors raised while reading records into entities or mutating aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The record was `null`.
    #[error("record is missing")]
    MissingRecord,

    /// The record was present but not a JSON object.
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// A field held a value of an unusable type.
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// A todo owned by someone else was about to join a user's collection.
    #[error("todo owned by {found} cannot belong to user {expected}")]
    OwnershipMismatch { expected: String, found: String },
}

impl ModelError {
    pub(crate) fn ownership(expected: Option<&RecordId>, found: Option<&RecordId>) -> Self {
        ModelError::OwnershipMismatch {
            expected: RecordId::describe(expected),
            found: RecordId::describe(found),
        }
    }
}

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
