//! Field extraction for raw JSON records.
//!
//! Records come from the API or from `snapshot()` output and are read
//! leniently: a missing field and an explicit `null` both become `None`.
//! Only a value of the wrong type makes a record malformed.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};

use crate::error::ModelError;
use crate::id::RecordId;

pub(crate) type Fields = Map<String, Value>;

/// Legacy truthiness used for the `completed` flag of incoming records.
///
/// Mirrors the loose rules long-standing consumers of the public API rely on:
/// `null`, `false`, `0` and `""` are false; every other value, including the
/// strings `"true"` and `"false"`, is true. Applied only when reading
/// records; entities always store a plain `bool`.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn fields(record: &Value) -> Result<&Fields, ModelError> {
    match record {
        Value::Object(map) => Ok(map),
        Value::Null => Err(ModelError::MissingRecord),
        other => Err(ModelError::NotAnObject(kind(other))),
    }
}

pub(crate) fn flag(fields: &Fields, field: &str) -> bool {
    fields.get(field).is_some_and(truthy)
}

pub(crate) fn id(fields: &Fields, field: &'static str) -> Result<Option<RecordId>, ModelError> {
    match present(fields, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(RecordId::Text(s.clone()))),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|n| Some(RecordId::Number(n)))
            .ok_or(invalid(field, "an integer or a string")),
        Some(_) => Err(invalid(field, "an integer or a string")),
    }
}

pub(crate) fn string(fields: &Fields, field: &'static str) -> Result<Option<String>, ModelError> {
    match present(fields, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(field, "a string")),
    }
}

pub(crate) fn integer(fields: &Fields, field: &'static str) -> Result<Option<i64>, ModelError> {
    match present(fields, field) {
        None => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or(invalid(field, "an integer")),
    }
}

/// Accepts RFC 3339 timestamps, plain `YYYY-MM-DD` dates (midnight UTC) and
/// epoch milliseconds.
pub(crate) fn timestamp(
    fields: &Fields,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, ModelError> {
    const EXPECTED: &str = "an RFC 3339 timestamp, a YYYY-MM-DD date or epoch milliseconds";

    match present(fields, field) {
        None => Ok(None),
        Some(Value::String(s)) => parse_timestamp(s)
            .map(Some)
            .ok_or(invalid(field, EXPECTED)),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(Some)
            .ok_or(invalid(field, EXPECTED)),
        Some(_) => Err(invalid(field, EXPECTED)),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn present<'a>(fields: &'a Fields, field: &str) -> Option<&'a Value> {
    fields.get(field).filter(|v| !v.is_null())
}

fn invalid(field: &'static str, expected: &'static str) -> ModelError {
    ModelError::InvalidField { field, expected }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
