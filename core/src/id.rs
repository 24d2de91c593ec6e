//! Opaque record identifiers.
//!
//! The API hands out integer ids, but callers (and hand-written records) may
//! use strings. Both shapes are kept as-is and never coerced into each
//! other, so `RecordId::Number(1)` and `RecordId::Text("1")` are different
//! ids.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a user or todo exactly as it appeared on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Human-readable form for diagnostics. Text ids are quoted so that
    /// `1` and `"1"` stay distinguishable in messages.
    pub fn describe(id: Option<&RecordId>) -> String {
        match id {
            None => "<none>".to_string(),
            Some(RecordId::Number(n)) => n.to_string(),
            Some(RecordId::Text(s)) => format!("{s:?}"),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        RecordId::Number(value.into())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_strings_never_compare_equal() {
        assert_ne!(RecordId::from(1), RecordId::from("1"));
        assert_eq!(RecordId::from("u1"), RecordId::Text("u1".into()));
    }

    #[test]
    fn deserializes_both_wire_shapes() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[7, "abc"]"#).unwrap();
        assert_eq!(ids, vec![RecordId::Number(7), RecordId::Text("abc".into())]);
    }

    #[test]
    fn serializes_back_to_the_original_shape() {
        let json = serde_json::to_string(&vec![RecordId::from(3), RecordId::from("x")]).unwrap();
        assert_eq!(json, r#"[3,"x"]"#);
    }

    #[test]
    fn describe_quotes_text_ids() {
        assert_eq!(RecordId::describe(Some(&RecordId::from(1))), "1");
        assert_eq!(RecordId::describe(Some(&RecordId::from("1"))), "\"1\"");
        assert_eq!(RecordId::describe(None), "<none>");
    }
}
