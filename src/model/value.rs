//! Extra event attributes.
//!
//! Columns beyond the required schema are opaque to motif detection; they
//! ride along on each bipartite edge so callers can inspect them after a
//! build.

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Attribute name to value.
pub type PropertyMap = HashMap<String, Value>;

/// Value of one extra event column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<Utc>),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v.into()) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<DateTime<Utc>> for Value { fn from(v: DateTime<Utc>) -> Self { Value::DateTime(v) } }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from("en"), Value::String("en".into()));
        assert_eq!(Value::from(42), Value::Int(42));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(7i64).as_str(), None);
    }

    #[test]
    fn test_tagged_serde_roundtrip() {
        let v = Value::List(vec![Value::Int(1), Value::Null]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"type":"List","value":[{"type":"Int","value":1},{"type":"Null"}]}"#);
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), v);
    }
}
