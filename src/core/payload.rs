//! Payload values accepted by the emit operations
//!
//! A `Payload` is the arbitrary structured value a caller logs: a plain
//! message, an error, a field mapping, or a raw structured value that the
//! serializer receives untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value type for mapping payload fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// A value submitted for logging.
///
/// The variant determines how the record formatter shapes the output:
/// `Message` and `Fault` become level/timestamp/message records, `Fields`
/// has level and timestamp keys added to it, and `Raw` is handed to the
/// serializer unchanged.
#[derive(Debug, Clone)]
pub enum Payload {
    /// A plain text message
    Message(String),
    /// An error-like value; embedded newlines are collapsed to ": " when
    /// the record is formatted
    Fault(String),
    /// A mapping of field name to value; sorted key order
    Fields(BTreeMap<String, FieldValue>),
    /// An arbitrary structured value passed through to the serializer
    /// without level or timestamp injection
    Raw(serde_json::Value),
}

impl Payload {
    /// Build an error-like payload from anything displayable
    pub fn fault(message: impl fmt::Display) -> Self {
        Payload::Fault(message.to_string())
    }

    /// Build an error-like payload from an error value
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        Payload::Fault(err.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Message(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Message(s.to_string())
    }
}

impl From<BTreeMap<String, FieldValue>> for Payload {
    fn from(fields: BTreeMap<String, FieldValue>) -> Self {
        Payload::Fields(fields)
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Raw(value)
    }
}
