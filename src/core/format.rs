//! Record serialization formats
//!
//! Each writer carries one `RecordFormat`; the router forwards records to
//! it as opaque configuration. Format identifiers are parsed from strings
//! (`"json"`, `"tags"`) so configuration layers can pass them through;
//! unknown identifiers fail with `UnsupportedFormat`.

use super::error::{Result, RouterError};
use super::payload::FieldValue;
use std::fmt;
use std::str::FromStr;

/// A normalized record ready for serialization.
///
/// `Fields` carries name/value pairs in their output order: header order
/// (level, timestamp, message) for message records, sorted key order for
/// mapping records. `Raw` is an arbitrary value passed through untouched.
#[derive(Debug, Clone)]
pub enum Record {
    Fields(Vec<(String, FieldValue)>),
    Raw(serde_json::Value),
}

/// Serialization format for a writer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecordFormat {
    /// One-line JSON object; keys serialized in sorted order
    #[default]
    Json,

    /// `key=value` pairs joined by spaces, values quoted when they
    /// contain spaces, quotes, or `=`
    TagValue,
}

impl RecordFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordFormat::Json => "json",
            RecordFormat::TagValue => "tags",
        }
    }

    /// Serialize a record into one line of output, without a trailing
    /// newline. An empty result means there is nothing to write; the
    /// dispatch layer suppresses the write entirely.
    pub fn serialize(&self, record: &Record) -> Result<String> {
        match self {
            RecordFormat::Json => self.serialize_json(record),
            RecordFormat::TagValue => Ok(self.serialize_tags(record)),
        }
    }

    fn serialize_json(&self, record: &Record) -> Result<String> {
        let value = match record {
            Record::Fields(pairs) => {
                let mut object = serde_json::Map::new();
                for (key, value) in pairs {
                    object.insert(key.clone(), value.to_json_value());
                }
                serde_json::Value::Object(object)
            }
            Record::Raw(value) => value.clone(),
        };
        Ok(serde_json::to_string(&value)?)
    }

    fn serialize_tags(&self, record: &Record) -> String {
        match record {
            Record::Fields(pairs) => {
                let parts: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| {
                        format!("{}={}", escape_key(key), escape_value(&value.to_string()))
                    })
                    .collect();
                parts.join(" ")
            }
            Record::Raw(serde_json::Value::Object(object)) => {
                let parts: Vec<String> = object
                    .iter()
                    .map(|(key, value)| {
                        let rendered = match value {
                            serde_json::Value::String(s) => escape_value(s),
                            other => other.to_string(),
                        };
                        format!("{}={}", escape_key(key), rendered)
                    })
                    .collect();
                parts.join(" ")
            }
            Record::Raw(other) => other.to_string(),
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordFormat {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(RecordFormat::Json),
            "tags" | "tag-value" | "logfmt" => Ok(RecordFormat::TagValue),
            other => Err(RouterError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Strip characters that would break a tag key
fn escape_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Quote a tag value when it contains characters that would split it.
/// Newlines are escaped so a record always stays one line.
fn escape_value(value: &str) -> String {
    if value.contains(' ')
        || value.contains('"')
        || value.contains('=')
        || value.contains('\n')
        || value.contains('\r')
    {
        format!(
            "\"{}\"",
            value
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n")
                .replace('\r', "\\r")
        )
    } else {
        value.to_string()
    }
}
