use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::Result;

/// An opaque record: one table row or one select option.
///
/// Records are never mutated by virtgrid. Sorting and filtering produce index
/// views over the source slice.
pub type Row = serde_json::Map<String, Value>;

/// Identity of a row or option, read from the configured key field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl Key {
    /// Read an identity from a JSON value.
    ///
    /// Integers keep their numeric form; other scalars use their string form.
    /// `null`, arrays and objects carry no identity.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(n.as_i64().map_or_else(|| Self::Text(n.to_string()), Self::Int)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Bool(b) => Some(Self::Text(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Read the identity of a record from `field`.
    pub fn of(row: &Row, field: &str) -> Option<Self> {
        row.get(field).and_then(Self::from_value)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// String form of a cell value, as shown in a cell and its tooltip.
///
/// Missing and `null` values render as the empty string.
pub fn display_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| display_text(Some(item)))
            .collect::<Vec<_>>()
            .join(","),
        Some(other @ Value::Object(_)) => other.to_string(),
    }
}

/// Parse a JSON array of records.
///
/// # Errors
/// Returns an error if `json` is not an array of objects.
pub fn rows_from_json(json: &str) -> Result<Vec<Row>> {
    Ok(serde_json::from_str(json)?)
}
