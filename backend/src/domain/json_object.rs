//! Opaque JSON object payloads stored and returned verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object whose contents the domain never interprets.
///
/// Defaults to `{}`. Non-object JSON values are rejected on deserialisation.
///
/// # Examples
/// ```
/// use sitecraft::domain::JsonObject;
/// use serde_json::json;
///
/// let styling: JsonObject = serde_json::from_value(json!({"color": "teal"})).unwrap();
/// assert_eq!(styling.get("color"), Some(&json!("teal")));
/// assert!(JsonObject::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonObject(Map<String, Value>);

impl JsonObject {
    /// Empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the object has no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying map.
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Convert into a plain [`Value::Object`].
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for JsonObject {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// Raised when a stored JSON value is not an object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected a JSON object, found {kind}")]
pub struct NotAnObject {
    kind: &'static str,
}

impl TryFrom<Value> for JsonObject {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let kind = match value {
            Value::Object(map) => return Ok(Self(map)),
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        };
        Err(NotAnObject { kind })
    }
}
