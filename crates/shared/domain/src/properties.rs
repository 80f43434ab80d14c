//! Per-user properties payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// Arbitrary JSON object owned by a single user.
///
/// The store treats it as opaque structured data: it is replaced wholesale on
/// update and returned exactly as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProperties(Map<String, Value>);

impl UserProperties {
    /// Empty properties, as assigned to a freshly created user.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Parse a request body. Anything other than a JSON object is rejected.
    pub fn from_json_bytes(body: &[u8]) -> DomainResult<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| DomainError::malformed(e.to_string()))?;
        Self::try_from(value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into a `serde_json::Value::Object` for storage.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for UserProperties {
    type Error = DomainError;

    fn try_from(value: Value) -> DomainResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::malformed(format!(
                "properties must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<Map<String, Value>> for UserProperties {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
