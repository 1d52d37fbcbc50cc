//! Record: one persisted item of a collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the record id.
pub const ID: &str = "id";
/// Field stamped once, at creation.
pub const CREATED_AT: &str = "createdAt";
/// Field stamped by every update.
pub const UPDATED_AT: &str = "updatedAt";

/// A mapping from field name to JSON value.
///
/// Serializes as a plain JSON object, so a collection file is a JSON array of
/// objects. Field order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// The record id, if present as a non-empty string.
    pub fn id(&self) -> Option<&str> {
        self.get_str(ID).filter(|id| !id.is_empty())
    }

    pub fn created_at(&self) -> Option<&str> {
        self.get_str(CREATED_AT)
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.get_str(UPDATED_AT)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String value of a field; `None` when absent or not a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Boolean value of a field; `None` when absent or not a boolean.
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.0.get(field).and_then(Value::as_bool)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Shallow-merge `patch` onto this record.
    ///
    /// `id` and `createdAt` are identity fields and are never taken from a
    /// patch.
    pub fn merge(&mut self, patch: Record) {
        for (field, value) in patch.0 {
            if field == ID || field == CREATED_AT {
                continue;
            }
            self.0.insert(field, value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(field, value)` pairs in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// The record as a JSON object value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.0)
    }
}

impl TryFrom<Value> for Record {
    type Error = Value;

    /// Only JSON objects are records; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Record(map)),
            other => Err(other),
        }
    }
}
