//! Entity model for near-Earth objects and their close approaches.
//!
//! Raw records produced by the [`io`](crate::io) readers are re-keyed through
//! a [`schema::EntitySchema`] and then handed to the entity constructors, which
//! apply the rules in [`normalize`] exactly once.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_json::Value;

pub mod approach;
pub mod neo;
pub mod normalize;
pub mod schema;

pub use approach::{CloseApproach, SerializedApproach};
pub use neo::{NearEarthObject, SerializedNeo};

/// A single untyped record as read from a source file.
///
/// CSV cells arrive as strings; JSON rows may also carry numbers and nulls.
/// No coercion happens here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: BTreeMap<String, Value>,
}

impl RawRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a field value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`RawRecord::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the textual form of a field, or `None` for absent and null
    /// values.
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.fields.get(key)? {
            Value::Null => None,
            Value::String(value) => Some(Cow::Borrowed(value.as_str())),
            Value::Number(number) => Some(Cow::Owned(number.to_string())),
            Value::Bool(value) => Some(Cow::Owned(value.to_string())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Iterates over the field names in the record.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_stringifies_numbers_and_hides_nulls() {
        let record = RawRecord::new()
            .with("dist", json!(0.15))
            .with("des", "433")
            .with("v_rel", Value::Null);

        assert_eq!(record.text("dist").as_deref(), Some("0.15"));
        assert_eq!(record.text("des").as_deref(), Some("433"));
        assert_eq!(record.text("v_rel"), None);
        assert_eq!(record.text("missing"), None);
    }
}
