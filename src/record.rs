//! Records and alignment keys
//!
//! A [`Record`] is a loosely-typed bag of named fields, the shape a host
//! program hands over after parsing CSV rows, JSON documents or query
//! results. Which field acts as the key and which as the value is decided
//! per call, not by a fixed schema.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Totally ordered alignment key derived from a record's key field.
///
/// Integer JSON numbers map to [`Key::Int`], strings to [`Key::Text`].
/// Across variants every `Int` sorts before every `Text`; keep key typing
/// consistent across series to get a meaningful order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Key {
    /// Integer key (timestamps, sequence numbers)
    Int(i64),
    /// String key, ordered lexicographically
    Text(String),
}

impl Key {
    /// Derive a key from a field value.
    ///
    /// Returns `None` for values without a total order (floats, booleans,
    /// null, arrays, objects) and for integers outside the `i64` range.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Int),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Integer payload, if this is an integer key.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Text(_) => None,
        }
    }

    /// String payload, if this is a text key.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Text(s) => Some(s),
        }
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
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A single observation: named fields holding JSON scalars.
///
/// # Example
///
/// ```rust
/// use interlace::record::Record;
///
/// let record = Record::new().with("ts", 1_700_000_000).with("temp", 21.5);
/// assert_eq!(record.get("temp"), Some(&serde_json::json!(21.5)));
/// assert!(record.get("humidity").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] if `value` is not an object.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(Error::InvalidRecord(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Set a field, consuming and returning the record.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Set a field, returning the value it replaced.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(field, value)` pairs.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Field lookup that names the series and position on failure.
    pub(crate) fn require(&self, series: &str, index: usize, field: &str) -> Result<&Value> {
        self.get(field).ok_or_else(|| Error::MissingField {
            series: series.to_string(),
            field: field.to_string(),
            index,
        })
    }

    /// Key lookup: the field must exist and hold an orderable value.
    pub(crate) fn key(&self, series: &str, index: usize, field: &str) -> Result<Key> {
        let value = self.require(series, index, field)?;
        Key::from_value(value).ok_or_else(|| Error::InvalidKey {
            series: series.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Convert a JSON array of objects into a series of records.
///
/// # Errors
///
/// Returns [`Error::InvalidRecord`] if `value` is not an array or any
/// element is not an object.
pub fn records_from_json(value: Value) -> Result<Vec<Record>> {
    match value {
        Value::Array(items) => items.into_iter().map(Record::from_json).collect(),
        other => Err(Error::InvalidRecord(format!(
            "expected a JSON array of objects, got {other}"
        ))),
    }
}

/// Parse a JSON document holding an array of objects.
///
/// # Errors
///
/// Returns [`Error::Json`] if the text is not a JSON array of objects.
pub fn records_from_str(json: &str) -> Result<Vec<Record>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_from_value() {
        assert_eq!(Key::from_value(&json!(42)), Some(Key::Int(42)));
        assert_eq!(Key::from_value(&json!("a")), Some(Key::Text("a".into())));
        assert_eq!(Key::from_value(&json!(1.5)), None);
        assert_eq!(Key::from_value(&json!(null)), None);
        assert_eq!(Key::from_value(&json!(true)), None);
        assert_eq!(Key::from_value(&json!(u64::MAX)), None);
    }

    #[test]
    fn test_key_ordering() {
        assert!(Key::Int(2) < Key::Int(10));
        assert!(Key::from("10") < Key::from("2"));
        assert!(Key::Int(i64::MAX) < Key::from(""));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::Int(-3).to_string(), "-3");
        assert_eq!(Key::from("2024-01-01").to_string(), "2024-01-01");
    }

    #[test]
    fn test_record_with_and_get() {
        let record = Record::new().with("ts", 1).with("v", "x");
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("v"), Some(&json!("x")));
        assert!(record.get("missing").is_none());
    }

    #[test]
    fn test_record_from_json_rejects_non_object() {
        assert!(Record::from_json(json!({"ts": 1})).is_ok());
        let err = Record::from_json(json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }

    #[test]
    fn test_require_reports_position() {
        let record = Record::new().with("ts", 1);
        let err = record.require("temp", 4, "value").unwrap_err();
        match err {
            Error::MissingField {
                series,
                field,
                index,
            } => {
                assert_eq!(series, "temp");
                assert_eq!(field, "value");
                assert_eq!(index, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_key_rejects_float() {
        let record = Record::new().with("ts", 1.25);
        assert!(matches!(
            record.key("s", 0, "ts"),
            Err(Error::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_records_from_str() {
        let records = records_from_str(r#"[{"ts": 1, "v": 2}, {"ts": 2, "v": 3}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("v"), Some(&json!(3)));

        assert!(matches!(records_from_str("{}"), Err(Error::Json(_))));
    }

    #[test]
    fn test_records_from_json_array() {
        let records = records_from_json(json!([{"a": 1}])).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records_from_json(json!({"a": 1})).is_err());
        assert!(records_from_json(json!([1])).is_err());
    }
}
