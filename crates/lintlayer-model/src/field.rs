//! Layer field values.
//!
//! A field is either a scalar, an ordered sequence, or a keyed mapping. The
//! kind decides how two layers touching the same field are merged: scalars
//! and sequences are replaced, mappings are unioned key by key.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Field name to value. Ordered so that serialized output is stable.
pub type Fields = BTreeMap<String, FieldValue>;

/// A single configuration field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Replaced wholesale by an overlay (e.g. parser name, ecmaVersion)
    Scalar(Value),

    /// Replaced wholesale by an overlay, never concatenated (e.g. ignores)
    Sequence(Vec<Value>),

    /// Unioned with an overlay, overlay wins per key (e.g. rules, plugins, globals)
    Mapping(BTreeMap<String, Value>),
}

/// Discriminant of a [`FieldValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Scalar,
    Sequence,
    Mapping,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Sequence => write!(f, "sequence"),
            Self::Mapping => write!(f, "mapping"),
        }
    }
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Scalar(_) => FieldKind::Scalar,
            Self::Sequence(_) => FieldKind::Sequence,
            Self::Mapping(_) => FieldKind::Mapping,
        }
    }

    /// Build a sequence of strings
    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Sequence(items.into_iter().map(|s| Value::String(s.into())).collect())
    }

    /// Build a mapping from `(key, value)` pairs. Later duplicates win.
    pub fn mapping<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Convert to a plain JSON value
    pub fn to_value(&self) -> Value {
        match self {
            Self::Scalar(v) => v.clone(),
            Self::Sequence(items) => Value::Array(items.clone()),
            Self::Mapping(map) => Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            ),
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind() {
        assert_eq!(FieldValue::Scalar(json!("espree")).kind(), FieldKind::Scalar);
        assert_eq!(FieldValue::strings(["dist/"]).kind(), FieldKind::Sequence);
        assert_eq!(
            FieldValue::mapping([("no-var", json!("error"))]).kind(),
            FieldKind::Mapping
        );
    }

    #[test]
    fn test_mapping_later_duplicate_wins() {
        let value = FieldValue::mapping([("quotes", json!("double")), ("quotes", json!("single"))]);
        assert_eq!(value.as_mapping().unwrap()["quotes"], json!("single"));
    }

    #[test]
    fn test_to_value_shapes() {
        assert_eq!(FieldValue::Scalar(json!(2022)).to_value(), json!(2022));
        assert_eq!(FieldValue::strings(["a", "b"]).to_value(), json!(["a", "b"]));
        assert_eq!(
            FieldValue::mapping([("fetch", json!("readonly"))]).to_value(),
            json!({"fetch": "readonly"})
        );
    }

    #[test]
    fn test_untagged_serialization() {
        let rules = FieldValue::mapping([("semi", json!(["error", "always"]))]);
        let json = serde_json::to_value(&rules).unwrap();
        assert_eq!(json, json!({"semi": ["error", "always"]}));
    }
}
