//! The nested structure exchanged between the mapper and the renderer.
//!
//! A [`Structure`] is an ordered map, a sequence, a scalar, or absent. Entity
//! projections produce it and the renderer consumes it; the CLI also builds
//! one from YAML input.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_yaml_ng::Value;

use crate::xml::{IntoWireTree, WireTree};

/// Recursive render input: map, sequence, scalar or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Structure {
    /// Ordered key/value pairs.
    Map(Fields),
    /// Repeated values sharing the parent's tag.
    Seq(Vec<Structure>),
    /// Text content.
    Scalar(String),
    /// Explicit "no value".
    #[default]
    Absent,
}

impl Structure {
    /// Build a map from key/value pairs, keeping their order.
    pub fn map<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Structure>,
    {
        Self::Map(pairs.into_iter().collect())
    }

    /// Whether this is the absent marker.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Borrow the fields if this is a map.
    #[must_use]
    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            Self::Map(fields) => Some(fields),
            _ => None,
        }
    }

    /// Mutably borrow the fields if this is a map.
    pub fn as_map_mut(&mut self) -> Option<&mut Fields> {
        match self {
            Self::Map(fields) => Some(fields),
            _ => None,
        }
    }

    /// Borrow the items if this is a sequence.
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Structure]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the text if this is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Look up a key if this is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Structure> {
        self.as_map().and_then(|fields| fields.get(key))
    }
}

/// Insertion-ordered map of keys to structures.
///
/// Inserting an existing key replaces its value in place, so the key keeps
/// its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(IndexMap<String, Structure>);

impl Fields {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Structure>) -> Option<Structure> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove a key, returning its value. Later keys keep their order.
    pub fn remove(&mut self, key: &str) -> Option<Structure> {
        self.0.shift_remove(key)
    }

    /// Look up a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Structure> {
        self.0.get(key)
    }

    /// Whether the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Structure)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<Structure>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

impl From<Fields> for Structure {
    fn from(fields: Fields) -> Self {
        Self::Map(fields)
    }
}

impl From<String> for Structure {
    fn from(text: String) -> Self {
        Self::Scalar(text)
    }
}

impl From<&str> for Structure {
    fn from(text: &str) -> Self {
        Self::Scalar(text.to_string())
    }
}

impl From<&String> for Structure {
    fn from(text: &String) -> Self {
        Self::Scalar(text.clone())
    }
}

impl From<i64> for Structure {
    fn from(value: i64) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<u64> for Structure {
    fn from(value: u64) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<f64> for Structure {
    fn from(value: f64) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<bool> for Structure {
    fn from(value: bool) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl<T: Into<Structure>> From<Vec<T>> for Structure {
    fn from(items: Vec<T>) -> Self {
        Self::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Structure>> From<Option<T>> for Structure {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// YAML input: mappings keep their order, `null` becomes absent, and every
/// other scalar becomes its text form.
impl From<Value> for Structure {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Bool(b) => Self::Scalar(b.to_string()),
            Value::Number(n) => Self::Scalar(n.to_string()),
            Value::String(s) => Self::Scalar(s),
            Value::Sequence(items) => Self::Seq(items.into_iter().map(Self::from).collect()),
            Value::Mapping(mapping) => Self::Map(
                mapping
                    .into_iter()
                    .map(|(key, value)| (yaml_key(key), Self::from(value)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

fn yaml_key(key: Value) -> String {
    match key {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => serde_yaml_ng::to_string(&other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

impl Serialize for Structure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Map(fields) => fields.serialize(serializer),
            Self::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Scalar(text) => serializer.serialize_str(text),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A structure is never a wire tree.
impl<'a, 'input: 'a> IntoWireTree<'a, 'input> for &Structure {
    fn into_wire_tree(self) -> Option<WireTree<'a, 'input>> {
        None
    }
}
