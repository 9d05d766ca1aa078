use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An attribute value.
///
/// Scalars get their own variants; anything else (floats, lists, objects,
/// null) is carried as `Json`. Conversions from `serde_json::Value` pick
/// the scalar variant when one fits, so a value reads back the same after
/// a JSON round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    String(String),
    Number(i64),
    Bool(bool),
    Json(serde_json::Value),
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::String(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::String(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Number(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Json(serde_json::Value::from(v))
    }
}

impl From<serde_json::Value> for AttrValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::String(s) => AttrValue::String(s),
            serde_json::Value::Bool(b) => AttrValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => AttrValue::Number(i),
                None => AttrValue::Json(serde_json::Value::Number(n)),
            },
            other => AttrValue::Json(other),
        }
    }
}

impl AttrValue {
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            AttrValue::Json(v) => Some(v),
            _ => None,
        }
    }
}

/// Named attribute values attached to a term, a literal or a context node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    inner: BTreeMap<String, AttrValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Attributes {
            inner: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Insert `Some`, remove on `None`.
    pub fn replace(&mut self, key: impl Into<String>, value: Option<AttrValue>) {
        let key = key.into();
        match value {
            Some(v) => {
                self.inner.insert(key, v);
            }
            None => {
                self.inner.remove(&key);
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.inner.remove(key)
    }

    // Later keys win
    pub fn merge(&mut self, other: Attributes) {
        for (k, v) in other.inner {
            self.inner.insert(k, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.inner.get(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.inner.iter()
    }
}
