//! Ordered property maps backing anchor and visual data.
//!
//! Keys starting with [`REFERENCE_PREFIX`] hold references to other anchors
//! and are resolved at draw time; all other keys are plain values.

use indexmap::map::{Iter, IterMut};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::{Color, Value};

/// Marker prefix for reference-valued property keys (e.g. `#pos`).
pub const REFERENCE_PREFIX: char = '#';

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct PropertyMap(IndexMap<String, Value>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `key` names a reference-valued property.
    #[inline]
    pub fn is_reference_key(key: &str) -> bool {
        key.starts_with(REFERENCE_PREFIX)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Insert or overwrite a property, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, String, Value> {
        self.0.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    /// Numeric property; NaN when absent or not a number so that arithmetic
    /// on it yields an undefined result rather than a silent zero.
    pub fn number(&self, key: &str) -> f64 {
        self.get(key).and_then(Value::as_number).unwrap_or(f64::NAN)
    }

    /// Flag property with loose truthiness; false when absent.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).map(Value::is_truthy).unwrap_or(false)
    }

    /// Text property; empty when absent or not text.
    pub fn text(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_text).unwrap_or("")
    }

    pub fn color(&self, key: &str) -> Option<Color> {
        self.get(key).and_then(Value::as_color)
    }

    /// Reference-valued properties as `(key, reference)` pairs, in order.
    /// Non-text values under a reference key are ignored.
    pub fn references(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|(k, v)| {
            if Self::is_reference_key(k) {
                v.as_text().map(|r| (k.as_str(), r))
            } else {
                None
            }
        })
    }

    /// Back-fill every key of `defaults` that is missing here, keeping
    /// existing values. Returns true if anything was added.
    pub fn reconcile(&mut self, defaults: &PropertyMap) -> bool {
        let mut added = false;
        for (k, v) in defaults.iter() {
            if !self.0.contains_key(k) {
                self.0.insert(k.clone(), v.clone());
                added = true;
            }
        }
        added
    }
}

impl FromIterator<(String, Value)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
