//! Timeline data model: tracks of sparse keyframes.
//!
//! Field names follow the saved project format (`isAnchor`, `prop`, `keys`).

use serde::{Deserialize, Serialize};

use crate::binding::TargetRef;
use keyscene_api_core::Value;

/// One sample on a track. Times are seconds on the project timeline and
/// need not be unique or ordered.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub time: f64,
    pub value: Value,
    /// Blend from the previous key into this one instead of jumping.
    #[serde(default)]
    pub interpolate: bool,
}

impl Keyframe {
    pub fn new(time: f64, value: impl Into<Value>, interpolate: bool) -> Self {
        Self {
            time,
            value: value.into(),
            interpolate,
        }
    }

    /// Key that is jumped to (no blend from the previous key).
    pub fn hold(time: f64, value: impl Into<Value>) -> Self {
        Self::new(time, value, false)
    }

    /// Key that is blended into from the previous key.
    pub fn blend(time: f64, value: impl Into<Value>) -> Self {
        Self::new(time, value, true)
    }
}

/// Animation binding of one property on one anchor or visual.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Target object name.
    pub name: String,
    #[serde(rename = "isAnchor")]
    pub is_anchor: bool,
    /// Property key on the target's data.
    pub prop: String,
    #[serde(default)]
    pub keys: Vec<Keyframe>,
}

impl Track {
    pub fn new(target: TargetRef, prop: impl Into<String>) -> Self {
        let (name, is_anchor) = match target {
            TargetRef::Anchor(n) => (n, true),
            TargetRef::Visual(n) => (n, false),
        };
        Self {
            name,
            is_anchor,
            prop: prop.into(),
            keys: Vec::new(),
        }
    }

    pub fn with_keys(mut self, keys: Vec<Keyframe>) -> Self {
        self.keys = keys;
        self
    }

    pub fn target(&self) -> TargetRef {
        if self.is_anchor {
            TargetRef::Anchor(self.name.clone())
        } else {
            TargetRef::Visual(self.name.clone())
        }
    }
}
