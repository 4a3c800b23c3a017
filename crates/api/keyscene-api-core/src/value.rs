//! Value: property and keyframe payloads.
//!
//! Values serialize in their JSON-natural form (`1.5`, `"text"`, `true`,
//! `[255, 255, 255]`) so saved projects stay readable and hand-editable.
//! Anything else is carried through untouched as `Other`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse kind of a [`Value`], useful for dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Number,
    Text,
    Color,
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag (never interpolated)
    Bool(bool),

    /// Real number; interpolated linearly
    Number(f64),

    /// Text; interpolated with the prefix/suffix splice
    Text(String),

    /// RGB(A) color in 0..255 channels (never interpolated)
    Color(Color),

    /// Any shape the engine does not understand; held as-is
    Other(serde_json::Value),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
            Value::Color(_) => ValueKind::Color,
            Value::Other(_) => ValueKind::Other,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Loose truthiness used for flag properties: zero, NaN, empty text and
    /// null are false, everything else true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::Color(_) => true,
            Value::Other(v) => !v.is_null(),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Color> for Value {
    fn from(v: Color) -> Self {
        Value::Color(v)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("color needs 3 or 4 channels, got {0}")]
    Channels(usize),
}

/// RGB color with an optional alpha channel, 0..255 per channel.
/// Persisted as `[r, g, b]` or `[r, g, b, a]`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: Option<f64>,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255.0, 255.0, 255.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    /// Same color with an explicit alpha channel.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a: Some(a), ..self }
    }

    /// Alpha channel, opaque (255) when unset.
    pub fn alpha(&self) -> f64 {
        self.a.unwrap_or(255.0)
    }
}

impl TryFrom<Vec<f64>> for Color {
    type Error = ColorError;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            [r, g, b, a] => Ok(Color::rgb(*r, *g, *b).with_alpha(*a)),
            other => Err(ColorError::Channels(other.len())),
        }
    }
}

impl From<Color> for Vec<f64> {
    fn from(c: Color) -> Self {
        match c.a {
            Some(a) => vec![c.r, c.g, c.b, a],
            None => vec![c.r, c.g, c.b],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_natural_shapes_pick_the_right_variant() {
        let v: Value = serde_json::from_value(json!(2.5)).unwrap();
        assert_eq!(v, Value::Number(2.5));
        let v: Value = serde_json::from_value(json!("[10,10")).unwrap();
        assert_eq!(v, Value::Text("[10,10".into()));
        let v: Value = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(v, Value::Bool(true));
        let v: Value = serde_json::from_value(json!([255, 0, 0])).unwrap();
        assert_eq!(v, Value::Color(Color::rgb(255.0, 0.0, 0.0)));
        let v: Value = serde_json::from_value(json!([1, 2])).unwrap();
        assert_eq!(v.kind(), ValueKind::Other);
        let v: Value = serde_json::from_value(json!({ "nested": 1 })).unwrap();
        assert_eq!(v.kind(), ValueKind::Other);
    }

    #[test]
    fn color_keeps_channel_count_on_save() {
        let rgb = serde_json::to_value(Value::Color(Color::WHITE)).unwrap();
        assert_eq!(rgb, json!([255.0, 255.0, 255.0]));
        let rgba = serde_json::to_value(Value::Color(Color::BLACK.with_alpha(128.0))).unwrap();
        assert_eq!(rgba, json!([0.0, 0.0, 0.0, 128.0]));
    }

    #[test]
    fn truthiness_follows_loose_rules() {
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(Value::Number(-1.0).is_truthy());
        assert!(!Value::Text(String::new()).is_truthy());
        assert!(!Value::Other(serde_json::Value::Null).is_truthy());
    }
}
