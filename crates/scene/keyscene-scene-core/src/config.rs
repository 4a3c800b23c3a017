//! Scene configuration. Every field has a default and JSON configs may be partial.

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use keyscene_animation_core::Config as AnimationConfig;
use keyscene_api_core::Color;

/// Nested reference resolutions allowed before giving up with an undefined vector.
pub const DEFAULT_MAX_REFERENCE_DEPTH: usize = 64;

/// Values used when a host creates a fresh project.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NewProjectDefaults {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub duration_seconds: f64,
}

impl Default for NewProjectDefaults {
    fn default() -> Self {
        Self {
            name: "New Project".into(),
            width: 1920.0,
            height: 1080.0,
            duration_seconds: 5.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub max_reference_depth: usize,
    /// Fill drawn behind every captured frame. Preview frames get none; the
    /// host paints its own backdrop.
    pub capture_background: Option<Color>,
    pub new_project: NewProjectDefaults,
    pub animation: AnimationConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_reference_depth: DEFAULT_MAX_REFERENCE_DEPTH,
            capture_background: Some(Color::BLACK),
            new_project: NewProjectDefaults::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_json(s: &str) -> Result<Self, SceneError> {
        serde_json::from_str(s).map_err(SceneError::Config)
    }
}
