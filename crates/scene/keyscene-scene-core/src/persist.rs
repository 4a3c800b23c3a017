//! Project documents as JSON.
//!
//! Loading reconciles kind defaults once so older documents pick up fields
//! added to a kind since they were saved. Unknown kinds and unknown fields
//! load untouched and are written back on save.

use log::debug;

use crate::error::SceneError;
use crate::project::Project;
use crate::registry::KindRegistry;

impl Project {
    pub fn from_json(s: &str, registry: &KindRegistry) -> Result<Self, SceneError> {
        let mut project: Project = serde_json::from_str(s).map_err(SceneError::Parse)?;
        let filled = project.reconcile(registry);
        if filled > 0 {
            debug!("project '{}': back-filled defaults on {filled} objects", project.name);
        }
        Ok(project)
    }

    pub fn from_value(v: serde_json::Value, registry: &KindRegistry) -> Result<Self, SceneError> {
        let mut project: Project = serde_json::from_value(v).map_err(SceneError::Parse)?;
        project.reconcile(registry);
        Ok(project)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        serde_json::to_string(self).map_err(SceneError::Serialize)
    }

    pub fn to_json_pretty(&self) -> Result<String, SceneError> {
        serde_json::to_string_pretty(self).map_err(SceneError::Serialize)
    }
}
