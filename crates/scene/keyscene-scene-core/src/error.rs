//! Errors for the fallible scene surfaces: document load/save, configuration
//! and editing operations. Per-frame evaluation never returns these.

use thiserror::Error;

use crate::project::ObjectRole;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("project parse error: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("project serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("config error: {0}")]
    Config(#[source] serde_json::Error),
    #[error("no {role} kind named '{kind}' is registered")]
    UnknownKind { role: ObjectRole, kind: String },
    #[error("{role} '{name}' already exists")]
    DuplicateName { role: ObjectRole, name: String },
    #[error("{role} '{name}' not found")]
    NotFound { role: ObjectRole, name: String },
    #[error("{role} '{name}' has no property '{prop}'")]
    MissingProperty {
        role: ObjectRole,
        name: String,
        prop: String,
    },
    #[error("timeline has no track #{0}")]
    TrackOutOfRange(usize),
    #[error("track #{track} has no key #{key}")]
    KeyOutOfRange { track: usize, key: usize },
    #[error("project length must be a positive number of seconds, got {0}")]
    InvalidLength(f64),
    #[error("no project loaded")]
    NoProject,
}

impl SceneError {
    pub fn not_found(role: ObjectRole, name: impl Into<String>) -> Self {
        Self::NotFound {
            role,
            name: name.into(),
        }
    }
}
