//! Target references and the property-store seam.
//!
//! Hosts own the live objects; the engine only needs to look up one mutable
//! property slot per track. Hosts implement [`PropertyStore`] and pass it to
//! [`crate::engine::apply_frame`].

use serde::{Deserialize, Serialize};

use keyscene_api_core::Value;

/// Which object a track writes to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    Anchor(String),
    Visual(String),
}

impl TargetRef {
    pub fn name(&self) -> &str {
        match self {
            TargetRef::Anchor(n) | TargetRef::Visual(n) => n,
        }
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, TargetRef::Anchor(_))
    }
}

/// Mutable access to the properties a track may write.
pub trait PropertyStore {
    /// The slot for `prop` on the target, or `None` when the target or the
    /// property does not exist. Implementations must never create slots.
    fn property_mut(&mut self, target: &TargetRef, prop: &str) -> Option<&mut Value>;

    /// Read-only existence check used for validity reporting.
    fn has_property(&self, target: &TargetRef, prop: &str) -> bool;
}
