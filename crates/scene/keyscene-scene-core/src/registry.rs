//! Kind registry: the behaviors behind anchor and visual `type` names.
//!
//! Kinds are registered once while a [`crate::Scene`] is being set up and
//! only read afterwards. Projects store kind names, never behavior, so a name
//! with no registered kind is legal and simply does nothing.

use std::fmt;

use indexmap::IndexMap;

use crate::kinds;
use crate::render::{DrawContext, DrawOutcome};
use crate::resolver::Resolver;
use keyscene_api_core::{PropertyMap, Vec2};

/// Behavior of an anchor kind.
pub trait AnchorKind {
    /// Name persisted as the object's `type`.
    fn name(&self) -> &str;

    /// Default data for a new anchor; also the schema used by reconcile.
    fn make(&self) -> PropertyMap;

    /// Position of an anchor holding `data`. Nested references go through
    /// `resolver`.
    fn resolve(&self, data: &PropertyMap, resolver: &Resolver<'_>) -> Vec2;
}

/// Behavior of a visual kind.
pub trait VisualKind {
    fn name(&self) -> &str;

    fn make(&self) -> PropertyMap;

    /// Emit draw commands for a visual holding `data`.
    fn draw(&self, data: &PropertyMap, ctx: &mut DrawContext<'_>) -> DrawOutcome;
}

#[derive(Default)]
pub struct KindRegistry {
    anchors: IndexMap<String, Box<dyn AnchorKind>>,
    visuals: IndexMap<String, Box<dyn VisualKind>>,
}

impl fmt::Debug for KindRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindRegistry")
            .field("anchors", &self.anchors.keys().collect::<Vec<_>>())
            .field("visuals", &self.visuals.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl KindRegistry {
    /// Empty registry; every object is unregistered until kinds are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in anchor and visual kinds.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        kinds::register_builtins(&mut reg);
        reg
    }

    /// Add or replace an anchor kind under its own name.
    pub fn register_anchor(&mut self, kind: impl AnchorKind + 'static) -> &mut Self {
        self.anchors.insert(kind.name().to_string(), Box::new(kind));
        self
    }

    pub fn register_visual(&mut self, kind: impl VisualKind + 'static) -> &mut Self {
        self.visuals.insert(kind.name().to_string(), Box::new(kind));
        self
    }

    pub fn anchor_kind(&self, name: &str) -> Option<&dyn AnchorKind> {
        self.anchors.get(name).map(|k| k.as_ref())
    }

    pub fn visual_kind(&self, name: &str) -> Option<&dyn VisualKind> {
        self.visuals.get(name).map(|k| k.as_ref())
    }

    pub fn has_anchor_kind(&self, name: &str) -> bool {
        self.anchors.contains_key(name)
    }

    pub fn has_visual_kind(&self, name: &str) -> bool {
        self.visuals.contains_key(name)
    }

    /// Anchor kind names in registration order.
    pub fn anchor_kind_names(&self) -> impl Iterator<Item = &str> {
        self.anchors.keys().map(String::as_str)
    }

    pub fn visual_kind_names(&self) -> impl Iterator<Item = &str> {
        self.visuals.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl AnchorKind for Fixed {
        fn name(&self) -> &str {
            "Fixed"
        }
        fn make(&self) -> PropertyMap {
            PropertyMap::new()
        }
        fn resolve(&self, _: &PropertyMap, _: &Resolver<'_>) -> Vec2 {
            Vec2::new(1.0, 2.0)
        }
    }

    #[test]
    fn builtins_register_in_order() {
        let reg = KindRegistry::with_builtins();
        let anchors: Vec<_> = reg.anchor_kind_names().collect();
        assert_eq!(anchors, ["Position", "Radius", "RotateAround", "Offset", "Lerp"]);
        let visuals: Vec<_> = reg.visual_kind_names().collect();
        assert_eq!(visuals, ["Rect", "Circle", "Line", "Text"]);
    }

    #[test]
    fn custom_kinds_extend_the_registry() {
        let mut reg = KindRegistry::with_builtins();
        assert!(!reg.has_anchor_kind("Fixed"));
        reg.register_anchor(Fixed);
        assert!(reg.has_anchor_kind("Fixed"));
        assert!(!reg.has_visual_kind("Fixed"));
        assert!(reg.anchor_kind("Fixed").is_some_and(|k| k.make().is_empty()));
    }
}
