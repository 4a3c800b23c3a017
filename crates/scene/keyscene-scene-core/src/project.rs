//! Project document: anchors, visuals, the animation timeline and canvas metadata.
//!
//! Maps keep insertion order; visuals draw in that order. Unknown fields on
//! the project and on objects are kept so a save never drops data written by
//! a newer editor.

use std::fmt;

use hashbrown::HashSet;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::reference;
use crate::registry::KindRegistry;
use keyscene_animation_core::{
    apply_frame, Config as AnimationConfig, FrameReport, Keyframe, PropertyStore, TargetRef, Track,
};
use keyscene_api_core::{PropertyMap, Value, Vec2};

pub type ObjectMap = IndexMap<String, SceneObject>;
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// Which of the two object maps an operation addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectRole {
    Anchor,
    Visual,
}

impl fmt::Display for ObjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectRole::Anchor => f.write_str("anchor"),
            ObjectRole::Visual => f.write_str("visual"),
        }
    }
}

impl From<&TargetRef> for ObjectRole {
    fn from(t: &TargetRef) -> Self {
        match t {
            TargetRef::Anchor(_) => ObjectRole::Anchor,
            TargetRef::Visual(_) => ObjectRole::Visual,
        }
    }
}

/// An anchor or a visual: a kind name plus its open property map.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SceneObject {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: PropertyMap,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl SceneObject {
    pub fn new(kind: impl Into<String>, data: PropertyMap) -> Self {
        Self {
            kind: kind.into(),
            data,
            extra: ExtraFields::new(),
        }
    }
}

/// Logical canvas size in pixels, persisted as `[width, height]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl From<[f64; 2]> for CanvasSize {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<CanvasSize> for [f64; 2] {
    fn from(c: CanvasSize) -> Self {
        [c.width, c.height]
    }
}

/// Anchors reachable from an object's reference properties.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Existing anchors, in discovery order.
    pub linked: Vec<String>,
    /// Names referenced but not present in the project.
    pub dangling: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Project {
    #[serde(default)]
    pub anchors: ObjectMap,
    #[serde(default)]
    pub visuals: ObjectMap,
    #[serde(default)]
    pub timeline: Vec<Track>,
    #[serde(rename = "size")]
    pub canvas_size: CanvasSize,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "length")]
    pub duration_seconds: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Split borrow of the two object maps, handed to the animation pass.
struct ObjectStores<'a> {
    anchors: &'a mut ObjectMap,
    visuals: &'a mut ObjectMap,
}

fn slot<'m>(
    anchors: &'m ObjectMap,
    visuals: &'m ObjectMap,
    target: &TargetRef,
) -> Option<&'m SceneObject> {
    match target {
        TargetRef::Anchor(n) => anchors.get(n),
        TargetRef::Visual(n) => visuals.get(n),
    }
}

impl PropertyStore for ObjectStores<'_> {
    fn property_mut(&mut self, target: &TargetRef, prop: &str) -> Option<&mut Value> {
        let map = match target {
            TargetRef::Anchor(_) => &mut *self.anchors,
            TargetRef::Visual(_) => &mut *self.visuals,
        };
        map.get_mut(target.name())?.data.get_mut(prop)
    }

    fn has_property(&self, target: &TargetRef, prop: &str) -> bool {
        slot(&*self.anchors, &*self.visuals, target).is_some_and(|o| o.data.contains(prop))
    }
}

impl Project {
    pub fn new(name: impl Into<String>, canvas_size: CanvasSize, duration_seconds: f64) -> Self {
        Self {
            anchors: ObjectMap::new(),
            visuals: ObjectMap::new(),
            timeline: Vec::new(),
            canvas_size,
            name: name.into(),
            duration_seconds,
            extra: ExtraFields::new(),
        }
    }

    pub fn objects(&self, role: ObjectRole) -> &ObjectMap {
        match role {
            ObjectRole::Anchor => &self.anchors,
            ObjectRole::Visual => &self.visuals,
        }
    }

    pub fn objects_mut(&mut self, role: ObjectRole) -> &mut ObjectMap {
        match role {
            ObjectRole::Anchor => &mut self.anchors,
            ObjectRole::Visual => &mut self.visuals,
        }
    }

    pub fn object(&self, role: ObjectRole, name: &str) -> Option<&SceneObject> {
        self.objects(role).get(name)
    }

    pub fn object_mut(&mut self, role: ObjectRole, name: &str) -> Option<&mut SceneObject> {
        self.objects_mut(role).get_mut(name)
    }

    // ---- animation ----

    /// Write every track's value at `time` into the object data.
    pub fn apply_frame(&mut self, time: f64, cfg: &AnimationConfig) -> FrameReport {
        let Project {
            anchors,
            visuals,
            timeline,
            ..
        } = self;
        let mut store = ObjectStores { anchors, visuals };
        apply_frame(&mut store, timeline, time, cfg)
    }

    /// Whether track `index` currently has a live target property.
    pub fn track_is_valid(&self, index: usize) -> bool {
        self.timeline
            .get(index)
            .is_some_and(|t| self.has_property(&t.target(), &t.prop))
    }

    /// Validity flag per track, in timeline order.
    pub fn track_validity(&self) -> Vec<bool> {
        self.timeline
            .iter()
            .map(|t| self.has_property(&t.target(), &t.prop))
            .collect()
    }

    fn has_property(&self, target: &TargetRef, prop: &str) -> bool {
        slot(&self.anchors, &self.visuals, target).is_some_and(|o| o.data.contains(prop))
    }

    // ---- kinds ----

    /// Back-fill kind defaults into every object whose kind is registered.
    /// Returns the number of objects that gained properties.
    pub fn reconcile(&mut self, registry: &KindRegistry) -> usize {
        let mut changed = 0;
        for (name, obj) in self.anchors.iter_mut() {
            match registry.anchor_kind(&obj.kind) {
                Some(kind) => changed += usize::from(obj.data.reconcile(&kind.make())),
                None => debug!("anchor '{name}' has unregistered kind '{}'", obj.kind),
            }
        }
        for (name, obj) in self.visuals.iter_mut() {
            match registry.visual_kind(&obj.kind) {
                Some(kind) => changed += usize::from(obj.data.reconcile(&kind.make())),
                None => debug!("visual '{name}' has unregistered kind '{}'", obj.kind),
            }
        }
        changed
    }

    /// Objects whose kind is not in `registry`: editable, never resolved or drawn.
    pub fn unregistered_objects(&self, registry: &KindRegistry) -> Vec<(ObjectRole, String)> {
        let anchors = self
            .anchors
            .iter()
            .filter(|(_, o)| !registry.has_anchor_kind(&o.kind))
            .map(|(n, _)| (ObjectRole::Anchor, n.clone()));
        let visuals = self
            .visuals
            .iter()
            .filter(|(_, o)| !registry.has_visual_kind(&o.kind))
            .map(|(n, _)| (ObjectRole::Visual, n.clone()));
        anchors.chain(visuals).collect()
    }

    // ---- editing ----

    /// Create an object from its kind's defaults.
    pub fn add_object(
        &mut self,
        role: ObjectRole,
        name: impl Into<String>,
        kind: &str,
        registry: &KindRegistry,
    ) -> Result<&mut SceneObject, SceneError> {
        let name = name.into();
        let data = match role {
            ObjectRole::Anchor => registry.anchor_kind(kind).map(|k| k.make()),
            ObjectRole::Visual => registry.visual_kind(kind).map(|k| k.make()),
        }
        .ok_or_else(|| SceneError::UnknownKind {
            role,
            kind: kind.to_string(),
        })?;
        let map = self.objects_mut(role);
        if map.contains_key(&name) {
            return Err(SceneError::DuplicateName { role, name });
        }
        let (idx, _) = map.insert_full(name, SceneObject::new(kind, data));
        Ok(&mut map[idx])
    }

    pub fn add_anchor(
        &mut self,
        name: impl Into<String>,
        kind: &str,
        registry: &KindRegistry,
    ) -> Result<&mut SceneObject, SceneError> {
        self.add_object(ObjectRole::Anchor, name, kind, registry)
    }

    pub fn add_visual(
        &mut self,
        name: impl Into<String>,
        kind: &str,
        registry: &KindRegistry,
    ) -> Result<&mut SceneObject, SceneError> {
        self.add_object(ObjectRole::Visual, name, kind, registry)
    }

    /// Set one property on an existing object. Only keys the object already
    /// has may be written, except reference keys (`#...`) which may be added.
    pub fn set_property(
        &mut self,
        role: ObjectRole,
        name: &str,
        prop: &str,
        value: impl Into<Value>,
    ) -> Result<(), SceneError> {
        let obj = self
            .object_mut(role, name)
            .ok_or_else(|| SceneError::not_found(role, name))?;
        if !obj.data.contains(prop) && !PropertyMap::is_reference_key(prop) {
            return Err(SceneError::MissingProperty {
                role,
                name: name.to_string(),
                prop: prop.to_string(),
            });
        }
        obj.data.insert(prop, value);
        Ok(())
    }

    /// Rename in place, keeping draw order. References and tracks that use
    /// the old name are left alone and become dangling.
    pub fn rename_object(
        &mut self,
        role: ObjectRole,
        from: &str,
        to: impl Into<String>,
    ) -> Result<(), SceneError> {
        let to = to.into();
        let map = self.objects_mut(role);
        if from == to {
            return if map.contains_key(from) {
                Ok(())
            } else {
                Err(SceneError::not_found(role, from))
            };
        }
        if map.contains_key(&to) {
            return Err(SceneError::DuplicateName { role, name: to });
        }
        let (idx, _, obj) = map
            .shift_remove_full(from)
            .ok_or_else(|| SceneError::not_found(role, from))?;
        map.shift_insert(idx, to, obj);
        Ok(())
    }

    pub fn rename_anchor(&mut self, from: &str, to: impl Into<String>) -> Result<(), SceneError> {
        self.rename_object(ObjectRole::Anchor, from, to)
    }

    pub fn rename_visual(&mut self, from: &str, to: impl Into<String>) -> Result<(), SceneError> {
        self.rename_object(ObjectRole::Visual, from, to)
    }

    /// Delete an object. Nothing else is touched.
    pub fn remove_object(&mut self, role: ObjectRole, name: &str) -> Result<SceneObject, SceneError> {
        self.objects_mut(role)
            .shift_remove(name)
            .ok_or_else(|| SceneError::not_found(role, name))
    }

    pub fn remove_anchor(&mut self, name: &str) -> Result<SceneObject, SceneError> {
        self.remove_object(ObjectRole::Anchor, name)
    }

    pub fn remove_visual(&mut self, name: &str) -> Result<SceneObject, SceneError> {
        self.remove_object(ObjectRole::Visual, name)
    }

    /// Append an empty track for an existing property. Returns its index.
    pub fn add_track(&mut self, target: TargetRef, prop: &str) -> Result<usize, SceneError> {
        let role = ObjectRole::from(&target);
        let obj = self
            .object(role, target.name())
            .ok_or_else(|| SceneError::not_found(role, target.name()))?;
        if !obj.data.contains(prop) {
            return Err(SceneError::MissingProperty {
                role,
                name: target.name().to_string(),
                prop: prop.to_string(),
            });
        }
        self.timeline.push(Track::new(target, prop));
        Ok(self.timeline.len() - 1)
    }

    pub fn remove_track(&mut self, index: usize) -> Result<Track, SceneError> {
        if index >= self.timeline.len() {
            return Err(SceneError::TrackOutOfRange(index));
        }
        Ok(self.timeline.remove(index))
    }

    /// Append a key; keys may be added in any time order.
    pub fn add_key(&mut self, track: usize, key: Keyframe) -> Result<(), SceneError> {
        self.timeline
            .get_mut(track)
            .ok_or(SceneError::TrackOutOfRange(track))?
            .keys
            .push(key);
        Ok(())
    }

    pub fn remove_key(&mut self, track: usize, key: usize) -> Result<Keyframe, SceneError> {
        let t = self
            .timeline
            .get_mut(track)
            .ok_or(SceneError::TrackOutOfRange(track))?;
        if key >= t.keys.len() {
            return Err(SceneError::KeyOutOfRange { track, key });
        }
        Ok(t.keys.remove(key))
    }

    /// Replace a key in place; returns the previous one.
    pub fn set_key(
        &mut self,
        track: usize,
        key: usize,
        keyframe: Keyframe,
    ) -> Result<Keyframe, SceneError> {
        let slot = self
            .timeline
            .get_mut(track)
            .ok_or(SceneError::TrackOutOfRange(track))?
            .keys
            .get_mut(key)
            .ok_or(SceneError::KeyOutOfRange { track, key })?;
        Ok(std::mem::replace(slot, keyframe))
    }

    pub fn set_length(&mut self, seconds: f64) -> Result<(), SceneError> {
        if !(seconds.is_finite() && seconds > 0.0) {
            return Err(SceneError::InvalidLength(seconds));
        }
        self.duration_seconds = seconds;
        Ok(())
    }

    // ---- reference links ----

    /// Anchors reachable through reference properties of `name`, walking
    /// anchors transitively. Each anchor is visited once, so cycles end.
    pub fn linked_anchors(&self, role: ObjectRole, name: &str) -> LinkReport {
        let mut report = LinkReport::default();
        let mut seen: HashSet<&str> = HashSet::new();
        if role == ObjectRole::Anchor {
            seen.insert(name);
        }
        if let Some(obj) = self.object(role, name) {
            self.collect_links(obj, &mut seen, &mut report);
        }
        report
    }

    fn collect_links<'s>(
        &'s self,
        obj: &'s SceneObject,
        seen: &mut HashSet<&'s str>,
        report: &mut LinkReport,
    ) {
        for (_, r) in obj.data.references() {
            let Some(anchor) = reference::anchor_name(r) else {
                continue;
            };
            if !seen.insert(anchor) {
                continue;
            }
            match self.anchors.get(anchor) {
                Some(next) => {
                    report.linked.push(anchor.to_string());
                    self.collect_links(next, seen, report);
                }
                None => report.dangling.push(anchor.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::new("t", CanvasSize::new(200.0, 100.0), 5.0)
    }

    #[test]
    fn rename_keeps_draw_order() {
        let reg = KindRegistry::with_builtins();
        let mut p = project();
        p.add_visual("a", "Rect", &reg).unwrap();
        p.add_visual("b", "Rect", &reg).unwrap();
        p.add_visual("c", "Rect", &reg).unwrap();
        p.rename_object(ObjectRole::Visual, "b", "z").unwrap();
        let names: Vec<_> = p.visuals.keys().cloned().collect();
        assert_eq!(names, vec!["a", "z", "c"]);
        assert!(matches!(
            p.rename_object(ObjectRole::Visual, "a", "c"),
            Err(SceneError::DuplicateName { .. })
        ));
    }

    #[test]
    fn set_property_refuses_new_plain_keys() {
        let reg = KindRegistry::with_builtins();
        let mut p = project();
        p.add_anchor("p", "Position", &reg).unwrap();
        p.set_property(ObjectRole::Anchor, "p", "x", 4.0).unwrap();
        assert!(matches!(
            p.set_property(ObjectRole::Anchor, "p", "bogus", 1.0),
            Err(SceneError::MissingProperty { .. })
        ));
        p.set_property(ObjectRole::Anchor, "p", "#link", "q").unwrap();
        assert_eq!(p.anchors["p"].data.text("#link"), "q");
    }

    #[test]
    fn set_length_rejects_non_positive() {
        let mut p = project();
        assert!(p.set_length(0.0).is_err());
        assert!(p.set_length(f64::NAN).is_err());
        p.set_length(2.5).unwrap();
        assert_eq!(p.duration_seconds, 2.5);
    }
}
