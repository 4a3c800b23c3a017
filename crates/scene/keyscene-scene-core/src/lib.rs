//! keyscene scene core
//!
//! Projects of named anchors (points) and visuals (drawables), the kind
//! registry that gives them behavior, the reference resolver that turns
//! position strings into points, and the pipeline that turns a project into
//! a list of draw commands for one frame.
//!
//! Per frame a host calls [`Scene::tick`], which runs the animation pass and
//! then renders. Everything on that path degrades instead of failing: broken
//! references resolve to [`Vec2::UNDEFINED`] and the affected visuals are
//! skipped.

pub mod config;
pub mod error;
pub mod kinds;
pub mod persist;
pub mod project;
pub mod reference;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod scene;
pub mod text;

pub use config::{NewProjectDefaults, SceneConfig};
pub use error::SceneError;
pub use project::{CanvasSize, LinkReport, ObjectRole, Project, SceneObject};
pub use reference::Reference;
pub use registry::{AnchorKind, KindRegistry, VisualKind};
pub use render::{
    render_frame, DrawCommand, DrawContext, DrawList, DrawOutcome, FrameLayout, RenderOptions,
    RenderedFrame,
};
pub use resolver::Resolver;
pub use scene::{FrameOutput, Scene};

pub use keyscene_animation_core::{FrameReport, Keyframe, TargetRef, Track};
pub use keyscene_api_core::{Color, PropertyMap, Value, Vec2};
