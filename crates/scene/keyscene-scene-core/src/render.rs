//! Frame rendering: viewport fit, then every visual's draw behavior in
//! insertion order.
//!
//! Output is a flat list of [`DrawCommand`]s in viewport pixels. Hosts
//! replay it onto whatever surface they own (a 2D canvas in the browser).

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MAX_REFERENCE_DEPTH;
use crate::project::Project;
use crate::registry::KindRegistry;
use crate::resolver::Resolver;
use keyscene_api_core::{Color, Vec2};

/// Uniform scale that fits the logical canvas inside the viewport.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct FrameLayout {
    pub scale: f64,
    /// Logical size times `scale`: the drawn area, anchored top-left.
    pub draw_size: Vec2,
}

impl FrameLayout {
    pub fn fit(logical: Vec2, viewport: Vec2) -> Self {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !(positive(logical.x) && positive(logical.y) && positive(viewport.x) && positive(viewport.y))
        {
            return Self {
                scale: 0.0,
                draw_size: Vec2::ZERO,
            };
        }
        let scale = (viewport.x / logical.x).min(viewport.y / logical.y);
        Self {
            scale,
            draw_size: logical.scale(scale),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scale <= 0.0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Color,
        size: Vec2,
    },
    FillRect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    StrokeRect {
        pos: Vec2,
        size: Vec2,
        color: Color,
        line_width: f64,
    },
    FillEllipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
    },
    StrokeEllipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
        line_width: f64,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        line_width: f64,
    },
    Text {
        pos: Vec2,
        height: f64,
        text: String,
        center: bool,
        font: String,
        color: Color,
    },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DrawList(Vec<DrawCommand>);

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: DrawCommand) {
        self.0.push(cmd);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[DrawCommand] {
        &self.0
    }
}

/// What a draw behavior did with one visual.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    Drawn,
    /// Deliberately drew nothing (e.g. a zero-width line).
    Hidden,
    /// A required point was undefined.
    Unresolved,
}

/// Handed to [`crate::VisualKind::draw`]: reference lookup in logical units
/// plus the command sink in viewport pixels.
pub struct DrawContext<'a> {
    resolver: Resolver<'a>,
    scale: f64,
    list: &'a mut DrawList,
}

impl<'a> DrawContext<'a> {
    pub fn new(resolver: Resolver<'a>, scale: f64, list: &'a mut DrawList) -> Self {
        Self {
            resolver,
            scale,
            list,
        }
    }

    /// Logical-unit point for a reference.
    pub fn resolve(&self, reference: &str) -> Vec2 {
        self.resolver.resolve(reference)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn push(&mut self, cmd: DrawCommand) {
        self.list.push(cmd);
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    /// Emit a `Clear` of this color over the drawn area before any visual.
    pub background: Option<Color>,
    pub max_reference_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: None,
            max_reference_depth: DEFAULT_MAX_REFERENCE_DEPTH,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RenderedFrame {
    pub layout: FrameLayout,
    pub commands: DrawList,
    /// Visuals with a registered kind that could not be drawn because a
    /// reference did not resolve.
    pub skipped: Vec<String>,
}

/// Draw every visual of `project` for a `viewport`-sized surface.
pub fn render_frame(
    project: &Project,
    registry: &KindRegistry,
    viewport: Vec2,
    options: &RenderOptions,
) -> RenderedFrame {
    let layout = FrameLayout::fit(project.canvas_size.as_vec2(), viewport);
    let mut commands = DrawList::new();
    let mut skipped = Vec::new();
    if layout.is_empty() {
        return RenderedFrame {
            layout,
            commands,
            skipped,
        };
    }
    if let Some(color) = options.background {
        commands.push(DrawCommand::Clear {
            color,
            size: layout.draw_size,
        });
    }
    let resolver =
        Resolver::for_project(project, registry).with_max_depth(options.max_reference_depth);
    for (name, visual) in project.visuals.iter() {
        let Some(kind) = registry.visual_kind(&visual.kind) else {
            debug!("visual '{name}' skipped: unregistered kind '{}'", visual.kind);
            continue;
        };
        let mut ctx = DrawContext::new(resolver.clone(), layout.scale, &mut commands);
        if kind.draw(&visual.data, &mut ctx) == DrawOutcome::Unresolved {
            debug!("visual '{name}' skipped: unresolved reference");
            skipped.push(name.clone());
        }
    }
    RenderedFrame {
        layout,
        commands,
        skipped,
    }
}
