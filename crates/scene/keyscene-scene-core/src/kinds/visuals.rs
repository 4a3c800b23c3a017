//! Visual kinds. Positions and sizes come from references in logical units
//! and are multiplied by the frame scale before they are emitted.

use crate::registry::VisualKind;
use crate::render::{DrawCommand, DrawContext, DrawOutcome};
use crate::text;
use keyscene_api_core::{Color, PropertyMap, Value};

fn color(data: &PropertyMap) -> Color {
    data.color("color").unwrap_or(Color::WHITE)
}

pub struct Rect;

impl VisualKind for Rect {
    fn name(&self) -> &str {
        "Rect"
    }

    fn make(&self) -> PropertyMap {
        PropertyMap::new()
            .with("#pos", "[10,10")
            .with("#size", "[10,10")
            .with("color", Color::WHITE)
            .with("lineWidth", 1.0)
            .with("fill", false)
            .with("pivotCenter", true)
            .with("sizeMul", 1.0)
    }

    fn draw(&self, data: &PropertyMap, ctx: &mut DrawContext<'_>) -> DrawOutcome {
        let mut pos = ctx.resolve(data.text("#pos"));
        let size = ctx.resolve(data.text("#size"));
        if data.flag("pivotCenter") {
            // Pivot uses the unmultiplied size.
            pos = pos - size.scale(0.5);
        }
        let scale = ctx.scale();
        let pos = pos.scale(scale);
        let size = size.scale(scale * data.number("sizeMul"));
        if !(pos.is_defined() && size.is_defined()) {
            return DrawOutcome::Unresolved;
        }
        let color = color(data);
        ctx.push(if data.flag("fill") {
            DrawCommand::FillRect { pos, size, color }
        } else {
            DrawCommand::StrokeRect {
                pos,
                size,
                color,
                line_width: data.number("lineWidth") * scale,
            }
        });
        DrawOutcome::Drawn
    }
}

/// Ellipse centered on `#pos`; `#size` gives the two radii.
pub struct Circle;

impl VisualKind for Circle {
    fn name(&self) -> &str {
        "Circle"
    }

    fn make(&self) -> PropertyMap {
        PropertyMap::new()
            .with("#pos", "[10,10")
            .with("#size", "[10,10")
            .with("color", Color::WHITE)
            .with("lineWidth", 1.0)
            .with("fill", false)
            .with("radiusMul", 1.0)
    }

    fn draw(&self, data: &PropertyMap, ctx: &mut DrawContext<'_>) -> DrawOutcome {
        let scale = ctx.scale();
        let center = ctx.resolve(data.text("#pos")).scale(scale);
        let radii = ctx
            .resolve(data.text("#size"))
            .scale(scale * data.number("radiusMul"));
        if !(center.is_defined() && radii.is_defined()) {
            return DrawOutcome::Unresolved;
        }
        let color = color(data);
        ctx.push(if data.flag("fill") {
            DrawCommand::FillEllipse {
                center,
                radii,
                color,
            }
        } else {
            DrawCommand::StrokeEllipse {
                center,
                radii,
                color,
                line_width: data.number("lineWidth") * scale,
            }
        });
        DrawOutcome::Drawn
    }
}

pub struct Line;

impl VisualKind for Line {
    fn name(&self) -> &str {
        "Line"
    }

    fn make(&self) -> PropertyMap {
        PropertyMap::new()
            .with("#from", "")
            .with("#to", "")
            .with("color", Color::WHITE)
            .with("lineWidth", 1.0)
    }

    fn draw(&self, data: &PropertyMap, ctx: &mut DrawContext<'_>) -> DrawOutcome {
        let width = data.number("lineWidth");
        if width == 0.0 {
            return DrawOutcome::Hidden;
        }
        let scale = ctx.scale();
        let from = ctx.resolve(data.text("#from")).scale(scale);
        let to = ctx.resolve(data.text("#to")).scale(scale);
        if !(from.is_defined() && to.is_defined()) {
            return DrawOutcome::Unresolved;
        }
        ctx.push(DrawCommand::Line {
            from,
            to,
            color: color(data),
            line_width: width * scale,
        });
        DrawOutcome::Drawn
    }
}

pub struct Text;

impl VisualKind for Text {
    fn name(&self) -> &str {
        "Text"
    }

    fn make(&self) -> PropertyMap {
        PropertyMap::new()
            .with("#pos", "")
            .with("text", "New Text")
            .with("height", 20.0)
            .with("length", -1.0)
            .with("center", true)
            .with("font", "Verdana")
            .with("color", Color::WHITE)
            .with("opacity", 1.0)
    }

    fn draw(&self, data: &PropertyMap, ctx: &mut DrawContext<'_>) -> DrawOutcome {
        let scale = ctx.scale();
        let pos = ctx.resolve(data.text("#pos")).scale(scale);
        if !pos.is_defined() {
            return DrawOutcome::Unresolved;
        }
        let content = text::unescape(data.text("text"));
        let length = data.get("length").and_then(Value::as_number).unwrap_or(-1.0);
        let opacity = data.get("opacity").and_then(Value::as_number).unwrap_or(1.0);
        ctx.push(DrawCommand::Text {
            pos,
            height: data.number("height") * scale,
            text: text::clamp(&content, length).to_string(),
            center: data.flag("center"),
            font: data.text("font").to_string(),
            color: color(data).with_alpha(opacity * 255.0),
        });
        DrawOutcome::Drawn
    }
}
