//! Built-in anchor and visual kinds.

pub mod anchors;
pub mod visuals;

use crate::registry::KindRegistry;

pub use anchors::{Lerp, Offset, Position, Radius, RotateAround};
pub use visuals::{Circle, Line, Rect, Text};

pub(crate) fn register_builtins(reg: &mut KindRegistry) {
    reg.register_anchor(Position)
        .register_anchor(Radius)
        .register_anchor(RotateAround)
        .register_anchor(Offset)
        .register_anchor(Lerp);
    reg.register_visual(Rect)
        .register_visual(Circle)
        .register_visual(Line)
        .register_visual(Text);
}
