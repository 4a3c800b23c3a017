//! keyscene-api-core: values, colors, 2D vectors and property maps shared by
//! the animation and scene crates (engine-agnostic).

pub mod property;
pub mod value;
pub mod vector;

pub use property::{PropertyMap, REFERENCE_PREFIX};
pub use value::{Color, ColorError, Value, ValueKind};
pub use vector::Vec2;
