//! Interpolation helpers.
//!
//! Numbers blend linearly, text uses the length-interpolated splice, every
//! other value kind holds the left key.

pub mod functions;

pub use functions::{blend_values, ease_half_sine, lerp_f64, splice_text};
