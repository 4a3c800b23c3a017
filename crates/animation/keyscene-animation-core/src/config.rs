//! Core configuration for keyscene-animation-core.

use serde::{Deserialize, Serialize};

/// Remap applied to the interpolation fraction before blending key values.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// `(sin((t - 0.5) * PI) + 1) / 2`: slow start and end, exact at 0, 0.5 and 1.
    #[default]
    HalfSine,
    /// Fraction used as-is.
    Linear,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::HalfSine => crate::interp::functions::ease_half_sine(t),
            Easing::Linear => t,
        }
    }
}

/// Evaluation settings shared by every track in a frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub easing: Easing,
}
