//! keyscene animation core (engine-agnostic)
//!
//! Sparse keyframe tracks sampled at arbitrary timeline positions, and the
//! per-frame pass that writes sampled values into a host's property stores.
//! Hosts plug in through [`PropertyStore`]; this crate knows nothing about
//! anchors, visuals or drawing.

pub mod binding;
pub mod config;
pub mod data;
pub mod engine;
pub mod interp;
pub mod playback;
pub mod sampling;

pub use binding::{PropertyStore, TargetRef};
pub use config::{Config, Easing};
pub use data::{Keyframe, Track};
pub use engine::{apply_frame, track_is_valid, FrameReport};
pub use playback::{wrap_time, Playhead};
pub use sampling::{evaluate, evaluate_with};
pub use keyscene_api_core::{Value, ValueKind};
