//! Per-frame animation pass.
//!
//! `apply_frame` samples every track at one timeline position and writes the
//! results into the host's property stores. It keeps no state between frames,
//! so calling it twice with the same time gives the same result.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::binding::PropertyStore;
use crate::config::Config;
use crate::data::Track;
use crate::sampling::evaluate_with;

/// What happened to each track during one pass (indices into the timeline).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameReport {
    /// Tracks that wrote a value.
    pub applied: Vec<usize>,
    /// Tracks whose target object or property does not exist.
    pub inert: Vec<usize>,
}

/// Sample all tracks at `time` and write them in timeline order. When two
/// tracks drive the same property the later one wins.
pub fn apply_frame(
    store: &mut dyn PropertyStore,
    timeline: &[Track],
    time: f64,
    cfg: &Config,
) -> FrameReport {
    let mut report = FrameReport::default();
    for (idx, track) in timeline.iter().enumerate() {
        if track.keys.is_empty() {
            continue;
        }
        let target = track.target();
        let Some(slot) = store.property_mut(&target, &track.prop) else {
            debug!(
                "inert track #{idx}: {:?} has no property '{}'",
                target, track.prop
            );
            report.inert.push(idx);
            continue;
        };
        if let Some(value) = evaluate_with(track, time, cfg.easing) {
            *slot = value;
            report.applied.push(idx);
        }
    }
    report
}

/// True when the track's target and property currently exist. Derived on
/// demand for display; never stored on the track.
pub fn track_is_valid(store: &dyn PropertyStore, track: &Track) -> bool {
    store.has_property(&track.target(), &track.prop)
}
