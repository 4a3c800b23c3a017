//! Track sampling.
//!
//! Model:
//! - Keys are stored in any order; sampling works on a stable time-sorted view,
//!   so keys sharing a time keep their declaration order.
//! - The active key is the last one at or before the query time. Before the
//!   first key the first key holds (no extrapolation); after the last key the
//!   last key holds.
//! - Between the active key and the next one, if the *next* key has
//!   `interpolate` set, the segment fraction is eased and the two values are
//!   blended (numbers, text). Everything else steps.

use std::cmp::Ordering;

use crate::config::Easing;
use crate::data::{Keyframe, Track};
use crate::interp::functions::blend_values;
use keyscene_api_core::Value;

/// Sort key with -0.0 folded into 0.0 and every NaN folded into one
/// positive NaN, so each group compares as a tie.
#[inline]
fn time_key(t: f64) -> f64 {
    if t.is_nan() {
        f64::NAN
    } else if t == 0.0 {
        0.0
    } else {
        t
    }
}

fn by_time(a: &&Keyframe, b: &&Keyframe) -> Ordering {
    time_key(a.time).total_cmp(&time_key(b.time))
}

/// Stable, time-ascending view of `keys`. NaN times, whatever their sign bit,
/// sort after every real time and keep their declaration order.
pub fn sorted_keys(keys: &[Keyframe]) -> Vec<&Keyframe> {
    let mut sorted: Vec<&Keyframe> = keys.iter().collect();
    sorted.sort_by(by_time);
    sorted
}

/// Index (into the sorted view) of the key active at `time`.
fn active_index(sorted: &[&Keyframe], time: f64) -> usize {
    let mut active = 0;
    for (i, key) in sorted.iter().enumerate() {
        if key.time <= time {
            active = i;
        } else {
            break;
        }
    }
    active
}

/// Sample `track` at `time` seconds with the default half-sine ease.
/// Returns `None` for a track without keys.
pub fn evaluate(track: &Track, time: f64) -> Option<Value> {
    evaluate_with(track, time, Easing::HalfSine)
}

/// Sample `track` at `time` seconds using `easing` on interpolated segments.
pub fn evaluate_with(track: &Track, time: f64, easing: Easing) -> Option<Value> {
    if track.keys.is_empty() {
        return None;
    }
    let sorted = sorted_keys(&track.keys);
    let idx = active_index(&sorted, time);
    let current = sorted[idx];

    if time > current.time {
        if let Some(next) = sorted
            .get(idx + 1)
            .filter(|k| k.interpolate && !k.time.is_nan())
        {
            let frac = (time - current.time) / (next.time - current.time);
            if let Some(v) = blend_values(&current.value, &next.value, easing.apply(frac)) {
                return Some(v);
            }
        }
    }
    Some(current.value.clone())
}
