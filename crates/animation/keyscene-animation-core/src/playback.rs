//! Playhead: wrapping timeline position driven by the host's clock.

use serde::{Deserialize, Serialize};

fn fmod(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return 0.0;
    }
    let m = a % b;
    if (m < 0.0 && b > 0.0) || (m > 0.0 && b < 0.0) {
        m + b
    } else {
        m
    }
}

/// Wrap `time` into `[0, duration)`. Non-positive or non-finite durations
/// (and non-finite times) pin to 0.
pub fn wrap_time(time: f64, duration: f64) -> f64 {
    if duration.is_nan() || duration <= 0.0 || duration.is_infinite() || !time.is_finite() {
        return 0.0;
    }
    let t = fmod(time, duration);
    // fmod of a tiny negative can round up to exactly `duration`
    if t >= duration {
        0.0
    } else {
        t
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Playhead {
    /// Seconds into the timeline, always in `[0, duration)`.
    pub time: f64,
    pub playing: bool,
}

impl Playhead {
    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Move to `time`, wrapped into the timeline.
    pub fn seek(&mut self, time: f64, duration: f64) {
        self.time = wrap_time(time, duration);
    }

    /// Advance by `dt` seconds if playing. Returns the new time.
    pub fn advance(&mut self, dt: f64, duration: f64) -> f64 {
        if self.playing {
            self.time = wrap_time(self.time + dt, duration);
        }
        self.time
    }

    /// Position as a fraction of the timeline (scrub bar value).
    pub fn fraction(&self, duration: f64) -> f64 {
        if duration > 0.0 {
            self.time / duration
        } else {
            0.0
        }
    }
}
