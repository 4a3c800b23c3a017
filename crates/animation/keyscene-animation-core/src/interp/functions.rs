//! Interpolation helpers:
//! - ease_half_sine (S-curve remap of the segment fraction)
//! - lerp_f64 (numbers)
//! - splice_text (text "resolve" transition)
//! - blend_values (kind dispatch; unknown pairs hold the left value)

use std::f64::consts::PI;

use keyscene_api_core::Value;

/// Escape marker dropped from the end of spliced text so a two-character
/// escape sequence is never cut in half.
pub const ESCAPE_MARKER: char = '\\';

/// Half-sine ease: `(sin((t - 0.5) * PI) + 1) / 2`.
#[inline]
pub fn ease_half_sine(t: f64) -> f64 {
    (((t - 0.5) * PI).sin() + 1.0) / 2.0
}

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Float to integer the way string offsets are truncated: toward zero, NaN as 0.
#[inline]
fn to_offset(x: f64) -> i64 {
    if x.is_nan() {
        0
    } else {
        x.trunc() as i64
    }
}

/// Substring by (start, count) in characters with lenient bounds: a negative
/// start counts from the end, a negative count is empty, and both clamp to
/// the string.
fn sub_chars(s: &str, len: i64, start: f64, count: f64) -> impl Iterator<Item = char> + '_ {
    let mut start = to_offset(start);
    if start < 0 {
        start = (len + start).max(0);
    }
    let start = start.min(len);
    let count = to_offset(count).clamp(0, len - start);
    s.chars().skip(start as usize).take(count as usize)
}

/// Text transition between `from` and `to` at blend fraction `t`.
///
/// The result length moves linearly from `from`'s length to `to`'s. Its head
/// is the first `len(to) * t` characters of `to`, the rest is filled from
/// `from` starting at the same offset. A trailing [`ESCAPE_MARKER`] is dropped.
pub fn splice_text(from: &str, to: &str, t: f64) -> String {
    let from_len = from.chars().count() as i64;
    let to_len = to.chars().count() as i64;

    let total = lerp_f64(from_len as f64, to_len as f64, t);
    let head = to_len as f64 * t;

    let mut out: String = sub_chars(to, to_len, 0.0, head).collect();
    out.extend(sub_chars(from, from_len, head, total - head));
    if out.ends_with(ESCAPE_MARKER) {
        out.pop();
    }
    out
}

/// Blend two key values at an already-eased fraction. Returns `None` when the
/// pair has no interpolation rule; callers then hold the left value.
pub fn blend_values(left: &Value, right: &Value, t: f64) -> Option<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Some(Value::Number(lerp_f64(*a, *b, t))),
        (Value::Text(a), Value::Text(b)) => Some(Value::Text(splice_text(a, b, t))),
        _ => None,
    }
}
