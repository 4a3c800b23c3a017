//! Text content helpers for the `Text` visual.

use std::borrow::Cow;

use log::debug;

/// Expand JSON string escapes (`\n`, `é`, ...). Text that is not a
/// valid JSON string body is returned unchanged.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('\\') {
        return Cow::Borrowed(s);
    }
    match serde_json::from_str::<String>(&format!("\"{s}\"")) {
        Ok(out) => Cow::Owned(out),
        Err(err) => {
            debug!("text {s:?} left raw: {err}");
            Cow::Borrowed(s)
        }
    }
}

/// First `length` characters of `s` (truncated toward zero). Negative or
/// NaN lengths mean no limit.
pub fn clamp(s: &str, length: f64) -> &str {
    if length.is_nan() || length < 0.0 {
        return s;
    }
    let n = length.trunc();
    if n >= s.len() as f64 {
        return s;
    }
    match s.char_indices().nth(n as usize) {
        Some((at, _)) => &s[..at],
        None => s,
    }
}
