//! Reference strings.
//!
//! ```text
//! reference := literal | anchor
//! literal   := "[" "%"? number "," number ( "[" offset )?
//! anchor    := name ( "[" offset )?
//! offset    := body of a literal (the leading "[" is implied)
//! ```
//!
//! `%` scales the pair by the canvas size. Numbers are read by their longest
//! numeric prefix; anything unreadable becomes NaN and poisons the result.

use keyscene_api_core::Vec2;

const LITERAL_MARKER: char = '[';
const FRACTION_MARKER: char = '%';

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reference<'s> {
    Literal {
        point: Vec2,
        /// Scale `point` by the canvas size.
        fraction: bool,
        offset: Option<&'s str>,
    },
    Anchor {
        name: &'s str,
        offset: Option<&'s str>,
    },
}

impl<'s> Reference<'s> {
    pub fn parse(s: &'s str) -> Self {
        match s.strip_prefix(LITERAL_MARKER) {
            Some(body) => Self::literal(body),
            None => {
                let (name, offset) = split_offset(s);
                Reference::Anchor { name, offset }
            }
        }
    }

    /// Parse `body` as if it were prefixed with `[`.
    pub fn literal(body: &'s str) -> Self {
        let (fraction, body) = match body.strip_prefix(FRACTION_MARKER) {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (coords, offset) = split_offset(body);
        let (x, y) = match coords.split_once(',') {
            Some((x, y)) => (parse_float(x), parse_float(y)),
            None => (parse_float(coords), f64::NAN),
        };
        Reference::Literal {
            point: Vec2::new(x, y),
            fraction,
            offset,
        }
    }

    pub fn offset(&self) -> Option<&'s str> {
        match self {
            Reference::Literal { offset, .. } | Reference::Anchor { offset, .. } => *offset,
        }
    }
}

fn split_offset(s: &str) -> (&str, Option<&str>) {
    match s.split_once(LITERAL_MARKER) {
        Some((head, "")) => (head, None),
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}

/// The anchor a reference points at, if it names one.
pub fn anchor_name(reference: &str) -> Option<&str> {
    match Reference::parse(reference) {
        Reference::Anchor { name, .. } if !name.is_empty() => Some(name),
        _ => None,
    }
}

/// Longest leading decimal number in `s` (after whitespace), or NaN.
/// Accepts an optional sign, digits with one optional point, an optional
/// exponent and the word `Infinity`.
pub fn parse_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    if s[i..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;
    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j.min(bytes.len())..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    s[..i].parse().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_forms() {
        assert_eq!(
            Reference::parse("[50,60"),
            Reference::Literal {
                point: Vec2::new(50.0, 60.0),
                fraction: false,
                offset: None
            }
        );
        assert_eq!(
            Reference::parse("[%0.5,0.25[3,4"),
            Reference::Literal {
                point: Vec2::new(0.5, 0.25),
                fraction: true,
                offset: Some("3,4")
            }
        );
        let Reference::Literal { point, .. } = Reference::parse("[7") else {
            panic!("expected literal");
        };
        assert_eq!(point.x, 7.0);
        assert!(point.y.is_nan());
    }

    #[test]
    fn anchor_forms() {
        assert_eq!(
            Reference::parse("center[10,0"),
            Reference::Anchor {
                name: "center",
                offset: Some("10,0")
            }
        );
        assert_eq!(
            Reference::parse("center["),
            Reference::Anchor {
                name: "center",
                offset: None
            }
        );
        assert_eq!(anchor_name("a[1,1"), Some("a"));
        assert_eq!(anchor_name("[1,1"), None);
        assert_eq!(anchor_name(""), None);
    }

    #[test]
    fn parse_float_reads_numeric_prefix() {
        assert_eq!(parse_float(" 12.5px"), 12.5);
        assert_eq!(parse_float("-3"), -3.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1e3x"), 1000.0);
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float("").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("inf").is_nan());
    }
}
