//! # Style Transform Parser
//!
//! Turns host-reported `transform` / `transform-origin` strings into matrices
//! and origin points.
//!
//! Only pre-resolved matrix encodings are understood (`matrix(...)` and
//! `matrix3d(...)`, which is what computed style reports). Anything else
//! degrades to the identity matrix so one odd ancestor cannot abort a whole
//! chain walk.

use crate::errors::GeometryError;
use crate::matrix::AffineMatrix;
use crate::types::Point2D;
use tracing::debug;

/// Origin used when the host reports none: the middle of the box.
pub const DEFAULT_TRANSFORM_ORIGIN: &str = "50% 50%";

/// Parses a transform, falling back to identity when it is not understood.
pub fn parse_transform(spec: Option<&str>) -> AffineMatrix {
    match try_parse_transform(spec) {
        Ok(matrix) => matrix,
        Err(err) => {
            debug!(%err, "falling back to identity transform");
            AffineMatrix::IDENTITY
        }
    }
}

/// Strict variant of [`parse_transform`].
///
/// Absent, empty and `none` values are the identity; any other value must be
/// a 6-value `matrix()` or a 16-value `matrix3d()`.
pub fn try_parse_transform(spec: Option<&str>) -> Result<AffineMatrix, GeometryError> {
    let spec = match spec.map(str::trim) {
        None => return Ok(AffineMatrix::IDENTITY),
        Some(s) if s.is_empty() || s.eq_ignore_ascii_case("none") => {
            return Ok(AffineMatrix::IDENTITY)
        }
        Some(s) => s,
    };
    let unparsable = || GeometryError::UnparsableTransform(spec.to_string());

    if let Some(args) = function_args(spec, "matrix3d") {
        let v = parse_numbers::<16>(args).ok_or_else(unparsable)?;
        // Column-major 4x4; keep the x/y rows and columns plus translation.
        return Ok(AffineMatrix::from_row_major([
            v[0], v[4], v[12], //
            v[1], v[5], v[13], //
            0.0, 0.0, 1.0,
        ]));
    }
    if let Some(args) = function_args(spec, "matrix") {
        let [a, b, c, d, e, f] = parse_numbers::<6>(args).ok_or_else(unparsable)?;
        return Ok(AffineMatrix::from_css(a, b, c, d, e, f));
    }
    Err(unparsable())
}

/// Returns the text between `name(` and the matching `)`.
fn function_args<'a>(spec: &'a str, name: &str) -> Option<&'a str> {
    let start = spec.find(&format!("{name}("))? + name.len() + 1;
    let len = spec[start..].find(')')?;
    Some(&spec[start..start + len])
}

fn parse_numbers<const N: usize>(args: &str) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    let mut count = 0;
    for token in args.split(',') {
        if count == N {
            return None;
        }
        out[count] = token.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
        count += 1;
    }
    (count == N).then_some(out)
}

/// Resolves a `transform-origin` against the box size.
///
/// `None` resolves [`DEFAULT_TRANSFORM_ORIGIN`]. A missing vertical component
/// is centered; a third (z) component is ignored.
pub fn parse_origin(spec: Option<&str>, width: f64, height: f64) -> Point2D {
    let spec = spec
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_TRANSFORM_ORIGIN);
    let mut parts = spec.split_whitespace();
    let x = parts.next().unwrap_or("50%");
    let y = parts.next().unwrap_or("50%");

    // `top left` style ordering: vertical keyword first.
    let (x, y) = if is_vertical_keyword(x) || is_horizontal_keyword(y) {
        (y, x)
    } else {
        (x, y)
    };
    Point2D::new(parse_length(x, width), parse_length(y, height))
}

fn is_vertical_keyword(token: &str) -> bool {
    matches!(token, "top" | "bottom")
}

fn is_horizontal_keyword(token: &str) -> bool {
    matches!(token, "left" | "right")
}

/// Resolves a single length token.
///
/// Percentages resolve against `reference`, `px` is taken as-is, and any other
/// unit contributes only its leading number (no unit conversion). Tokens
/// without a numeric prefix resolve to 0.
pub fn parse_length(token: &str, reference: f64) -> f64 {
    let token = token.trim();
    match token {
        "left" | "top" => return 0.0,
        "center" => return reference * 0.5,
        "right" | "bottom" => return reference,
        _ => {}
    }
    if let Some(pct) = token.strip_suffix('%') {
        return leading_number(pct) / 100.0 * reference;
    }
    if let Some(px) = token.strip_suffix("px") {
        return leading_number(px);
    }
    leading_number(token)
}

/// The longest prefix of `s` that parses as a float, or 0.
pub(crate) fn leading_number(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == digits_start || &s[digits_start..end] == "." {
        return 0.0;
    }
    // Optional exponent, only if digits follow it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

/// `Translate(origin) · transform · Translate(-origin)`.
pub fn apply_origin(transform: &AffineMatrix, origin: Point2D) -> AffineMatrix {
    if transform.is_identity() {
        return *transform;
    }
    let origin = origin.to_euclidean();
    AffineMatrix::translate(origin.x, origin.y)
        * *transform
        * AffineMatrix::translate(-origin.x, -origin.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("12.5em"), 12.5);
        assert_eq!(leading_number("-3rem"), -3.0);
        assert_eq!(leading_number("1e2px"), 100.0);
        assert_eq!(leading_number("4em"), 4.0);
        assert_eq!(leading_number(".5"), 0.5);
        assert_eq!(leading_number("auto"), 0.0);
        assert_eq!(leading_number("."), 0.0);
    }

    #[test]
    fn test_function_args() {
        assert_eq!(function_args("matrix(1, 2)", "matrix"), Some("1, 2"));
        assert_eq!(function_args("matrix3d(1, 2)", "matrix"), None);
        assert_eq!(function_args("matrix(1, 2", "matrix"), None);
    }
}
