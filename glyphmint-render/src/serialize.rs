//! Outline to SVG path data (`d` attribute).

use std::fmt::Write;

use glyphmint_fonts::Outline;
use kurbo::{Affine, PathEl, Point};

/// Serialize `outline` into SVG path data, transforming every point by
/// `affine` exactly once.
///
/// Emits absolute `M`, `L`, `Q`, `C` and `Z` commands. Coordinates are
/// rounded to `precision` decimals with trailing zeros stripped, so the
/// same outline always yields the same string.
pub fn serialize(outline: &Outline, affine: Affine, precision: usize) -> String {
    let mut d = String::with_capacity(outline.elements().len() * 24);
    for el in outline.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                d.push('M');
                write_point(&mut d, affine * p, precision);
            }
            PathEl::LineTo(p) => {
                d.push('L');
                write_point(&mut d, affine * p, precision);
            }
            PathEl::QuadTo(c, p) => {
                d.push('Q');
                write_point(&mut d, affine * c, precision);
                d.push(' ');
                write_point(&mut d, affine * p, precision);
            }
            PathEl::CurveTo(c1, c2, p) => {
                d.push('C');
                write_point(&mut d, affine * c1, precision);
                d.push(' ');
                write_point(&mut d, affine * c2, precision);
                d.push(' ');
                write_point(&mut d, affine * p, precision);
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

fn write_point(d: &mut String, p: Point, precision: usize) {
    let _ = write!(
        d,
        "{},{}",
        fmt_scalar(p.x, precision),
        fmt_scalar(p.y, precision)
    );
}

/// Format a scalar to the given precision, stripping trailing zeros.
///
/// Negative zero (including values that round to zero) prints as `0`.
pub fn fmt_scalar(v: f64, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    let trimmed = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}
