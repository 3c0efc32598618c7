//! Glyph outlines in font design units.
//!
//! An [`Outline`] is a `kurbo::BezPath` recorded straight from the font's
//! contour commands. Coordinates are Y-up (font convention); flipping into
//! canvas space happens once, in the normalizer's affine transform.

use kurbo::{BezPath, PathEl, Point};

/// Vector contours of one glyph, in font units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    path: BezPath,
}

impl Outline {
    /// An outline with no contours (whitespace and other blank glyphs).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_path(path: BezPath) -> Self {
        Self { path }
    }

    /// The underlying path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Path elements in drawing order.
    pub fn elements(&self) -> &[PathEl] {
        self.path.elements()
    }

    /// True when the outline draws nothing.
    ///
    /// A path made only of `MoveTo`/`ClosePath` has no segments and is
    /// treated as empty as well.
    pub fn is_empty(&self) -> bool {
        self.path.segments().next().is_none()
    }
}

/// Records `ttf-parser` outline callbacks into a [`BezPath`].
#[derive(Default)]
pub(crate) struct OutlineRecorder {
    path: BezPath,
}

impl OutlineRecorder {
    pub(crate) fn finish(self) -> Outline {
        Outline { path: self.path }
    }
}

fn pt(x: f32, y: f32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}

impl ttf_parser::OutlineBuilder for OutlineRecorder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(pt(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(pt(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path.quad_to(pt(x1, y1), pt(x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path.curve_to(pt(x1, y1), pt(x2, y2), pt(x, y));
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
