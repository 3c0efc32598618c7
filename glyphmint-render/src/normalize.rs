//! Fit a glyph outline into a padded square canvas.
//!
//! The glyph's exact bounding box is scaled uniformly into the usable area
//! (`canvas - 2 * padding` on each axis), centred, and flipped from font
//! Y-up to canvas Y-down. All of it is folded into a single [`Affine`] so
//! every control point is transformed exactly once.

use glyphmint_fonts::Outline;
use kurbo::{Affine, Rect, Shape, Vec2};

/// Extent of an outline in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlyphBounds {
    /// The outline draws nothing.
    Empty,
    /// Tight bounds including curve extrema.
    Extent(Rect),
}

/// Exact bounding box of an outline.
///
/// Uses curve extrema rather than control points, so bulging quadratic and
/// cubic segments are fully contained.
pub fn bounds(outline: &Outline) -> GlyphBounds {
    if outline.is_empty() {
        return GlyphBounds::Empty;
    }
    GlyphBounds::Extent(outline.path().bounding_box())
}

/// Font-space to canvas-space mapping for one glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    /// Full transform: translate, uniform scale, Y flip, centre.
    pub affine: Affine,
    /// Uniform scale factor applied to both axes.
    pub scale: f64,
}

impl Normalization {
    /// Apply the transform to a font-space rectangle.
    pub fn transform_rect(&self, rect: Rect) -> Rect {
        self.affine.transform_rect_bbox(rect)
    }
}

/// Build the transform that fits `rect` into the padded canvas.
///
/// Width and height are clamped to at least one unit so hairline and
/// single-point glyphs still get a finite scale. The caller guarantees
/// `canvas > 2 * padding`.
pub fn normalize_transform(rect: Rect, canvas: f64, padding: f64) -> Normalization {
    let w = rect.width().max(1.0);
    let h = rect.height().max(1.0);
    let usable = canvas - 2.0 * padding;
    let scale = (usable / w).min(usable / h);

    let dx = (canvas - scale * w) / 2.0;
    let dy = (canvas - scale * h) / 2.0;

    let affine = Affine::translate(Vec2::new(dx, canvas - dy))
        * Affine::scale_non_uniform(scale, -scale)
        * Affine::translate(Vec2::new(-rect.x0, -rect.y0));

    Normalization { affine, scale }
}
