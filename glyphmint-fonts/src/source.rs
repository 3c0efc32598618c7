//! The glyph-source capability consulted by selection and rendering.

use crate::error::GlyphError;
use crate::outline::Outline;

/// A selectable font face: answers coverage queries and yields outlines.
///
/// [`crate::FontResource`] is the production implementation. Anything else
/// implementing this trait (for instance in-memory fixtures) can be placed in
/// a [`crate::CoverageIndex`] and driven through the same selection,
/// validation and render paths.
///
/// Implementations must be immutable after construction so that a source can
/// be shared read-only across worker threads.
pub trait GlyphSource: Send + Sync {
    /// Human-readable identifier (`path` or `path#face`).
    fn label(&self) -> String;

    /// Whether this source maps `code_point` to a real glyph.
    fn covers_code_point(&self, code_point: u32) -> bool;

    /// Extract the outline for `code_point` in font units.
    ///
    /// Returns [`Outline::empty`] for glyphs that exist but draw nothing.
    fn extract_outline(&self, code_point: u32) -> Result<Outline, GlyphError>;
}
