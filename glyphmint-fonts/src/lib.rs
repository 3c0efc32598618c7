//! Font handling for the glyphmint glyph renderer.
//!
//! This crate provides everything between font files on disk and glyph
//! outlines in font units:
//!
//! - [`CoverageIndex`]: ordered font faces with first-match selection
//! - [`validate`]: pre-flight partition of requested code points into
//!   covered and missing
//! - [`GlyphSource`]: the coverage/outline capability, implemented by
//!   [`FontResource`] on top of `ttf-parser`
//! - Font path discovery (directory listing and wildcard patterns)

pub mod coverage;
pub mod error;
pub mod index;
pub mod outline;
pub mod paths;
pub mod resource;
pub mod source;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use coverage::{Coverage, MISSING_PREVIEW_LIMIT, validate};
pub use error::{CoverageGapError, FontError, GlyphError};
pub use index::CoverageIndex;
pub use outline::Outline;
pub use paths::{collect_font_paths, expand_font_paths, list_font_dir};
pub use resource::{FaceKind, FontResource};
pub use source::GlyphSource;
