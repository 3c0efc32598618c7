//! Glyph normalization, SVG output and the concurrent render engine for
//! glyphmint.
//!
//! This crate turns glyph outlines into SVG artifacts:
//!
//! - [`normalize`]: fit an outline's exact bounds into a padded canvas
//! - [`serialize`]: deterministic SVG path data
//! - [`document`]: complete SVG documents, including the empty-glyph
//!   placeholder
//! - [`output`]: artifact naming and atomic writes
//! - [`engine`]: sharded, multi-threaded batch rendering

pub mod document;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod output;
pub mod serialize;

// Re-export main types for convenience
pub use document::{RenderParams, render_glyph, render_outline, render_svg};
pub use engine::{
    IndexProvider, RenderEngine, RenderProgress, RenderRequest, RenderResult, RenderSummary,
    ShardOutcome, partition,
};
pub use error::RenderError;
pub use normalize::{GlyphBounds, Normalization, bounds, normalize_transform};
pub use output::{artifact_file_name, write_atomic, write_missing_report};
pub use serialize::serialize;
