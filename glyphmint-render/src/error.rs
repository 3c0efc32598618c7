//! Typed error types for glyphmint-render.
//!
//! Per-glyph failures stay [`GlyphError`]s and are folded into the run
//! summary. [`RenderError`] is reserved for problems that stop a run before
//! any shard starts.

use std::path::PathBuf;

use glyphmint_fonts::GlyphError;
use thiserror::Error;

/// A render run could not start.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Canvas, padding, fill or precision are unusable.
    #[error(transparent)]
    Params(#[from] GlyphError),

    /// The output directory could not be created.
    #[error("cannot create output directory '{}': {source}", path.display())]
    OutputDir {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
