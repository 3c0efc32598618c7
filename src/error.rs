//! Application-level errors and their process exit codes.

use std::path::PathBuf;

use glyphmint_config::ConfigError;
use glyphmint_fonts::{CoverageGapError, GlyphError};
use glyphmint_render::RenderError;
use thiserror::Error;

/// Exit code for configuration problems (no usable font, bad config).
pub const EXIT_CONFIGURATION: i32 = 2;
/// Exit code when requested code points are not covered.
pub const EXIT_COVERAGE_GAP: i32 = 3;
/// Exit code when at least one glyph failed to render.
pub const EXIT_RENDER_FAILURES: i32 = 4;
/// Exit code for I/O problems outside per-glyph writes.
pub const EXIT_IO: i32 = 1;

/// Run-level failure of the glyphmint binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// No usable font, invalid configuration or render parameters.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Requested code points have no covering font.
    #[error(transparent)]
    CoverageGap(#[from] CoverageGapError),

    /// A file outside the per-glyph artifacts could not be read or written.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A single requested glyph could not be rendered.
    #[error(transparent)]
    Glyph(GlyphError),

    /// The run finished but some glyphs failed.
    #[error("{failed} of {requested} glyph(s) failed to render")]
    RenderFailures {
        /// Failed code points.
        failed: usize,
        /// Code points handed to the engine.
        requested: usize,
    },
}

impl AppError {
    /// Process exit code for this error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            AppError::Configuration(_) => EXIT_CONFIGURATION,
            AppError::CoverageGap(_) => EXIT_COVERAGE_GAP,
            AppError::Io { .. } => EXIT_IO,
            AppError::Glyph(_) | AppError::RenderFailures { .. } => EXIT_RENDER_FAILURES,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Configuration(e.to_string())
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Params(inner) => AppError::Configuration(inner.to_string()),
            RenderError::OutputDir { path, source } => AppError::Io { path, source },
        }
    }
}

/// Single-glyph failures outside the engine (the `glyph` command and the
/// missing report).
impl From<GlyphError> for AppError {
    fn from(e: GlyphError) -> Self {
        match e {
            GlyphError::NotCovered { code_point } => AppError::CoverageGap(CoverageGapError {
                missing_count: 1,
                preview: vec![code_point],
            }),
            GlyphError::Write { path, source } => AppError::Io { path, source },
            GlyphError::InvalidParams(reason) => AppError::Configuration(reason),
            e @ (GlyphError::GlyphNotFound { .. } | GlyphError::Extraction { .. }) => {
                AppError::Glyph(e)
            }
        }
    }
}
