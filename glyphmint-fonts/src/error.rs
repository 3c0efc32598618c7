//! Typed error types for glyphmint-fonts.
//!
//! Three failure families are kept apart because they propagate differently:
//! - [`FontError`]: a resource failed to load. Logged, resource skipped.
//! - [`GlyphError`]: one code point failed to render. Counted and sampled,
//!   never fatal for a batch.
//! - [`CoverageGapError`]: requested code points have no covering font.
//!   Fatal before any artifact is written unless missing entries are allowed.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A font resource (file or collection face) could not be loaded.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be read from disk.
    #[error("cannot read font '{}': {source}", path.display())]
    Io {
        /// Path to the font file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a valid OpenType/TrueType face.
    #[error("cannot parse font '{}'{}: {reason}", path.display(), face_suffix(*face))]
    Parse {
        /// Path to the font file.
        path: PathBuf,
        /// Face index inside a collection, if any.
        face: Option<u32>,
        /// Parser message.
        reason: String,
    },

    /// The face has no Unicode character map, or the map is empty.
    #[error("font '{}'{} has no usable Unicode character map", path.display(), face_suffix(*face))]
    NoUnicodeMap {
        /// Path to the font file.
        path: PathBuf,
        /// Face index inside a collection, if any.
        face: Option<u32>,
    },
}

fn face_suffix(face: Option<u32>) -> String {
    face.map(|i| format!(" [face {i}]")).unwrap_or_default()
}

/// Rendering a single code point failed.
#[derive(Debug, Error)]
pub enum GlyphError {
    /// No resource in the index covers the code point.
    #[error("no font covers U+{code_point:04X}")]
    NotCovered {
        /// The requested code point.
        code_point: u32,
    },

    /// The selected face does not map the code point to a glyph.
    #[error("glyph not found for U+{code_point:04X} in {resource}")]
    GlyphNotFound {
        /// The requested code point.
        code_point: u32,
        /// Identifier of the selected resource.
        resource: String,
    },

    /// The outline could not be extracted from the selected face.
    #[error("outline extraction failed for U+{code_point:04X} in {resource}: {reason}")]
    Extraction {
        /// The requested code point.
        code_point: u32,
        /// Identifier of the selected resource.
        resource: String,
        /// What went wrong.
        reason: String,
    },

    /// Render parameters are unusable (e.g. padding swallows the canvas).
    #[error("invalid render parameters: {0}")]
    InvalidParams(String),

    /// The artifact could not be written or moved into place.
    #[error("cannot write '{}': {source}", path.display())]
    Write {
        /// Destination (or temporary) path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Requested code points that no loaded font covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageGapError {
    /// Total number of uncovered code points.
    pub missing_count: usize,
    /// The first uncovered code points, capped for display.
    pub preview: Vec<u32>,
}

impl fmt::Display for CoverageGapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} code point(s) not covered by any font", self.missing_count)?;
        if !self.preview.is_empty() {
            let listed: Vec<String> = self.preview.iter().map(|cp| format!("U+{cp:04X}")).collect();
            write!(f, ", e.g.: {}", listed.join(", "))?;
            if self.preview.len() < self.missing_count {
                write!(f, ", ...")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for CoverageGapError {}
