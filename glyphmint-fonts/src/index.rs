//! Ordered font coverage index with deterministic first-match selection.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::resource::{FaceKind, FontResource};
use crate::source::GlyphSource;

/// Glyph sources in fallback priority order.
///
/// Order mirrors the input path order and, within a collection, face
/// enumeration order. Selection is a linear scan: the first source that
/// covers a code point wins, with no scoring.
#[derive(Debug, Clone)]
pub struct CoverageIndex<S = FontResource> {
    sources: Vec<S>,
}

impl CoverageIndex<FontResource> {
    /// Load every face of every font file, in order.
    ///
    /// Unreadable files, unparseable faces and faces without a usable Unicode
    /// map are logged and skipped; loading itself never fails. An empty
    /// result is for the caller to treat as a configuration error.
    pub fn load(paths: &[PathBuf]) -> Self {
        let mut sources = Vec::new();

        for path in paths {
            let bytes: Arc<[u8]> = match fs::read(path) {
                Ok(bytes) => Arc::from(bytes.into_boxed_slice()),
                Err(e) => {
                    log::warn!("Skipping font {}: {e}", path.display());
                    continue;
                }
            };

            for kind in FaceKind::enumerate(&bytes) {
                match FontResource::from_bytes(path, Arc::clone(&bytes), kind) {
                    Ok(resource) => {
                        log::debug!(
                            "Loaded {} ({} code points, upem {})",
                            resource.label(),
                            resource.coverage().len(),
                            resource.units_per_em()
                        );
                        sources.push(resource);
                    }
                    Err(e) => log::warn!("Skipping face: {e}"),
                }
            }
        }

        log::info!(
            "Coverage index built: {} face(s) from {} path(s)",
            sources.len(),
            paths.len()
        );
        Self { sources }
    }
}

impl<S: GlyphSource> CoverageIndex<S> {
    /// Build an index from already-constructed sources, keeping their order.
    pub fn from_sources(sources: Vec<S>) -> Self {
        Self { sources }
    }

    /// First source (in priority order) covering `code_point`.
    pub fn select(&self, code_point: u32) -> Option<&S> {
        self.sources
            .iter()
            .find(|source| source.covers_code_point(code_point))
    }

    /// Priority position of the source [`Self::select`] would return.
    pub fn select_position(&self, code_point: u32) -> Option<usize> {
        self.sources
            .iter()
            .position(|source| source.covers_code_point(code_point))
    }

    pub fn covers(&self, code_point: u32) -> bool {
        self.select_position(code_point).is_some()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Sources in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.sources.iter()
    }
}
