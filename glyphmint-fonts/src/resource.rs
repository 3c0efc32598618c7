//! Font resources: one selectable face plus its Unicode coverage.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ttf_parser::{Face, GlyphId};

use crate::error::{FontError, GlyphError};
use crate::outline::{Outline, OutlineRecorder};
use crate::source::GlyphSource;

/// Which face of a font file a resource refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceKind {
    /// A plain `.ttf`/`.otf` file with exactly one face.
    Single,
    /// One face of a `.ttc`/`.otc` collection.
    Collection {
        /// Face index inside the collection.
        index: u32,
    },
}

impl FaceKind {
    /// Enumerate the faces present in `bytes`, in collection order.
    pub fn enumerate(bytes: &[u8]) -> Vec<FaceKind> {
        match ttf_parser::fonts_in_collection(bytes) {
            Some(count) => (0..count).map(|index| FaceKind::Collection { index }).collect(),
            None => vec![FaceKind::Single],
        }
    }

    /// Index to pass to the parser.
    pub const fn parser_index(self) -> u32 {
        match self {
            FaceKind::Single => 0,
            FaceKind::Collection { index } => index,
        }
    }

    /// Collection face index, `None` for single-face files.
    pub const fn collection_index(self) -> Option<u32> {
        match self {
            FaceKind::Single => None,
            FaceKind::Collection { index } => Some(index),
        }
    }
}

/// One face of a font file with its Unicode coverage set.
///
/// Immutable after load. The font bytes live in an `Arc<[u8]>` shared by
/// every face of the same file, and the `ttf_parser::Face` is re-created on
/// demand for each query (header validation only, no allocation), so no
/// opened-handle cache outlives a single call.
#[derive(Clone)]
pub struct FontResource {
    path: PathBuf,
    kind: FaceKind,
    units_per_em: u16,
    coverage: HashSet<u32>,
    bytes: Arc<[u8]>,
}

impl FontResource {
    /// Parse one face out of shared font bytes and index its coverage.
    ///
    /// # Errors
    ///
    /// - [`FontError::Parse`] if the face is not valid OpenType/TrueType.
    /// - [`FontError::NoUnicodeMap`] if it maps no Unicode code points.
    pub fn from_bytes(path: &Path, bytes: Arc<[u8]>, kind: FaceKind) -> Result<Self, FontError> {
        let (units_per_em, coverage) = {
            let face = Face::parse(&bytes, kind.parser_index()).map_err(|e| FontError::Parse {
                path: path.to_path_buf(),
                face: kind.collection_index(),
                reason: e.to_string(),
            })?;
            (face.units_per_em(), unicode_coverage(&face))
        };

        if coverage.is_empty() {
            return Err(FontError::NoUnicodeMap {
                path: path.to_path_buf(),
                face: kind.collection_index(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            units_per_em,
            coverage,
            bytes,
        })
    }

    /// Path of the font file this face came from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> FaceKind {
        self.kind
    }

    /// Font units per em (design coordinate space).
    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Code points mapped to a non-`.notdef` glyph.
    pub fn coverage(&self) -> &HashSet<u32> {
        &self.coverage
    }

    fn face(&self, code_point: u32) -> Result<Face<'_>, GlyphError> {
        Face::parse(&self.bytes, self.kind.parser_index()).map_err(|e| GlyphError::Extraction {
            code_point,
            resource: self.label(),
            reason: e.to_string(),
        })
    }
}

impl GlyphSource for FontResource {
    fn label(&self) -> String {
        match self.kind {
            FaceKind::Single => self.path.display().to_string(),
            FaceKind::Collection { index } => format!("{}#{index}", self.path.display()),
        }
    }

    fn covers_code_point(&self, code_point: u32) -> bool {
        self.coverage.contains(&code_point)
    }

    fn extract_outline(&self, code_point: u32) -> Result<Outline, GlyphError> {
        let face = self.face(code_point)?;
        let glyph_id =
            unicode_glyph(&face, code_point).ok_or_else(|| GlyphError::GlyphNotFound {
                code_point,
                resource: self.label(),
            })?;

        let mut recorder = OutlineRecorder::default();
        let drawn = face.outline_glyph(glyph_id, &mut recorder).is_some();
        let outline = recorder.finish();

        // ttf-parser reports both blank glyphs and malformed data as `None`;
        // only the latter leaves partial contours behind.
        if !drawn && !outline.elements().is_empty() {
            return Err(GlyphError::Extraction {
                code_point,
                resource: self.label(),
                reason: format!("malformed outline data for glyph {}", glyph_id.0),
            });
        }
        if !drawn {
            log::trace!("U+{code_point:04X} has an empty outline in {}", self.label());
        }
        Ok(outline)
    }
}

impl std::fmt::Debug for FontResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResource")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("units_per_em", &self.units_per_em)
            .field("coverage_len", &self.coverage.len())
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Union of the code points of every Unicode `cmap` subtable, excluding
/// entries that map to glyph 0.
fn unicode_coverage(face: &Face<'_>) -> HashSet<u32> {
    let mut coverage = HashSet::new();
    let Some(cmap) = face.tables().cmap else {
        return coverage;
    };
    for subtable in cmap.subtables {
        if !subtable.is_unicode() {
            continue;
        }
        subtable.codepoints(|cp| {
            if subtable.glyph_index(cp).is_some_and(|gid| gid.0 != 0) {
                coverage.insert(cp);
            }
        });
    }
    coverage
}

/// Resolve a code point through the same subtables [`unicode_coverage`] reads.
fn unicode_glyph(face: &Face<'_>, code_point: u32) -> Option<GlyphId> {
    let cmap = face.tables().cmap?;
    cmap.subtables
        .into_iter()
        .filter(|subtable| subtable.is_unicode())
        .find_map(|subtable| subtable.glyph_index(code_point).filter(|gid| gid.0 != 0))
}
