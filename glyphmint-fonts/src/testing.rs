//! Test fixtures: in-memory glyph sources and a minimal TrueType writer.
//!
//! [`FixedSource`] drives selection, validation and rendering without any
//! font bytes. [`SyntheticFont`] produces real `glyf`-flavoured TrueType
//! files (and collections) that `ttf-parser` accepts, so the production
//! [`crate::FontResource`] path can be exercised end to end.

use std::collections::{BTreeMap, HashMap};

use kurbo::{BezPath, Rect, Shape};

use crate::error::GlyphError;
use crate::outline::Outline;
use crate::source::GlyphSource;

/// Edge length of the squares produced by [`FixedSource::square`].
pub const FIXTURE_UNITS: f64 = 1000.0;

#[derive(Debug, Clone)]
enum FixedGlyph {
    Outline(Outline),
    Fail(String),
    Panic,
}

/// An in-memory [`GlyphSource`] with a fixed code point table.
#[derive(Debug, Clone)]
pub struct FixedSource {
    label: String,
    glyphs: HashMap<u32, FixedGlyph>,
}

impl FixedSource {
    /// A source covering `code_points`, each drawn as a 1000-unit square.
    pub fn square(label: &str, code_points: &[u32]) -> Self {
        let outline = Outline::from_path(
            Rect::new(0.0, 0.0, FIXTURE_UNITS, FIXTURE_UNITS).to_path(0.1),
        );
        Self {
            label: label.to_string(),
            glyphs: code_points
                .iter()
                .map(|&cp| (cp, FixedGlyph::Outline(outline.clone())))
                .collect(),
        }
    }

    /// Cover `code_point` with an explicit outline.
    pub fn with_outline(mut self, code_point: u32, path: BezPath) -> Self {
        self.glyphs
            .insert(code_point, FixedGlyph::Outline(Outline::from_path(path)));
        self
    }

    /// Cover `code_point` with a glyph that draws nothing.
    pub fn with_blank(mut self, code_point: u32) -> Self {
        self.glyphs
            .insert(code_point, FixedGlyph::Outline(Outline::empty()));
        self
    }

    /// Cover `code_point` but fail outline extraction with `reason`.
    pub fn with_failure(mut self, code_point: u32, reason: &str) -> Self {
        self.glyphs
            .insert(code_point, FixedGlyph::Fail(reason.to_string()));
        self
    }

    /// Cover `code_point` but panic during extraction.
    pub fn with_panic(mut self, code_point: u32) -> Self {
        self.glyphs.insert(code_point, FixedGlyph::Panic);
        self
    }
}

impl GlyphSource for FixedSource {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn covers_code_point(&self, code_point: u32) -> bool {
        self.glyphs.contains_key(&code_point)
    }

    fn extract_outline(&self, code_point: u32) -> Result<Outline, GlyphError> {
        match self.glyphs.get(&code_point) {
            Some(FixedGlyph::Outline(outline)) => Ok(outline.clone()),
            Some(FixedGlyph::Fail(reason)) => Err(GlyphError::Extraction {
                code_point,
                resource: self.label.clone(),
                reason: reason.clone(),
            }),
            Some(FixedGlyph::Panic) => panic!("fixture panic for U+{code_point:04X}"),
            None => Err(GlyphError::GlyphNotFound {
                code_point,
                resource: self.label.clone(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Synthetic TrueType
// ---------------------------------------------------------------------------

/// One polygon of on-curve points in font units.
pub type Contour = Vec<(i16, i16)>;

/// Builder for a minimal TrueType face.
///
/// Emits `cmap` (format 12, Windows Unicode full repertoire), `glyf`,
/// `head`, `hhea`, `hmtx`, `loca` (long) and `maxp`. Glyph 0 is an empty
/// `.notdef`.
#[derive(Debug, Clone)]
pub struct SyntheticFont {
    units_per_em: u16,
    glyphs: Vec<Vec<Contour>>,
    cmap: BTreeMap<u32, u16>,
    include_cmap: bool,
}

impl SyntheticFont {
    pub fn new(units_per_em: u16) -> Self {
        Self {
            units_per_em,
            glyphs: vec![Vec::new()],
            cmap: BTreeMap::new(),
            include_cmap: true,
        }
    }

    /// Map `code_point` to a new glyph made of `contours`.
    pub fn with_contours(mut self, code_point: u32, contours: Vec<Contour>) -> Self {
        let gid = u16::try_from(self.glyphs.len()).unwrap_or(u16::MAX);
        self.glyphs.push(contours);
        self.cmap.insert(code_point, gid);
        self
    }

    /// Map `code_point` to an axis-aligned rectangle.
    pub fn with_rect(self, code_point: u32, x0: i16, y0: i16, x1: i16, y1: i16) -> Self {
        self.with_contours(code_point, vec![vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]])
    }

    /// Map `code_point` to a square filling the whole em.
    pub fn with_square(self, code_point: u32) -> Self {
        let em = i16::try_from(self.units_per_em).unwrap_or(i16::MAX);
        self.with_rect(code_point, 0, 0, em, em)
    }

    /// Map `code_point` to a glyph with no contours.
    pub fn with_blank(self, code_point: u32) -> Self {
        self.with_contours(code_point, Vec::new())
    }

    /// Leave out the `cmap` table entirely.
    pub fn without_cmap(mut self) -> Self {
        self.include_cmap = false;
        self
    }

    /// Serialize as a standalone `.ttf`.
    pub fn build(&self) -> Vec<u8> {
        write_sfnt(&self.tables(), 0)
    }

    fn tables(&self) -> Vec<([u8; 4], Vec<u8>)> {
        let (glyf, loca) = self.glyf_and_loca();
        let mut tables = Vec::new();
        if self.include_cmap {
            tables.push((*b"cmap", self.cmap_table()));
        }
        tables.push((*b"glyf", glyf));
        tables.push((*b"head", self.head_table()));
        tables.push((*b"hhea", self.hhea_table()));
        tables.push((*b"hmtx", self.hmtx_table()));
        tables.push((*b"loca", loca));
        tables.push((*b"maxp", self.maxp_table()));
        tables
    }

    fn num_glyphs(&self) -> u16 {
        u16::try_from(self.glyphs.len()).unwrap_or(u16::MAX)
    }

    fn head_table(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(54);
        put_u16(&mut data, 1); // majorVersion
        put_u16(&mut data, 0); // minorVersion
        put_u32(&mut data, 0x0001_0000); // fontRevision
        put_u32(&mut data, 0); // checksumAdjustment
        put_u32(&mut data, 0x5F0F_3CF5); // magicNumber
        put_u16(&mut data, 0); // flags
        put_u16(&mut data, self.units_per_em);
        data.extend_from_slice(&[0; 16]); // created, modified
        let em = i16::try_from(self.units_per_em).unwrap_or(i16::MAX);
        for v in [0, 0, em, em] {
            put_i16(&mut data, v); // xMin, yMin, xMax, yMax
        }
        put_u16(&mut data, 0); // macStyle
        put_u16(&mut data, 8); // lowestRecPPEM
        put_i16(&mut data, 2); // fontDirectionHint
        put_i16(&mut data, 1); // indexToLocFormat: long
        put_i16(&mut data, 0); // glyphDataFormat
        data
    }

    fn hhea_table(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(36);
        put_u32(&mut data, 0x0001_0000);
        let em = i16::try_from(self.units_per_em).unwrap_or(i16::MAX);
        put_i16(&mut data, em); // ascender
        put_i16(&mut data, 0); // descender
        put_i16(&mut data, 0); // lineGap
        put_u16(&mut data, self.units_per_em); // advanceWidthMax
        data.extend_from_slice(&[0; 22]); // side bearings .. metricDataFormat
        put_u16(&mut data, self.num_glyphs()); // numberOfHMetrics
        data
    }

    fn hmtx_table(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.glyphs.len() * 4);
        for _ in &self.glyphs {
            put_u16(&mut data, self.units_per_em);
            put_i16(&mut data, 0);
        }
        data
    }

    fn maxp_table(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(6);
        put_u32(&mut data, 0x0000_5000);
        put_u16(&mut data, self.num_glyphs());
        data
    }

    fn cmap_table(&self) -> Vec<u8> {
        let groups = u32::try_from(self.cmap.len()).unwrap_or(u32::MAX);
        let mut data = Vec::new();
        put_u16(&mut data, 0); // version
        put_u16(&mut data, 1); // numTables
        put_u16(&mut data, 3); // platformID: Windows
        put_u16(&mut data, 10); // encodingID: Unicode full repertoire
        put_u32(&mut data, 12); // subtable offset
        put_u16(&mut data, 12); // format
        put_u16(&mut data, 0); // reserved
        put_u32(&mut data, 16 + 12 * groups); // length
        put_u32(&mut data, 0); // language
        put_u32(&mut data, groups);
        for (&cp, &gid) in &self.cmap {
            put_u32(&mut data, cp);
            put_u32(&mut data, cp);
            put_u32(&mut data, u32::from(gid));
        }
        data
    }

    fn glyf_and_loca(&self) -> (Vec<u8>, Vec<u8>) {
        let mut glyf = Vec::new();
        let mut loca = Vec::new();
        for contours in &self.glyphs {
            put_u32(&mut loca, u32::try_from(glyf.len()).unwrap_or(u32::MAX));
            if !contours.is_empty() {
                write_simple_glyph(&mut glyf, contours);
            }
        }
        put_u32(&mut loca, u32::try_from(glyf.len()).unwrap_or(u32::MAX));
        (glyf, loca)
    }
}

/// Serialize several faces into one `.ttc` collection, in order.
pub fn build_collection(faces: &[SyntheticFont]) -> Vec<u8> {
    let header_len = 12 + 4 * faces.len();
    let face_tables: Vec<_> = faces.iter().map(SyntheticFont::tables).collect();

    let mut offsets = Vec::with_capacity(faces.len());
    let mut cursor = header_len;
    for tables in &face_tables {
        offsets.push(cursor);
        cursor += sfnt_len(tables);
    }

    let mut data = Vec::with_capacity(cursor);
    data.extend_from_slice(b"ttcf");
    put_u16(&mut data, 1);
    put_u16(&mut data, 0);
    put_u32(&mut data, u32::try_from(faces.len()).unwrap_or(u32::MAX));
    for &offset in &offsets {
        put_u32(&mut data, u32::try_from(offset).unwrap_or(u32::MAX));
    }
    for (tables, &offset) in face_tables.iter().zip(&offsets) {
        data.extend_from_slice(&write_sfnt(tables, offset));
    }
    data
}

fn write_simple_glyph(out: &mut Vec<u8>, contours: &[Contour]) {
    let points: Vec<(i16, i16)> = contours.iter().flatten().copied().collect();
    let (mut x_min, mut y_min, mut x_max, mut y_max) = (i16::MAX, i16::MAX, i16::MIN, i16::MIN);
    for &(x, y) in &points {
        x_min = x_min.min(x);
        y_min = y_min.min(y);
        x_max = x_max.max(x);
        y_max = y_max.max(y);
    }

    put_i16(out, i16::try_from(contours.len()).unwrap_or(i16::MAX));
    for v in [x_min, y_min, x_max, y_max] {
        put_i16(out, v);
    }
    let mut end = 0usize;
    for contour in contours {
        end += contour.len();
        put_u16(out, u16::try_from(end.saturating_sub(1)).unwrap_or(u16::MAX));
    }
    put_u16(out, 0); // instructionLength

    // Every point on-curve, coordinates as full i16 deltas.
    out.extend(std::iter::repeat_n(0x01u8, points.len()));
    let mut prev = 0i16;
    for &(x, _) in &points {
        put_i16(out, x.wrapping_sub(prev));
        prev = x;
    }
    prev = 0;
    for &(_, y) in &points {
        put_i16(out, y.wrapping_sub(prev));
        prev = y;
    }
    if out.len() % 2 != 0 {
        out.push(0);
    }
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

fn sfnt_len(tables: &[([u8; 4], Vec<u8>)]) -> usize {
    12 + 16 * tables.len() + tables.iter().map(|(_, t)| padded(t.len())).sum::<usize>()
}

/// Write an offset table, directory and table data. Table offsets are
/// relative to the start of the enclosing file, hence `base`.
fn write_sfnt(tables: &[([u8; 4], Vec<u8>)], base: usize) -> Vec<u8> {
    let num_tables = u16::try_from(tables.len()).unwrap_or(u16::MAX);
    let entry_selector = if num_tables > 0 { num_tables.ilog2() as u16 } else { 0 };
    let search_range = (1u16 << entry_selector) * 16;
    let range_shift = (num_tables * 16).saturating_sub(search_range);

    let mut out = Vec::with_capacity(sfnt_len(tables));
    put_u32(&mut out, 0x0001_0000);
    put_u16(&mut out, num_tables);
    put_u16(&mut out, search_range);
    put_u16(&mut out, entry_selector);
    put_u16(&mut out, range_shift);

    // Directory entries must be sorted by tag; callers push them in order.
    let mut offset = base + 12 + 16 * tables.len();
    for (tag, table) in tables {
        out.extend_from_slice(tag);
        put_u32(&mut out, checksum(table));
        put_u32(&mut out, u32::try_from(offset).unwrap_or(u32::MAX));
        put_u32(&mut out, u32::try_from(table.len()).unwrap_or(u32::MAX));
        offset += padded(table.len());
    }
    for (_, table) in tables {
        out.extend_from_slice(table);
        out.resize(padded(out.len()), 0);
    }
    out
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn put_i16(out: &mut Vec<u8>, v: i16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}
