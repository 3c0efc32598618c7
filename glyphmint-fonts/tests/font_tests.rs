//! Integration tests for glyphmint-fonts crate.

use std::fs;
use std::path::PathBuf;

use glyphmint_fonts::testing::{SyntheticFont, build_collection};
use glyphmint_fonts::{
    CoverageIndex, FaceKind, FontError, FontResource, GlyphError, GlyphSource, validate,
};
use tempfile::TempDir;

fn write_font(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn test_first_match_across_files() {
    let tmp = TempDir::new().unwrap();
    let a = write_font(&tmp, "a.ttf", &SyntheticFont::new(1000).with_square(0x4E00).build());
    let b = write_font(
        &tmp,
        "b.ttf",
        &SyntheticFont::new(1000)
            .with_square(0x4E00)
            .with_square(0x4E01)
            .build(),
    );

    let index = CoverageIndex::load(&[a.clone(), b.clone()]);
    assert_eq!(index.len(), 2);
    assert_eq!(index.select(0x4E00).unwrap().path(), a.as_path());
    assert_eq!(index.select(0x4E01).unwrap().path(), b.as_path());
    assert!(index.select(0x4E02).is_none());
}

#[test]
fn test_input_order_is_priority_order() {
    let tmp = TempDir::new().unwrap();
    let a = write_font(&tmp, "a.ttf", &SyntheticFont::new(1000).with_square(0x4E00).build());
    let b = write_font(&tmp, "b.ttf", &SyntheticFont::new(2048).with_square(0x4E00).build());

    let index = CoverageIndex::load(&[b.clone(), a]);
    let selected = index.select(0x4E00).unwrap();
    assert_eq!(selected.path(), b.as_path());
    assert_eq!(selected.units_per_em(), 2048);
}

#[test]
fn test_collection_faces_in_order() {
    let tmp = TempDir::new().unwrap();
    let ttc = write_font(
        &tmp,
        "pair.ttc",
        &build_collection(&[
            SyntheticFont::new(1000).with_square(0x4E00),
            SyntheticFont::new(1000).with_square(0x4E00).with_square(0x4E01),
        ]),
    );

    let index = CoverageIndex::load(&[ttc]);
    let kinds: Vec<FaceKind> = index.iter().map(FontResource::kind).collect();
    assert_eq!(
        kinds,
        vec![
            FaceKind::Collection { index: 0 },
            FaceKind::Collection { index: 1 }
        ]
    );
    assert_eq!(index.select_position(0x4E00), Some(0));
    assert_eq!(index.select_position(0x4E01), Some(1));
    assert!(index.select(0x4E01).unwrap().label().ends_with("pair.ttc#1"));
}

#[test]
fn test_unreadable_and_invalid_resources_are_skipped() {
    let tmp = TempDir::new().unwrap();
    let garbage = write_font(&tmp, "garbage.ttf", &[0u8; 100]);
    let no_cmap = write_font(
        &tmp,
        "nocmap.ttf",
        &SyntheticFont::new(1000).with_square(0x4E00).without_cmap().build(),
    );
    let good = write_font(&tmp, "good.ttf", &SyntheticFont::new(1000).with_square(0x4E01).build());
    let missing = tmp.path().join("missing.ttf");

    let index = CoverageIndex::load(&[garbage, missing, no_cmap, good.clone()]);
    assert_eq!(index.len(), 1);
    assert_eq!(index.iter().next().unwrap().path(), good.as_path());
}

#[test]
fn test_no_unicode_map_is_reported() {
    let bytes = SyntheticFont::new(1000).with_square(0x4E00).without_cmap().build();
    let err = FontResource::from_bytes(
        std::path::Path::new("nocmap.ttf"),
        bytes.into(),
        FaceKind::Single,
    )
    .unwrap_err();
    assert!(matches!(err, FontError::NoUnicodeMap { face: None, .. }));
}

#[test]
fn test_outline_extraction() {
    let bytes = SyntheticFont::new(1000)
        .with_rect(0x4E00, 100, -50, 900, 850)
        .with_blank(0x3000)
        .build();
    let resource =
        FontResource::from_bytes(std::path::Path::new("f.ttf"), bytes.into(), FaceKind::Single)
            .unwrap();

    assert!(resource.covers_code_point(0x3000));
    let outline = resource.extract_outline(0x4E00).unwrap();
    assert!(!outline.is_empty());
    let bbox = kurbo::Shape::bounding_box(outline.path());
    assert_eq!((bbox.x0, bbox.y0, bbox.x1, bbox.y1), (100.0, -50.0, 900.0, 850.0));

    let blank = resource.extract_outline(0x3000).unwrap();
    assert!(blank.is_empty());

    let err = resource.extract_outline(0x4E01).unwrap_err();
    assert!(matches!(err, GlyphError::GlyphNotFound { code_point: 0x4E01, .. }));
}

#[test]
fn test_validate_against_loaded_fonts() {
    let tmp = TempDir::new().unwrap();
    let a = write_font(&tmp, "a.ttf", &SyntheticFont::new(1000).with_square(0x4E00).build());
    let b = write_font(
        &tmp,
        "b.ttf",
        &SyntheticFont::new(1000)
            .with_square(0x4E00)
            .with_square(0x4E01)
            .build(),
    );
    let index = CoverageIndex::load(&[a, b]);

    let coverage = validate(&[0x4E00, 0x4E01, 0x4E02], &index);
    assert_eq!(coverage.accepted, vec![0x4E00, 0x4E01]);
    assert_eq!(coverage.missing, vec![0x4E02]);
    assert!(coverage.enforce(true).is_ok());
    assert_eq!(coverage.enforce(false).unwrap_err().missing_count, 1);
}

#[test]
fn test_resource_debug_omits_bytes() {
    let bytes = SyntheticFont::new(1000).with_square(0x4E00).build();
    let resource =
        FontResource::from_bytes(std::path::Path::new("f.ttf"), bytes.into(), FaceKind::Single)
            .unwrap();
    let debug_str = format!("{:?}", resource);
    assert!(debug_str.contains("FontResource"));
    assert!(debug_str.contains("bytes_len"));
    assert_eq!(resource.label(), "f.ttf");
}
