//! Default values for rendering, font and worker settings.

use std::path::PathBuf;

use crate::codepoint::CodeRange;

/// Environment variable that overrides the default font directory.
pub const FONTS_DIR_ENV: &str = "FONTS_DIR";

/// File name of the missing-coverage side report.
pub const MISSING_REPORT_FILE: &str = "missing_codepoints.txt";

pub fn font_dirs() -> Vec<PathBuf> {
    match std::env::var(FONTS_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => vec![PathBuf::from(dir)],
        _ => vec![PathBuf::from("fonts")],
    }
}

pub fn output_dir() -> PathBuf {
    PathBuf::from("svg")
}

pub fn canvas_size() -> u32 {
    128
}

pub fn padding() -> u32 {
    8
}

pub fn fill() -> String {
    "#000".to_string()
}

pub fn precision() -> usize {
    3 // Sub-pixel detail without bloating path data
}

pub fn workers() -> usize {
    0 // 0 = use available parallelism
}

/// CJK blocks rendered when no explicit code list is requested.
pub fn ranges() -> Vec<CodeRange> {
    vec![
        CodeRange::new(0x2E80, 0x2EFF), // CJK Radicals Supplement
        CodeRange::new(0x2F00, 0x2FDF), // Kangxi Radicals
        CodeRange::new(0x2FF0, 0x2FFF), // Ideographic Description Characters
        CodeRange::new(0x3000, 0x303F), // CJK Symbols and Punctuation
        CodeRange::new(0x3400, 0x4DBF), // CJK Unified Ideographs Extension A
        CodeRange::new(0x4E00, 0x9FFF), // CJK Unified Ideographs
    ]
}
