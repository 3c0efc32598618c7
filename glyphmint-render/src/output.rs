//! Artifact naming and atomic file output.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use glyphmint_config::defaults::MISSING_REPORT_FILE;
use glyphmint_config::format_code_point;
use glyphmint_fonts::GlyphError;

/// File name of the artifact for `code_point`: upper-case hex, at least
/// four digits, `.svg` extension.
pub fn artifact_file_name(code_point: u32) -> String {
    format!("{code_point:04X}.svg")
}

/// Destination of the artifact for `code_point` inside `out_dir`.
pub fn artifact_path(out_dir: &Path, code_point: u32) -> PathBuf {
    out_dir.join(artifact_file_name(code_point))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `bytes` to `<path>.tmp`, then rename it over `path`.
///
/// Readers never observe a partially written destination. On failure the
/// temporary file is removed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), GlyphError> {
    let temp = temp_path(path);
    if let Err(source) = fs::write(&temp, bytes) {
        let _ = fs::remove_file(&temp);
        return Err(GlyphError::Write { path: temp, source });
    }
    fs::rename(&temp, path).map_err(|source| {
        let _ = fs::remove_file(&temp);
        GlyphError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Contents of the missing-coverage report: one `U+XXXX` per line, no
/// trailing newline.
pub fn missing_report(missing: &[u32]) -> String {
    missing
        .iter()
        .map(|&cp| format_code_point(cp))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Atomically write the missing-coverage report into `out_dir` and return
/// its path.
pub fn write_missing_report(out_dir: &Path, missing: &[u32]) -> Result<PathBuf, GlyphError> {
    let path = out_dir.join(MISSING_REPORT_FILE);
    write_atomic(&path, missing_report(missing).as_bytes())?;
    log::info!(
        "Wrote {} missing code point(s) to {}",
        missing.len(),
        path.display()
    );
    Ok(path)
}
