//! Font path discovery: directory listing and wildcard pattern expansion.
//!
//! Produces the ordered, de-duplicated path list consumed by
//! [`crate::CoverageIndex::load`]. Order is the fallback priority, so every
//! step here is deterministic.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use glyphmint_config::substitute_variables;
use regex::Regex;

use crate::error::FontError;

/// Font file extensions picked up from directories, in priority order.
pub const FONT_EXTENSIONS: [&str; 4] = ["ttf", "otf", "ttc", "otc"];

/// List font files in `dir`.
///
/// Files are grouped by extension in [`FONT_EXTENSIONS`] order and sorted
/// by file name within each group. Subdirectories are not descended.
pub fn list_font_dir(dir: &Path) -> Result<Vec<PathBuf>, FontError> {
    let entries = fs::read_dir(dir).map_err(|source| FontError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut groups: [Vec<PathBuf>; FONT_EXTENSIONS.len()] = Default::default();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if let Some(slot) = FONT_EXTENSIONS.iter().position(|known| *known == ext) {
            groups[slot].push(path);
        }
    }

    Ok(groups
        .into_iter()
        .flat_map(|mut group| {
            group.sort();
            group
        })
        .collect())
}

/// Expand `~`, `${VAR}` and wildcards in each pattern.
///
/// `${VAR}` follows the same allowlist as config file substitution.
/// `*`, `?` and `[...]` match within one path component; a `**` component
/// matches any number of directories without following directory symlinks. Patterns without wildcards pass
/// through unchanged even if the file does not exist, so the loader can
/// report it. Matches of one pattern are sorted; the overall list keeps
/// pattern order and drops repeats.
pub fn expand_font_paths(patterns: &[String]) -> Vec<PathBuf> {
    let mut expanded = Vec::new();
    for pattern in patterns {
        let pattern = substitute_variables(&expand_home(pattern));
        if !has_wildcard(&pattern) {
            expanded.push(PathBuf::from(pattern));
            continue;
        }

        let (base, segments) = split_pattern(&pattern);
        let mut matches = Vec::new();
        expand_segments(&base, &segments, &mut matches);
        matches.sort();
        if matches.is_empty() {
            log::warn!("Font pattern '{pattern}' matched no files");
        }
        expanded.extend(matches);
    }
    dedup_in_order(expanded)
}

/// Directories first (each listed via [`list_font_dir`]), then expanded
/// patterns. Unreadable directories are logged and skipped.
pub fn collect_font_paths(dirs: &[PathBuf], patterns: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for dir in dirs {
        match list_font_dir(dir) {
            Ok(found) => {
                log::debug!("Found {} font file(s) in {}", found.len(), dir.display());
                paths.extend(found);
            }
            Err(e) => log::warn!("Skipping font directory: {e}"),
        }
    }
    paths.extend(expand_font_paths(patterns));
    dedup_in_order(paths)
}

/// Drop later paths that resolve to the same file as an earlier one.
/// Paths that cannot be canonicalized are compared as written.
fn dedup_in_order(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::with_capacity(paths.len());
    paths
        .into_iter()
        .filter(|p| seen.insert(fs::canonicalize(p).unwrap_or_else(|_| p.clone())))
        .collect()
}

fn expand_home(path: &str) -> String {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home.to_string_lossy().to_string();
        }
    } else if let Some(suffix) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(suffix).to_string_lossy().to_string();
    }
    path.to_string()
}

fn has_wildcard(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

fn split_pattern(pattern: &str) -> (PathBuf, Vec<String>) {
    let base = if pattern.starts_with('/') {
        PathBuf::from("/")
    } else {
        PathBuf::new()
    };
    let segments = pattern
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect();
    (base, segments)
}

fn read_dir_sorted(dir: &Path) -> Vec<PathBuf> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| {
            if dir == Path::new(".") {
                PathBuf::from(entry.file_name())
            } else {
                entry.path()
            }
        })
        .collect();
    paths.sort();
    paths
}

fn expand_segments(base: &Path, segments: &[String], out: &mut Vec<PathBuf>) {
    let Some((segment, rest)) = segments.split_first() else {
        if base.is_file() {
            out.push(base.to_path_buf());
        }
        return;
    };

    if segment == "**" {
        expand_segments(base, rest, out);
        for child in read_dir_sorted(base) {
            let is_real_dir = fs::symlink_metadata(&child).is_ok_and(|m| m.is_dir());
            if is_real_dir {
                expand_segments(&child, segments, out);
            }
        }
        return;
    }

    if !has_wildcard(segment) {
        expand_segments(&base.join(segment), rest, out);
        return;
    }

    let Some(matcher) = component_regex(segment) else {
        log::warn!("Invalid wildcard component '{segment}'");
        return;
    };
    for child in read_dir_sorted(base) {
        let matched = child
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| matcher.is_match(name));
        if matched {
            expand_segments(&child, rest, out);
        }
    }
}

/// Translate one glob component into an anchored regex.
fn component_regex(segment: &str) -> Option<Regex> {
    let mut re = String::from("^");
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            '[' => {
                re.push('[');
                if chars.peek() == Some(&'!') {
                    chars.next();
                    re.push('^');
                }
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == ']' {
                        closed = true;
                        break;
                    }
                    if inner == '\\' || inner == '[' {
                        re.push('\\');
                    }
                    re.push(inner);
                }
                if !closed {
                    return None;
                }
                re.push(']');
            }
            other => re.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    re.push('$');
    Regex::new(&re).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"x").unwrap();
        path
    }

    #[test]
    fn list_font_dir_groups_by_extension() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b.ttc");
        touch(tmp.path(), "z.ttf");
        touch(tmp.path(), "a.ttf");
        touch(tmp.path(), "m.otf");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "c.OTC");

        let names: Vec<String> = list_font_dir(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.ttf", "z.ttf", "m.otf", "b.ttc", "c.OTC"]);
    }

    #[test]
    fn list_font_dir_missing_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = list_font_dir(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
    }

    #[test]
    fn star_matches_within_component_sorted() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "NotoB.ttc");
        touch(tmp.path(), "NotoA.ttc");
        touch(tmp.path(), "Other.ttc");

        let pattern = format!("{}/Noto*.ttc", tmp.path().display());
        let paths = expand_font_paths(&[pattern]);
        assert_eq!(
            paths,
            vec![tmp.path().join("NotoA.ttc"), tmp.path().join("NotoB.ttc")]
        );
    }

    #[test]
    fn double_star_recurses() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "top.ttf");
        touch(tmp.path(), "x/mid.ttf");
        touch(tmp.path(), "x/y/deep.ttf");
        touch(tmp.path(), "x/y/deep.txt");

        let pattern = format!("{}/**/*.ttf", tmp.path().display());
        let paths = expand_font_paths(&[pattern]);
        assert_eq!(
            paths,
            vec![
                tmp.path().join("top.ttf"),
                tmp.path().join("x/mid.ttf"),
                tmp.path().join("x/y/deep.ttf"),
            ]
        );
    }

    #[test]
    fn question_mark_and_class() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "f1.ttf");
        touch(tmp.path(), "f2.ttf");
        touch(tmp.path(), "f10.ttf");

        let q = format!("{}/f?.ttf", tmp.path().display());
        assert_eq!(expand_font_paths(&[q]).len(), 2);

        let class = format!("{}/f[!1].ttf", tmp.path().display());
        assert_eq!(expand_font_paths(&[class]), vec![tmp.path().join("f2.ttf")]);
    }

    #[test]
    fn literal_paths_pass_through_and_dedup() {
        let a = "/fonts/a.ttf".to_string();
        let b = "/fonts/b.ttf".to_string();
        let paths = expand_font_paths(&[a.clone(), b.clone(), a.clone()]);
        assert_eq!(paths, vec![PathBuf::from(&a), PathBuf::from(&b)]);
    }

    #[test]
    fn env_vars_follow_config_allowlist() {
        let tmp = TempDir::new().unwrap();
        let font = touch(tmp.path(), "a.ttf");
        // SAFETY: test-only env mutation with unique variable names.
        unsafe {
            std::env::set_var("GLYPHMINT_TEST_FONT_ROOT", tmp.path());
            std::env::set_var("PATHS_TEST_PRIVATE_ROOT", tmp.path());
        }

        let allowed = expand_font_paths(&["${GLYPHMINT_TEST_FONT_ROOT}/*.ttf".to_string()]);
        assert_eq!(allowed, vec![font]);

        let blocked = expand_font_paths(&["${PATHS_TEST_PRIVATE_ROOT}/a.ttf".to_string()]);
        assert_eq!(blocked, vec![PathBuf::from("${PATHS_TEST_PRIVATE_ROOT}/a.ttf")]);
    }

    #[cfg(unix)]
    #[test]
    fn double_star_skips_symlink_loops() {
        let tmp = TempDir::new().unwrap();
        let font = touch(tmp.path(), "sub/a.ttf");
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("sub/loop")).unwrap();

        let pattern = format!("{}/**/*.ttf", tmp.path().display());
        assert_eq!(expand_font_paths(&[pattern]), vec![font]);
    }

    #[cfg(unix)]
    #[test]
    fn dedup_resolves_symlinked_files() {
        let tmp = TempDir::new().unwrap();
        let font = touch(tmp.path(), "real/a.ttf");
        let alias = tmp.path().join("alias.ttf");
        std::os::unix::fs::symlink(&font, &alias).unwrap();

        let paths = expand_font_paths(&[font.display().to_string(), alias.display().to_string()]);
        assert_eq!(paths, vec![font]);
    }

    #[test]
    fn collect_puts_dirs_first() {
        let tmp = TempDir::new().unwrap();
        let dir_font = touch(tmp.path(), "dir/a.ttf");
        let extra = touch(tmp.path(), "extra/b.ttf");

        let paths = collect_font_paths(
            &[tmp.path().join("dir"), tmp.path().join("missing")],
            &[extra.display().to_string(), dir_font.display().to_string()],
        );
        assert_eq!(paths, vec![dir_font, extra]);
    }

    #[test]
    fn unclosed_class_is_rejected() {
        assert!(component_regex("f[ab.ttf").is_none());
        assert!(component_regex("f[ab].ttf").unwrap().is_match("fa.ttf"));
    }
}
