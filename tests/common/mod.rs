//! Shared integration test helpers for glyphmint.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::TestContext;
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use glyphmint_fonts::testing::SyntheticFont;
use tempfile::TempDir;

/// A scratch directory with a `fonts/` folder, an empty config file and an
/// output location, plus a runner for the glyphmint binary.
pub struct TestContext {
    pub dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("fonts")).expect("Failed to create fonts dir");
        fs::write(dir.path().join("config.yaml"), "{}\n").expect("Failed to write config");
        Self { dir }
    }

    /// FontA covers U+4E00 with a full em square; FontB covers U+4E00 (tall
    /// box) and U+4E01. Neither covers U+4E02.
    pub fn with_two_fonts() -> Self {
        let ctx = Self::new();
        ctx.add_font("a.ttf", &SyntheticFont::new(1000).with_square(0x4E00));
        ctx.add_font(
            "b.ttf",
            &SyntheticFont::new(2048)
                .with_rect(0x4E00, 0, 0, 500, 1000)
                .with_rect(0x4E01, 100, -200, 1900, 1700),
        );
        ctx
    }

    pub fn add_font(&self, name: &str, font: &SyntheticFont) -> PathBuf {
        let path = self.fonts_dir().join(name);
        fs::write(&path, font.build()).expect("Failed to write font");
        path
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.dir.path().join("fonts")
    }

    pub fn out_dir(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run glyphmint with the context's config file and font directory.
    pub fn run(&self, command: &str, args: &[&str]) -> Output {
        let config = self.dir.path().join("config.yaml");
        let fonts = self.fonts_dir();
        Command::new(env!("CARGO_BIN_EXE_glyphmint"))
            .arg(command)
            .arg("--config")
            .arg(&config)
            .arg("--fonts-dir")
            .arg(&fonts)
            .args(args)
            .env_remove("RUST_LOG")
            .env_remove("FONTS_DIR")
            .output()
            .expect("Failed to run glyphmint")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Sorted `(file name, contents)` pairs of a directory.
pub fn read_dir_sorted(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<(String, Vec<u8>)> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|entry| {
            let path = entry.expect("Failed to read entry").path();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            (name, fs::read(&path).expect("Failed to read file"))
        })
        .collect();
    files.sort();
    files
}
