//! Command-line interface for glyphmint.
//!
//! This module handles CLI argument parsing and how flags override the
//! loaded configuration.

use clap::{Args, Parser, Subcommand};
use glyphmint_config::{Config, LogLevel, WorkerMode};
use std::path::PathBuf;

/// glyphmint - Render Unicode glyphs to normalized SVG artifacts
#[derive(Parser, Debug)]
#[command(name = "glyphmint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: <config dir>/glyphmint/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also append log output to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render code points to <OUT>/<HEX>.svg
    Render(RenderArgs),

    /// Render a single code point and print the SVG document
    Glyph {
        /// Code point (4E00, U+4E00, 0x4E00 or a literal character)
        code: String,

        /// Write the document to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        out_file: Option<PathBuf>,

        #[command(flatten)]
        fonts: FontArgs,

        #[command(flatten)]
        canvas: CanvasArgs,
    },

    /// Report which font covers each code point
    Check {
        /// Comma-separated code points
        codes: String,

        #[command(flatten)]
        fonts: FontArgs,
    },
}

/// Where fonts come from.
#[derive(Args, Debug, Clone, Default)]
pub struct FontArgs {
    /// Font directory to scan (repeatable; replaces configured directories)
    #[arg(long = "fonts-dir", value_name = "DIR")]
    pub fonts_dirs: Vec<PathBuf>,

    /// Font file or wildcard pattern (repeatable; appended after directories)
    #[arg(long = "font", value_name = "PATH")]
    pub fonts: Vec<String>,
}

/// Canvas geometry and styling.
#[derive(Args, Debug, Clone, Default)]
pub struct CanvasArgs {
    /// Canvas edge length
    #[arg(long, value_name = "N")]
    pub size: Option<u32>,

    /// Padding on every side
    #[arg(long, value_name = "N")]
    pub padding: Option<u32>,

    /// Glyph fill color (hex or named)
    #[arg(long, value_name = "COLOR")]
    pub fill: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Output directory
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Skip uncovered code points and write missing_codepoints.txt
    #[arg(long, alias = "allow-missings")]
    pub allow_missing: bool,

    /// Worker threads (0 = available parallelism)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Comma-separated code points (default: configured ranges)
    #[arg(long, value_name = "LIST")]
    pub codes: Option<String>,

    /// isolated: one font index per worker; shared: one index for all
    #[arg(long, value_name = "MODE")]
    pub mode: Option<WorkerMode>,

    /// Write the run summary as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,

    #[command(flatten)]
    pub fonts: FontArgs,

    #[command(flatten)]
    pub canvas: CanvasArgs,
}

impl FontArgs {
    pub fn apply(&self, config: &mut Config) {
        if !self.fonts_dirs.is_empty() {
            config.fonts.dirs = self.fonts_dirs.clone();
        }
        config.fonts.paths.extend(self.fonts.iter().cloned());
    }
}

impl CanvasArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(size) = self.size {
            config.canvas_size = size;
        }
        if let Some(padding) = self.padding {
            config.padding = padding;
        }
        if let Some(ref fill) = self.fill {
            config.fill = fill.clone();
        }
    }
}

impl RenderArgs {
    /// Override configuration values with the flags that were given.
    pub fn apply(&self, config: &mut Config) {
        self.fonts.apply(config);
        self.canvas.apply(config);
        if let Some(ref out) = self.out {
            config.output_dir = out.clone();
        }
        if self.allow_missing {
            config.allow_missing = true;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(mode) = self.mode {
            config.worker_mode = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_flags_override_config() {
        let cli = Cli::parse_from([
            "glyphmint",
            "render",
            "--out",
            "out",
            "--size",
            "64",
            "--padding",
            "4",
            "--allow-missings",
            "--workers",
            "3",
            "--mode",
            "shared",
            "--fonts-dir",
            "a",
            "--fonts-dir",
            "b",
            "--font",
            "/x/*.ttc",
        ]);
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        let mut config = Config::default();
        args.apply(&mut config);

        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.canvas_size, 64);
        assert_eq!(config.padding, 4);
        assert!(config.allow_missing);
        assert_eq!(config.workers, 3);
        assert_eq!(config.worker_mode, WorkerMode::Shared);
        assert_eq!(config.fonts.dirs, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(config.fonts.paths, vec!["/x/*.ttc".to_string()]);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["glyphmint", "check", "4E00", "--log-level", "debug"]);
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert!(matches!(cli.command, Commands::Check { ref codes, .. } if codes == "4E00"));
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let mut config = Config::default();
        RenderArgs::default().apply(&mut config);
        assert_eq!(config, Config::default());
    }
}
