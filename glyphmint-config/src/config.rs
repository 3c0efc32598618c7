//! Core `Config` struct, YAML loading and validation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codepoint::{CodeRange, MAX_CODE_POINT};
use crate::defaults;
use crate::env_vars::substitute_variables;
use crate::error::ConfigError;
use crate::types::{LogLevel, WorkerMode};

/// Where font resources come from.
///
/// Directories are scanned first (in order), then explicit paths and
/// wildcard patterns. The combined list is the fallback priority order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontsConfig {
    /// Directories scanned for `*.ttf`, `*.otf`, `*.ttc` and `*.otc`
    #[serde(default = "defaults::font_dirs")]
    pub dirs: Vec<PathBuf>,

    /// Explicit font files or wildcard patterns (`/usr/share/fonts/**/Noto*CJK*.ttc`)
    #[serde(default)]
    pub paths: Vec<String>,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            dirs: defaults::font_dirs(),
            paths: Vec::new(),
        }
    }
}

/// Batch rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Font resources in priority order
    #[serde(default)]
    pub fonts: FontsConfig,

    /// Directory receiving `<HEX>.svg` artifacts
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,

    /// Square canvas edge length in SVG user units
    #[serde(default = "defaults::canvas_size")]
    pub canvas_size: u32,

    /// Padding kept free on every side of the glyph
    #[serde(default = "defaults::padding")]
    pub padding: u32,

    /// Fill color of the glyph path and the empty-glyph placeholder
    #[serde(default = "defaults::fill")]
    pub fill: String,

    /// Decimal places written for path coordinates
    #[serde(default = "defaults::precision")]
    pub precision: usize,

    /// Worker count (0 = available parallelism)
    #[serde(default = "defaults::workers")]
    pub workers: usize,

    /// How workers obtain their coverage index
    #[serde(default)]
    pub worker_mode: WorkerMode,

    /// Skip uncovered code points (and write a report) instead of failing
    #[serde(default)]
    pub allow_missing: bool,

    /// Code points rendered when no explicit list is given
    #[serde(default = "defaults::ranges")]
    pub ranges: Vec<CodeRange>,

    /// Log verbosity
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fonts: FontsConfig::default(),
            output_dir: defaults::output_dir(),
            canvas_size: defaults::canvas_size(),
            padding: defaults::padding(),
            fill: defaults::fill(),
            precision: defaults::precision(),
            workers: defaults::workers(),
            worker_mode: WorkerMode::default(),
            allow_missing: false,
            ranges: defaults::ranges(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a YAML file.
    ///
    /// `${VAR}` references are substituted before parsing.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let contents = substitute_variables(contents);
        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the explicit path if given, else the default config file if it
    /// exists, else built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::config_path() {
            Some(default_path) if default_path.is_file() => Self::load(&default_path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Default configuration file path (`<config dir>/glyphmint/config.yaml`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("glyphmint").join("config.yaml"))
    }

    /// Check field values for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_size == 0 {
            return Err(ConfigError::Validation(
                "canvas_size must be greater than 0".to_string(),
            ));
        }
        if u64::from(self.padding) * 2 >= u64::from(self.canvas_size) {
            return Err(ConfigError::Validation(format!(
                "padding {} leaves no drawable area on a {} canvas",
                self.padding, self.canvas_size
            )));
        }
        if self.precision > 6 {
            return Err(ConfigError::Validation(format!(
                "precision {} exceeds the maximum of 6",
                self.precision
            )));
        }
        for range in &self.ranges {
            if range.start > range.end || range.end > MAX_CODE_POINT {
                return Err(ConfigError::Validation(format!(
                    "invalid code range U+{:04X}-U+{:04X}",
                    range.start, range.end
                )));
            }
        }
        Ok(())
    }

    /// Worker count with `0` resolved to the machine's available parallelism.
    pub fn resolved_workers(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(2)
    }

    /// All code points of the configured ranges, in range order.
    pub fn range_code_points(&self) -> Vec<u32> {
        self.ranges.iter().flat_map(CodeRange::iter).collect()
    }

    // -- Builder-style helpers --

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_canvas(mut self, canvas_size: u32, padding: u32) -> Self {
        self.canvas_size = canvas_size;
        self.padding = padding;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_font_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.fonts.dirs = dirs;
        self
    }
}
