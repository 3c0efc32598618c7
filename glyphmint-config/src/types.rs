//! Small enum types used by [`crate::Config`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Log level for the logging bridge.
///
/// The `--log-level` CLI flag and `RUST_LOG` take precedence over the config value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Run milestones, skipped fonts, coverage summary
    #[default]
    Info,
    /// Per-shard details
    Debug,
    /// Per-glyph details
    Trace,
}

impl LogLevel {
    /// All available levels, least verbose first
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Off,
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    fn name(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        LogLevel::all()
            .iter()
            .copied()
            .find(|level| level.name() == lower)
            .ok_or_else(|| {
                format!("unknown log level \"{s}\": expected off, error, warn, info, debug or trace")
            })
    }
}

/// How render workers obtain their font coverage index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkerMode {
    /// Every worker loads a private index from the font paths on startup.
    #[default]
    Isolated,
    /// Workers borrow one read-only index loaded by the coordinator.
    Shared,
}

impl fmt::Display for WorkerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerMode::Isolated => f.write_str("isolated"),
            WorkerMode::Shared => f.write_str("shared"),
        }
    }
}

impl FromStr for WorkerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "isolated" | "process" => Ok(WorkerMode::Isolated),
            "shared" | "thread" => Ok(WorkerMode::Shared),
            _ => Err(format!(
                "unknown worker mode \"{s}\": expected \"isolated\" or \"shared\""
            )),
        }
    }
}
