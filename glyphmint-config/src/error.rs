//! Typed error variants for the glyphmint-config crate.
//!
//! Library consumers can match on specific failure modes; the binary wraps
//! these in `anyhow` at the outermost layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading the config file.
    #[error("I/O error reading config '{}': {source}", path.display())]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),

    /// A code point token could not be parsed.
    #[error("invalid code point '{token}': {reason}")]
    InvalidCodePoint {
        /// The offending input token.
        token: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}
