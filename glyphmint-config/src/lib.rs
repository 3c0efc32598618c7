//! Configuration system for the glyphmint glyph renderer.
//!
//! This crate provides configuration loading, validation, and default values
//! for batch glyph rendering. It includes:
//!
//! - The [`Config`] struct (fonts, canvas geometry, workers, coverage policy)
//! - Unicode code-point parsing and formatting shared by every front end
//! - Default CJK code-point ranges
//! - `${VAR}` / `${VAR:-default}` substitution applied before YAML parsing

pub mod codepoint;
pub mod config;
pub mod defaults;
pub mod env_vars;
pub mod error;
mod types;

// Re-export main types for convenience
pub use codepoint::{CodeRange, format_code_point, parse_code_list, parse_code_point};
pub use config::{Config, FontsConfig};
pub use env_vars::substitute_variables;
pub use error::ConfigError;
pub use types::{LogLevel, WorkerMode};
