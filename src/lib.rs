//! glyphmint - batch renderer of Unicode glyphs to normalized SVG artifacts.
//!
//! The binary is a thin layer over the workspace crates:
//! - `glyphmint-config`: configuration, code-point parsing, default ranges
//! - `glyphmint-fonts`: coverage index, validation and outline extraction
//! - `glyphmint-render`: normalization, SVG serialization and the engine

pub mod app;
pub mod cli;
pub mod debug;
pub mod error;

pub use error::AppError;
