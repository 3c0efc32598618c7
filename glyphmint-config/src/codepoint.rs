//! Unicode code-point parsing, formatting and ranges.
//!
//! Every front end (CLI flags, config files, HTTP-style path parameters)
//! normalizes user input through [`parse_code_point`] so that `4E00`,
//! `U+4E00`, `0x4E00` and `一` all name the same scalar value.

use std::ops::RangeInclusive;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// Largest Unicode scalar value.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

const SURROGATES: RangeInclusive<u32> = 0xD800..=0xDFFF;

/// Parse one code point token.
///
/// Accepted forms:
/// - `U+4E00` / `u+4e00`
/// - `0x4E00`
/// - bare hexadecimal `4E00`
/// - a single literal character `一` (taken as-is, even if it is a hex digit)
///
/// # Errors
///
/// Returns [`ConfigError::InvalidCodePoint`] for empty tokens, non-hex input,
/// surrogates, and values above U+10FFFF.
pub fn parse_code_point(token: &str) -> Result<u32, ConfigError> {
    let tok = token.trim();
    let invalid = |reason| ConfigError::InvalidCodePoint {
        token: token.to_string(),
        reason,
    };

    let mut chars = tok.chars();
    let hex = match (chars.next(), chars.next()) {
        (None, _) => return Err(invalid("empty token")),
        (Some(ch), None) => return Ok(ch as u32),
        _ => {
            if let Some(rest) = tok.strip_prefix("U+").or_else(|| tok.strip_prefix("u+")) {
                rest
            } else if let Some(rest) = tok.strip_prefix("0x").or_else(|| tok.strip_prefix("0X")) {
                rest
            } else {
                tok
            }
        }
    };

    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("expected hexadecimal digits"));
    }
    let value = u32::from_str_radix(hex, 16).map_err(|_| invalid("value out of range"))?;
    if value > MAX_CODE_POINT {
        return Err(invalid("above U+10FFFF"));
    }
    if SURROGATES.contains(&value) {
        return Err(invalid("surrogate code points are not scalar values"));
    }
    Ok(value)
}

/// Parse a comma-separated code list such as `4E00,U+4E8C,行`.
///
/// Empty tokens (e.g. trailing commas) are skipped. Order and duplicates are
/// preserved; de-duplication happens during coverage validation.
pub fn parse_code_list(list: &str) -> Result<Vec<u32>, ConfigError> {
    list.split(',')
        .filter(|tok| !tok.trim().is_empty())
        .map(parse_code_point)
        .collect()
}

/// Format a code point as `U+XXXX` (upper-case, at least four digits).
pub fn format_code_point(cp: u32) -> String {
    format!("U+{cp:04X}")
}

/// An inclusive range of code points.
///
/// In YAML, `start` and `end` accept either integers (`0x4E00`, `19968`) or
/// any string form understood by [`parse_code_point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRange {
    /// First code point (inclusive)
    #[serde(deserialize_with = "deserialize_code_point")]
    pub start: u32,
    /// Last code point (inclusive)
    #[serde(deserialize_with = "deserialize_code_point")]
    pub end: u32,
}

impl CodeRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Iterate over every code point in the range.
    pub fn iter(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Number of code points in the range (0 when inverted).
    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CodeValue {
    Number(u32),
    Text(String),
}

fn deserialize_code_point<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match CodeValue::deserialize(deserializer)? {
        CodeValue::Number(n) => Ok(n),
        CodeValue::Text(s) => parse_code_point(&s).map_err(serde::de::Error::custom),
    }
}
