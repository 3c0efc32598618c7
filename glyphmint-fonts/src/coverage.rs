//! Pre-flight coverage validation.
//!
//! Partitions the requested code points into those some font can render and
//! those none can, before any artifact is produced.

use std::collections::HashSet;

use crate::error::CoverageGapError;
use crate::index::CoverageIndex;
use crate::source::GlyphSource;

/// Maximum number of missing code points listed in a [`CoverageGapError`].
pub const MISSING_PREVIEW_LIMIT: usize = 20;

/// Result of partitioning a request against a coverage index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    /// Covered code points, de-duplicated, in request order.
    pub accepted: Vec<u32>,
    /// Uncovered code points, de-duplicated, in request order.
    pub missing: Vec<u32>,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Apply the missing-coverage policy.
    ///
    /// With `allow_missing` off, any gap fails the whole request. With it on,
    /// missing entries are simply excluded from `accepted` (already the case)
    /// and the caller is expected to write them to a side report.
    ///
    /// # Errors
    ///
    /// Returns [`CoverageGapError`] with the total count and a preview capped
    /// at [`MISSING_PREVIEW_LIMIT`] entries.
    pub fn enforce(&self, allow_missing: bool) -> Result<(), CoverageGapError> {
        if self.missing.is_empty() || allow_missing {
            return Ok(());
        }
        Err(CoverageGapError {
            missing_count: self.missing.len(),
            preview: self
                .missing
                .iter()
                .take(MISSING_PREVIEW_LIMIT)
                .copied()
                .collect(),
        })
    }
}

/// Partition `requested` into accepted and missing code points.
///
/// Duplicates are collapsed to their first occurrence so that every
/// destination is produced exactly once.
pub fn validate<S: GlyphSource>(requested: &[u32], index: &CoverageIndex<S>) -> Coverage {
    let mut seen = HashSet::with_capacity(requested.len());
    let mut coverage = Coverage::default();

    for &cp in requested {
        if !seen.insert(cp) {
            continue;
        }
        if index.covers(cp) {
            coverage.accepted.push(cp);
        } else {
            coverage.missing.push(cp);
        }
    }

    if !coverage.missing.is_empty() {
        log::warn!(
            "{} of {} requested code point(s) are not covered by any font",
            coverage.missing.len(),
            seen.len()
        );
    }
    coverage
}
