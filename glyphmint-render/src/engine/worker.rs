//! Per-shard render loop.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use glyphmint_fonts::{CoverageIndex, GlyphError, GlyphSource};

use super::shard::ShardOutcome;
use crate::document::{RenderParams, render_glyph};
use crate::output::{artifact_path, write_atomic};

/// One code point bound for one destination file.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub code_point: u32,
    pub params: &'a RenderParams,
    pub destination: &'a Path,
}

/// Outcome of a single [`RenderRequest`].
#[derive(Debug)]
pub struct RenderResult {
    pub code_point: u32,
    pub result: Result<(), GlyphError>,
}

impl RenderRequest<'_> {
    /// Select, render and atomically write the artifact.
    pub fn execute<S: GlyphSource>(self, index: &CoverageIndex<S>) -> RenderResult {
        let result = render_glyph(index, self.code_point, self.params)
            .and_then(|svg| write_atomic(self.destination, svg.as_bytes()));
        RenderResult {
            code_point: self.code_point,
            result,
        }
    }
}

/// Render and write every code point of one shard, in order.
///
/// A failing code point is counted and sampled; the loop always moves on to
/// the next one. A panic while rendering one code point is caught and
/// counted as that code point's failure.
pub fn run_shard<S: GlyphSource>(
    shard_index: usize,
    items: &[u32],
    index: &CoverageIndex<S>,
    params: &RenderParams,
    out_dir: &Path,
) -> ShardOutcome {
    let mut outcome = ShardOutcome::new(shard_index);
    for &code_point in items {
        let destination = artifact_path(out_dir, code_point);
        let request = RenderRequest {
            code_point,
            params,
            destination: &destination,
        };
        match panic::catch_unwind(AssertUnwindSafe(|| request.execute(index))) {
            Ok(RenderResult { result: Ok(()), .. }) => outcome.record_success(),
            Ok(RenderResult {
                code_point,
                result: Err(e),
            }) => {
                log::debug!("Shard {shard_index}: {e}");
                outcome.record_failure(code_point, e);
            }
            Err(payload) => {
                let cause = format!("panicked: {}", panic_message(payload.as_ref()));
                log::error!("Shard {shard_index}: U+{code_point:04X} {cause}");
                outcome.record_failure(code_point, cause);
            }
        }
    }
    log::debug!(
        "Shard {shard_index} done: {} processed, {} failed",
        outcome.processed,
        outcome.errors
    );
    outcome
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause")
}
