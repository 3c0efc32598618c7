//! Concurrent batch render engine.
//!
//! The accepted code points are split into contiguous shards, one per
//! worker thread. Each worker obtains a coverage index from an
//! [`IndexProvider`], renders its shard in order and sends a
//! [`ShardOutcome`] back over a channel. The coordinating thread reports
//! progress as outcomes arrive and then folds them, in shard order, into a
//! [`RenderSummary`]. It is the only owner of reporting state.

mod shard;
mod worker;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::thread;

use glyphmint_fonts::{CoverageIndex, FontResource, GlyphSource};
use serde::Serialize;

use crate::document::RenderParams;
use crate::error::RenderError;

pub use shard::{SHARD_ERROR_SAMPLES, ShardOutcome, partition};
pub use worker::{RenderRequest, RenderResult, run_shard};

/// Builds a private coverage index inside a worker thread.
pub type IndexLoader<S> = Arc<dyn Fn() -> CoverageIndex<S> + Send + Sync>;

/// How workers get the coverage index they select from.
pub enum IndexProvider<S = FontResource> {
    /// Every worker loads its own index on startup. Nothing is shared
    /// between workers except the immutable loader.
    PerWorker(IndexLoader<S>),
    /// Workers borrow one read-only index.
    Shared(Arc<CoverageIndex<S>>),
}

impl<S: GlyphSource> IndexProvider<S> {
    pub fn per_worker(loader: impl Fn() -> CoverageIndex<S> + Send + Sync + 'static) -> Self {
        Self::PerWorker(Arc::new(loader))
    }

    pub fn shared(index: CoverageIndex<S>) -> Self {
        Self::Shared(Arc::new(index))
    }

    fn run(
        &self,
        shard_index: usize,
        items: &[u32],
        params: &RenderParams,
        out_dir: &Path,
    ) -> ShardOutcome {
        match self {
            Self::PerWorker(loader) => {
                let index = loader();
                log::debug!(
                    "Shard {shard_index}: loaded private index with {} face(s)",
                    index.len()
                );
                run_shard(shard_index, items, &index, params, out_dir)
            }
            Self::Shared(index) => run_shard(shard_index, items, index, params, out_dir),
        }
    }
}

impl<S> std::fmt::Debug for IndexProvider<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerWorker(_) => f.write_str("IndexProvider::PerWorker"),
            Self::Shared(_) => f.write_str("IndexProvider::Shared"),
        }
    }
}

/// Snapshot passed to the progress observer after each shard completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProgress {
    pub shards_done: usize,
    pub shards_total: usize,
    pub processed: usize,
    pub requested: usize,
}

/// Totals of a render run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderSummary {
    /// Code points handed to the engine.
    pub requested: usize,
    /// Artifacts written.
    pub written: usize,
    /// Code points that failed.
    pub failed: usize,
    /// Sampled failure messages, in shard order.
    pub errors: Vec<String>,
}

impl RenderSummary {
    /// True iff no code point failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    fn absorb(&mut self, outcome: &ShardOutcome) {
        self.written += outcome.written();
        self.failed += outcome.errors;
    }
}

type ProgressFn = Box<dyn Fn(&RenderProgress) + Send + Sync>;

/// Renders a list of accepted code points into `<out_dir>/<HEX>.svg`.
pub struct RenderEngine<S = FontResource> {
    provider: IndexProvider<S>,
    params: RenderParams,
    out_dir: PathBuf,
    workers: usize,
    progress: Option<ProgressFn>,
}

impl<S: GlyphSource> RenderEngine<S> {
    pub fn new(provider: IndexProvider<S>, params: RenderParams, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            params,
            out_dir: out_dir.into(),
            workers: 1,
            progress: None,
        }
    }

    /// Number of worker threads (0 is treated as 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Observer called on the coordinating thread after each shard.
    pub fn with_progress(mut self, observer: impl Fn(&RenderProgress) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(observer));
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Render every code point in `accepted`.
    ///
    /// Per-glyph failures never abort the run; they are counted in the
    /// returned summary. `written + failed` always equals the number of
    /// accepted code points.
    ///
    /// # Errors
    ///
    /// [`RenderError`] only when the run cannot start: invalid parameters
    /// or an output directory that cannot be created.
    pub fn run(&self, accepted: &[u32]) -> Result<RenderSummary, RenderError> {
        self.params.validate()?;
        fs::create_dir_all(&self.out_dir).map_err(|source| RenderError::OutputDir {
            path: self.out_dir.clone(),
            source,
        })?;

        let shards = partition(accepted, self.workers);
        log::info!(
            "Rendering {} code point(s) with {} worker(s) into {}",
            accepted.len(),
            shards.len(),
            self.out_dir.display()
        );

        let mut outcomes = self.dispatch(&shards, accepted.len());
        outcomes.sort_by_key(|outcome| outcome.shard_index);

        let mut summary = RenderSummary {
            requested: accepted.len(),
            ..RenderSummary::default()
        };
        for outcome in &outcomes {
            summary.absorb(outcome);
            summary.errors.extend(outcome.messages.iter().cloned());
        }

        log::info!(
            "Render finished: {} written, {} failed of {}",
            summary.written,
            summary.failed,
            summary.requested
        );
        Ok(summary)
    }

    /// Run one worker per shard and collect their outcomes in completion
    /// order. Per-glyph panics are caught inside the shard loop; a shard
    /// whose worker failed to spawn, or panicked before rendering (for
    /// example while loading its index), is reported as entirely failed.
    fn dispatch(&self, shards: &[&[u32]], requested: usize) -> Vec<ShardOutcome> {
        let provider = &self.provider;
        let params = &self.params;
        let out_dir = self.out_dir.as_path();
        let mut outcomes = Vec::with_capacity(shards.len());
        let mut progress = RenderProgress {
            shards_done: 0,
            shards_total: shards.len(),
            processed: 0,
            requested,
        };

        thread::scope(|scope| {
            let (tx, rx) = mpsc::channel::<ShardOutcome>();
            let mut handles = Vec::with_capacity(shards.len());

            for (shard_index, &items) in shards.iter().enumerate() {
                let tx = tx.clone();
                let spawned = thread::Builder::new()
                    .name(format!("glyph-worker-{shard_index}"))
                    .spawn_scoped(scope, move || {
                        let outcome = provider.run(shard_index, items, params, out_dir);
                        let _ = tx.send(outcome);
                    });
                match spawned {
                    Ok(handle) => handles.push((shard_index, handle)),
                    Err(e) => {
                        log::error!("Failed to spawn worker for shard {shard_index}: {e}");
                        outcomes.push(ShardOutcome::abandoned(
                            shard_index,
                            items.len(),
                            &format!("worker failed to start: {e}"),
                        ));
                    }
                }
            }
            drop(tx);

            let mut reported = HashSet::with_capacity(shards.len());
            for outcome in rx {
                reported.insert(outcome.shard_index);
                progress.shards_done += 1;
                progress.processed += outcome.processed;
                if let Some(observer) = &self.progress {
                    observer(&progress);
                }
                outcomes.push(outcome);
            }

            for (shard_index, handle) in handles {
                if handle.join().is_err() && !reported.contains(&shard_index) {
                    log::error!("Worker for shard {shard_index} panicked");
                    outcomes.push(ShardOutcome::abandoned(
                        shard_index,
                        shards[shard_index].len(),
                        "worker panicked",
                    ));
                }
            }
        });

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphmint_fonts::testing::FixedSource;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn index() -> CoverageIndex<FixedSource> {
        let covered: Vec<u32> = (0x4E00..0x4E20).collect();
        CoverageIndex::from_sources(vec![FixedSource::square("F", &covered)])
    }

    #[test]
    fn test_progress_reaches_total() {
        let tmp = TempDir::new().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let accepted: Vec<u32> = (0x4E00..0x4E10).collect();

        let provider = IndexProvider::shared(index());
        let summary = RenderEngine::new(provider, RenderParams::default(), tmp.path())
            .with_workers(4)
            .with_progress(move |p| sink.lock().unwrap().push(*p))
            .run(&accepted)
            .unwrap();

        assert!(summary.is_success());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        let last = seen.last().unwrap();
        assert_eq!(last.shards_done, 4);
        assert_eq!(last.processed, 16);
    }

    #[test]
    fn test_invalid_params_stop_before_writing() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let params = RenderParams {
            padding: 64,
            ..RenderParams::default()
        };
        let err = RenderEngine::new(IndexProvider::shared(index()), params, &out)
            .run(&[0x4E00])
            .unwrap_err();
        assert!(matches!(err, RenderError::Params(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let summary = RenderSummary {
            requested: 3,
            written: 2,
            failed: 1,
            errors: vec!["U+4E02: no font covers U+4E02".to_string()],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["requested"], 3);
        assert_eq!(json["written"], 2);
        assert_eq!(json["failed"], 1);
        assert_eq!(json["errors"][0], "U+4E02: no font covers U+4E02");
    }
}
