//! Work partitioning and per-shard result records.

use std::fmt;

use glyphmint_config::format_code_point;

/// Maximum number of error messages a shard keeps.
pub const SHARD_ERROR_SAMPLES: usize = 5;

/// Split `items` into at most `workers` contiguous, non-overlapping shards.
///
/// Produces `min(workers, items.len())` shards; the first
/// `items.len() % shards` of them hold one extra element. Concatenating the
/// shards in order gives back `items`. `workers == 0` is treated as 1 and
/// an empty input yields no shards.
pub fn partition<T>(items: &[T], workers: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }
    let count = workers.max(1).min(items.len());
    let base = items.len() / count;
    let extra = items.len() % count;

    let mut shards = Vec::with_capacity(count);
    let mut rest = items;
    for i in 0..count {
        let (head, tail) = rest.split_at(base + usize::from(i < extra));
        shards.push(head);
        rest = tail;
    }
    shards
}

/// What one worker reports back for its shard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardOutcome {
    /// Position of the shard in the partition.
    pub shard_index: usize,
    /// Items attempted, successful or not.
    pub processed: usize,
    /// Items that failed.
    pub errors: usize,
    /// The first [`SHARD_ERROR_SAMPLES`] failures as `U+XXXX: cause`.
    pub messages: Vec<String>,
}

impl ShardOutcome {
    pub fn new(shard_index: usize) -> Self {
        Self {
            shard_index,
            processed: 0,
            errors: 0,
            messages: Vec::new(),
        }
    }

    /// A shard whose worker never reported: every item counts as failed.
    pub fn abandoned(shard_index: usize, len: usize, cause: &str) -> Self {
        Self {
            shard_index,
            processed: len,
            errors: len,
            messages: vec![format!("shard {shard_index}: {cause}")],
        }
    }

    pub fn record_success(&mut self) {
        self.processed += 1;
    }

    pub fn record_failure(&mut self, code_point: u32, cause: impl fmt::Display) {
        self.processed += 1;
        self.errors += 1;
        if self.messages.len() < SHARD_ERROR_SAMPLES {
            self.messages
                .push(format!("{}: {cause}", format_code_point(code_point)));
        }
    }

    /// Items written successfully.
    pub fn written(&self) -> usize {
        self.processed - self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_is_lossless() {
        let items: Vec<u32> = (0..23).collect();
        for workers in 0..30 {
            let shards = partition(&items, workers);
            let rebuilt: Vec<u32> = shards.iter().flat_map(|s| s.iter().copied()).collect();
            assert_eq!(rebuilt, items, "workers = {workers}");
            assert_eq!(shards.len(), workers.max(1).min(items.len()));
            assert!(shards.iter().all(|s| !s.is_empty()));
        }
    }

    #[test]
    fn test_partition_sizes() {
        let items: Vec<u32> = (0..10).collect();
        let sizes: Vec<usize> = partition(&items, 4).iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![3, 3, 2, 2]);

        let sizes: Vec<usize> = partition(&items, 3).iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
    }

    #[test]
    fn test_partition_edge_cases() {
        let empty: [u32; 0] = [];
        assert!(partition(&empty, 4).is_empty());

        let items = [7u32, 8, 9];
        assert_eq!(partition(&items, 0), vec![&items[..]]);
        assert_eq!(partition(&items, 8).len(), 3);
    }

    #[test]
    fn test_outcome_samples_first_messages() {
        let mut outcome = ShardOutcome::new(2);
        outcome.record_success();
        for cp in 0x4E00..0x4E08 {
            outcome.record_failure(cp, "boom");
        }
        assert_eq!(outcome.processed, 9);
        assert_eq!(outcome.errors, 8);
        assert_eq!(outcome.written(), 1);
        assert_eq!(outcome.messages.len(), SHARD_ERROR_SAMPLES);
        assert_eq!(outcome.messages[0], "U+4E00: boom");
    }

    #[test]
    fn test_abandoned_shard_fails_everything() {
        let outcome = ShardOutcome::abandoned(1, 4, "worker panicked");
        assert_eq!(outcome.processed, 4);
        assert_eq!(outcome.errors, 4);
        assert_eq!(outcome.written(), 0);
        assert_eq!(outcome.messages, vec!["shard 1: worker panicked"]);
    }
}
