//! Incremental population batches.

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use posterwall_core::SharedItem;

/// Progress of an incremental population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadProgress {
    /// Items appended so far.
    pub appended: usize,
    /// Items the batch will append in total.
    pub total: usize,
    /// Chunks appended so far.
    pub chunks: u32,
    /// Time since the batch was created.
    pub elapsed: Duration,
}

impl LoadProgress {
    /// Completed fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.appended as f64 / self.total as f64
        }
    }

    /// Items appended per second.
    pub fn items_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.appended as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Outstanding work of one incremental population.
///
/// Appends `chunk_size` items per call to [`next_chunk`](Self::next_chunk)
/// until the source runs out or the batch is cancelled. Cancellation is
/// idempotent and a cancelled batch never yields again.
#[derive(Debug)]
pub struct PendingLoadBatch {
    source: Vec<SharedItem>,
    cursor: usize,
    chunk_size: usize,
    generation: u64,
    token: CancellationToken,
    started: Instant,
    chunks: u32,
}

impl PendingLoadBatch {
    pub fn new(source: Vec<SharedItem>, chunk_size: usize, generation: u64) -> Self {
        Self {
            source,
            cursor: 0,
            chunk_size: chunk_size.max(1),
            generation,
            token: CancellationToken::new(),
            started: Instant::now(),
            chunks: 0,
        }
    }

    /// Ingest generation this batch belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handle that cancels this batch from elsewhere.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// All items were appended.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.source.len()
    }

    pub fn remaining(&self) -> usize {
        self.source.len() - self.cursor
    }

    /// Take the next chunk, or `None` once cancelled or complete.
    pub fn next_chunk(&mut self) -> Option<&[SharedItem]> {
        if self.is_cancelled() || self.is_complete() {
            return None;
        }
        let start = self.cursor;
        let end = (start + self.chunk_size).min(self.source.len());
        self.cursor = end;
        self.chunks += 1;
        Some(&self.source[start..end])
    }

    pub fn progress(&self) -> LoadProgress {
        LoadProgress {
            appended: self.cursor,
            total: self.source.len(),
            chunks: self.chunks,
            elapsed: self.started.elapsed(),
        }
    }
}
