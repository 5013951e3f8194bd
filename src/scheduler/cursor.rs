//! Per-worker cursor slots.

use crossbeam_utils::CachePadded;

use crate::sync::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/// One worker's position within the current round.
///
/// Single-writer: only the owning worker stores to its slot, so Relaxed
/// ordering suffices for every field. The fields are still atomics because
/// the slots live in shared memory — the engine may read any of them from
/// another thread (see `ChromaticScheduler::stats`), it just may never
/// write them.
pub(crate) struct WorkerCursor {
    /// Stride position into the active color's bucket.
    index: AtomicUsize,
    /// The round epoch this worker last observed.
    epoch: AtomicU64,
    /// Set once the worker has arrived at the barrier for this round.
    waiting: AtomicBool,
}

impl WorkerCursor {
    fn new(worker: usize) -> Self {
        Self {
            index: AtomicUsize::new(worker),
            epoch: AtomicU64::new(0),
            waiting: AtomicBool::new(false),
        }
    }

    /// Allocates one cache-padded slot per worker so neighboring cursors
    /// never share a line.
    pub(crate) fn slots(worker_count: usize) -> Box<[CachePadded<WorkerCursor>]> {
        (0..worker_count)
            .map(|w| CachePadded::new(WorkerCursor::new(w)))
            .collect()
    }

    /// Re-enters the stride partition at the base offset for round `epoch`.
    ///
    /// Used both by `start` and when a waiting worker notices the round
    /// advanced. Position `worker` itself is served first; the stride
    /// advance only happens after a position is handed out.
    pub(crate) fn begin_round(&self, worker: usize, epoch: u64) {
        self.index.store(worker, Ordering::Relaxed);
        self.epoch.store(epoch, Ordering::Relaxed);
        self.waiting.store(false, Ordering::Relaxed);
    }

    /// Strides to this worker's next position in the active bucket.
    pub(crate) fn advance(&self, worker_count: usize) {
        let next = self.index.load(Ordering::Relaxed) + worker_count;
        self.index.store(next, Ordering::Relaxed);
    }

    pub(crate) fn index(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Relaxed)
    }

    pub(crate) fn is_waiting(&self) -> bool {
        self.waiting.load(Ordering::Relaxed)
    }

    pub(crate) fn set_waiting(&self) {
        self.waiting.store(true, Ordering::Relaxed);
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn stride_walk_from_base_offset() {
        let slots = WorkerCursor::slots(4);
        let cursor = &slots[1];

        assert_eq!(cursor.index(), 1);
        cursor.advance(4);
        cursor.advance(4);
        assert_eq!(cursor.index(), 9);

        cursor.begin_round(1, 7);
        assert_eq!(cursor.index(), 1);
        assert_eq!(cursor.epoch(), 7);
        assert!(!cursor.is_waiting());
    }
}
