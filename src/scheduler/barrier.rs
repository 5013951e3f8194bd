//! The round barrier: one packed atomic word driving round transitions.
//!
//! A classic two-counter barrier (separate epoch and waiting-count atomics,
//! with the last arrival storing `waiting = 0` and then bumping the epoch)
//! has a visibility hole under weak ordering: another worker can observe
//! the new epoch while the count reset is still in flight, or an arrival
//! for the next round can land between the reset and the bump. Packing both
//! counters into one word closes the hole — "last arrival zeroes the count
//! and advances the epoch" becomes a single compare-and-swap.

use crate::sync::{AtomicU64, Ordering};

const WAITING_BITS: u32 = 32;
const WAITING_MASK: u64 = (1 << WAITING_BITS) - 1;

/// Round-transition barrier for a fixed set of workers.
///
/// The high 32 bits of the word hold the round epoch (monotonic), the low
/// 32 bits the number of workers currently waiting on that round. Each
/// worker arrives at most once per round, so the waiting count never
/// reaches `total_workers` without advancing.
pub(crate) struct RoundBarrier {
    state: AtomicU64,
    total_workers: u64,
}

impl RoundBarrier {
    pub(crate) fn new(total_workers: usize) -> Self {
        debug_assert!(total_workers > 0);
        Self {
            state: AtomicU64::new(0),
            total_workers: total_workers as u64,
        }
    }

    /// The current round epoch.
    ///
    /// Acquire pairs with the AcqRel advance in [`arrive`](Self::arrive): a
    /// worker that reads epoch `r + 1` here also sees every write made by
    /// workers that arrived during round `r`.
    pub(crate) fn epoch(&self) -> u64 {
        self.state.load(Ordering::Acquire) >> WAITING_BITS
    }

    /// Number of workers waiting on the current round.
    pub(crate) fn waiting(&self) -> usize {
        (self.state.load(Ordering::Relaxed) & WAITING_MASK) as usize
    }

    /// Records that the calling worker has exhausted its share of the
    /// current round's bucket.
    ///
    /// The last of `total_workers` arrivals advances the epoch and zeroes
    /// the waiting count in the same compare-and-swap, so no observer can
    /// pair the new epoch with a stale count. Returns `true` when this call
    /// advanced the round.
    pub(crate) fn arrive(&self) -> bool {
        let mut current = self.state.load(Ordering::Relaxed);
        loop {
            let waiting = current & WAITING_MASK;
            debug_assert!(
                waiting < self.total_workers,
                "worker arrived twice in one round"
            );
            let last = waiting + 1 == self.total_workers;
            let next = if last {
                // Advance the epoch, waiting count back to zero.
                ((current >> WAITING_BITS).wrapping_add(1)) << WAITING_BITS
            } else {
                current + 1
            };
            match self.state.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return last,
                Err(observed) => current = observed,
            }
        }
    }

    /// Zeroes the waiting count while keeping the epoch.
    ///
    /// Only called from `start`, before any worker polls; the epoch is
    /// deliberately preserved so a restarted schedule resumes from the
    /// counter's current value.
    pub(crate) fn reset_waiting(&self) {
        let epoch = self.state.load(Ordering::Relaxed) >> WAITING_BITS;
        self.state.store(epoch << WAITING_BITS, Ordering::Release);
    }
}

#[cfg(all(test, loom))]
mod loom_tests {
    use std::sync::Arc;

    use loom::thread;

    use super::*;

    /// Every interleaving of two concurrent arrivals ends with the epoch
    /// advanced and the waiting count at zero; no observer can pair the new
    /// epoch with a stale count because both live in one word.
    #[test]
    fn concurrent_arrivals_advance_exactly_once() {
        loom::model(|| {
            let barrier = Arc::new(RoundBarrier::new(2));

            let observer = {
                let barrier = barrier.clone();
                thread::spawn(move || {
                    // A snapshot is one load, so epoch and count are always
                    // mutually consistent.
                    let state = barrier.state.load(Ordering::Acquire);
                    let epoch = state >> WAITING_BITS;
                    let waiting = state & WAITING_MASK;
                    assert!(waiting <= 2);
                    if epoch > 0 {
                        assert_eq!(waiting, 0);
                    }
                })
            };

            let peer = {
                let barrier = barrier.clone();
                thread::spawn(move || barrier.arrive())
            };
            let here = barrier.arrive();
            let there = peer.join().unwrap();
            observer.join().unwrap();

            // Exactly one of the two arrivals triggered the advance.
            assert!(here ^ there);
            assert_eq!(barrier.epoch(), 1);
            assert_eq!(barrier.waiting(), 0);
        });
    }
}
