//! Scheduler options and progress introspection.

use std::fmt;

use serde::Serialize;

use super::task::UpdateFn;

/// Options accepted by [`set_option`](crate::ChromaticScheduler::set_option).
///
/// The vocabulary covers the wider scheduler family so engines can route
/// options generically; the chromatic scheduler itself accepts only
/// [`UpdateFunction`](Self::UpdateFunction) and
/// [`MaxIterations`](Self::MaxIterations) and reports everything else as
/// [`SchedulerError::UnsupportedOption`](crate::SchedulerError::UnsupportedOption).
#[non_exhaustive]
pub enum SchedulerOption {
    /// The global per-vertex update function.
    UpdateFunction(UpdateFn),
    /// Number of full passes over all colors before a worker completes.
    /// Unset means unbounded.
    MaxIterations(u64),
    /// Root vertex for traversal-driven schedulers. Unsupported here.
    StartVertex(usize),
    /// Grain size for splash-style schedulers. Unsupported here.
    SplashSize(usize),
}

impl SchedulerOption {
    /// Stable option name, used in error reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpdateFunction(_) => "update_function",
            Self::MaxIterations(_) => "max_iterations",
            Self::StartVertex(_) => "start_vertex",
            Self::SplashSize(_) => "splash_size",
        }
    }
}

impl fmt::Debug for SchedulerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpdateFunction(_) => f.write_str("UpdateFunction(..)"),
            Self::MaxIterations(n) => f.debug_tuple("MaxIterations").field(n).finish(),
            Self::StartVertex(v) => f.debug_tuple("StartVertex").field(v).finish(),
            Self::SplashSize(s) => f.debug_tuple("SplashSize").field(s).finish(),
        }
    }
}

/// Point-in-time snapshot of scheduler progress.
///
/// Assembled from atomic loads, so it is safe to take from any thread while
/// workers poll; fields sampled a transition apart may be one step out of
/// sync with each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulerStats {
    /// Monotonic round counter.
    pub epoch: u64,
    /// Color bucket the current round sweeps (`epoch % colors`), `None`
    /// for a colorless (empty) partition.
    pub active_color: Option<usize>,
    /// Full passes over all colors completed so far.
    pub passes: u64,
    /// Workers currently waiting for the round to advance.
    pub waiting_workers: usize,
    /// Fixed worker count the scheduler was built with.
    pub total_workers: usize,
    /// Number of color buckets.
    pub colors: usize,
    /// Total vertices in the partition.
    pub vertices: usize,
    /// Whether `stop`/`abort` has been observed (or never cleared).
    pub completed: bool,
}
