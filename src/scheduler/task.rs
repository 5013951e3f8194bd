//! Update tasks and the (inert) scheduling callback.

use std::fmt;
use std::sync::Arc;

/// The globally configured per-vertex update function.
///
/// The chromatic scheduler applies one function uniformly to every vertex
/// of a round; there is no per-vertex function dispatch. The callback
/// argument is the inert [`SchedulerCallback`] handle.
pub type UpdateFn = Arc<dyn Fn(usize, &SchedulerCallback) + Send + Sync>;

/// A scheduled unit of work: one vertex bound to the update function.
#[derive(Clone)]
pub struct UpdateTask {
    vertex: usize,
    function: UpdateFn,
}

impl UpdateTask {
    /// Binds `vertex` to `function`.
    pub fn new(vertex: usize, function: UpdateFn) -> Self {
        Self { vertex, function }
    }

    /// The vertex this task updates.
    pub fn vertex(&self) -> usize {
        self.vertex
    }

    /// The bound update function.
    pub fn function(&self) -> &UpdateFn {
        &self.function
    }

    /// Runs the update function on this task's vertex.
    pub fn run(&self, callback: &SchedulerCallback) {
        (self.function)(self.vertex, callback);
    }
}

impl fmt::Debug for UpdateTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateTask")
            .field("vertex", &self.vertex)
            .finish_non_exhaustive()
    }
}

/// Result of a [`poll`](crate::ChromaticScheduler::poll) call.
#[derive(Debug, Clone)]
pub enum Poll {
    /// A vertex to process now.
    NewTask(UpdateTask),
    /// No work for this worker yet; poll again. Backoff between waits is
    /// the engine's responsibility — the scheduler never blocks.
    Waiting,
    /// This worker is done until the next `start`.
    Complete,
}

/// Scheduling callback handed to update functions.
///
/// For the chromatic scheduler this handle is **inert**: the schedule is
/// fixed entirely by the coloring, so update functions cannot insert tasks.
/// The methods accept and discard their arguments so update functions
/// written against dynamic schedulers still run unchanged.
#[derive(Debug, Default)]
pub struct SchedulerCallback {
    _private: (),
}

impl SchedulerCallback {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }

    /// Accepted and discarded: this scheduler does not support dynamic task
    /// insertion.
    pub fn add_task(&self, _vertex: usize, _priority: f64) {}

    /// Accepted and discarded: this scheduler does not support dynamic task
    /// insertion.
    pub fn add_tasks(&self, _vertices: &[usize], _priority: f64) {}
}
