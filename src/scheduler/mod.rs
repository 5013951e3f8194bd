//! The chromatic scheduler: conflict-free work assignment over a colored
//! graph.
//!
//! Workers sweep the color classes in lockstep rounds. Round `e` processes
//! the bucket for color `e % C`; within the round, worker `w` owns bucket
//! positions `w, w + N, w + 2N, …`. A proper coloring puts no edge inside a
//! bucket, so two workers holding tasks from the same round can never be
//! updating adjacent vertices.
//!
//! Phase discipline is enforced by the borrow checker: configuration and
//! `start` take `&mut self` (one controlling thread, before polling), while
//! `poll`, `stop`, `abort`, `stats` and the callback accessors take `&self`
//! and are safe from any number of worker threads.

mod barrier;
mod cursor;
mod options;
mod task;

pub use options::{SchedulerOption, SchedulerStats};
pub use task::{Poll, SchedulerCallback, UpdateFn, UpdateTask};

use crossbeam_utils::CachePadded;

use crate::error::SchedulerError;
use crate::graph::ColoredGraph;
use crate::partition::ColorPartition;
use crate::sync::{AtomicBool, Ordering};

use barrier::RoundBarrier;
use cursor::WorkerCursor;

/// Lock-free work-assignment core for a fixed pool of worker threads.
///
/// See the [crate docs](crate) for the protocol and an end-to-end example.
pub struct ChromaticScheduler {
    partition: ColorPartition,
    cursors: Box<[CachePadded<WorkerCursor>]>,
    barrier: RoundBarrier,
    completed: AtomicBool,
    update_function: Option<UpdateFn>,
    max_iterations: Option<u64>,
    callback: SchedulerCallback,
}

impl ChromaticScheduler {
    /// Builds a scheduler for `worker_count` threads over `graph`.
    ///
    /// The color partition is constructed here, in one pass over the
    /// vertices. The coloring is trusted: a non-proper coloring is a caller
    /// bug the scheduler does not detect.
    ///
    /// # Panics
    /// Panics if `worker_count == 0`.
    pub fn new<G: ColoredGraph + ?Sized>(graph: &G, worker_count: usize) -> Self {
        Self::from_partition(ColorPartition::from_graph(graph), worker_count)
    }

    /// Builds a scheduler over an already-constructed partition.
    ///
    /// # Panics
    /// Panics if `worker_count == 0`.
    pub fn from_partition(partition: ColorPartition, worker_count: usize) -> Self {
        assert!(worker_count > 0, "scheduler needs at least one worker");
        Self {
            partition,
            cursors: WorkerCursor::slots(worker_count),
            barrier: RoundBarrier::new(worker_count),
            completed: AtomicBool::new(false),
            update_function: None,
            max_iterations: None,
            callback: SchedulerCallback::new(),
        }
    }

    /// The fixed number of workers this scheduler partitions work across.
    pub fn worker_count(&self) -> usize {
        self.cursors.len()
    }

    /// The color partition the schedule sweeps.
    pub fn partition(&self) -> &ColorPartition {
        &self.partition
    }

    /// Applies a configuration option.
    ///
    /// `UpdateFunction` and `MaxIterations` are the only options this
    /// scheduler supports; any other kind is rejected with
    /// [`SchedulerError::UnsupportedOption`] rather than silently ignored.
    pub fn set_option(&mut self, option: SchedulerOption) -> Result<(), SchedulerError> {
        match option {
            SchedulerOption::UpdateFunction(function) => {
                self.update_function = Some(function);
            }
            SchedulerOption::MaxIterations(passes) => {
                self.max_iterations = Some(passes);
            }
            other => return Err(SchedulerError::UnsupportedOption(other.kind())),
        }
        Ok(())
    }

    /// Accepts a task and keeps only its update function.
    ///
    /// The vertex and priority are intentionally discarded: this scheduler
    /// runs one global function over whole color classes, not per-vertex
    /// task dispatch. Callers expecting per-vertex queueing are not
    /// supported by this scheduler variant.
    pub fn add_task(&mut self, task: UpdateTask, _priority: f64) {
        self.update_function = Some(task.function().clone());
    }

    /// Sets the global update function; the vertex list and priority are
    /// intentionally discarded (see [`add_task`](Self::add_task)).
    pub fn add_tasks(&mut self, _vertices: &[usize], function: UpdateFn, _priority: f64) {
        self.update_function = Some(function);
    }

    /// Sets the global update function; the priority is intentionally
    /// discarded (see [`add_task`](Self::add_task)).
    pub fn add_task_to_all(&mut self, function: UpdateFn, _priority: f64) {
        self.update_function = Some(function);
    }

    /// Prepares the schedule for a polling phase.
    ///
    /// Every worker cursor is reset to its base stride offset against the
    /// barrier's current epoch (the epoch itself is not rewound, so a
    /// restart resumes bucket traversal from wherever the counter stands),
    /// the barrier's waiting count is cleared, and the completed flag is
    /// lowered. The scheduler is restartable: `start` after `stop` yields a
    /// fresh polling phase.
    ///
    /// # Errors
    /// [`SchedulerError::MissingUpdateFunction`] if no update function has
    /// been configured.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.update_function.is_none() {
            return Err(SchedulerError::MissingUpdateFunction);
        }
        let epoch = self.barrier.epoch();
        for (worker, cursor) in self.cursors.iter().enumerate() {
            cursor.begin_round(worker, epoch);
        }
        self.barrier.reset_waiting();
        self.completed.store(false, Ordering::Release);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            epoch,
            workers = self.worker_count(),
            colors = self.partition.color_count(),
            "schedule started"
        );
        Ok(())
    }

    /// Ends the polling phase: every subsequent `poll` returns
    /// [`Poll::Complete`] until the next `start`. Idempotent, and safe to
    /// call while workers are polling; a worker mid-update is never
    /// interrupted, it simply observes the flag on its next poll.
    pub fn stop(&self) {
        self.completed.store(true, Ordering::Release);

        #[cfg(feature = "tracing")]
        tracing::trace!("schedule stopped");
    }

    /// Equivalent to [`stop`](Self::stop) for this scheduler: there are no
    /// queued per-vertex tasks to cancel, so pending work is simply never
    /// polled again.
    pub fn abort(&self) {
        self.stop();
    }

    /// Asks for the next unit of work for `worker`.
    ///
    /// Called repeatedly by worker `worker` from its own thread. Returns
    /// [`Poll::NewTask`] with a vertex to process, [`Poll::Waiting`] while
    /// the round has not advanced yet, or [`Poll::Complete`] once this
    /// worker is done (stopped, aborted, or out of iterations).
    ///
    /// Termination from `MaxIterations` is decided per worker from its own
    /// observed epoch: a worker that has exhausted its allotment of full
    /// passes completes immediately, without waiting for its peers.
    ///
    /// # Panics
    /// Panics if `worker >= worker_count()`.
    pub fn poll(&self, worker: usize) -> Poll {
        let cursor = &*self.cursors[worker];
        if self.completed.load(Ordering::Acquire) {
            return Poll::Complete;
        }

        let round = self.barrier.epoch();
        if cursor.is_waiting() {
            if cursor.epoch() == round {
                // Nothing has changed globally; keep waiting.
                return Poll::Waiting;
            }
            // The round advanced since this worker last looked: restart the
            // stride partition at its base offset for the new round.
            cursor.begin_round(worker, round);
        }

        let colors = self.partition.color_count();
        if colors == 0 {
            // Colorless partition (empty graph): nothing to schedule, ever.
            return Poll::Complete;
        }

        let epoch = cursor.epoch();
        if let Some(max) = self.max_iterations {
            if epoch / colors as u64 >= max {
                return Poll::Complete;
            }
        }

        let bucket = self.partition.bucket((epoch % colors as u64) as usize);
        let index = cursor.index();
        if index < bucket.len() {
            let Some(function) = &self.update_function else {
                // Polled without start(); nothing sensible to hand out.
                return Poll::Complete;
            };
            // Serve this position and stride to the next one we own.
            cursor.advance(self.worker_count());
            return Poll::NewTask(UpdateTask::new(bucket[index], function.clone()));
        }

        // Our share of this bucket is exhausted: arrive at the barrier. If
        // we are the last arrival the round advances now; either way this
        // worker picks the new round up on its next poll.
        cursor.set_waiting();
        if self.barrier.arrive() {
            #[cfg(feature = "tracing")]
            tracing::trace!(epoch = self.barrier.epoch(), "round advanced");
        }
        Poll::Waiting
    }

    /// Post-execution hook. No state changes; it exists to complete the
    /// poll/execute/report call pattern engines are written against.
    pub fn completed_task(&self, _worker: usize, _task: &UpdateTask) {}

    /// The scheduling callback to hand to update functions running on
    /// `worker`.
    ///
    /// For this scheduler the callback is inert — it does not support
    /// dynamic task insertion (see [`SchedulerCallback`]).
    pub fn get_callback(&self, _worker: usize) -> &SchedulerCallback {
        &self.callback
    }

    /// Snapshot of current progress; safe from any thread while polling.
    pub fn stats(&self) -> SchedulerStats {
        let epoch = self.barrier.epoch();
        let colors = self.partition.color_count();
        SchedulerStats {
            epoch,
            active_color: if colors > 0 {
                Some((epoch % colors as u64) as usize)
            } else {
                None
            },
            passes: if colors > 0 { epoch / colors as u64 } else { 0 },
            waiting_workers: self.barrier.waiting(),
            total_workers: self.worker_count(),
            colors,
            vertices: self.partition.vertex_count(),
            completed: self.completed.load(Ordering::Acquire),
        }
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn noop() -> UpdateFn {
        Arc::new(|_, _| {})
    }

    #[test]
    fn start_without_update_function_fails() {
        let colors = vec![0usize, 1];
        let mut scheduler = ChromaticScheduler::new(&colors[..], 2);
        assert_eq!(scheduler.start(), Err(SchedulerError::MissingUpdateFunction));

        scheduler.add_task_to_all(noop(), 1.0);
        assert_eq!(scheduler.start(), Ok(()));
    }

    #[test]
    fn unsupported_options_are_rejected() {
        let colors = vec![0usize];
        let mut scheduler = ChromaticScheduler::new(&colors[..], 1);

        assert_eq!(
            scheduler.set_option(SchedulerOption::StartVertex(0)),
            Err(SchedulerError::UnsupportedOption("start_vertex"))
        );
        assert_eq!(
            scheduler.set_option(SchedulerOption::SplashSize(64)),
            Err(SchedulerError::UnsupportedOption("splash_size"))
        );
        assert_eq!(
            scheduler.set_option(SchedulerOption::MaxIterations(3)),
            Ok(())
        );
    }

    #[test]
    fn add_task_variants_all_configure_the_function() {
        let colors = vec![0usize, 1];

        let mut a = ChromaticScheduler::new(&colors[..], 1);
        a.add_task(UpdateTask::new(0, noop()), 10.0);
        assert!(a.start().is_ok());

        let mut b = ChromaticScheduler::new(&colors[..], 1);
        b.add_tasks(&[0, 1], noop(), 0.5);
        assert!(b.start().is_ok());
    }

    #[test]
    fn empty_graph_completes_immediately() {
        let colors: [usize; 0] = [];
        let mut scheduler = ChromaticScheduler::new(&colors[..], 2);
        scheduler.add_task_to_all(noop(), 1.0);
        scheduler.start().unwrap();

        assert!(matches!(scheduler.poll(0), Poll::Complete));
        assert!(matches!(scheduler.poll(1), Poll::Complete));
    }

    #[test]
    #[should_panic(expected = "at least one worker")]
    fn zero_workers_rejected() {
        let colors = vec![0usize];
        let _ = ChromaticScheduler::new(&colors[..], 0);
    }

    #[test]
    fn stats_reflect_partition_shape() {
        let colors = vec![0usize, 1, 0];
        let scheduler = ChromaticScheduler::new(&colors[..], 2);
        let stats = scheduler.stats();

        assert_eq!(stats.epoch, 0);
        assert_eq!(stats.active_color, Some(0));
        assert_eq!(stats.passes, 0);
        assert_eq!(stats.waiting_workers, 0);
        assert_eq!(stats.total_workers, 2);
        assert_eq!(stats.colors, 2);
        assert_eq!(stats.vertices, 3);
        assert!(!stats.completed);
    }
}
