//! # `chromatic` — lock-free chromatic scheduling for graph-parallel engines
//!
//! Given a graph whose vertices carry a proper coloring (no edge joins two
//! vertices of the same color), this crate decides which vertex each of N
//! worker threads processes next, guaranteeing that workers never touch
//! adjacent vertices concurrently. No locks anywhere on the polling path:
//!
//! 1. Vertices are partitioned into per-color buckets once, up front.
//! 2. Workers sweep the buckets in lockstep *rounds*, one color per round.
//!    Within a round, worker `w` owns bucket positions `w, w + N, w + 2N, …`
//!    (stride partitioning), so positions never overlap.
//! 3. A worker that exhausts its share arrives at a round barrier held in a
//!    single atomic word; the last arrival advances every worker to the
//!    next color.
//!
//! The scheduler applies one globally configured update function uniformly
//! to every vertex of a round. It does not queue per-vertex tasks, assign
//! priorities, or re-color the graph; the graph, its coloring, the update
//! function, and the thread pool driving [`ChromaticScheduler::poll`] all
//! belong to the surrounding engine.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chromatic::{ChromaticScheduler, Poll, SchedulerOption};
//!
//! // Path graph 0-1-2-3 admits the 2-coloring {0,1,0,1}.
//! let colors = vec![0usize, 1, 0, 1];
//! let mut scheduler = ChromaticScheduler::new(&colors[..], 1);
//!
//! scheduler.set_option(SchedulerOption::UpdateFunction(Arc::new(|vertex, _cb| {
//!     println!("updating vertex {vertex}");
//! })))?;
//! scheduler.set_option(SchedulerOption::MaxIterations(1))?;
//! scheduler.start()?;
//!
//! let callback = scheduler.get_callback(0);
//! loop {
//!     match scheduler.poll(0) {
//!         Poll::NewTask(task) => {
//!             task.run(callback);
//!             scheduler.completed_task(0, &task);
//!         }
//!         Poll::Waiting => continue,
//!         Poll::Complete => break,
//!     }
//! }
//! # Ok::<(), chromatic::SchedulerError>(())
//! ```
//!
//! ## Concurrency model
//!
//! `poll` is synchronous and non-blocking; it returns [`Poll::Waiting`]
//! instead of suspending, and any backoff between waits is the engine's
//! business. The only state written by more than one thread is the packed
//! barrier word; per-worker cursors are single-writer cells, cache-padded
//! against false sharing. The round barrier model-checks under
//! [loom](https://docs.rs/loom) (`cargo xtask loom`).

pub mod error;
pub mod graph;
pub mod partition;
pub mod scheduler;
pub(crate) mod sync;

pub use error::SchedulerError;
pub use graph::{ColoredAdjacencyGraph, ColoredGraph};
pub use partition::ColorPartition;
pub use scheduler::{
    ChromaticScheduler, Poll, SchedulerCallback, SchedulerOption, SchedulerStats, UpdateFn,
    UpdateTask,
};
