//! Loom models of the polling protocol. Run with `cargo xtask loom`
//! (needs `RUSTFLAGS="--cfg loom"`, which the xtask sets up).
#![cfg(loom)]

use std::sync::Arc;

use chromatic::{ChromaticScheduler, Poll, SchedulerOption};
use loom::sync::atomic::{AtomicUsize, Ordering};
use loom::thread;

fn bounded_scheduler(colors: &[usize], workers: usize) -> Arc<ChromaticScheduler> {
    let mut scheduler = ChromaticScheduler::new(colors, workers);
    scheduler.add_task_to_all(Arc::new(|_, _| {}), 1.0);
    scheduler
        .set_option(SchedulerOption::MaxIterations(1))
        .unwrap();
    scheduler.start().unwrap();
    Arc::new(scheduler)
}

fn run_worker(scheduler: &ChromaticScheduler, worker: usize, served: &[AtomicUsize]) {
    loop {
        match scheduler.poll(worker) {
            Poll::NewTask(task) => {
                served[task.vertex()].fetch_add(1, Ordering::Relaxed);
            }
            Poll::Waiting => thread::yield_now(),
            Poll::Complete => break,
        }
    }
}

/// Two workers, one color, two vertices: every interleaving serves each
/// vertex exactly once and both workers terminate.
#[test]
fn single_color_sweep_serves_each_vertex_once() {
    loom::model(|| {
        let scheduler = bounded_scheduler(&[0, 0], 2);
        let served: Arc<Vec<AtomicUsize>> =
            Arc::new((0..2).map(|_| AtomicUsize::new(0)).collect());

        let handle = {
            let scheduler = scheduler.clone();
            let served = served.clone();
            thread::spawn(move || run_worker(&scheduler, 1, &served))
        };
        run_worker(&scheduler, 0, &served);
        handle.join().unwrap();

        assert_eq!(served[0].load(Ordering::Relaxed), 1);
        assert_eq!(served[1].load(Ordering::Relaxed), 1);
        // The final overrun advanced the round with the count zeroed in the
        // same atomic step.
        let stats = scheduler.stats();
        assert_eq!(stats.epoch, 1);
        assert_eq!(stats.waiting_workers, 0);
    });
}

/// Two colors force a round transition mid-run: the worker that loses the
/// arrival race must still observe the advanced round and take its share of
/// the second bucket.
#[test]
fn round_transition_hands_out_the_next_bucket() {
    loom::model(|| {
        let scheduler = bounded_scheduler(&[0, 1], 2);
        let served: Arc<Vec<AtomicUsize>> =
            Arc::new((0..2).map(|_| AtomicUsize::new(0)).collect());

        let handle = {
            let scheduler = scheduler.clone();
            let served = served.clone();
            thread::spawn(move || run_worker(&scheduler, 1, &served))
        };
        run_worker(&scheduler, 0, &served);
        handle.join().unwrap();

        assert_eq!(served[0].load(Ordering::Relaxed), 1);
        assert_eq!(served[1].load(Ordering::Relaxed), 1);
        assert_eq!(scheduler.stats().epoch, 2);
    });
}
