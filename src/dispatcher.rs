//! # Batch Dispatcher
//!
//! Runs a [`JobBatch`] on a fixed pool of worker threads.
//!
//! ## Scheduling
//!
//! - The pool has exactly `threads` workers; each blocks on one encoder
//!   process at a time, so at most `threads` encoders run at once
//! - Every task is submitted up front without waiting on any of them; tasks
//!   beyond the worker count queue inside the pool
//! - A failed task never stops its siblings
//! - [`Dispatcher::run`] returns only once every submitted task has finished
//!
//! There is no timeout: a hung encoder holds its worker until it exits.

use crate::encoder::Transcode;
use crate::job::{process_task, JobBatch, OriginalStatus, TaskOutcome};
use anyhow::{Context, Result};
use log::{debug, info};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::mpsc;

/// Default number of parallel encoder processes.
pub const DEFAULT_THREADS: usize = 4;

/// Tally of a finished batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub converted: usize,
    pub failed: usize,
    pub deleted: usize,
    pub delete_failed: usize,
}

impl BatchReport {
    fn record(&mut self, outcome: &TaskOutcome) {
        match outcome {
            TaskOutcome::Converted { original, .. } => {
                self.converted += 1;
                match original {
                    OriginalStatus::Kept => {}
                    OriginalStatus::Deleted => self.deleted += 1,
                    OriginalStatus::DeleteFailed(_) => self.delete_failed += 1,
                }
            }
            TaskOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.converted + self.failed
    }
}

/// Bounded worker pool for conversion tasks.
pub struct Dispatcher {
    pool: ThreadPool,
    threads: usize,
}

impl Dispatcher {
    /// Build a pool with `threads` workers.
    ///
    /// # Errors
    ///
    /// Fails if `threads` is zero or the OS refuses to spawn the workers.
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            anyhow::bail!("Thread count must be at least 1");
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("tunesmith-worker-{i}"))
            .build()
            .with_context(|| format!("Failed to start a pool of {threads} worker threads"))?;

        Ok(Self { pool, threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Run every task in `batch`, calling `on_done` from the worker as each finishes.
    ///
    /// Blocks until all tasks have completed.
    pub fn run_with<T, F>(&self, batch: JobBatch, transcoder: &T, on_done: F) -> BatchReport
    where
        T: Transcode + ?Sized,
        F: Fn(&TaskOutcome) + Sync,
    {
        let (tasks, conflicts) = batch.into_parts();
        info!("Dispatching {} tasks on {} workers", tasks.len(), self.threads);

        let mut report = BatchReport::default();
        for conflict in conflicts {
            let outcome = conflict.into_outcome();
            on_done(&outcome);
            report.record(&outcome);
        }

        let (tx, rx) = mpsc::channel();
        let on_done = &on_done;

        // The scope joins every spawned task before returning.
        self.pool.scope(move |scope| {
            for task in tasks {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let outcome = process_task(transcoder, &task);
                    on_done(&outcome);
                    // Receiver outlives the scope, so this cannot fail.
                    let _ = tx.send(outcome);
                });
            }
        });

        for outcome in rx {
            report.record(&outcome);
        }

        debug!("Batch finished: {report:?}");
        report
    }

    /// [`run_with`](Self::run_with), printing each task's status line to stdout.
    pub fn run<T: Transcode + ?Sized>(&self, batch: JobBatch, transcoder: &T) -> BatchReport {
        self.run_with(batch, transcoder, |outcome| println!("{outcome}"))
    }
}
