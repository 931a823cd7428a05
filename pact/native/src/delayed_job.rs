//! One-shot delayed job on a dedicated thread.
//!
//! The handle follows the same ownership protocol as [`Thread`]: dropping
//! it waits for the job unless it was detached first.

use std::thread;
use std::time::Duration;

use pact_core::{ThreadConfig, ThreadError};

use crate::thread::Thread;

/// Runs one closure once, `delay` after start.
pub struct DelayedJob {
    worker: Thread,
}

impl DelayedJob {
    /// Schedules `job` on a thread named `pact-delayed-job`.
    pub fn start<F>(delay: Duration, job: F) -> Result<Self, ThreadError>
    where
        F: FnOnce() + Send + 'static,
    {
        Self::start_with(ThreadConfig::new("pact-delayed-job"), delay, job)
    }

    /// Like [`start`](Self::start) with an explicit thread configuration.
    pub fn start_with<F>(config: ThreadConfig, delay: Duration, job: F) -> Result<Self, ThreadError>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut worker = Thread::new(config);
        worker.start(move || {
            thread::sleep(delay);
            job();
        })?;
        Ok(Self { worker })
    }

    /// Blocks until the job has run.
    pub fn join(&mut self) -> Result<(), ThreadError> {
        self.worker.join()
    }

    /// Releases the job to finish on its own; the handle stops waiting.
    pub fn detach(&mut self) -> Result<(), ThreadError> {
        self.worker.detach()
    }
}
