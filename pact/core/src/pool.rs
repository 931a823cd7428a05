//! Generic thread pool: a fixed set of workers, each an active-object-style
//! loop over its own private pump.
//!
//! Dispatch is static round-robin — the k-th successful submission goes to
//! worker `k mod R` — so tasks on one worker run strictly sequentially in
//! submission order while distinct workers run in parallel. The pool is not
//! load-aware, gives no cross-worker ordering, and signals no completion; a
//! task that must be awaited carries its own signal.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::{CapacityExceeded, ThreadError};
use crate::pump::{Envelope, MessagePump};
use crate::sync::Mutex;
use crate::thread::JoinableThread;

/// Parameterless deferred unit of work.
pub type Task = Box<dyn FnOnce() + Send>;

/// Fixed-size worker pool with round-robin dispatch.
pub struct ThreadPool<Q, T>
where
    Q: MessagePump<Envelope<Task>>,
    T: JoinableThread,
{
    pumps: Vec<Q>,
    runners: Vec<T>,
    submissions: Mutex<usize>,
}

impl<Q, T> ThreadPool<Q, T>
where
    Q: MessagePump<Envelope<Task>>,
    T: JoinableThread,
{
    /// Starts one worker loop per `(pump, runner)` pair.
    ///
    /// If a runner refuses to start, every already-started worker is
    /// stopped and joined before the error surfaces, so no worker outlives
    /// a failed construction.
    ///
    /// # Panics
    ///
    /// Panics if `parts` is empty.
    pub fn start(parts: Vec<(Q, T)>) -> Result<Self, ThreadError> {
        assert!(!parts.is_empty(), "a pool needs at least one worker");
        let mut pumps = Vec::with_capacity(parts.len());
        let mut runners = Vec::with_capacity(parts.len());
        for (pump, mut runner) in parts {
            let feed = pump.clone();
            let outcome = runner.start(Box::new(move || loop {
                match feed.receive() {
                    Envelope::Message(task) => task(),
                    Envelope::Quit => break,
                }
            }));
            match outcome {
                Ok(()) => {
                    pumps.push(pump);
                    runners.push(runner);
                }
                Err(err) => {
                    log::error!("pool construction aborted: {}", err);
                    Self::stop_workers(&pumps, &mut runners);
                    return Err(err);
                }
            }
        }
        Ok(Self {
            pumps,
            runners,
            submissions: Mutex::new(0),
        })
    }

    /// Number of workers.
    pub fn workers(&self) -> usize {
        self.runners.len()
    }

    /// Submits a task to the worker picked by the round-robin counter.
    ///
    /// The counter advances only on success: a refused submission hands the
    /// task back and a retry targets the same worker again.
    pub fn execute<F>(&self, task: F) -> Result<(), CapacityExceeded<Task>>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut submissions = self.submissions.lock();
        let target = *submissions % self.pumps.len();
        match self.pumps[target].send(Envelope::Message(Box::new(task))) {
            Ok(()) => {
                *submissions += 1;
                Ok(())
            }
            Err(refused) => match refused.into_inner() {
                Envelope::Message(task) => Err(CapacityExceeded(task)),
                Envelope::Quit => unreachable!("submissions carry Message envelopes"),
            },
        }
    }

    fn stop_workers(pumps: &[Q], runners: &mut [T]) {
        for pump in pumps {
            if pump.send_reserved(Envelope::Quit).is_err() {
                log::warn!("pool shutdown slot occupied; joining anyway");
            }
        }
        for runner in runners {
            if let Err(err) = runner.join() {
                log::debug!("pool runner join skipped: {}", err);
            }
        }
    }
}

impl<Q, T> Drop for ThreadPool<Q, T>
where
    Q: MessagePump<Envelope<Task>>,
    T: JoinableThread,
{
    fn drop(&mut self) {
        Self::stop_workers(&self.pumps, &mut self.runners);
    }
}
