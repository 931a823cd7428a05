//! Native backend: the toolkit's primitives on `std` threads and locks.
//!
//! This crate pairs the portable engines of `pact-core` with host-backed
//! building blocks:
//!
//! - [`Queue`]: bounded blocking queue with task and interrupt send paths
//! - [`Thread`]: joinable-or-detached thread with an explicit lifecycle
//! - [`Active`]: active object draining a private mailbox on its own thread
//! - [`ThreadPool`] / [`PoolConfig`]: round-robin worker pool
//! - [`EventGroup`]: multi-bit event word with consuming waits
//! - [`Flag`]: one-bit gate for cross-thread completion signalling
//! - [`DelayedJob`]: one-shot closure fired after a delay
//! - [`poll`]: fixed-interval condition polling on the host clock
//!
//! Everything callers need from `pact-core` is re-exported here, so a
//! native build depends on this crate alone.

#![forbid(unsafe_code)]

use std::time::Duration;

mod delayed_job;
mod event_group;
mod flag;
mod pool;
mod queue;
mod thread;

pub use pact_core::sync;
pub use pact_core::{
    poll_with, BitEvent, Bits, CapacityExceeded, Envelope, EventConfigError, EventMap,
    InterruptSendError, JoinableThread, MessagePump, Task, ThreadConfig, ThreadError,
    ThreadHandler, ThreadState, MAX_EVENT_BITS, VERSION,
};

pub use delayed_job::DelayedJob;
pub use event_group::EventGroup;
pub use flag::Flag;
pub use pool::{pool, PoolConfig, ThreadPool};
pub use queue::Queue;
pub use thread::Thread;

/// Active object running its handler on a native [`Thread`], fed through a
/// native [`Queue`].
pub type Active<M> = pact_core::Active<M, Queue<Envelope<M>>, Thread>;

/// Polls `predicate` every `interval` until it holds or the `timeout`
/// budget is spent, sleeping on the host clock between checks.
///
/// Returns `true` as soon as the predicate holds, `false` once the budget
/// is exhausted. See [`poll_with`] for the check accounting.
pub fn poll<P>(interval: Duration, timeout: Duration, predicate: P) -> bool
where
    P: FnMut() -> bool,
{
    poll_with(interval, timeout, std::thread::sleep, predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    #[test]
    fn poll_returns_once_the_predicate_holds() {
        let checks = AtomicU32::new(0);
        let held = poll(Duration::from_millis(5), Duration::from_millis(500), || {
            checks.fetch_add(1, Ordering::Relaxed) >= 2
        });
        assert!(held);
        assert_eq!(checks.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn poll_gives_up_after_the_timeout() {
        let begun = Instant::now();
        assert!(!poll(
            Duration::from_millis(10),
            Duration::from_millis(50),
            || false
        ));
        assert!(begun.elapsed() >= Duration::from_millis(50));
    }
}
