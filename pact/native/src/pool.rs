//! Pool assembly for the native backend.
//!
//! [`PoolConfig`] is the one-stop builder: it sizes the per-worker queues,
//! names and configures the worker threads, and hands the assembled parts
//! to the round-robin engine.

use pact_core::{Envelope, Task, ThreadConfig, ThreadError};

use crate::queue::Queue;
use crate::thread::Thread;

/// Round-robin pool over native queues and threads.
pub type ThreadPool = pact_core::ThreadPool<Queue<Envelope<Task>>, Thread>;

/// Builder for a [`ThreadPool`].
///
/// Worker threads are named `{prefix}-{index}`, counting from zero.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    /// Number of worker threads.
    pub workers: usize,
    /// Per-worker mailbox capacity.
    pub queue_capacity: usize,
    /// Thread name prefix.
    pub name_prefix: String,
    /// Stack size per worker, zero for the host default.
    pub stack_size: usize,
    /// Scheduling priority hint, ignored on hosts without one.
    pub priority: u8,
}

impl PoolConfig {
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        Self {
            workers,
            queue_capacity,
            name_prefix: String::from("pact-pool"),
            stack_size: 0,
            priority: 0,
        }
    }

    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = bytes;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Allocates the queues, spawns the workers and starts the pool.
    ///
    /// # Panics
    ///
    /// Panics if `workers` or `queue_capacity` is zero.
    pub fn build(self) -> Result<ThreadPool, ThreadError> {
        let parts = (0..self.workers)
            .map(|index| {
                let config = ThreadConfig::new(format!("{}-{}", self.name_prefix, index))
                    .with_stack_size(self.stack_size)
                    .with_priority(self.priority);
                (Queue::new(self.queue_capacity), Thread::new(config))
            })
            .collect();
        pact_core::ThreadPool::start(parts)
    }
}

/// Convenience shorthand for [`PoolConfig::build`] with default naming.
pub fn pool(workers: usize, queue_capacity: usize) -> Result<ThreadPool, ThreadError> {
    PoolConfig::new(workers, queue_capacity).build()
}
