//! Portable thread vocabulary: lifecycle states, construction parameters,
//! and the schedulable-unit capability every backend implements.

use alloc::boxed::Box;
use alloc::string::String;

use crate::error::ThreadError;

/// Boxed entry point handed to a schedulable unit.
pub type ThreadHandler = Box<dyn FnOnce() + Send>;

/// Lifecycle of a joinable/detachable thread wrapper.
///
/// `Running` moves to exactly one of `Joined` or `Detached`, and both are
/// terminal. Joining an already joined thread is a no-op success; every
/// other repeated transition is a lifecycle error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadState {
    /// Constructed, not yet started.
    Created,
    /// The execution context is live, or has finished and awaits a join.
    Running,
    /// The context returned and was joined; join rights are spent.
    Joined,
    /// Join rights were relinquished; the context finishes on its own.
    Detached,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ThreadState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ThreadState::Created => defmt::write!(fmt, "Created"),
            ThreadState::Running => defmt::write!(fmt, "Running"),
            ThreadState::Joined => defmt::write!(fmt, "Joined"),
            ThreadState::Detached => defmt::write!(fmt, "Detached"),
        }
    }
}

/// Construction parameters for a schedulable unit.
///
/// A `stack_size` of zero lets the backend pick its default. `priority` is
/// forwarded to backends with a priority-aware scheduler; backends whose
/// host owns priority policy ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThreadConfig {
    pub name: String,
    pub stack_size: usize,
    pub priority: u8,
}

impl ThreadConfig {
    /// Creates a config with the given context name and backend-default
    /// stack and priority.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stack_size: 0,
            priority: 0,
        }
    }

    /// Sets the stack budget in bytes.
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = bytes;
        self
    }

    /// Sets the scheduling priority for priority-aware backends.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

impl Default for ThreadConfig {
    fn default() -> Self {
        Self::new("pact-thread")
    }
}

/// The schedulable-unit capability: one execution context, started at most
/// once, then joined or detached exactly once.
///
/// Backends implement this over their kernel's task primitive. The generic
/// engines own their workers through this trait and never touch the host
/// directly.
pub trait JoinableThread: Send + 'static {
    /// Starts the execution context with the given entry point.
    ///
    /// Legal exactly once, from the created state. Fails with
    /// [`ThreadError::AlreadyRunning`] on repeated calls, and with
    /// [`ThreadError::ResourceCreationFailed`] when the host refuses the
    /// spawn — in which case the wrapper stays unstarted and nothing leaks.
    fn start(&mut self, entry: ThreadHandler) -> Result<(), ThreadError>;

    /// Blocks until the entry point has returned.
    ///
    /// No-op success when already joined. Fails with
    /// [`ThreadError::AlreadyDetached`] after a detach and
    /// [`ThreadError::NotStarted`] before a start.
    fn join(&mut self) -> Result<(), ThreadError>;

    /// Relinquishes join rights; the context runs to completion on its own.
    ///
    /// Irreversible, and legal only while running.
    fn detach(&mut self) -> Result<(), ThreadError>;
}
