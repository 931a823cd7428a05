//! The native schedulable unit: a joinable/detachable wrapper over a host
//! thread.
//!
//! Wrapper and execution context share exactly one thing, a one-shot
//! completion channel (an [`Arc`]'d [`Flag`]). The context is spawned with
//! its host join handle released on the spot, so the context owns its own
//! resources; the wrapper keeps the receiving end of the channel and the
//! context signals the sending end once the entry has returned, through a
//! guard that fires on unwind too. `join` waits on the channel; `detach`
//! drops the receiving end, which is what lets detached work outlive its
//! wrapper with nothing leaked and nothing freed twice — the signal's
//! storage disappears with the last channel reference, never before its
//! final use.

use std::sync::Arc;
use std::thread::Builder;

use pact_core::{JoinableThread, ThreadConfig, ThreadError, ThreadHandler, ThreadState};

use crate::flag::Flag;

/// Signals the completion channel when the context's entry scope ends,
/// whether by return or unwind.
struct CompletionGuard(Arc<Flag>);

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.0.set();
    }
}

/// Joinable/detachable thread on the host scheduler.
///
/// `ThreadConfig::name` becomes the host thread name, a non-zero
/// `stack_size` the host stack budget. `priority` is ignored here: the
/// host scheduler owns priority policy.
pub struct Thread {
    config: ThreadConfig,
    state: ThreadState,
    completion: Option<Arc<Flag>>,
}

impl Thread {
    /// Creates an unstarted thread with the given configuration.
    pub fn new(config: ThreadConfig) -> Self {
        Self {
            config,
            state: ThreadState::Created,
            completion: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ThreadState {
        self.state
    }

    /// The configuration this thread was built with.
    pub fn config(&self) -> &ThreadConfig {
        &self.config
    }

    /// Starts the execution context with the given entry point.
    ///
    /// Legal exactly once, from the created state; see
    /// [`JoinableThread::start`] for the error contract.
    pub fn start<F>(&mut self, entry: F) -> Result<(), ThreadError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.start_boxed(Box::new(entry))
    }

    /// Blocks until the entry point has returned; see
    /// [`JoinableThread::join`].
    pub fn join(&mut self) -> Result<(), ThreadError> {
        match self.state {
            ThreadState::Running => {
                let completion = self
                    .completion
                    .take()
                    .expect("running thread holds its completion channel");
                completion.wait();
                self.state = ThreadState::Joined;
                Ok(())
            }
            ThreadState::Joined => Ok(()),
            ThreadState::Detached => Err(ThreadError::AlreadyDetached),
            ThreadState::Created => Err(ThreadError::NotStarted),
        }
    }

    /// Relinquishes join rights; see [`JoinableThread::detach`].
    pub fn detach(&mut self) -> Result<(), ThreadError> {
        match self.state {
            ThreadState::Running => {
                self.completion = None;
                self.state = ThreadState::Detached;
                Ok(())
            }
            ThreadState::Joined => Err(ThreadError::AlreadyJoined),
            ThreadState::Detached => Err(ThreadError::AlreadyDetached),
            ThreadState::Created => Err(ThreadError::NotStarted),
        }
    }

    fn start_boxed(&mut self, entry: ThreadHandler) -> Result<(), ThreadError> {
        if self.state != ThreadState::Created {
            return Err(ThreadError::AlreadyRunning);
        }
        let completion = Arc::new(Flag::new());
        let guard = CompletionGuard(completion.clone());
        let mut builder = Builder::new().name(self.config.name.clone());
        if self.config.stack_size > 0 {
            builder = builder.stack_size(self.config.stack_size);
        }
        match builder.spawn(move || {
            let _signal = guard;
            entry();
        }) {
            Ok(handle) => {
                // The context owns itself from here on; join goes through
                // the completion channel, not the host handle.
                drop(handle);
                self.completion = Some(completion);
                self.state = ThreadState::Running;
                Ok(())
            }
            Err(err) => {
                log::error!("thread '{}' spawn failed: {}", self.config.name, err);
                Err(ThreadError::ResourceCreationFailed)
            }
        }
    }
}

impl JoinableThread for Thread {
    fn start(&mut self, entry: ThreadHandler) -> Result<(), ThreadError> {
        self.start_boxed(entry)
    }

    fn join(&mut self) -> Result<(), ThreadError> {
        Thread::join(self)
    }

    fn detach(&mut self) -> Result<(), ThreadError> {
        Thread::detach(self)
    }
}

impl Drop for Thread {
    fn drop(&mut self) {
        if self.state == ThreadState::Running {
            log::trace!("thread '{}' dropped while running; joining", self.config.name);
            if let Some(completion) = self.completion.take() {
                completion.wait();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_thread_reports_created() {
        let thread = Thread::new(ThreadConfig::new("idle"));
        assert_eq!(thread.state(), ThreadState::Created);
        assert_eq!(thread.config().name, "idle");
    }

    #[test]
    fn join_before_start_is_a_lifecycle_error() {
        let mut thread = Thread::new(ThreadConfig::default());
        assert_eq!(thread.join().unwrap_err(), ThreadError::NotStarted);
        assert_eq!(thread.detach().unwrap_err(), ThreadError::NotStarted);
    }

    #[test]
    fn a_second_start_is_refused() {
        let mut thread = Thread::new(ThreadConfig::new("once"));
        thread.start(|| {}).unwrap();
        assert_eq!(thread.start(|| {}).unwrap_err(), ThreadError::AlreadyRunning);
        thread.join().unwrap();
        assert_eq!(thread.start(|| {}).unwrap_err(), ThreadError::AlreadyRunning);
    }

    #[test]
    fn join_is_idempotent_once_joined() {
        let mut thread = Thread::new(ThreadConfig::new("twice"));
        thread.start(|| {}).unwrap();
        thread.join().unwrap();
        assert_eq!(thread.state(), ThreadState::Joined);
        thread.join().unwrap();
    }

    #[test]
    fn join_rights_are_spent_by_either_terminal_transition() {
        let mut joined = Thread::new(ThreadConfig::new("joined"));
        joined.start(|| {}).unwrap();
        joined.join().unwrap();
        assert_eq!(joined.detach().unwrap_err(), ThreadError::AlreadyJoined);

        let mut detached = Thread::new(ThreadConfig::new("detached"));
        detached.start(|| {}).unwrap();
        detached.detach().unwrap();
        assert_eq!(detached.join().unwrap_err(), ThreadError::AlreadyDetached);
        assert_eq!(detached.detach().unwrap_err(), ThreadError::AlreadyDetached);
    }

    #[test]
    fn dropping_a_never_started_thread_does_nothing() {
        let thread = Thread::new(ThreadConfig::new("unused"));
        drop(thread);
    }

    #[test]
    fn the_stack_budget_is_honored_by_the_host() {
        let mut thread = Thread::new(ThreadConfig::new("stacked").with_stack_size(128 * 1024));
        thread.start(|| {}).unwrap();
        thread.join().unwrap();
    }
}
