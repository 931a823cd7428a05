//! Single-bit gate with blocking wait.

use std::time::{Duration, Instant};

use parking_lot::Condvar;

use pact_core::sync::Mutex;

/// Binary flag: producers set it, waiters suspend until it is set.
///
/// Also serves as the one-shot completion signal of the thread ownership
/// protocol (see [`crate::Thread`]).
pub struct Flag {
    set: Mutex<bool>,
    changed: Condvar,
}

impl Flag {
    /// Creates a cleared flag.
    pub fn new() -> Self {
        Self {
            set: Mutex::new(false),
            changed: Condvar::new(),
        }
    }

    /// Sets the flag and wakes every waiter.
    pub fn set(&self) {
        {
            let mut set = self.set.lock();
            *set = true;
        }
        self.changed.notify_all();
    }

    /// Clears the flag. Pending waiters are unaffected until the next set.
    pub fn reset(&self) {
        *self.set.lock() = false;
    }

    /// Current value, without blocking.
    pub fn is_set(&self) -> bool {
        *self.set.lock()
    }

    /// Blocks until the flag is set.
    pub fn wait(&self) {
        let mut set = self.set.lock();
        while !*set {
            self.changed.wait(&mut set);
        }
    }

    /// Blocks until the flag is set or `timeout` elapses.
    ///
    /// Returns `true` when the flag was observed set; `false` only after at
    /// least `timeout` has passed with the flag still clear.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut set = self.set.lock();
        while !*set {
            if self.changed.wait_until(&mut set, deadline).timed_out() {
                return *set;
            }
        }
        true
    }
}

impl Default for Flag {
    fn default() -> Self {
        Self::new()
    }
}
