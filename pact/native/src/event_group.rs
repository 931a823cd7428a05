//! Multi-bit event group.
//!
//! Each event of a [`BitEvent`] enumeration occupies one bit of a shared
//! word. Setters raise bits, waiters consume them one at a time; when
//! several awaited bits are raised the lowest-numbered one wins and the
//! rest stay raised for later waits.

use std::time::{Duration, Instant};

use parking_lot::Condvar;

use pact_core::sync::Mutex;
use pact_core::{BitEvent, Bits, EventConfigError, EventMap};

/// Shared event word for one [`BitEvent`] enumeration.
pub struct EventGroup<E: BitEvent> {
    map: EventMap<E>,
    bits: Mutex<Bits>,
    changed: Condvar,
}

impl<E: BitEvent> EventGroup<E> {
    /// Builds a group, validating the enumeration's bit assignment.
    pub fn new() -> Result<Self, EventConfigError> {
        Ok(Self {
            map: EventMap::new()?,
            bits: Mutex::new(0),
            changed: Condvar::new(),
        })
    }

    /// Raises every listed event and wakes all waiters.
    ///
    /// Raising an already raised event changes nothing.
    pub fn set(&self, events: &[E]) {
        let mask = self.map.mask(events);
        {
            let mut bits = self.bits.lock();
            *bits |= mask;
        }
        self.changed.notify_all();
    }

    /// Lowers every listed event without waking anyone.
    pub fn clear(&self, events: &[E]) {
        let mask = self.map.mask(events);
        *self.bits.lock() &= !mask;
    }

    /// Snapshot of the raised bits.
    pub fn get(&self) -> Bits {
        *self.bits.lock()
    }

    /// Blocks until one of `events` is raised, then consumes and returns it.
    ///
    /// Only the winning bit is lowered; other raised bits, awaited or not,
    /// are left for later calls.
    pub fn wait_one(&self, events: &[E]) -> E {
        debug_assert!(
            !events.is_empty(),
            "waiting on an empty event set never returns"
        );
        let mask = self.map.mask(events);
        let mut bits = self.bits.lock();
        loop {
            if let Some(event) = self.claim(&mut bits, mask) {
                return event;
            }
            self.changed.wait(&mut bits);
        }
    }

    /// Like [`wait_one`](Self::wait_one) with an upper bound on the wait.
    ///
    /// `None` is returned only once at least `timeout` has passed with no
    /// awaited event raised; the group's bits are left untouched.
    pub fn wait_one_timeout(&self, events: &[E], timeout: Duration) -> Option<E> {
        let mask = self.map.mask(events);
        let deadline = Instant::now() + timeout;
        let mut bits = self.bits.lock();
        loop {
            if let Some(event) = self.claim(&mut bits, mask) {
                return Some(event);
            }
            if self.changed.wait_until(&mut bits, deadline).timed_out() {
                return self.claim(&mut bits, mask);
            }
        }
    }

    fn claim(&self, bits: &mut Bits, mask: Bits) -> Option<E> {
        let hits = *bits & mask;
        if hits == 0 {
            return None;
        }
        let winner = hits.trailing_zeros();
        *bits &= !(1 << winner);
        Some(
            self.map
                .event_at(winner)
                .expect("a validated map covers every awaited bit"),
        )
    }
}
