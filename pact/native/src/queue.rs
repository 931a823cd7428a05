//! Bounded blocking MPMC queue with a task-context and an interrupt-context
//! send path.
//!
//! A fixed-capacity ring buffer behind one lock: receivers suspend on a
//! condition variable, senders never block. One headroom slot above the
//! user capacity backs [`Queue::send_reserved`], the always-deliverable
//! path for shutdown sentinels; it is invisible to `len`, `is_full` and
//! `capacity`.

use std::time::{Duration, Instant};

use parking_lot::Condvar;

use pact_core::sync::{Arc, Mutex};
use pact_core::{CapacityExceeded, InterruptSendError, MessagePump};

struct Depot<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    count: usize,
}

impl<T> Depot<T> {
    fn with_slots(total: usize) -> Self {
        let mut slots = Vec::with_capacity(total);
        slots.resize_with(total, || None);
        Self {
            slots: slots.into_boxed_slice(),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    fn push(&mut self, elem: T) {
        debug_assert!(self.count < self.slots.len());
        self.slots[self.head] = Some(elem);
        self.head = (self.head + 1) % self.slots.len();
        self.count += 1;
    }

    fn pop(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let elem = self.slots[self.tail].take();
        debug_assert!(elem.is_some());
        self.tail = (self.tail + 1) % self.slots.len();
        self.count -= 1;
        elem
    }
}

struct Shared<T> {
    depot: Mutex<Depot<T>>,
    ready: Condvar,
    capacity: usize,
}

/// Bounded blocking queue handle; clones share one buffer.
///
/// Multiple producers and consumers are permitted. FIFO order holds among
/// successfully enqueued elements; racing producers are ordered by who
/// acquires the internal lock first.
pub struct Queue<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Queue<T> {
    /// Creates a queue holding at most `capacity` elements.
    ///
    /// One extra slot beyond `capacity` is allocated up front for
    /// [`send_reserved`](Self::send_reserved).
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be at least 1");
        Self {
            shared: Arc::new(Shared {
                depot: Mutex::new(Depot::with_slots(capacity + 1)),
                ready: Condvar::new(),
                capacity,
            }),
        }
    }

    /// Maximum number of user elements.
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Elements currently queued, reserved slot excluded.
    pub fn len(&self) -> usize {
        self.shared.depot.lock().count.min(self.shared.capacity)
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.shared.depot.lock().count == 0
    }

    /// True when a further [`send`](Self::send) would be refused.
    pub fn is_full(&self) -> bool {
        self.shared.depot.lock().count >= self.shared.capacity
    }

    /// Enqueues `elem`, refusing with the element when the queue is full.
    ///
    /// Never blocks the producer; the caller owns the backpressure
    /// decision.
    pub fn send(&self, elem: T) -> Result<(), CapacityExceeded<T>> {
        self.enqueue(elem, self.shared.capacity)
    }

    /// Enqueues a control element, drawing on the reserved headroom slot.
    ///
    /// Meant for shutdown sentinels; fails only when the reserved slot is
    /// itself occupied by an earlier control element.
    pub fn send_reserved(&self, elem: T) -> Result<(), CapacityExceeded<T>> {
        self.enqueue(elem, self.shared.capacity + 1)
    }

    /// Interrupt-context send: a single try-once lock acquisition.
    ///
    /// Returns [`InterruptSendError::WouldBlock`] with the element when the
    /// lock is contended and [`InterruptSendError::CapacityExceeded`] when
    /// the queue is full; never waits. On ports with real interrupts this
    /// is the only send legal in interrupt context; here it serves callers
    /// that must not block under any contention.
    pub fn send_from_interrupt(&self, elem: T) -> Result<(), InterruptSendError<T>> {
        let mut depot = match self.shared.depot.try_lock() {
            Some(depot) => depot,
            None => return Err(InterruptSendError::WouldBlock(elem)),
        };
        if depot.count >= self.shared.capacity {
            return Err(InterruptSendError::CapacityExceeded(elem));
        }
        depot.push(elem);
        drop(depot);
        self.shared.ready.notify_one();
        Ok(())
    }

    /// Blocks until an element is available.
    pub fn receive(&self) -> T {
        let mut depot = self.shared.depot.lock();
        loop {
            if let Some(elem) = depot.pop() {
                return elem;
            }
            self.shared.ready.wait(&mut depot);
        }
    }

    /// Blocks until an element is available or `timeout` elapses.
    ///
    /// `None` is returned only once at least `timeout` has passed.
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut depot = self.shared.depot.lock();
        loop {
            if let Some(elem) = depot.pop() {
                return Some(elem);
            }
            if self.shared.ready.wait_until(&mut depot, deadline).timed_out() {
                return depot.pop();
            }
        }
    }

    /// Non-blocking receive.
    pub fn try_receive(&self) -> Option<T> {
        self.shared.depot.lock().pop()
    }

    fn enqueue(&self, elem: T, limit: usize) -> Result<(), CapacityExceeded<T>> {
        {
            let mut depot = self.shared.depot.lock();
            if depot.count >= limit {
                return Err(CapacityExceeded(elem));
            }
            depot.push(elem);
        }
        self.shared.ready.notify_one();
        Ok(())
    }
}

impl<M: Send + 'static> MessagePump<M> for Queue<M> {
    fn send(&self, message: M) -> Result<(), CapacityExceeded<M>> {
        Queue::send(self, message)
    }

    fn send_reserved(&self, message: M) -> Result<(), CapacityExceeded<M>> {
        Queue::send_reserved(self, message)
    }

    fn receive(&self) -> M {
        Queue::receive(self)
    }
}
