//! Message framing and the bounded-queue capability.

use crate::error::CapacityExceeded;

/// Internal framing moved through a worker's pump.
///
/// User payloads travel in `Message`; `Quit` is the distinguished shutdown
/// sentinel. Engines enqueue `Quit` through the reserved slot so shutdown
/// can never be refused by a full queue, and a worker that dequeues it
/// exits after the backlog ahead of it has been drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope<M> {
    /// A user message for the worker's handler.
    Message(M),
    /// Stop the worker loop.
    Quit,
}

/// The bounded-queue capability the generic engines compose over.
///
/// A pump is a cloneable handle onto one shared FIFO: clones send to and
/// receive from the same storage. `send` must refuse rather than block;
/// `receive` must genuinely suspend the caller until an element arrives.
/// `send_reserved` may draw on one slot of headroom above the user
/// capacity and exists so a shutdown sentinel is always deliverable; every
/// backend must honor that guarantee.
pub trait MessagePump<M>: Clone + Send + 'static {
    /// Enqueues a message, refusing with the element when full.
    fn send(&self, message: M) -> Result<(), CapacityExceeded<M>>;

    /// Enqueues a control message, drawing on the reserved headroom slot.
    fn send_reserved(&self, message: M) -> Result<(), CapacityExceeded<M>>;

    /// Blocks the caller until a message is available.
    fn receive(&self) -> M;
}
