//! Generic active object: one worker thread draining one message pump.
//!
//! Callers hand a handler, a pump, and an unstarted thread to
//! [`Active::start`]. From then on [`Active::send`] enqueues and returns
//! immediately while the worker invokes the handler for each message, in
//! send order, exactly once. Dropping the object enqueues the shutdown
//! sentinel through the reserved slot and joins the worker, so every
//! message sent strictly before the drop is fully handled before the drop
//! returns; messages racing the drop have no delivery guarantee.

use alloc::boxed::Box;
use core::marker::PhantomData;

use crate::error::{CapacityExceeded, ThreadError};
use crate::pump::{Envelope, MessagePump};
use crate::thread::JoinableThread;

/// Single-consumer asynchronous message processor.
pub struct Active<M, Q, T>
where
    M: Send + 'static,
    Q: MessagePump<Envelope<M>>,
    T: JoinableThread,
{
    pump: Q,
    worker: T,
    _message: PhantomData<fn(M)>,
}

impl<M, Q, T> Active<M, Q, T>
where
    M: Send + 'static,
    Q: MessagePump<Envelope<M>>,
    T: JoinableThread,
{
    /// Starts the worker loop over `pump` on the given unstarted thread.
    ///
    /// On a start failure the error surfaces with nothing half-built: no
    /// worker runs and the pump and thread are simply dropped.
    pub fn start<H>(mut handler: H, pump: Q, mut worker: T) -> Result<Self, ThreadError>
    where
        H: FnMut(M) + Send + 'static,
    {
        let feed = pump.clone();
        worker.start(Box::new(move || loop {
            match feed.receive() {
                Envelope::Message(message) => handler(message),
                Envelope::Quit => break,
            }
        }))?;
        Ok(Self {
            pump,
            worker,
            _message: PhantomData,
        })
    }

    /// Enqueues a message for the worker, without waiting for it to be
    /// handled.
    ///
    /// Refuses with the message when the queue is at capacity; the caller
    /// owns the backpressure decision, nothing is retried internally.
    pub fn send(&self, message: M) -> Result<(), CapacityExceeded<M>> {
        match self.pump.send(Envelope::Message(message)) {
            Ok(()) => Ok(()),
            Err(refused) => match refused.into_inner() {
                Envelope::Message(message) => Err(CapacityExceeded(message)),
                Envelope::Quit => unreachable!("user sends carry Message envelopes"),
            },
        }
    }
}

impl<M, Q, T> Drop for Active<M, Q, T>
where
    M: Send + 'static,
    Q: MessagePump<Envelope<M>>,
    T: JoinableThread,
{
    fn drop(&mut self) {
        if self.pump.send_reserved(Envelope::Quit).is_err() {
            // Only a sentinel can occupy the reserved slot, so the loop is
            // already on its way out.
            log::warn!("active object shutdown slot occupied; joining anyway");
        }
        if let Err(err) = self.worker.join() {
            log::debug!("active object worker join skipped: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThreadError;
    use crate::sync::{Arc, Mutex};
    use crate::thread::ThreadHandler;
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;

    /// Pump whose receive side replays a script and whose send side records.
    #[derive(Clone)]
    struct ScriptedPump<M> {
        feed: Arc<Mutex<VecDeque<M>>>,
        sent: Arc<Mutex<Vec<M>>>,
        full: Arc<Mutex<bool>>,
    }

    impl<M> ScriptedPump<M> {
        fn new(script: VecDeque<M>) -> Self {
            Self {
                feed: Arc::new(Mutex::new(script)),
                sent: Arc::new(Mutex::new(Vec::new())),
                full: Arc::new(Mutex::new(false)),
            }
        }
    }

    impl<M: Clone + Send + 'static> MessagePump<Envelope<M>> for ScriptedPump<Envelope<M>> {
        fn send(&self, message: Envelope<M>) -> Result<(), CapacityExceeded<Envelope<M>>> {
            if *self.full.lock() {
                return Err(CapacityExceeded(message));
            }
            self.sent.lock().push(message);
            Ok(())
        }

        fn send_reserved(&self, message: Envelope<M>) -> Result<(), CapacityExceeded<Envelope<M>>> {
            self.sent.lock().push(message);
            Ok(())
        }

        fn receive(&self) -> Envelope<M> {
            self.feed.lock().pop_front().unwrap_or(Envelope::Quit)
        }
    }

    /// Runs the entry inline on `start`, so loop behavior is observable
    /// without a second thread.
    struct InlineThread {
        started: bool,
    }

    impl InlineThread {
        fn new() -> Self {
            Self { started: false }
        }
    }

    impl JoinableThread for InlineThread {
        fn start(&mut self, entry: ThreadHandler) -> Result<(), ThreadError> {
            if self.started {
                return Err(ThreadError::AlreadyRunning);
            }
            self.started = true;
            entry();
            Ok(())
        }

        fn join(&mut self) -> Result<(), ThreadError> {
            if self.started {
                Ok(())
            } else {
                Err(ThreadError::NotStarted)
            }
        }

        fn detach(&mut self) -> Result<(), ThreadError> {
            if self.started {
                Ok(())
            } else {
                Err(ThreadError::NotStarted)
            }
        }
    }

    #[test]
    fn loop_drains_in_order_and_stops_at_the_sentinel() {
        let script: VecDeque<_> = [
            Envelope::Message(1u32),
            Envelope::Message(2),
            Envelope::Quit,
            Envelope::Message(3),
        ]
        .into_iter()
        .collect();
        let pump = ScriptedPump::new(script);
        let handled = Arc::new(Mutex::new(Vec::new()));
        let record = handled.clone();

        let active = Active::start(
            move |message: u32| record.lock().push(message),
            pump.clone(),
            InlineThread::new(),
        )
        .unwrap();
        drop(active);

        // The message scripted after the sentinel is never handled.
        assert_eq!(*handled.lock(), [1, 2]);
        assert_eq!(*pump.sent.lock(), [Envelope::Quit]);
    }

    #[test]
    fn send_hands_the_refused_message_back() {
        let pump = ScriptedPump::new(VecDeque::new());
        let active = Active::start(|_: u32| {}, pump.clone(), InlineThread::new()).unwrap();

        *pump.full.lock() = true;
        let refused = active.send(7).unwrap_err();
        assert_eq!(refused.into_inner(), 7);

        *pump.full.lock() = false;
        active.send(8).unwrap();
        assert_eq!(*pump.sent.lock(), [Envelope::Message(8)]);
    }

    #[test]
    fn drop_enqueues_exactly_one_sentinel() {
        let pump = ScriptedPump::new(VecDeque::new());
        let active = Active::start(|_: u32| {}, pump.clone(), InlineThread::new()).unwrap();
        drop(active);
        assert_eq!(*pump.sent.lock(), [Envelope::Quit]);
    }
}
