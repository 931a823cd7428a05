#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # PACT Core
//!
//! Backend-independent layer of the PACT concurrency toolkit: the error
//! taxonomy, the capability traits a backend implements ([`JoinableThread`]
//! for the schedulable unit, [`MessagePump`] for the bounded queue), and the
//! generic engines composed over them ([`Active`] objects and round-robin
//! [`ThreadPool`]s), plus the validated event-to-bit mapping and the
//! interval poller.
//!
//! A backend crate provides the concrete thread and queue types; the
//! full-OS one is `pact-native`. Selecting a backend happens at build
//! configuration, by linking the port crate, never at runtime.

extern crate alloc;

pub mod active;
pub mod error;
pub mod events;
pub mod poller;
pub mod pool;
pub mod pump;
pub mod sync;
pub mod thread;

pub use active::Active;
pub use error::{CapacityExceeded, EventConfigError, InterruptSendError, ThreadError};
pub use events::{BitEvent, Bits, EventMap, MAX_EVENT_BITS};
pub use poller::poll_with;
pub use pool::{Task, ThreadPool};
pub use pump::{Envelope, MessagePump};
pub use thread::{JoinableThread, ThreadConfig, ThreadHandler, ThreadState};

/// Toolkit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
