//! Error taxonomy shared by every backend.
//!
//! Full queues and lifecycle misuse are reported synchronously, as values,
//! at the call site. Elapsed timeouts are ordinary negative results — the
//! timeout variants return `Option`/`bool` — and never appear here. Errors
//! that reject an element hand it back to the caller, so the backpressure
//! decision (retry, drop, block elsewhere) stays with the caller; the
//! toolkit never retries on its own.

use core::fmt;

/// A send was refused because the queue already holds its full capacity.
///
/// Carries the rejected element. Normal and non-fatal: queue state is
/// untouched and the caller decides what to do with the element.
pub struct CapacityExceeded<T>(pub T);

impl<T> CapacityExceeded<T> {
    /// Consumes the error, returning the rejected element.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for CapacityExceeded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CapacityExceeded(..)")
    }
}

impl<T> fmt::Display for CapacityExceeded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("queue is at capacity")
    }
}

#[cfg(feature = "std")]
impl<T> std::error::Error for CapacityExceeded<T> {}

#[cfg(feature = "defmt")]
impl<T> defmt::Format for CapacityExceeded<T> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "CapacityExceeded");
    }
}

/// Refusals of the interrupt-context send path.
///
/// Both variants return the element and neither ever blocks the caller.
pub enum InterruptSendError<T> {
    /// The queue lock was held, so the try-once acquisition gave up.
    WouldBlock(T),
    /// The queue already holds its full capacity.
    CapacityExceeded(T),
}

impl<T> InterruptSendError<T> {
    /// Consumes the error, returning the rejected element.
    pub fn into_inner(self) -> T {
        match self {
            Self::WouldBlock(elem) | Self::CapacityExceeded(elem) => elem,
        }
    }

    /// True when the refusal was lock contention rather than a full queue.
    pub fn is_would_block(&self) -> bool {
        matches!(self, Self::WouldBlock(_))
    }
}

impl<T> fmt::Debug for InterruptSendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WouldBlock(_) => f.write_str("WouldBlock(..)"),
            Self::CapacityExceeded(_) => f.write_str("CapacityExceeded(..)"),
        }
    }
}

impl<T> fmt::Display for InterruptSendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WouldBlock(_) => f.write_str("queue lock is contended"),
            Self::CapacityExceeded(_) => f.write_str("queue is at capacity"),
        }
    }
}

#[cfg(feature = "std")]
impl<T> std::error::Error for InterruptSendError<T> {}

#[cfg(feature = "defmt")]
impl<T> defmt::Format for InterruptSendError<T> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::WouldBlock(_) => defmt::write!(fmt, "WouldBlock"),
            Self::CapacityExceeded(_) => defmt::write!(fmt, "CapacityExceeded"),
        }
    }
}

/// Thread lifecycle violations and construction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadError {
    /// The operation requires a started thread.
    NotStarted,
    /// `start` was called more than once.
    AlreadyRunning,
    /// The thread was already joined; join rights are spent.
    AlreadyJoined,
    /// The thread was detached; join rights were relinquished.
    AlreadyDetached,
    /// The host refused to create the execution context.
    ResourceCreationFailed,
}

impl fmt::Display for ThreadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadError::NotStarted => write!(f, "thread was never started"),
            ThreadError::AlreadyRunning => write!(f, "thread was already started"),
            ThreadError::AlreadyJoined => write!(f, "thread was already joined"),
            ThreadError::AlreadyDetached => write!(f, "thread was detached"),
            ThreadError::ResourceCreationFailed => {
                write!(f, "host could not create the execution context")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ThreadError {}

#[cfg(feature = "defmt")]
impl defmt::Format for ThreadError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ThreadError::NotStarted => defmt::write!(fmt, "NotStarted"),
            ThreadError::AlreadyRunning => defmt::write!(fmt, "AlreadyRunning"),
            ThreadError::AlreadyJoined => defmt::write!(fmt, "AlreadyJoined"),
            ThreadError::AlreadyDetached => defmt::write!(fmt, "AlreadyDetached"),
            ThreadError::ResourceCreationFailed => defmt::write!(fmt, "ResourceCreationFailed"),
        }
    }
}

/// Event-to-bit table violations, reported when the map is built.
///
/// These are configuration-time results: once a map exists, event-group
/// operations never re-validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventConfigError {
    /// An enumerant was assigned a bit at or above the supported width.
    BitOutOfRange { bit: u32 },
    /// Two enumerants were assigned the same bit position.
    DuplicateBit { bit: u32 },
    /// More enumerants than simultaneously representable bits.
    TooManyEvents { count: usize },
    /// The enumerant table is empty.
    NoEvents,
}

impl fmt::Display for EventConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventConfigError::BitOutOfRange { bit } => {
                write!(f, "event bit {} is outside the supported width", bit)
            }
            EventConfigError::DuplicateBit { bit } => {
                write!(f, "event bit {} is assigned twice", bit)
            }
            EventConfigError::TooManyEvents { count } => {
                write!(f, "{} events exceed the representable set", count)
            }
            EventConfigError::NoEvents => write!(f, "event table is empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EventConfigError {}

#[cfg(feature = "defmt")]
impl defmt::Format for EventConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            EventConfigError::BitOutOfRange { bit } => {
                defmt::write!(fmt, "BitOutOfRange({})", bit)
            }
            EventConfigError::DuplicateBit { bit } => defmt::write!(fmt, "DuplicateBit({})", bit),
            EventConfigError::TooManyEvents { count } => {
                defmt::write!(fmt, "TooManyEvents({})", count)
            }
            EventConfigError::NoEvents => defmt::write!(fmt, "NoEvents"),
        }
    }
}
