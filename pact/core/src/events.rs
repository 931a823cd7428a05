//! Event bits: the enumeration-to-bit table and its validation.
//!
//! A domain event type declares its enumerants and their bit assignment
//! through [`BitEvent`]. [`EventMap`] checks the whole table once, when the
//! map is built, so event-group operations never re-validate at use time —
//! a malformed table is a configuration-time result, not a runtime failure.

use core::marker::PhantomData;

use crate::error::EventConfigError;

/// Fixed-width storage for event bits.
pub type Bits = u32;

/// Widest simultaneously representable event set.
pub const MAX_EVENT_BITS: u32 = Bits::BITS;

/// A domain event enumeration with a bit assignment.
///
/// `EVENTS` lists every enumerant exactly once; `bit` assigns each one its
/// position. For a plain fieldless enum the assignment is typically
/// `self as u32`.
pub trait BitEvent: Copy + 'static {
    /// Every enumerant, in declaration order.
    const EVENTS: &'static [Self];

    /// The bit position assigned to this enumerant.
    fn bit(self) -> u32;
}

/// A validated enumeration-to-bit table.
///
/// Holding a value of this type is proof the table passed validation:
/// every position unique and in range, at least one enumerant. Mask and
/// lookup operations therefore never fail.
#[derive(Debug, Clone, Copy)]
pub struct EventMap<E: BitEvent> {
    all: Bits,
    _events: PhantomData<E>,
}

impl<E: BitEvent> EventMap<E> {
    /// Builds the table for `E`, validating every assignment.
    pub fn new() -> Result<Self, EventConfigError> {
        if E::EVENTS.is_empty() {
            return Err(EventConfigError::NoEvents);
        }
        if E::EVENTS.len() > MAX_EVENT_BITS as usize {
            return Err(EventConfigError::TooManyEvents {
                count: E::EVENTS.len(),
            });
        }
        let mut all: Bits = 0;
        for event in E::EVENTS {
            let bit = event.bit();
            if bit >= MAX_EVENT_BITS {
                return Err(EventConfigError::BitOutOfRange { bit });
            }
            let mask = 1 << bit;
            if all & mask != 0 {
                return Err(EventConfigError::DuplicateBit { bit });
            }
            all |= mask;
        }
        Ok(Self {
            all,
            _events: PhantomData,
        })
    }

    /// Mask with every enumerant's bit set.
    pub fn all(&self) -> Bits {
        self.all
    }

    /// Mask covering the given events.
    pub fn mask(&self, events: &[E]) -> Bits {
        events
            .iter()
            .fold(0, |mask, event| mask | (1 << event.bit()))
    }

    /// The enumerant assigned to `bit`, if any.
    pub fn event_at(&self, bit: u32) -> Option<E> {
        E::EVENTS.iter().copied().find(|event| event.bit() == bit)
    }
}
