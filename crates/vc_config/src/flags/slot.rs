use core::sync::atomic::{AtomicU8, Ordering};

// Tri-state encoding of `Option<bool>`.
const UNSET: u8 = 0;
const FALSE: u8 = 1;
const TRUE: u8 = 2;

#[inline(always)]
const fn encode(value: Option<bool>) -> u8 {
    match value {
        None => UNSET,
        Some(false) => FALSE,
        Some(true) => TRUE,
    }
}

#[inline(always)]
const fn decode(raw: u8) -> Option<bool> {
    match raw {
        FALSE => Some(false),
        TRUE => Some(true),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// AtomicSlot

/// An `Option<bool>` that can be shared between threads.
pub(crate) struct AtomicSlot(AtomicU8);

impl AtomicSlot {
    pub const fn new() -> Self {
        Self(AtomicU8::new(UNSET))
    }

    #[inline]
    pub fn load(&self) -> Option<bool> {
        decode(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub fn store(&self, value: Option<bool>) {
        self.0.store(encode(value), Ordering::Release);
    }

    /// Writes `value` only if the slot is unset.
    ///
    /// Returns `true` if this call performed the write.
    #[inline]
    pub fn set_if_unset(&self, value: bool) -> bool {
        self.0
            .compare_exchange(UNSET, encode(Some(value)), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

// -----------------------------------------------------------------------------
// Tests
