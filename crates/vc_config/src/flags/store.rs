use core::sync::atomic::{AtomicU64, Ordering};

use super::slot::AtomicSlot;
use super::{Flag, FlagScope, FlagSettings};

// -----------------------------------------------------------------------------
// FlagStore

/// Process-wide flag values, shared by every execution context.
///
/// Each slot is an atomic tri-state (unset / `false` / `true`). Writes never
/// block; first-write-wins flags use a compare-exchange from *unset* so two
/// racing writers cannot both win.
///
/// Most callers go through [`TextConfig`](crate::TextConfig), which owns one
/// store, and read flags through a [`FlagScope`].
///
/// # Examples
///
/// ```
/// use vc_config::{Flag, FlagStore};
///
/// static STORE: FlagStore = FlagStore::new();
///
/// assert_eq!(STORE.get(Flag::IncludeNullValues), None);
/// STORE.set(Flag::IncludeNullValues, true);
/// assert!(STORE.resolve(Flag::IncludeNullValues));
///
/// STORE.set(Flag::EmitCamelCaseNames, true);
/// STORE.set(Flag::EmitCamelCaseNames, false); // ignored
/// assert!(STORE.resolve(Flag::EmitCamelCaseNames));
///
/// STORE.reset();
/// assert!(!STORE.resolve(Flag::EmitCamelCaseNames));
/// ```
pub struct FlagStore {
    slots: [AtomicSlot; Flag::COUNT],
    epoch: AtomicU64,
}

impl FlagStore {
    /// Creates a store with every flag unset.
    pub const fn new() -> Self {
        Self {
            slots: [const { AtomicSlot::new() }; Flag::COUNT],
            epoch: AtomicU64::new(0),
        }
    }

    /// Returns the explicit process-wide value of `flag`, if any.
    #[inline]
    pub fn get(&self, flag: Flag) -> Option<bool> {
        self.slots[flag.index()].load()
    }

    /// Returns the process-wide value of `flag`, or `false` if unset.
    #[inline]
    pub fn resolve(&self, flag: Flag) -> bool {
        self.get(flag).unwrap_or(false)
    }

    /// Sets the process-wide value of `flag`.
    ///
    /// First-write-wins flags are only written while unset. Returns `true`
    /// if the slot now holds `value` because of this call.
    pub fn set(&self, flag: Flag, value: bool) -> bool {
        let slot = &self.slots[flag.index()];
        if flag.is_first_write_wins() {
            let written = slot.set_if_unset(value);
            if !written {
                log::trace!("process-wide `{flag}` already fixed, ignoring set({value})");
            }
            written
        } else {
            slot.store(Some(value));
            true
        }
    }

    /// Writes every value present in `settings` through [`set`](Self::set).
    pub fn apply(&self, settings: &FlagSettings) {
        for flag in Flag::ALL {
            if let Some(value) = settings.get(flag) {
                self.set(flag, value);
            }
        }
    }

    /// Clears every process-wide slot and invalidates all call-scope
    /// overrides recorded so far.
    pub fn reset(&self) {
        // Epoch first: a scope that writes between the two steps already
        // belongs to the new cycle. Its process-wide write may still be
        // cleared below, which leaves that slot unset, never stale.
        let epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        for slot in &self.slots {
            slot.store(None);
        }
        log::debug!("flag store reset, epoch {epoch}");
    }

    /// The number of resets performed so far.
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Opens a call scope reading through this store.
    #[inline]
    pub fn scope(&self) -> FlagScope<'_> {
        FlagScope::new(self)
    }
}

impl Default for FlagStore {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FlagStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for flag in Flag::ALL {
            map.entry(&flag, &self.get(flag));
        }
        map.finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
