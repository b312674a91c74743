use super::{Flag, FlagStore};

// -----------------------------------------------------------------------------
// FlagScope

/// Call-scope flag overrides for one execution context.
///
/// A scope is an explicit value: create one per thread, task or request and
/// hand it to the code that serializes within that context. Overrides set
/// here are invisible to every other scope.
///
/// Reads resolve call-scope first, then the process-wide [`FlagStore`], then
/// `false`. See [`set`](Self::set) for write rules.
///
/// # Examples
///
/// ```
/// use vc_config::{Flag, TextConfig};
///
/// let config = TextConfig::new();
/// let mut a = config.scope();
/// let mut b = config.scope();
///
/// a.set(Flag::IncludeNullValues, true);
/// assert!(a.get(Flag::IncludeNullValues));
/// assert!(!b.get(Flag::IncludeNullValues));
///
/// // First write wins: `a` fixes the process-wide value too.
/// a.set(Flag::EmitCamelCaseNames, true);
/// b.set(Flag::EmitCamelCaseNames, false);
/// assert!(a.get(Flag::EmitCamelCaseNames));
/// assert!(!b.get(Flag::EmitCamelCaseNames));
/// assert!(config.scope().get(Flag::EmitCamelCaseNames));
///
/// // Reset clears every scope's overrides.
/// config.reset();
/// assert!(!a.get(Flag::IncludeNullValues));
/// assert!(!a.get(Flag::EmitCamelCaseNames));
/// ```
pub struct FlagScope<'a> {
    store: &'a FlagStore,
    // Store epoch the overrides below were written under.
    epoch: u64,
    slots: [Option<bool>; Flag::COUNT],
}

impl<'a> FlagScope<'a> {
    /// Opens a scope without overrides.
    pub fn new(store: &'a FlagStore) -> Self {
        Self {
            store,
            epoch: store.epoch(),
            slots: [None; Flag::COUNT],
        }
    }

    /// The process-wide store behind this scope.
    #[inline]
    pub fn store(&self) -> &'a FlagStore {
        self.store
    }

    #[inline]
    fn is_stale(&self) -> bool {
        self.epoch != self.store.epoch()
    }

    // Drops overrides written before the last reset.
    fn sync(&mut self) {
        let epoch = self.store.epoch();
        if epoch != self.epoch {
            self.slots = [None; Flag::COUNT];
            self.epoch = epoch;
        }
    }

    #[inline]
    fn local(&self, flag: Flag) -> Option<bool> {
        if self.is_stale() {
            None
        } else {
            self.slots[flag.index()]
        }
    }

    /// Returns the resolved value of `flag`.
    #[inline]
    pub fn get(&self, flag: Flag) -> bool {
        self.local(flag)
            .or_else(|| self.store.get(flag))
            .unwrap_or(false)
    }

    /// Sets `flag` for this scope.
    ///
    /// - Plain flags write the call-scope slot only, shadowing the
    ///   process-wide value for the rest of the scope.
    /// - First-write-wins flags write the call-scope slot if it is unset and,
    ///   independently, the process-wide slot if that is unset. Once both are
    ///   filled, further calls are no-ops until the next reset.
    pub fn set(&mut self, flag: Flag, value: bool) {
        self.sync();
        let slot = &mut self.slots[flag.index()];
        if flag.is_first_write_wins() {
            if slot.is_none() {
                *slot = Some(value);
            } else {
                log::trace!("call-scope `{flag}` already fixed, ignoring set({value})");
            }
            self.store.set(flag, value);
        } else {
            *slot = Some(value);
        }
    }

    /// Returns `true` if this scope holds an override for `flag`.
    #[inline]
    pub fn is_overridden(&self, flag: Flag) -> bool {
        self.local(flag).is_some()
    }

    /// Removes this scope's override for `flag`.
    ///
    /// First-write-wins flags stay fixed until the next reset; clearing them
    /// does nothing.
    pub fn clear(&mut self, flag: Flag) {
        self.sync();
        if flag.is_first_write_wins() {
            log::trace!("call-scope `{flag}` is fixed until reset, ignoring clear");
            return;
        }
        self.slots[flag.index()] = None;
    }

    /// Removes every override of this scope, except first-write-wins flags.
    pub fn clear_all(&mut self) {
        self.sync();
        for flag in Flag::ALL {
            if !flag.is_first_write_wins() {
                self.slots[flag.index()] = None;
            }
        }
    }

    /// Resolves every flag at once.
    ///
    /// First-write-wins flags cannot change again before the next reset, so
    /// an encoder may keep the snapshot for a whole document.
    pub fn resolve_all(&self) -> ResolvedFlags {
        ResolvedFlags(Flag::ALL.map(|flag| self.get(flag)))
    }
}

impl core::fmt::Debug for FlagScope<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for flag in Flag::ALL {
            map.entry(&flag, &self.local(flag));
        }
        map.finish()
    }
}

// -----------------------------------------------------------------------------
// ResolvedFlags

/// A resolved value for every [`Flag`], see [`FlagScope::resolve_all`].
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedFlags([bool; Flag::COUNT]);

impl ResolvedFlags {
    #[inline]
    pub const fn get(&self, flag: Flag) -> bool {
        self.0[flag.index()]
    }
}

impl core::fmt::Debug for ResolvedFlags {
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
