use alloc::vec::Vec;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vc_utils::TypeIdMap;

// -----------------------------------------------------------------------------
// HookIndex

/// The set of types that currently own a custom serialize function.
///
/// Encoders query it per value to choose between the custom hook and
/// structural encoding. Type names are kept alongside for inspection.
///
/// [`TypeHooks`](crate::TypeHooks) maintains membership; there is rarely a
/// reason to insert or remove types by hand.
pub struct HookIndex {
    types: RwLock<TypeIdMap<&'static str>>,
}

impl HookIndex {
    /// Creates an empty index.
    pub const fn new() -> Self {
        Self {
            types: RwLock::new(TypeIdMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, TypeIdMap<&'static str>> {
        self.types.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TypeIdMap<&'static str>> {
        self.types.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a type. Returns `true` if it was not present.
    pub fn insert(&self, type_id: TypeId, type_name: &'static str) -> bool {
        self.write().insert(type_id, type_name).is_none()
    }

    /// Removes a type. Returns `true` if it was present.
    pub fn remove(&self, type_id: TypeId) -> bool {
        self.write().remove(&type_id).is_some()
    }

    /// Returns `true` if the type owns a custom serialize function.
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.read().contains(&type_id)
    }

    /// Removes every type.
    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Names of the indexed types, in arbitrary order.
    pub fn type_names(&self) -> Vec<&'static str> {
        self.read().values().copied().collect()
    }
}

impl Default for HookIndex {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for HookIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.read().values()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
