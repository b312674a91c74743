use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vc_utils::TypeIdMap;

use crate::registry::{DynTypeConfig, TypeConfig};

// -----------------------------------------------------------------------------
// Entry

struct Entry {
    type_name: &'static str,
    // Both point at the same `TypeConfig<T>`.
    typed: Arc<dyn Any + Send + Sync>,
    erased: Arc<dyn DynTypeConfig>,
}

impl Entry {
    fn new<T: 'static>() -> Self {
        let config = Arc::new(TypeConfig::<T>::new());
        Self {
            type_name: type_name::<T>(),
            typed: config.clone(),
            erased: config,
        }
    }

    fn typed<T: 'static>(&self) -> Arc<TypeConfig<T>> {
        match Arc::clone(&self.typed).downcast::<TypeConfig<T>>() {
            Ok(config) => config,
            Err(_) => panic!(
                "Type config mismatched, entry of `{}` requested as `{}`",
                self.type_name,
                type_name::<T>(),
            ),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeHookRegistry

/// The `TypeId -> TypeConfig` table.
///
/// Entries are created on first access and live as long as the registry.
/// Each entry is an independent `Arc<TypeConfig<T>>`, so once a caller holds
/// it no cross-type lock is involved in using it.
///
/// # Example
///
/// ```
/// use vc_config::TypeHookRegistry;
///
/// let registry = TypeHookRegistry::new();
/// assert!(!registry.contains::<u32>());
///
/// let config = registry.get_or_create::<u32>();
/// config.set_exclude_type_info(true);
///
/// assert!(registry.contains::<u32>());
/// assert!(registry.get_or_create::<u32>().exclude_type_info());
/// ```
pub struct TypeHookRegistry {
    entries: RwLock<TypeIdMap<Entry>>,
}

impl TypeHookRegistry {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(TypeIdMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, TypeIdMap<Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TypeIdMap<Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the entry of `T`, creating it if absent.
    pub fn get_or_create<T: 'static>(&self) -> Arc<TypeConfig<T>> {
        let type_id = TypeId::of::<T>();
        if let Some(entry) = self.read().get(&type_id) {
            return entry.typed::<T>();
        }
        self.write()
            .get_or_insert_with(type_id, Entry::new::<T>)
            .typed::<T>()
    }

    /// Creates the entry of `T` if absent.
    ///
    /// Returns `true` if this call created it.
    pub fn touch<T: 'static>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        if self.read().contains(&type_id) {
            return false;
        }
        self.write().try_insert(type_id, Entry::new::<T>)
    }

    /// Runs `f` with `true` if `config` is the live entry of `T`.
    ///
    /// The registry cannot be cleared while `f` runs.
    pub(crate) fn with_attached<T: 'static, R>(
        &self,
        config: &Arc<TypeConfig<T>>,
        f: impl FnOnce(bool) -> R,
    ) -> R {
        let entries = self.read();
        let attached = entries.get(&TypeId::of::<T>()).is_some_and(|entry| {
            core::ptr::addr_eq(Arc::as_ptr(&entry.typed), Arc::as_ptr(config))
        });
        f(attached)
    }

    /// Returns the entry of `T` if it exists.
    pub fn get<T: 'static>(&self) -> Option<Arc<TypeConfig<T>>> {
        self.read()
            .get(&TypeId::of::<T>())
            .map(Entry::typed::<T>)
    }

    /// Returns the type-erased entry for `type_id` if it exists.
    pub fn get_dyn(&self, type_id: TypeId) -> Option<Arc<dyn DynTypeConfig>> {
        self.read()
            .get(&type_id)
            .map(|entry| Arc::clone(&entry.erased))
    }

    /// Whether an entry of `T` exists.
    #[inline]
    pub fn contains<T: 'static>(&self) -> bool {
        self.contains_id(TypeId::of::<T>())
    }

    /// Whether an entry for `type_id` exists.
    pub fn contains_id(&self, type_id: TypeId) -> bool {
        self.read().contains(&type_id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Names of all types with an entry, in arbitrary order.
    pub fn type_names(&self) -> Vec<&'static str> {
        self.read().values().map(|entry| entry.type_name).collect()
    }

    /// Drops every entry.
    ///
    /// Handles obtained earlier stay usable but are detached from the
    /// registry. Use [`TextConfig::clear_type_configs`] to also empty the
    /// hook presence index.
    ///
    /// [`TextConfig::clear_type_configs`]: crate::TextConfig::clear_type_configs
    pub fn clear(&self) {
        self.write().clear();
    }
}

impl Default for TypeHookRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for TypeHookRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set()
            .entries(self.read().values().map(|entry| entry.type_name))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use core::any::TypeId;
    use std::thread;

    use super::TypeHookRegistry;

    #[test]
    fn lazily_created_and_shared() {
        let registry = TypeHookRegistry::new();
        assert!(registry.get::<i8>().is_none());

        let a = registry.get_or_create::<i8>();
        let b = registry.get_or_create::<i8>();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn entries_are_per_type() {
        let registry = TypeHookRegistry::new();
        registry.get_or_create::<i8>().set_emit_camel_case_names(true);

        assert!(!registry.get_or_create::<u8>().emit_camel_case_names());
        assert!(registry.get_or_create::<i8>().emit_camel_case_names());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn touch_creates_once() {
        let registry = TypeHookRegistry::new();
        assert!(registry.touch::<Vec<i8>>());
        assert!(!registry.touch::<Vec<i8>>());
        assert!(registry.contains_id(TypeId::of::<Vec<i8>>()));
    }

    #[test]
    fn erased_view_matches() {
        let registry = TypeHookRegistry::new();
        registry
            .get_or_create::<i8>()
            .set_deserialize_fn(|text: &str| Ok(text.parse()?));

        let erased = registry.get_dyn(TypeId::of::<i8>()).unwrap();
        assert_eq!(erased.type_name(), "i8");
        assert!(erased.has_deserialize_fn());
        assert!(!erased.has_serialize_fn());
        assert!(registry.get_dyn(TypeId::of::<u8>()).is_none());
    }

    #[test]
    fn concurrent_creation_yields_one_entry() {
        let registry = TypeHookRegistry::new();
        let registry = &registry;

        let configs: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(move |_| s.spawn(move || registry.get_or_create::<u64>()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(registry.len(), 1);
        for config in &configs {
            assert!(Arc::ptr_eq(config, &configs[0]));
        }
    }

    #[test]
    fn clear_detaches_handles() {
        let registry = TypeHookRegistry::new();
        let config = registry.get_or_create::<u64>();
        config.set_deserialize_fn(|text: &str| Ok(text.parse()?));

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(config.parse("5").unwrap(), 5);
        assert_eq!(registry.type_names().len(), 0);

        let fresh = registry.get_or_create::<u64>();
        assert!(!fresh.has_deserialize_fn());
        assert_eq!(fresh.type_name(), "u64");
    }

    #[test]
    fn attached_only_for_live_entry() {
        let registry = TypeHookRegistry::new();
        let config = registry.get_or_create::<u64>();
        assert!(registry.with_attached(&config, |attached| attached));

        registry.clear();
        assert!(!registry.with_attached(&config, |attached| attached));

        let fresh = registry.get_or_create::<u64>();
        assert!(!registry.with_attached(&config, |attached| attached));
        assert!(registry.with_attached(&fresh, |attached| attached));
    }
}
