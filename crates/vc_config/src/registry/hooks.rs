use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;
use core::ops::Deref;

use crate::registry::{HookIndex, SerializeFn, TypeConfig, TypeHookRegistry};

// -----------------------------------------------------------------------------
// TypeHooks

/// A handle to the [`TypeConfig`] of `T`, bound to the [`HookIndex`] it
/// reports to.
///
/// Dereferences to [`TypeConfig<T>`] for everything except the serialize
/// function, which must go through this handle so the index stays in sync.
///
/// # Examples
///
/// ```
/// use vc_config::TextConfig;
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let config = TextConfig::new();
/// let hooks = config.type_config::<Point>();
///
/// hooks.set_serialize_fn(|p: &Point| format!("{},{}", p.x, p.y));
/// hooks.set_deserialize_fn(|text: &str| {
///     let (x, y) = text.split_once(',').ok_or("expected `x,y`")?;
///     Ok(Point { x: x.parse()?, y: y.parse()? })
/// });
/// assert!(hooks.is_registered());
///
/// let text = hooks.to_text(&Point { x: 3, y: 4 }).unwrap();
/// assert_eq!(hooks.parse(&text).unwrap(), Point { x: 3, y: 4 });
///
/// hooks.clear_serialize_fn();
/// assert!(!hooks.is_registered());
/// ```
pub struct TypeHooks<'a, T: 'static> {
    config: Arc<TypeConfig<T>>,
    registry: &'a TypeHookRegistry,
    index: &'a HookIndex,
}

impl<'a, T: 'static> TypeHooks<'a, T> {
    #[inline]
    pub(crate) fn new(
        config: Arc<TypeConfig<T>>,
        registry: &'a TypeHookRegistry,
        index: &'a HookIndex,
    ) -> Self {
        Self {
            config,
            registry,
            index,
        }
    }

    /// The shared entry. Outlives the handle and any reset.
    ///
    /// After [`TextConfig::clear_type_configs`] the entry is detached: it
    /// still works on its own, but changes to it no longer reach the index.
    ///
    /// [`TextConfig::clear_type_configs`]: crate::TextConfig::clear_type_configs
    #[inline]
    pub fn config(&self) -> &Arc<TypeConfig<T>> {
        &self.config
    }

    /// Returns `true` if `T` is in the hook presence index.
    #[inline]
    pub fn is_registered(&self) -> bool {
        self.index.contains(TypeId::of::<T>())
    }

    /// Installs a custom serialize function and adds `T` to the index.
    ///
    /// Installing again replaces the function; the index is unchanged.
    pub fn set_serialize_fn<F>(&self, f: F)
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.replace_serialize_fn(Some(Arc::new(f)));
    }

    /// Removes the custom serialize function and removes `T` from the index.
    pub fn clear_serialize_fn(&self) {
        self.replace_serialize_fn(None);
    }

    /// Swaps the serialize function, returning the previous one.
    ///
    /// `Some` adds `T` to the index, `None` removes it. A detached entry
    /// leaves the index alone.
    pub fn replace_serialize_fn(
        &self,
        serialize_fn: Option<SerializeFn<T>>,
    ) -> Option<SerializeFn<T>> {
        self.registry.with_attached(&self.config, |attached| {
            let index = attached.then_some(self.index);
            self.config.replace_serialize_fn(serialize_fn, index)
        })
    }
}

impl<T: 'static> Deref for TypeHooks<'_, T> {
    type Target = TypeConfig<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.config
    }
}

impl<T: 'static> Clone for TypeHooks<'_, T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            registry: self.registry,
            index: self.index,
        }
    }
}

impl<T: 'static> core::fmt::Debug for TypeHooks<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeHooks")
            .field("config", &self.config)
            .field("registered", &self.is_registered())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
