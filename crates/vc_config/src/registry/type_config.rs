use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{TypeId, type_name};
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::registry::HookIndex;
use crate::{BoxedError, HookError, TypeSerializer};

/// A custom serialize function for `T`.
pub type SerializeFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// A custom deserialize function for `T`.
pub type DeserializeFn<T> = Arc<dyn Fn(&str) -> Result<T, BoxedError> + Send + Sync>;

// -----------------------------------------------------------------------------
// TypeConfig

/// Hooks and overrides for one concrete type `T`.
///
/// One shared instance per type lives in the [`TypeHookRegistry`], reached
/// through [`TextConfig::type_config`]. All fields use interior mutability,
/// so the entry can be configured and used concurrently.
///
/// The per-type `emit_camel_case_names` is independent of the
/// [`Flag`](crate::Flag) of the same name; it does not inherit the global value.
///
/// The serialize function is installed through [`TypeHooks`], which keeps
/// the [`HookIndex`] in sync.
///
/// [`TypeHookRegistry`]: crate::TypeHookRegistry
/// [`TextConfig::type_config`]: crate::TextConfig::type_config
/// [`TypeHooks`]: crate::TypeHooks
pub struct TypeConfig<T> {
    exclude_type_info: AtomicBool,
    emit_camel_case_names: AtomicBool,
    serialize_fn: RwLock<Option<SerializeFn<T>>>,
    deserialize_fn: RwLock<Option<DeserializeFn<T>>>,
    exclude_property_names: RwLock<Vec<String>>,
}

impl<T: 'static> TypeConfig<T> {
    /// Creates an entry with no hooks and every override off.
    pub const fn new() -> Self {
        Self {
            exclude_type_info: AtomicBool::new(false),
            emit_camel_case_names: AtomicBool::new(false),
            serialize_fn: RwLock::new(None),
            deserialize_fn: RwLock::new(None),
            exclude_property_names: RwLock::new(Vec::new()),
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    // -------------------------------------------------------------------------
    // Overrides

    /// Never emit type information for `T`.
    #[inline]
    pub fn exclude_type_info(&self) -> bool {
        self.exclude_type_info.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set_exclude_type_info(&self, value: bool) {
        self.exclude_type_info.store(value, Ordering::Release);
    }

    /// Emit camelCase member names for `T`.
    #[inline]
    pub fn emit_camel_case_names(&self) -> bool {
        self.emit_camel_case_names.load(Ordering::Acquire)
    }

    #[inline]
    pub fn set_emit_camel_case_names(&self, value: bool) {
        self.emit_camel_case_names.store(value, Ordering::Release);
    }

    /// Properties of `T` the encoder must skip, in registration order.
    pub fn exclude_property_names(&self) -> Vec<String> {
        self.exclude_property_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the excluded property names.
    pub fn set_exclude_property_names<I>(&self, names: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        *self
            .exclude_property_names
            .write()
            .unwrap_or_else(PoisonError::into_inner) = names;
    }

    /// Returns `true` if `name` is an excluded property of `T`.
    pub fn is_property_excluded(&self, name: &str) -> bool {
        self.exclude_property_names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|excluded| excluded == name)
    }

    // -------------------------------------------------------------------------
    // Hooks

    /// The installed serialize function, if any.
    pub fn serialize_fn(&self) -> Option<SerializeFn<T>> {
        self.serialize_fn
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[inline]
    pub fn has_serialize_fn(&self) -> bool {
        self.serialize_fn
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Swaps the serialize function and updates `index` while holding the
    /// per-type lock, so presence in the index always matches the slot.
    ///
    /// `None` for `index` means the entry is detached from its registry and
    /// must not report to any index.
    pub(crate) fn replace_serialize_fn(
        &self,
        serialize_fn: Option<SerializeFn<T>>,
        index: Option<&HookIndex>,
    ) -> Option<SerializeFn<T>> {
        let mut slot = self
            .serialize_fn
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(index) = index else {
            log::debug!("serialize hook of detached `{}` replaced", self.type_name());
            return core::mem::replace(&mut *slot, serialize_fn);
        };

        if serialize_fn.is_some() {
            if index.insert(TypeId::of::<T>(), self.type_name()) {
                log::debug!("serialize hook installed for `{}`", self.type_name());
            }
        } else if index.remove(TypeId::of::<T>()) {
            log::debug!("serialize hook removed for `{}`", self.type_name());
        }

        core::mem::replace(&mut *slot, serialize_fn)
    }

    /// The installed deserialize function, if any.
    pub fn deserialize_fn(&self) -> Option<DeserializeFn<T>> {
        self.deserialize_fn
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[inline]
    pub fn has_deserialize_fn(&self) -> bool {
        self.deserialize_fn
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Installs a custom deserialize function.
    ///
    /// The hook presence index is not involved: a decoder already knows its
    /// target type and can check [`has_deserialize_fn`](Self::has_deserialize_fn).
    pub fn set_deserialize_fn<F>(&self, f: F)
    where
        F: Fn(&str) -> Result<T, BoxedError> + Send + Sync + 'static,
    {
        self.replace_deserialize_fn(Some(Arc::new(f)));
    }

    /// Removes the custom deserialize function.
    pub fn clear_deserialize_fn(&self) {
        self.replace_deserialize_fn(None);
    }

    /// Swaps the deserialize function, returning the previous one.
    pub fn replace_deserialize_fn(
        &self,
        deserialize_fn: Option<DeserializeFn<T>>,
    ) -> Option<DeserializeFn<T>> {
        let mut slot = self
            .deserialize_fn
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        core::mem::replace(&mut *slot, deserialize_fn)
    }

    // -------------------------------------------------------------------------
    // Use

    /// Runs the custom serialize function on `value` and hands the result to
    /// `serializer` as a raw segment.
    ///
    /// The segment is not escaped or re-encoded; the custom function owns the
    /// formatting.
    ///
    /// # Errors
    ///
    /// - [`HookError::MissingSerializeFn`] if no function is installed.
    /// - [`HookError::Write`] if `writer` rejects the segment.
    pub fn write(
        &self,
        serializer: &dyn TypeSerializer,
        writer: &mut dyn fmt::Write,
        value: &T,
    ) -> Result<(), HookError> {
        // Clone out of the lock; user code never runs under it.
        let serialize_fn = self.serialize_fn().ok_or(HookError::MissingSerializeFn {
            type_name: self.type_name(),
        })?;
        let text = serialize_fn(value);
        serializer
            .write_raw_string(writer, &text)
            .map_err(|source| HookError::Write {
                type_name: self.type_name(),
                source,
            })
    }

    /// Serializes `value` into a new `String` through the pass-through
    /// serializer.
    pub fn to_text(&self, value: &T) -> Result<String, HookError> {
        let mut text = String::new();
        self.write(&(), &mut text, value)?;
        Ok(text)
    }

    /// Runs the custom deserialize function on `text`.
    ///
    /// # Errors
    ///
    /// - [`HookError::MissingDeserializeFn`] if no function is installed.
    /// - [`HookError::Parse`] if the function fails.
    pub fn parse(&self, text: &str) -> Result<T, HookError> {
        let deserialize_fn = self
            .deserialize_fn()
            .ok_or(HookError::MissingDeserializeFn {
                type_name: self.type_name(),
            })?;
        deserialize_fn(text).map_err(|source| HookError::Parse {
            type_name: self.type_name(),
            source,
        })
    }
}

impl<T: 'static> Default for TypeConfig<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for TypeConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeConfig")
            .field("type", &self.type_name())
            .field("exclude_type_info", &self.exclude_type_info())
            .field("emit_camel_case_names", &self.emit_camel_case_names())
            .field("serialize_fn", &self.has_serialize_fn())
            .field("deserialize_fn", &self.has_deserialize_fn())
            .field("exclude_property_names", &self.exclude_property_names())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::sync::Arc;
    use core::any::TypeId;
    use core::fmt::{self, Write};

    use super::TypeConfig;
    use crate::{HookError, HookIndex, TypeSerializer};

    #[derive(Debug, PartialEq)]
    struct Celsius(f32);

    struct Plain;

    impl TypeSerializer for Plain {
        fn write_raw_string(&self, writer: &mut dyn Write, value: &str) -> fmt::Result {
            writer.write_str(value)
        }
    }

    struct Full;

    impl Write for Full {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn defaults() {
        let config = TypeConfig::<Celsius>::new();
        assert!(!config.exclude_type_info());
        assert!(!config.emit_camel_case_names());
        assert!(!config.has_serialize_fn());
        assert!(!config.has_deserialize_fn());
        assert!(config.exclude_property_names().is_empty());
    }

    #[test]
    fn overrides() {
        let config = TypeConfig::<Celsius>::new();
        config.set_exclude_type_info(true);
        config.set_emit_camel_case_names(true);
        config.set_exclude_property_names(["secret", "cache"]);

        assert!(config.exclude_type_info());
        assert!(config.emit_camel_case_names());
        assert_eq!(config.exclude_property_names(), ["secret", "cache"]);
        assert!(config.is_property_excluded("cache"));
        assert!(!config.is_property_excluded("Cache"));
    }

    #[test]
    fn write_is_raw() {
        let index = HookIndex::new();
        let config = TypeConfig::<Celsius>::new();
        config.replace_serialize_fn(Some(Arc::new(|c: &Celsius| format!("\"{}C\"", c.0))), Some(&index));

        let mut out = String::from("[");
        config.write(&Plain, &mut out, &Celsius(21.5)).unwrap();
        assert_eq!(out, "[\"21.5C\"");
        assert!(index.contains(TypeId::of::<Celsius>()));
    }

    #[test]
    fn missing_hooks() {
        let config = TypeConfig::<Celsius>::new();
        assert!(matches!(
            config.to_text(&Celsius(0.0)),
            Err(HookError::MissingSerializeFn { .. })
        ));
        assert!(matches!(
            config.parse("0"),
            Err(HookError::MissingDeserializeFn { .. })
        ));
    }

    #[test]
    fn write_error_surfaces() {
        let index = HookIndex::new();
        let config = TypeConfig::<Celsius>::new();
        config.replace_serialize_fn(Some(Arc::new(|c: &Celsius| format!("{}", c.0))), Some(&index));

        let err = config.write(&(), &mut Full, &Celsius(1.0)).unwrap_err();
        assert!(matches!(err, HookError::Write { .. }));
    }

    #[test]
    fn parse_error_surfaces() {
        let config = TypeConfig::<Celsius>::new();
        config.set_deserialize_fn(|text: &str| Ok(Celsius(text.trim_end_matches('C').parse()?)));

        assert_eq!(config.parse("3.5C").unwrap(), Celsius(3.5));
        let err = config.parse("warm").unwrap_err();
        assert!(matches!(err, HookError::Parse { .. }));

        config.clear_deserialize_fn();
        assert!(!config.has_deserialize_fn());
    }

    #[test]
    fn clearing_serialize_fn_leaves_index() {
        let index = HookIndex::new();
        let config = TypeConfig::<Celsius>::new();
        config.replace_serialize_fn(Some(Arc::new(|_: &Celsius| String::new())), Some(&index));
        let previous = config.replace_serialize_fn(None, Some(&index));

        assert!(previous.is_some());
        assert!(!index.contains(TypeId::of::<Celsius>()));
        assert!(!config.has_serialize_fn());
    }
}
