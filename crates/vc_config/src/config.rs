use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::flags::{FlagScope, FlagStore};
use crate::registry::{HookIndex, TypeHookRegistry, TypeHooks};
use crate::{HookError, TypeSerializer};

// -----------------------------------------------------------------------------
// TextConfig

/// Flags, type hooks and the hook presence index, bundled.
///
/// An encoder holds a `&TextConfig` (usually [`TextConfig::global`]) and, per
/// execution context, a [`FlagScope`] opened from it.
///
/// Separate instances are fully independent, which is mostly useful in tests.
///
/// # Examples
///
/// ```
/// use vc_config::TextConfig;
///
/// let config = TextConfig::new();
///
/// config.type_config::<u32>().set_serialize_fn(|v: &u32| format!("0x{v:x}"));
/// assert!(config.is_registered::<u32>());
///
/// let mut out = String::new();
/// config.write_any(&(), &mut out, &255_u32).unwrap();
/// assert_eq!(out, "0xff");
///
/// config.reset();
/// assert!(!config.is_registered::<u32>());
/// // The hook itself survives the reset.
/// assert_eq!(config.type_config::<u32>().to_text(&16).unwrap(), "0x10");
/// ```
pub struct TextConfig {
    flags: FlagStore,
    hook_index: HookIndex,
    registry: TypeHookRegistry,
}

static GLOBAL: TextConfig = TextConfig::new();

impl TextConfig {
    /// Creates a configuration with every flag unset and no hooks.
    pub const fn new() -> Self {
        Self {
            flags: FlagStore::new(),
            hook_index: HookIndex::new(),
            registry: TypeHookRegistry::new(),
        }
    }

    /// The process-wide configuration.
    #[inline]
    pub fn global() -> &'static TextConfig {
        &GLOBAL
    }

    // -------------------------------------------------------------------------
    // Flags

    /// The process-wide flag slots.
    #[inline]
    pub fn flags(&self) -> &FlagStore {
        &self.flags
    }

    /// Opens a call scope over the process-wide flags.
    #[inline]
    pub fn scope(&self) -> FlagScope<'_> {
        self.flags.scope()
    }

    // -------------------------------------------------------------------------
    // Type hooks

    /// Returns the hooks of `T`, creating its entry on first use.
    pub fn type_config<T: 'static>(&self) -> TypeHooks<'_, T> {
        TypeHooks::new(
            self.registry.get_or_create::<T>(),
            &self.registry,
            &self.hook_index,
        )
    }

    /// The table of per-type entries.
    #[inline]
    pub fn registry(&self) -> &TypeHookRegistry {
        &self.registry
    }

    /// The set of types owning a custom serialize function.
    #[inline]
    pub fn hook_index(&self) -> &HookIndex {
        &self.hook_index
    }

    /// Returns `true` if `T` owns a custom serialize function.
    #[inline]
    pub fn is_registered<T: 'static>(&self) -> bool {
        self.is_registered_id(TypeId::of::<T>())
    }

    /// Returns `true` if the type owns a custom serialize function.
    #[inline]
    pub fn is_registered_id(&self, type_id: TypeId) -> bool {
        self.hook_index.contains(type_id)
    }

    /// Serializes a value through the custom hook of its concrete type.
    ///
    /// The type must be in the hook presence index; the index, not the
    /// entry, decides whether the custom path applies.
    ///
    /// # Errors
    ///
    /// - [`HookError::NotRegistered`] if the type is not in the index.
    /// - Anything [`TypeConfig::write`](crate::TypeConfig::write) returns.
    pub fn write_any(
        &self,
        serializer: &dyn TypeSerializer,
        writer: &mut dyn fmt::Write,
        value: &dyn Any,
    ) -> Result<(), HookError> {
        let type_id = Any::type_id(value);
        if !self.hook_index.contains(type_id) {
            return Err(HookError::NotRegistered { type_id });
        }
        match self.registry.get_dyn(type_id) {
            Some(config) => config.write_dyn(serializer, writer, value),
            None => Err(HookError::NotRegistered { type_id }),
        }
    }

    /// Deserializes `text` through the custom hook of the type `type_id`.
    ///
    /// Only types whose entry already exists can be reached this way, see
    /// the preregistration module for creating entries up front.
    ///
    /// # Errors
    ///
    /// - [`HookError::NotRegistered`] if the type has no entry.
    /// - Anything [`TypeConfig::parse`](crate::TypeConfig::parse) returns.
    pub fn parse_any(&self, type_id: TypeId, text: &str) -> Result<Box<dyn Any>, HookError> {
        match self.registry.get_dyn(type_id) {
            Some(config) => config.parse_dyn(text),
            None => Err(HookError::NotRegistered { type_id }),
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle

    /// Restores every flag to its default, clears every call-scope override
    /// and empties the hook presence index.
    ///
    /// Type entries and their hooks are kept.
    pub fn reset(&self) {
        self.flags.reset();
        self.hook_index.clear();
    }

    /// Drops every type entry and empties the hook presence index.
    ///
    /// [`TypeHooks`] handles obtained earlier keep their now detached entry;
    /// installing or removing a serialize fn through them leaves the index
    /// alone.
    pub fn clear_type_configs(&self) {
        self.registry.clear();
        self.hook_index.clear();
        log::debug!("type configs cleared");
    }
}

impl Default for TextConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextConfig")
            .field("flags", &self.flags)
            .field("hook_index", &self.hook_index)
            .field("registry", &self.registry)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use core::any::TypeId;

    use super::TextConfig;
    use crate::{BoxedError, Flag, HookError};

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    fn parse_point(text: &str) -> Result<Point, BoxedError> {
        let (x, y) = text.split_once(',').ok_or("expected `x,y`")?;
        Ok(Point {
            x: x.parse()?,
            y: y.parse()?,
        })
    }

    fn point_hooks(config: &TextConfig) {
        let hooks = config.type_config::<Point>();
        hooks.set_serialize_fn(|p: &Point| format!("{},{}", p.x, p.y));
        hooks.set_deserialize_fn(parse_point);
    }

    #[test]
    fn point_round_trip() {
        let config = TextConfig::new();
        point_hooks(&config);

        assert!(config.is_registered::<Point>());

        let hooks = config.type_config::<Point>();
        let text = hooks.to_text(&Point { x: 3, y: 4 }).unwrap();
        assert_eq!(text, "3,4");
        assert_eq!(hooks.parse(&text).unwrap(), Point { x: 3, y: 4 });
    }

    #[test]
    fn empty_text_round_trip() {
        let config = TextConfig::new();
        let hooks = config.type_config::<Option<u8>>();
        hooks.set_serialize_fn(|v: &Option<u8>| match v {
            Some(v) => format!("{v}"),
            None => String::new(),
        });
        hooks.set_deserialize_fn(|text: &str| match text {
            "" => Ok(None),
            text => Ok(Some(text.parse()?)),
        });

        for value in [None, Some(0), Some(255)] {
            let text = hooks.to_text(&value).unwrap();
            assert_eq!(hooks.parse(&text).unwrap(), value);
        }
        assert_eq!(hooks.to_text(&None).unwrap(), "");
    }

    #[test]
    fn reset_keeps_hooks_reachable() {
        let config = TextConfig::new();
        point_hooks(&config);
        let mut scope = config.scope();
        scope.set(Flag::IncludeNullValues, true);
        config.flags().set(Flag::ExcludeTypeInfo, true);

        config.reset();

        for flag in Flag::ALL {
            assert!(!scope.get(flag));
            assert!(!config.scope().get(flag));
        }
        assert!(config.hook_index().is_empty());
        assert!(!config.is_registered::<Point>());

        let hooks = config.type_config::<Point>();
        assert!(hooks.has_serialize_fn());
        assert_eq!(hooks.to_text(&Point { x: -1, y: 0 }).unwrap(), "-1,0");

        // Setting the fn again puts the type back.
        hooks.set_serialize_fn(|p: &Point| format!("{};{}", p.x, p.y));
        assert!(config.is_registered::<Point>());
    }

    #[test]
    fn write_any_dispatches_by_index() {
        let config = TextConfig::new();
        point_hooks(&config);

        let mut out = String::from("{\"at\":");
        config
            .write_any(&(), &mut out, &Point { x: 1, y: 2 })
            .unwrap();
        assert_eq!(out, "{\"at\":1,2");

        let err = config.write_any(&(), &mut out, &5_u8).unwrap_err();
        assert!(matches!(err, HookError::NotRegistered { .. }));

        config.reset();
        let err = config
            .write_any(&(), &mut out, &Point { x: 1, y: 2 })
            .unwrap_err();
        assert!(matches!(err, HookError::NotRegistered { .. }));
    }

    #[test]
    fn parse_any_needs_an_entry() {
        let config = TextConfig::new();
        point_hooks(&config);

        let value = config.parse_any(TypeId::of::<Point>(), "7,8").unwrap();
        assert_eq!(value.downcast_ref::<Point>(), Some(&Point { x: 7, y: 8 }));

        let err = config.parse_any(TypeId::of::<u8>(), "7").unwrap_err();
        assert!(matches!(err, HookError::NotRegistered { .. }));

        config.type_config::<u8>();
        let err = config.parse_any(TypeId::of::<u8>(), "7").unwrap_err();
        assert!(matches!(err, HookError::MissingDeserializeFn { type_name: "u8" }));
    }

    #[test]
    fn parse_failure_keeps_registry() {
        let config = TextConfig::new();
        point_hooks(&config);

        let err = config.type_config::<Point>().parse("3;4").unwrap_err();
        assert!(matches!(err, HookError::Parse { .. }));
        assert!(config.is_registered::<Point>());
        assert!(config.type_config::<Point>().has_deserialize_fn());
    }

    #[test]
    fn per_type_overrides_do_not_inherit() {
        let config = TextConfig::new();
        config.scope().set(Flag::EmitCamelCaseNames, true);

        let hooks = config.type_config::<Point>();
        assert!(!hooks.emit_camel_case_names());

        hooks.set_emit_camel_case_names(true);
        hooks.set_exclude_property_names(["y"]);
        assert!(config.type_config::<Point>().emit_camel_case_names());
        assert!(config.type_config::<Point>().is_property_excluded("y"));
        assert!(!config.type_config::<u8>().emit_camel_case_names());
    }

    #[test]
    fn clear_type_configs_keeps_invariant() {
        let config = TextConfig::new();
        point_hooks(&config);

        config.clear_type_configs();
        assert!(config.registry().is_empty());
        assert!(!config.is_registered::<Point>());
        assert!(!config.type_config::<Point>().has_serialize_fn());
    }

    #[test]
    fn global_is_one_instance() {
        assert!(core::ptr::eq(TextConfig::global(), TextConfig::global()));
    }
}
