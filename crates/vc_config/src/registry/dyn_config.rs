use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::registry::TypeConfig;
use crate::{HookError, TypeSerializer};

// -----------------------------------------------------------------------------
// DynTypeConfig

/// The type-erased view of a [`TypeConfig`].
///
/// Lets an encoder that only holds a `&dyn Any` or a `TypeId` reach the
/// hooks of the concrete type. The vtable for a type exists only if its
/// `TypeConfig` was instantiated somewhere, which is what preregistration
/// guarantees ahead of time.
pub trait DynTypeConfig: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn exclude_type_info(&self) -> bool;

    fn emit_camel_case_names(&self) -> bool;

    fn is_property_excluded(&self, name: &str) -> bool;

    fn has_serialize_fn(&self) -> bool;

    fn has_deserialize_fn(&self) -> bool;

    /// [`TypeConfig::write`] with a downcast.
    ///
    /// Returns [`HookError::TypeMismatch`] if `value` is not of the entry's type.
    fn write_dyn(
        &self,
        serializer: &dyn TypeSerializer,
        writer: &mut dyn fmt::Write,
        value: &dyn Any,
    ) -> Result<(), HookError>;

    /// [`TypeConfig::parse`] returning a boxed value.
    fn parse_dyn(&self, text: &str) -> Result<Box<dyn Any>, HookError>;
}

impl<T: 'static> DynTypeConfig for TypeConfig<T> {
    #[inline]
    fn type_name(&self) -> &'static str {
        TypeConfig::type_name(self)
    }

    #[inline]
    fn exclude_type_info(&self) -> bool {
        TypeConfig::exclude_type_info(self)
    }

    #[inline]
    fn emit_camel_case_names(&self) -> bool {
        TypeConfig::emit_camel_case_names(self)
    }

    #[inline]
    fn is_property_excluded(&self, name: &str) -> bool {
        TypeConfig::is_property_excluded(self, name)
    }

    #[inline]
    fn has_serialize_fn(&self) -> bool {
        TypeConfig::has_serialize_fn(self)
    }

    #[inline]
    fn has_deserialize_fn(&self) -> bool {
        TypeConfig::has_deserialize_fn(self)
    }

    fn write_dyn(
        &self,
        serializer: &dyn TypeSerializer,
        writer: &mut dyn fmt::Write,
        value: &dyn Any,
    ) -> Result<(), HookError> {
        match value.downcast_ref::<T>() {
            Some(value) => self.write(serializer, writer, value),
            None => Err(HookError::TypeMismatch {
                expect: TypeConfig::type_name(self),
            }),
        }
    }

    fn parse_dyn(&self, text: &str) -> Result<Box<dyn Any>, HookError> {
        let value = self.parse(text)?;
        Ok(Box::new(value))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;

    use super::DynTypeConfig;
    use crate::{HookError, HookIndex, TypeConfig};

    #[test]
    fn erased_round_trip() {
        let index = HookIndex::new();
        let config = Arc::new(TypeConfig::<u16>::new());
        config.replace_serialize_fn(Some(Arc::new(|v: &u16| v.to_string())), Some(&index));
        config.set_deserialize_fn(|text: &str| Ok(text.parse()?));

        let erased: Arc<dyn DynTypeConfig> = config;

        let mut out = String::new();
        erased.write_dyn(&(), &mut out, &7_u16).unwrap();
        assert_eq!(out, "7");

        let value = erased.parse_dyn(&out).unwrap();
        assert_eq!(value.downcast_ref::<u16>(), Some(&7));
    }

    #[test]
    fn erased_type_mismatch() {
        let index = HookIndex::new();
        let config = TypeConfig::<u16>::new();
        config.replace_serialize_fn(Some(Arc::new(|v: &u16| v.to_string())), Some(&index));

        let mut out = String::new();
        let err = config.write_dyn(&(), &mut out, &7_u32).unwrap_err();
        assert!(matches!(err, HookError::TypeMismatch { expect: "u16" }));
        assert!(out.is_empty());
    }
}
