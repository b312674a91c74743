use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::any::type_name;
use core::fmt;
use std::collections::HashMap;

use crate::TypeHookRegistry;

// -----------------------------------------------------------------------------
// PreregisterPair

/// One `(type, element type)` pair to warm up ahead of time.
///
/// Warming a pair creates the registry entries of
///
/// - `T`, `Vec<T>`, `Box<[T]>`, `VecDeque<T>`,
/// - `E`, `Vec<E>`, `Box<[E]>`, `VecDeque<E>`, `Option<E>`,
/// - `HashMap<T, E>` and `HashMap<E, T>`.
///
/// Creating an entry instantiates its generic code and type-erased vtable,
/// so the types become reachable through [`TextConfig::parse_any`] and
/// [`TextConfig::write_any`] without any generic call for them at run time.
///
/// [`TextConfig::parse_any`]: crate::TextConfig::parse_any
/// [`TextConfig::write_any`]: crate::TextConfig::write_any
#[derive(Clone, Copy)]
pub struct PreregisterPair {
    warm: fn(&TypeHookRegistry) -> usize,
    type_name: fn() -> &'static str,
    elem_name: fn() -> &'static str,
}

impl PreregisterPair {
    /// The pair `(T, E)`.
    pub const fn of<T: 'static, E: 'static>() -> Self {
        Self {
            warm: warm_pair::<T, E>,
            type_name: type_name::<T>,
            elem_name: type_name::<E>,
        }
    }

    /// Only `T` itself, no derived shapes.
    pub(crate) const fn single<T: 'static>() -> Self {
        Self {
            warm: warm_single::<T>,
            type_name: type_name::<T>,
            elem_name: type_name::<T>,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    #[inline]
    pub fn elem_name(&self) -> &'static str {
        (self.elem_name)()
    }

    /// Creates the missing entries of this pair, returning how many.
    #[inline]
    pub fn warm(&self, registry: &TypeHookRegistry) -> usize {
        (self.warm)(registry)
    }
}

impl fmt::Debug for PreregisterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.type_name(), self.elem_name())
    }
}

fn warm_single<T: 'static>(registry: &TypeHookRegistry) -> usize {
    usize::from(registry.touch::<T>())
}

fn warm_pair<T: 'static, E: 'static>(registry: &TypeHookRegistry) -> usize {
    [
        registry.touch::<T>(),
        registry.touch::<Vec<T>>(),
        registry.touch::<Box<[T]>>(),
        registry.touch::<VecDeque<T>>(),
        registry.touch::<E>(),
        registry.touch::<Vec<E>>(),
        registry.touch::<Box<[E]>>(),
        registry.touch::<VecDeque<E>>(),
        registry.touch::<Option<E>>(),
        registry.touch::<HashMap<T, E>>(),
        registry.touch::<HashMap<E, T>>(),
    ]
    .into_iter()
    .filter(|created| *created)
    .count()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::VecDeque;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use std::collections::HashMap;

    use super::PreregisterPair;
    use crate::TypeHookRegistry;

    struct Meters;

    #[test]
    fn warms_every_shape() {
        let registry = TypeHookRegistry::new();
        let pair = PreregisterPair::of::<Meters, u8>();

        assert_eq!(pair.warm(&registry), 11);
        assert!(registry.contains::<Meters>());
        assert!(registry.contains::<Box<[Meters]>>());
        assert!(registry.contains::<VecDeque<u8>>());
        assert!(registry.contains::<Option<u8>>());
        assert!(registry.contains::<HashMap<Meters, u8>>());
        assert!(registry.contains::<HashMap<u8, Meters>>());
        assert!(!registry.contains::<Option<Meters>>());

        // Second run creates nothing.
        assert_eq!(pair.warm(&registry), 0);
    }

    #[test]
    fn shared_shapes_counted_once() {
        let registry = TypeHookRegistry::new();
        registry.get_or_create::<Vec<u8>>();

        // u8, Box<[u8]>, VecDeque<u8>, Option<u8>, HashMap<u8, u8>
        assert_eq!(PreregisterPair::of::<u8, u8>().warm(&registry), 5);
    }

    #[test]
    fn names() {
        let pair = PreregisterPair::of::<String, u8>();
        assert_eq!(pair.elem_name(), "u8");
        assert!(pair.type_name().ends_with("String"));
        assert_eq!(format!("{pair:?}"), format!("({}, u8)", pair.type_name()));

        let single = PreregisterPair::single::<Meters>();
        let registry = TypeHookRegistry::new();
        assert_eq!(single.warm(&registry), 1);
        assert!(!registry.contains::<Vec<Meters>>());
    }
}
