//! Closed-world preregistration.
//!
//! [`TextConfig::parse_any`] and [`TextConfig::write_any`] reach a type by
//! `TypeId` alone. That only works for types whose registry entry already
//! exists, which in turn requires the generic code for the type to have been
//! instantiated somewhere. Containers of user types (`Vec<T>`,
//! `HashMap<K, V>`, ...) are easy to miss.
//!
//! Preregistration creates those entries up front from a declared set of
//! [`PreregisterPair`]s:
//!
//! - explicitly, with [`Preregistrar`] or [`TextConfig::preregister`];
//! - statically, with [`preregister!`](crate::preregister) and
//!   [`TextConfig::auto_preregister`] (feature `auto_register`).
//!
//! The static path uses the [`inventory`] crate. Not every platform supports
//! it; there `auto_preregister` returns `false` and does nothing.
//!
//! [`TextConfig::parse_any`]: crate::TextConfig::parse_any
//! [`TextConfig::write_any`]: crate::TextConfig::write_any
//! [`TextConfig::preregister`]: crate::TextConfig::preregister
//! [`TextConfig::auto_preregister`]: crate::TextConfig::auto_preregister
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod builtin;
mod pair;

#[cfg(feature = "auto_register")]
pub(crate) mod auto;

// -----------------------------------------------------------------------------
// Exports

pub use pair::PreregisterPair;

use alloc::vec::Vec;

use crate::TextConfig;

// -----------------------------------------------------------------------------
// Preregistrar

/// Collects [`PreregisterPair`]s and warms them in one go.
///
/// # Examples
///
/// ```
/// use std::any::TypeId;
/// use vc_config::{HookError, Preregistrar, TextConfig};
///
/// struct Meters(f64);
///
/// let config = TextConfig::new();
/// Preregistrar::new(&config)
///     .pair::<Meters, u32>()
///     .builtin_elements::<Meters>()
///     .run();
///
/// // Reachable by `TypeId` now; no hook installed yet.
/// let err = config.parse_any(TypeId::of::<Vec<Meters>>(), "[]").unwrap_err();
/// assert!(matches!(err, HookError::MissingDeserializeFn { .. }));
/// ```
#[must_use = "nothing is warmed until `run` is called"]
pub struct Preregistrar<'a> {
    config: &'a TextConfig,
    pairs: Vec<PreregisterPair>,
}

impl<'a> Preregistrar<'a> {
    pub fn new(config: &'a TextConfig) -> Self {
        Self {
            config,
            pairs: Vec::new(),
        }
    }

    /// Adds the pair `(T, E)`.
    pub fn pair<T: 'static, E: 'static>(mut self) -> Self {
        self.pairs.push(PreregisterPair::of::<T, E>());
        self
    }

    pub fn pairs(mut self, pairs: &[PreregisterPair]) -> Self {
        self.pairs.extend_from_slice(pairs);
        self
    }

    /// Pairs `T` with `String`, `bool`, `char`, every integer and float
    /// type and `Duration`, and with the `Option` of each.
    pub fn builtin_elements<T: 'static>(mut self) -> Self {
        self.pairs.extend(builtin::builtin_pairs::<T>());
        self
    }

    /// Warms every collected pair, returning the number of entries created.
    pub fn run(self) -> usize {
        let registry = self.config.registry();
        let created: usize = self
            .pairs
            .iter()
            .map(|pair| pair.warm(registry))
            .sum();
        log::debug!(
            "preregistered {} pairs, {created} new type entries",
            self.pairs.len()
        );
        created
    }
}

impl core::fmt::Debug for Preregistrar<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(&self.pairs).finish()
    }
}

// -----------------------------------------------------------------------------
// TextConfig

impl TextConfig {
    /// Warms every pair, see [`Preregistrar`].
    ///
    /// Returns the number of entries created.
    pub fn preregister(&self, pairs: &[PreregisterPair]) -> usize {
        Preregistrar::new(self).pairs(pairs).run()
    }

    /// Warms every pair submitted with [`preregister!`](crate::preregister).
    ///
    /// Repeated calls are cheap.
    ///
    /// Returns `true` if static submission works on the current platform.
    /// Without the `auto_register` feature this does nothing and returns
    /// `false`.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_preregister(&self) -> bool {
        auto_preregister(self)
    }
}

#[cfg(feature = "auto_register")]
fn auto_preregister(config: &TextConfig) -> bool {
    let registry = config.registry();
    // Reduce the cost of repeated calls.
    if registry.contains::<auto::__AvailFlag>() {
        return true;
    }
    let created: usize = auto::submitted().map(|pair| pair.warm(registry)).sum();
    log::debug!("auto preregistration created {created} type entries");
    registry.contains::<auto::__AvailFlag>()
}

#[cfg(not(feature = "auto_register"))]
#[inline(always)]
fn auto_preregister(_: &TextConfig) -> bool {
    false
}

/// Submits [`PreregisterPair`]s for [`TextConfig::auto_preregister`].
///
/// Only non-generic types can be named.
///
/// # Examples
///
/// ```
/// use std::collections::VecDeque;
/// use vc_config::TextConfig;
///
/// pub struct Meters(f64);
///
/// vc_config::preregister!(Meters => u32, Meters => String);
///
/// let config = TextConfig::new();
/// if config.auto_preregister() {
///     assert!(config.registry().contains::<VecDeque<Meters>>());
/// }
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! preregister {
    ($($ty:ty => $elem:ty),+ $(,)?) => {
        $(
            $crate::__macro_exports::inventory::submit! {
                $crate::__macro_exports::__AutoPreregister(
                    $crate::PreregisterPair::of::<$ty, $elem>()
                )
            }
        )+
    };
}

// -----------------------------------------------------------------------------
// Tests
