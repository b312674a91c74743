//! Per-type hooks, keyed by [`TypeId`](core::any::TypeId).
//!
//! ## Menu
//!
//! - [`TypeConfig`]: the entry for one type: custom serialize/deserialize
//!   functions, per-type flag overrides and excluded property names.
//! - [`TypeHooks`]: a handle to a [`TypeConfig`] that keeps the
//!   [`HookIndex`] in sync when the serialize function changes.
//! - [`HookIndex`]: the set of types that currently own a serialize function.
//! - [`TypeHookRegistry`]: the lazily populated `TypeId -> TypeConfig` table.
//! - [`DynTypeConfig`]: the type-erased view of an entry, for dispatch from a
//!   `TypeId` or a `&dyn Any`.
//!
//! ## Lifetime
//!
//! Entries are created on first access and are never dropped by
//! [`TextConfig::reset`](crate::TextConfig::reset): registrations are
//! application wiring, flags are run-time tunables. A reset does empty the
//! [`HookIndex`], so after one the index no longer lists types whose
//! serialize function is still set, until that function is set again.

// -----------------------------------------------------------------------------
// Modules

mod dyn_config;
mod hook_index;
mod hooks;
mod type_config;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use dyn_config::DynTypeConfig;
pub use hook_index::HookIndex;
pub use hooks::TypeHooks;
pub use type_config::{DeserializeFn, SerializeFn, TypeConfig};
pub use type_registry::TypeHookRegistry;
