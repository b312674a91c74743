//! Behaviour flags with a process-wide layer and a call-scope layer.
//!
//! ## Menu
//!
//! - [`Flag`]: the set of switches.
//! - [`FlagStore`]: process-wide slots, shared by every execution context.
//! - [`FlagScope`]: call-scope slots, owned by one execution context.
//! - [`ResolvedFlags`]: a resolved snapshot that can be cached.
//! - [`FlagSettings`]: serde-loadable process-wide values.
//!
//! ## Resolution
//!
//! A read returns the call-scope value if it was set, else the process-wide
//! value if it was set, else `false`.
//!
//! [`FlagStore::reset`] clears the process-wide slots and advances an epoch.
//! A [`FlagScope`] whose overrides were written under an older epoch treats
//! them as unset, so a reset clears every live scope without the store
//! having to track them.

// -----------------------------------------------------------------------------
// Modules

mod flag;
mod scope;
mod settings;
mod slot;
mod store;

// -----------------------------------------------------------------------------
// Exports

pub use flag::Flag;
pub use scope::{FlagScope, ResolvedFlags};
pub use settings::FlagSettings;
pub use store::FlagStore;
