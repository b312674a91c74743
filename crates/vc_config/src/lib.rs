#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod config;
mod error;
mod serializer;

pub mod flags;
pub mod registry;

#[cfg(feature = "preregister")]
pub mod preregister;

#[doc(hidden)]
pub mod __macro_exports;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use config::TextConfig;
pub use error::{BoxedError, HookError, UnknownFlag};
pub use flags::{Flag, FlagScope, FlagSettings, FlagStore, ResolvedFlags};
pub use registry::{HookIndex, TypeConfig, TypeHookRegistry, TypeHooks};
pub use serializer::TypeSerializer;

#[cfg(feature = "preregister")]
pub use preregister::{PreregisterPair, Preregistrar};
