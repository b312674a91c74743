use alloc::boxed::Box;
use alloc::string::String;
use core::any::TypeId;
use core::fmt;

use thiserror::Error;

/// Error type returned by custom deserialize functions.
pub type BoxedError = Box<dyn core::error::Error + Send + Sync>;

// -----------------------------------------------------------------------------
// HookError

/// A hook path was reached for a type that cannot serve it.
///
/// These are caller contract violations: the engine is expected to check hook
/// presence before delegating. They fail the single value being processed and
/// never modify the registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HookError {
    #[error("no serialize fn registered for `{type_name}`")]
    MissingSerializeFn { type_name: &'static str },

    #[error("no deserialize fn registered for `{type_name}`")]
    MissingDeserializeFn { type_name: &'static str },

    #[error("no hook entry for type {type_id:?}")]
    NotRegistered { type_id: TypeId },

    #[error("hook for `{expect}` received a value of another type")]
    TypeMismatch { expect: &'static str },

    #[error("custom deserialize fn for `{type_name}` failed: {source}")]
    Parse {
        type_name: &'static str,
        #[source]
        source: BoxedError,
    },

    #[error("failed to write the raw segment of `{type_name}`")]
    Write {
        type_name: &'static str,
        #[source]
        source: fmt::Error,
    },
}

// -----------------------------------------------------------------------------
// UnknownFlag

/// A flag name did not match any [`Flag`](crate::Flag).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown flag `{0}`")]
pub struct UnknownFlag(pub String);
