use alloc::string::ToString;
use core::fmt::{Debug, Display};
use core::str::FromStr;

use crate::UnknownFlag;

// -----------------------------------------------------------------------------
// Flag

/// A named boolean switch consulted by the encoder.
///
/// All flags default to `false`.
///
/// # Examples
///
/// ```
/// use vc_config::Flag;
///
/// let flag: Flag = "IncludeNullValues".parse().unwrap();
/// assert_eq!(flag, Flag::IncludeNullValues);
/// assert_eq!(flag.to_string(), "IncludeNullValues");
///
/// assert!(Flag::EmitCamelCaseNames.is_first_write_wins());
/// assert!(!Flag::ExcludeTypeInfo.is_first_write_wins());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Flag {
    /// Decode untyped objects into string maps instead of dynamic values.
    ConvertObjectsToStringMap = 0,
    /// Emit members whose value is null.
    IncludeNullValues = 1,
    /// Never emit type information.
    ExcludeTypeInfo = 2,
    /// Emit camelCase member names and match names case-insensitively.
    EmitCamelCaseNames = 3,
}

impl Flag {
    /// The number of flags.
    pub const COUNT: usize = 4;

    /// Every flag, in slot order.
    pub const ALL: [Flag; Flag::COUNT] = [
        Flag::ConvertObjectsToStringMap,
        Flag::IncludeNullValues,
        Flag::ExcludeTypeInfo,
        Flag::EmitCamelCaseNames,
    ];

    #[inline(always)]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// The stable textual name of the flag.
    pub const fn name(self) -> &'static str {
        match self {
            Flag::ConvertObjectsToStringMap => "ConvertObjectsToStringMap",
            Flag::IncludeNullValues => "IncludeNullValues",
            Flag::ExcludeTypeInfo => "ExcludeTypeInfo",
            Flag::EmitCamelCaseNames => "EmitCamelCaseNames",
        }
    }

    /// Returns `true` if the first `set` within a reset cycle fixes the value.
    ///
    /// Lets a library configure itself once without later, incidental
    /// configuration from another module silently overriding it.
    #[inline]
    pub const fn is_first_write_wins(self) -> bool {
        matches!(self, Flag::EmitCamelCaseNames)
    }
}

impl Debug for Flag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for Flag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Flag {
    type Err = UnknownFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flag::ALL
            .into_iter()
            .find(|flag| flag.name() == s)
            .ok_or_else(|| UnknownFlag(s.to_string()))
    }
}

// -----------------------------------------------------------------------------
// Tests
