use alloc::string::String;
use core::time::Duration;

use super::PreregisterPair;

macro_rules! builtin_pairs {
    ($($elem:ty),* $(,)?) => {
        /// Pairs `T` with every built-in element type and its `Option`.
        pub(crate) const fn builtin_pairs<T: 'static>() -> [PreregisterPair; BUILTIN_PAIRS] {
            [
                $(
                    PreregisterPair::of::<T, $elem>(),
                    PreregisterPair::of::<T, Option<$elem>>(),
                )*
            ]
        }
    };
}

/// 18 element types, each also as `Option`.
pub(crate) const BUILTIN_PAIRS: usize = 36;

builtin_pairs!(
    String, bool, char, //
    i8, i16, i32, i64, i128, isize, //
    u8, u16, u32, u64, u128, usize, //
    f32, f64, Duration,
);
