use core::fmt;

/// The part of a text encoder that the hook layer calls into.
///
/// The encoder owns the wire format. The hook layer only needs a way to
/// emit a segment that a custom serialize fn has already formatted, so it
/// must be written as-is: no quoting, escaping or re-encoding.
///
/// `()` is the pass-through implementation.
///
/// # Examples
///
/// ```
/// use core::fmt::{self, Write};
/// use vc_config::TypeSerializer;
///
/// /// Brackets raw segments to make them visible in logs.
/// struct Bracketed;
///
/// impl TypeSerializer for Bracketed {
///     fn write_raw_string(&self, writer: &mut dyn Write, value: &str) -> fmt::Result {
///         writer.write_char('[')?;
///         writer.write_str(value)?;
///         writer.write_char(']')
///     }
/// }
///
/// let mut out = String::new();
/// Bracketed.write_raw_string(&mut out, "1,2").unwrap();
/// assert_eq!(out, "[1,2]");
/// ```
pub trait TypeSerializer {
    /// Writes `value` to `writer` verbatim.
    fn write_raw_string(&self, writer: &mut dyn fmt::Write, value: &str) -> fmt::Result;
}

impl TypeSerializer for () {
    #[inline]
    fn write_raw_string(&self, writer: &mut dyn fmt::Write, value: &str) -> fmt::Result {
        writer.write_str(value)
    }
}

impl<S: TypeSerializer + ?Sized> TypeSerializer for &S {
    #[inline]
    fn write_raw_string(&self, writer: &mut dyn fmt::Write, value: &str) -> fmt::Result {
        (**self).write_raw_string(writer, value)
    }
}
