use super::PreregisterPair;

/// A pair submitted by [`preregister!`](crate::preregister).
pub struct __AutoPreregister(pub PreregisterPair);

inventory::collect!(__AutoPreregister);

/// Submitted by this crate; present in the registry only if static
/// submission works on the current platform.
pub struct __AvailFlag;

inventory::submit! {
    __AutoPreregister(PreregisterPair::single::<__AvailFlag>())
}

pub(crate) fn submitted() -> impl Iterator<Item = &'static PreregisterPair> {
    inventory::iter::<__AutoPreregister>
        .into_iter()
        .map(|submitted| &submitted.0)
}
