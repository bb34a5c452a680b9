//! Exactly-once release of foreign resources.
//!
//! Handles and strings obtained from a session backend are not plain Rust values: the backend
//! expects each of them to be handed back through its own release function. [`Owned`] pairs a
//! value with that obligation so the release happens on every exit path, once.

use std::fmt;
use std::mem::ManuallyDrop;
use std::ops::Deref;

use tracing::trace;

/// A resource that must be handed back to the subsystem it came from.
pub trait Release {
    /// Gives the resource back. Consumes `self`, so it cannot run twice.
    fn release(self);
}

/// Strings produced in-process have nothing to give back; dropping them is the release.
impl Release for String {
    #[inline]
    fn release(self) {}
}

/// Unique owner of a foreign resource.
///
/// Dereferences to the resource and calls [`Release::release`] exactly once when dropped,
/// including during unwinding. There is no way to clone an `Owned` or to take the resource out
/// of it, so a second release cannot be expressed.
pub struct Owned<T: Release> {
    inner: ManuallyDrop<T>,
}

impl<T: Release> Owned<T> {
    /// Takes over the release obligation for `inner`.
    #[inline]
    pub fn new(inner: T) -> Self {
        Self { inner: ManuallyDrop::new(inner) }
    }
}

impl<T: Release + AsRef<str>> Owned<T> {
    /// Borrows a foreign string resource as `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        (*self.inner).as_ref()
    }
}

impl<T: Release> Deref for Owned<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: Release> Drop for Owned<T> {
    fn drop(&mut self) {
        // SAFETY: `drop` runs at most once and `inner` is never read after being taken here.
        let inner = unsafe { ManuallyDrop::take(&mut self.inner) };
        trace!(resource = std::any::type_name::<T>(), "release foreign resource");
        inner.release();
    }
}

impl<T: Release + fmt::Debug> fmt::Debug for Owned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Owned").field(&*self.inner).finish()
    }
}
