use stable_deref_trait::StableDeref;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

/// Handle whose identity for equality and hashing is the address of the referent, not its data
///
/// Classes and methods in the class graph are arena allocated and never move, so a `RefId` to
/// one of them is a cheap `Copy` handle that frames and heap objects can hold on to. Two classes
/// with the same name loaded twice would compare unequal, which is what the JVM does too.
pub struct RefId<'a, T: ?Sized>(pub &'a T);

impl<'a, T: ?Sized> Clone for RefId<'a, T> {
    fn clone(&self) -> Self {
        RefId(self.0)
    }
}

impl<'a, T: ?Sized> Copy for RefId<'a, T> {}

impl<'a, T: ?Sized> Hash for RefId<'a, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.0, state)
    }
}

impl<'a, 'b, T: ?Sized> PartialEq<RefId<'b, T>> for RefId<'a, T> {
    fn eq(&self, other: &RefId<'b, T>) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl<'a, T: ?Sized> Eq for RefId<'a, T> {}

impl<'a, T: ?Sized> Deref for RefId<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.0
    }
}

/// Handles print as whatever they point at
impl<'a, T: ?Sized + fmt::Debug> fmt::Debug for RefId<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

unsafe impl<'a, T: ?Sized> StableDeref for RefId<'a, T> {}
