//! Values that can no longer change.
//!
//! Record data is used as the key of sets and shared between the sections
//! of a message and between messages. For that to be safe, a value must
//! not change once it has been handed out. [`Frozen`] takes ownership of a
//! finished value, computes its fingerprint once, and from then on only
//! hands out shared references.
//!
//! Changing a frozen value means creating a new one via
//! [`Frozen::replace`]. Existing holders keep seeing the old value.

use core::hash::{Hash, Hasher};
use core::{fmt, ops};
use siphasher::sip::SipHasher13;
use std::sync::Arc;

//------------ Frozen --------------------------------------------------------

/// A shared, immutable value with a cached fingerprint.
///
/// Cloning a frozen value is cheap and results in the same shared value.
/// Comparison first checks whether both sides are the same shared value,
/// then their fingerprints, and only then compares the values themselves.
/// Hashing writes the cached fingerprint, which makes frozen values cheap
/// to use as keys.
pub struct Frozen<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    value: T,
    fingerprint: u64,
}

impl<T: Hash> Frozen<T> {
    /// Freezes a value.
    pub fn new(value: T) -> Self {
        let mut hasher = SipHasher13::new();
        value.hash(&mut hasher);
        Frozen {
            inner: Arc::new(Inner {
                fingerprint: hasher.finish(),
                value,
            }),
        }
    }

    /// Returns a new frozen value derived from this one.
    ///
    /// The value is cloned, `op` is allowed to modify the clone, and the
    /// result is frozen. `self` remains unchanged.
    #[must_use]
    pub fn replace<F: FnOnce(&mut T)>(&self, op: F) -> Self
    where
        T: Clone,
    {
        let mut value = self.inner.value.clone();
        op(&mut value);
        Self::new(value)
    }
}

impl<T> Frozen<T> {
    /// Returns the fingerprint computed when the value was frozen.
    pub fn fingerprint(&self) -> u64 {
        self.inner.fingerprint
    }

    /// Returns whether both values are the very same shared value.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// Returns an unfrozen copy of the value.
    pub fn to_value(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.clone()
    }
}

//--- From

impl<T: Hash> From<T> for Frozen<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

//--- Clone

impl<T> Clone for Frozen<T> {
    fn clone(&self) -> Self {
        Frozen {
            inner: self.inner.clone(),
        }
    }
}

//--- Deref and AsRef

impl<T> ops::Deref for Frozen<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner.value
    }
}

impl<T> AsRef<T> for Frozen<T> {
    fn as_ref(&self) -> &T {
        &self.inner.value
    }
}

//--- PartialEq, Eq, and Hash

impl<T: PartialEq> PartialEq for Frozen<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other)
            || (self.inner.fingerprint == other.inner.fingerprint
                && self.inner.value == other.inner.value)
    }
}

impl<T: Eq> Eq for Frozen<T> {}

impl<T> Hash for Frozen<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.inner.fingerprint)
    }
}

//--- Display and Debug

impl<T: fmt::Display> fmt::Display for Frozen<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.inner.value, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Frozen<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.inner.value, f)
    }
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[derive(Clone, Debug, Eq, Hash, PartialEq)]
    struct Pair {
        left: u16,
        right: String,
    }

    fn pair(left: u16, right: &str) -> Frozen<Pair> {
        Frozen::new(Pair {
            left,
            right: right.into(),
        })
    }

    #[test]
    fn equality() {
        let a = pair(1, "a");
        let b = pair(1, "a");
        assert!(!Frozen::ptr_eq(&a, &b));
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a, pair(2, "a"));
        assert!(Frozen::ptr_eq(&a, &a.clone()));
    }

    #[test]
    fn replace_makes_new_value() {
        let a = pair(1, "a");
        let b = a.replace(|value| value.left = 7);
        assert_eq!(a.left, 1);
        assert_eq!(b.left, 7);
        assert_eq!(b.right, "a");
        assert_ne!(a, b);
    }

    #[test]
    fn usable_as_key() {
        let set: HashSet<_> = [pair(1, "a"), pair(1, "a"), pair(2, "b")].into();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&pair(2, "b")));
    }

    #[test]
    fn case_insensitive_names() {
        use crate::base::name::Name;

        let upper: Frozen<Name> = Frozen::new("EXAMPLE.com.".parse().unwrap());
        let lower: Frozen<Name> = Frozen::new("example.COM.".parse().unwrap());
        assert_eq!(upper, lower);
        assert_eq!(upper.to_value().to_string(), "EXAMPLE.com.");
    }
}
