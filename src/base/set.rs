//! Insertion-ordered sets.
//!
//! Record sets need to remember the order in which their members were
//! first seen, since that order determines how they are rendered into a
//! message. [`OrderedSet`] is a set that iterates in insertion order and
//! allows positional access in addition to the usual set operations.
//!
//! The set operations themselves are provided by the [`SetAlgebra`] trait
//! so that types wrapping an ordered set together with additional data,
//! such as [`Rdataset`][crate::base::record::Rdataset], get them too and
//! return values of their own type.

use core::convert::Infallible;
use core::hash::Hash;
use core::ops::{self, Bound, RangeBounds};
use core::{fmt, slice};
use std::collections::HashSet;
use std::vec;

//------------ OrderedSet ----------------------------------------------------

/// A set of unique items that remembers insertion order.
///
/// Adding an item that is already present is a no-op and does not change
/// its position. Equality is set equality and ignores order.
#[derive(Clone)]
pub struct OrderedSet<T> {
    /// The items in insertion order.
    items: Vec<T>,

    /// The same items again for quick membership tests.
    index: HashSet<T>,
}

impl<T> OrderedSet<T> {
    /// Creates a new, empty set.
    #[must_use]
    pub fn new() -> Self {
        OrderedSet {
            items: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Returns the number of items in the set.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at position `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns the items within `range` in insertion order.
    ///
    /// Returns `None` if the range is not within the set.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Option<&[T]> {
        self.items
            .get((range.start_bound().cloned(), range.end_bound().cloned()))
    }

    /// Returns all items as a slice in insertion order.
    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Returns an iterator over the items in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Hash + Eq + Clone> OrderedSet<T> {
    /// Adds an item to the end of the set.
    ///
    /// Returns whether the item was added, i.e., wasn’t present yet.
    pub fn add(&mut self, item: T) -> bool {
        if self.index.contains(&item) {
            return false;
        }
        self.index.insert(item.clone());
        self.items.push(item);
        true
    }

    /// Returns whether the set contains `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains(item)
    }

    /// Removes an item that must be present.
    pub fn remove(&mut self, item: &T) -> Result<(), SetError> {
        if self.discard(item) {
            Ok(())
        } else {
            Err(SetError::NotFound)
        }
    }

    /// Removes an item if it is present.
    ///
    /// Returns whether the item was present.
    pub fn discard(&mut self, item: &T) -> bool {
        if !self.index.remove(item) {
            return false;
        }
        if let Some(pos) = self.items.iter().position(|x| x == item) {
            self.items.remove(pos);
        }
        true
    }

    /// Removes and returns the most recently added item.
    pub fn pop(&mut self) -> Option<T> {
        let item = self.items.pop()?;
        self.index.remove(&item);
        Some(item)
    }

    /// Removes the item at position `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.index.remove(&item);
        Some(item)
    }

    /// Removes all items within `range`.
    ///
    /// The range is clamped to the size of the set. Returns the removed
    /// items in order.
    pub fn remove_range<R: RangeBounds<usize>>(&mut self, range: R) -> Vec<T> {
        let len = self.items.len();
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(len);
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        }
        .clamp(start, len);
        let removed: Vec<_> = self.items.drain(start..end).collect();
        for item in &removed {
            self.index.remove(item);
        }
        removed
    }

    /// Keeps only the items for which `op` returns true.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut op: F) {
        let index = &mut self.index;
        self.items.retain(|item| {
            if op(item) {
                true
            } else {
                index.remove(item);
                false
            }
        })
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }
}

//--- Default

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

//--- FromIterator, Extend, and IntoIterator

impl<T: Hash + Eq + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}

impl<T: Hash + Eq + Clone> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

//--- Index

impl<T> ops::Index<usize> for OrderedSet<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

//--- PartialEq and Eq

impl<T: Hash + Eq> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T: Hash + Eq> Eq for OrderedSet<T> {}

//--- Debug

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

//--- SetAlgebra

impl<T: Hash + Eq + Clone> SetAlgebra for OrderedSet<T> {
    type Item = T;
    type Error = Infallible;

    fn as_set(&self) -> &OrderedSet<T> {
        self
    }

    fn as_set_mut(&mut self) -> &mut OrderedSet<T> {
        self
    }

    fn check(&self, _item: &T) -> Result<(), Infallible> {
        Ok(())
    }
}

//--- Operators

impl<T: Hash + Eq + Clone> ops::BitOr for &OrderedSet<T> {
    type Output = OrderedSet<T>;

    fn bitor(self, other: Self) -> OrderedSet<T> {
        infallible(self.union(other))
    }
}

impl<T: Hash + Eq + Clone> ops::Add for &OrderedSet<T> {
    type Output = OrderedSet<T>;

    fn add(self, other: Self) -> OrderedSet<T> {
        infallible(self.union(other))
    }
}

impl<T: Hash + Eq + Clone> ops::BitAnd for &OrderedSet<T> {
    type Output = OrderedSet<T>;

    fn bitand(self, other: Self) -> OrderedSet<T> {
        self.intersection(other)
    }
}

impl<T: Hash + Eq + Clone> ops::Sub for &OrderedSet<T> {
    type Output = OrderedSet<T>;

    fn sub(self, other: Self) -> OrderedSet<T> {
        self.difference(other)
    }
}

impl<T: Hash + Eq + Clone> ops::BitXor for &OrderedSet<T> {
    type Output = OrderedSet<T>;

    fn bitxor(self, other: Self) -> OrderedSet<T> {
        infallible(self.symmetric_difference(other))
    }
}

impl<T: Hash + Eq + Clone> ops::BitOrAssign<&OrderedSet<T>> for OrderedSet<T> {
    fn bitor_assign(&mut self, other: &OrderedSet<T>) {
        infallible(self.union_update(other))
    }
}

impl<T: Hash + Eq + Clone> ops::AddAssign<&OrderedSet<T>> for OrderedSet<T> {
    fn add_assign(&mut self, other: &OrderedSet<T>) {
        infallible(self.union_update(other))
    }
}

impl<T: Hash + Eq + Clone> ops::BitAndAssign<&OrderedSet<T>> for OrderedSet<T> {
    fn bitand_assign(&mut self, other: &OrderedSet<T>) {
        self.intersection_update(other)
    }
}

impl<T: Hash + Eq + Clone> ops::SubAssign<&OrderedSet<T>> for OrderedSet<T> {
    fn sub_assign(&mut self, other: &OrderedSet<T>) {
        self.difference_update(other)
    }
}

impl<T: Hash + Eq + Clone> ops::BitXorAssign<&OrderedSet<T>> for OrderedSet<T> {
    fn bitxor_assign(&mut self, other: &OrderedSet<T>) {
        infallible(self.symmetric_difference_update(other))
    }
}

fn infallible<T>(res: Result<T, Infallible>) -> T {
    match res {
        Ok(res) => res,
        Err(never) => match never {},
    }
}

//------------ SetAlgebra ----------------------------------------------------

/// Set operations for types backed by an ordered set.
///
/// Implementors only provide access to their underlying [`OrderedSet`].
/// All operations that return a new value start from a clone of the
/// receiver, so the result has the receiver’s type and carries along
/// whatever else the receiver holds. Neither operand is ever changed by
/// these.
///
/// The `_update` variants change the receiver in place. Since they take
/// the receiver mutably and the other operand shared, a value can’t be
/// updated with itself.
///
/// Operations that add items first ask [`check`][Self::check] about each
/// of them. If any item is refused, the operation fails with that error
/// and the receiver is left unchanged.
pub trait SetAlgebra: Clone {
    /// The type of the set members.
    type Item: Hash + Eq + Clone;

    /// The error returned when an item can’t become a member.
    type Error;

    /// Returns a reference to the underlying set.
    fn as_set(&self) -> &OrderedSet<Self::Item>;

    /// Returns a mutable reference to the underlying set.
    fn as_set_mut(&mut self) -> &mut OrderedSet<Self::Item>;

    /// Checks whether `item` may become a member of this set.
    fn check(&self, item: &Self::Item) -> Result<(), Self::Error>;

    /// Adds all items from `iter` not yet present.
    fn update<I: IntoIterator<Item = Self::Item>>(
        &mut self,
        iter: I,
    ) -> Result<(), Self::Error> {
        let items: Vec<_> = iter.into_iter().collect();
        for item in &items {
            self.check(item)?;
        }
        let set = self.as_set_mut();
        for item in items {
            set.add(item);
        }
        Ok(())
    }

    /// Adds all items of `other` not yet present.
    fn union_update<S>(&mut self, other: &S) -> Result<(), Self::Error>
    where
        S: SetAlgebra<Item = Self::Item>,
    {
        self.update(other.as_set().iter().cloned())
    }

    /// Removes all items not also present in `other`.
    fn intersection_update<S>(&mut self, other: &S)
    where
        S: SetAlgebra<Item = Self::Item>,
    {
        let other = other.as_set();
        self.as_set_mut().retain(|item| other.contains(item))
    }

    /// Removes all items present in `other`.
    fn difference_update<S>(&mut self, other: &S)
    where
        S: SetAlgebra<Item = Self::Item>,
    {
        for item in other.as_set() {
            self.as_set_mut().discard(item);
        }
    }

    /// Keeps only items present in exactly one of the two sets.
    fn symmetric_difference_update<S>(
        &mut self,
        other: &S,
    ) -> Result<(), Self::Error>
    where
        S: SetAlgebra<Item = Self::Item>,
    {
        // The overlap has to be taken before the union changes `self`.
        let overlap = self.intersection(other);
        self.union_update(other)?;
        self.difference_update(&overlap);
        Ok(())
    }

    /// Returns the union of `self` and `other`.
    fn union<S>(&self, other: &S) -> Result<Self, Self::Error>
    where
        S: SetAlgebra<Item = Self::Item>,
    {
        let mut res = self.clone();
        res.union_update(other)?;
        Ok(res)
    }

    /// Returns the items of `self` also present in `other`.
    fn intersection<S>(&self, other: &S) -> Self
    where
        S: SetAlgebra<Item = Self::Item>,
    {
        let mut res = self.clone();
        res.intersection_update(other);
        res
    }

    /// Returns the items of `self` not present in `other`.
    fn difference<S>(&self, other: &S) -> Self
    where
        S: SetAlgebra<Item = Self::Item>,
    {
        let mut res = self.clone();
        res.difference_update(other);
        res
    }

    /// Returns the items present in exactly one of the two sets.
    fn symmetric_difference<S>(&self, other: &S) -> Result<Self, Self::Error>
    where
        S: SetAlgebra<Item = Self::Item>,
    {
        let mut res = self.clone();
        res.symmetric_difference_update(other)?;
        Ok(res)
    }

    /// Returns whether all items of `self` are present in `other`.
    fn is_subset<S>(&self, other: &S) -> bool
    where
        S: SetAlgebra<Item = Self::Item>,
    {
        let other = other.as_set();
        self.as_set().iter().all(|item| other.contains(item))
    }

    /// Returns whether all items of `other` are present in `self`.
    fn is_superset<S>(&self, other: &S) -> bool
    where
        S: SetAlgebra<Item = Self::Item>,
    {
        other.is_subset(self)
    }

    /// Returns whether the two sets have no items in common.
    fn is_disjoint<S>(&self, other: &S) -> bool
    where
        S: SetAlgebra<Item = Self::Item>,
    {
        let mine = self.as_set();
        !other.as_set().iter().any(|item| mine.contains(item))
    }
}

//------------ SetError ------------------------------------------------------

/// An item to be removed was not a member of the set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SetError {
    NotFound,
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SetError::NotFound => f.write_str("item not in set"),
        }
    }
}

impl std::error::Error for SetError {}

//============ Testing =======================================================
