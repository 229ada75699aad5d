//! An insertion-ordered, membership-unique set — the container `initials`, `finals`
//! and each `nodes` adjacency list are built from.
//!
//! Iteration order is part of the observable contract: two `OrderedSet`s are equal
//! only if they hold the same elements in the same order.

use indexmap::IndexSet;
use std::hash::Hash;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// An insertion-ordered set. Thin wrapper over `indexmap::IndexSet` so membership
/// lookups stay O(1) while iteration preserves insertion order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serialize",
    serde(bound(
        serialize = "T: Serialize + Hash + Eq",
        deserialize = "T: Deserialize<'de> + Hash + Eq"
    ))
)]
pub struct OrderedSet<T> {
    inner: IndexSet<T>,
}

impl<T> OrderedSet<T>
where
    T: Hash + Eq,
{
    /// Creates an empty ordered set.
    pub fn new() -> Self {
        OrderedSet {
            inner: IndexSet::new(),
        }
    }

    /// Inserts `item` if not already present; no-op otherwise. Existing insertion
    /// position is preserved on a repeated `add`.
    pub fn add(&mut self, item: T) {
        self.inner.insert(item);
    }

    /// Removes `item` if present.
    pub fn discard(&mut self, item: &T) {
        self.inner.shift_remove(item);
    }

    /// True iff `item` is a member.
    pub fn contains(&self, item: &T) -> bool {
        self.inner.contains(item)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True iff the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> indexmap::set::Iter<'_, T> {
        self.inner.iter()
    }

    /// Appends every element of `other` not already present, preserving `self`'s
    /// existing order and `other`'s relative order for the newly-added elements.
    pub fn extend(&mut self, other: &OrderedSet<T>)
    where
        T: Clone,
    {
        for item in other.iter() {
            self.add(item.clone());
        }
    }

    /// Returns a new set: `self`'s elements, then `other`'s elements not already
    /// present in `self`. Equivalent to Python's `|` but order-preserving.
    pub fn union(&self, other: &OrderedSet<T>) -> OrderedSet<T>
    where
        T: Clone,
    {
        let mut out = self.clone();
        out.extend(other);
        out
    }
}

impl<T> Default for OrderedSet<T>
where
    T: Hash + Eq,
{
    fn default() -> Self {
        OrderedSet::new()
    }
}

impl<T> PartialEq for OrderedSet<T>
where
    T: Hash + Eq,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner.iter().eq(other.inner.iter())
    }
}

impl<T> Eq for OrderedSet<T> where T: Hash + Eq {}

impl<T> FromIterator<T> for OrderedSet<T>
where
    T: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        OrderedSet {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for OrderedSet<T>
where
    T: Hash + Eq,
{
    type Item = T;
    type IntoIter = indexmap::set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T>
where
    T: Hash + Eq,
{
    type Item = &'a T;
    type IntoIter = indexmap::set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
