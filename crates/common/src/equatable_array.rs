//! # Structural-Equality Array
//!
//! [`EquatableArray`] wraps an immutable, shared sequence and gives it value semantics:
//! two arrays are equal iff they have the same length and pairwise-equal elements in
//! order, and the hash agrees with that definition. This makes aggregated results usable
//! as memoization keys (e.g. as fields of salsa-tracked values).
//!
//! A default-constructed array has no backing storage; it behaves exactly like an
//! explicitly empty one.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, Index};
use std::sync::Arc;

use rustc_hash::FxHasher;

#[derive(Clone)]
pub struct EquatableArray<T> {
    items: Option<Arc<[T]>>,
}

impl<T> Default for EquatableArray<T> {
    fn default() -> Self {
        Self { items: None }
    }
}

impl<T> EquatableArray<T> {
    pub fn new(items: impl Into<Arc<[T]>>) -> Self {
        Self {
            items: Some(items.into()),
        }
    }

    pub const fn empty() -> Self {
        Self { items: None }
    }

    pub fn as_slice(&self) -> &[T] {
        match &self.items {
            Some(items) => items,
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns the backing sequence, allocating an empty one for a default array.
    pub fn to_arc(&self) -> Arc<[T]> {
        match &self.items {
            Some(items) => Arc::clone(items),
            None => Arc::from(Vec::new()),
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }
}

impl<T: Hash> EquatableArray<T> {
    /// Order-sensitive hash that is identical across processes and runs.
    pub fn stable_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl<T: PartialEq> PartialEq for EquatableArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for EquatableArray<T> {}

impl<T: Hash> Hash for EquatableArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Length prefix followed by every element in order.
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for EquatableArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Deref for EquatableArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Index<usize> for EquatableArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<'a, T> IntoIterator for &'a EquatableArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for EquatableArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> From<Vec<T>> for EquatableArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> From<Arc<[T]>> for EquatableArray<T> {
    fn from(items: Arc<[T]>) -> Self {
        Self { items: Some(items) }
    }
}

impl<T: Clone> From<&[T]> for EquatableArray<T> {
    fn from(items: &[T]) -> Self {
        Self::new(items)
    }
}

impl<T> From<EquatableArray<T>> for Arc<[T]> {
    fn from(array: EquatableArray<T>) -> Self {
        array.to_arc()
    }
}
