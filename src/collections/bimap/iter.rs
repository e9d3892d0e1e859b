use std::collections::hash_map;
use std::hash::Hash;

use super::BiMap;

impl<'a, L: Hash + Eq + Clone, R: Hash + Eq + Clone> IntoIterator for &'a BiMap<L, R> {
    type Item = (&'a L, &'a R);

    type IntoIter = Iter<'a, L, R>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.left.iter(),
        }
    }
}

/// Iterates pairings in an arbitrary order, like the [`HashMap`](std::collections::HashMap) it
/// wraps.
pub struct Iter<'a, L, R> {
    pub(crate) inner: hash_map::Iter<'a, L, R>,
}

impl<'a, L, R> Iterator for Iter<'a, L, R> {
    type Item = (&'a L, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<L, R> ExactSizeIterator for Iter<'_, L, R> {}

impl<L: Hash + Eq + Clone, R: Hash + Eq + Clone> IntoIterator for BiMap<L, R> {
    type Item = (L, R);

    type IntoIter = IntoIter<L, R>;

    fn into_iter(self) -> Self::IntoIter {
        // The inverse map holds the same pairings; dropping it loses nothing.
        IntoIter {
            inner: self.left.into_iter(),
        }
    }
}

pub struct IntoIter<L, R> {
    pub(crate) inner: hash_map::IntoIter<L, R>,
}

impl<L, R> Iterator for IntoIter<L, R> {
    type Item = (L, R);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<L, R> ExactSizeIterator for IntoIter<L, R> {}
