use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;

use derive_more::IsVariant;

use super::Iter;
use crate::util::fmt::DebugRaw;

/// A map which can be queried in both directions in O(1).
///
/// Internally this is a pair of [`HashMap`]s kept as exact inverses of one another, so every
/// left value pairs with exactly one right value and vice versa - a bijection. Keeping that
/// exact costs [`insert`](BiMap::insert) some care: pairing `l` with `r` first evicts whatever
/// `l` and `r` were previously paired with, and reports the evictions.
///
/// Both sides are stored by value in both maps, hence the `Clone` bounds. The two maps must
/// always agree; a mutation observing anything else panics, because that means corruption
/// rather than a user error.
pub struct BiMap<L, R> {
    pub(crate) left: HashMap<L, R>,
    pub(crate) right: HashMap<R, L>,
}

/// What [`BiMap::insert`] had to evict to keep the bijection exact.
#[derive(Debug, PartialEq, Eq, IsVariant)]
pub enum Evicted<L, R> {
    /// Neither side was previously paired.
    Neither,
    /// The left value was paired; its old pair was evicted.
    Left((L, R)),
    /// The right value was paired; its old pair was evicted.
    Right((L, R)),
    /// Both sides were paired, to different partners; both old pairs were evicted.
    Both((L, R), (L, R)),
    /// The exact pair was already present; it was replaced with the new values.
    Pair((L, R)),
}

impl<L: Hash + Eq + Clone, R: Hash + Eq + Clone> BiMap<L, R> {
    pub fn new() -> BiMap<L, R> {
        BiMap {
            left: HashMap::new(),
            right: HashMap::new(),
        }
    }

    pub fn with_cap(cap: usize) -> BiMap<L, R> {
        BiMap {
            left: HashMap::with_capacity(cap),
            right: HashMap::with_capacity(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn get_by_left<Q>(&self, left: &Q) -> Option<&R>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.left.get(left)
    }

    pub fn get_by_right<Q>(&self, right: &Q) -> Option<&L>
    where
        R: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.right.get(right)
    }

    pub fn contains_left<Q>(&self, left: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.left.contains_key(left)
    }

    pub fn contains_right<Q>(&self, right: &Q) -> bool
    where
        R: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.right.contains_key(right)
    }

    /// Pairs `l` with `r`, evicting any previous pairing involving either value so the map stays
    /// exactly invertible. Returns what was evicted.
    ///
    /// # Panics
    /// Panics if the two directions disagree, which indicates corruption.
    pub fn insert(&mut self, l: L, r: R) -> Evicted<L, R> {
        let exact = self.left.get(&l).is_some_and(|existing| *existing == r);
        let evicted_left = self.remove_by_left(&l);
        // When (l, r) was already a pair, the first removal has also cleared r's pairing.
        let evicted_right = self.remove_by_right(&r);

        self.left.insert(l.clone(), r.clone());
        self.right.insert(r, l);

        match (evicted_left, evicted_right) {
            (None, None) => Evicted::Neither,
            (Some(pair), None) if exact => Evicted::Pair(pair),
            (Some(pair), None) => Evicted::Left(pair),
            (None, Some(pair)) => Evicted::Right(pair),
            (Some(left_pair), Some(right_pair)) => Evicted::Both(left_pair, right_pair),
        }
    }

    /// Removes the pairing involving `left`, returning it.
    ///
    /// # Panics
    /// Panics if the two directions disagree, which indicates corruption.
    pub fn remove_by_left<Q>(&mut self, left: &Q) -> Option<(L, R)>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (l, r) = self.left.remove_entry(left)?;
        let inverse = self.right.remove(&r).expect("BiMap inconsistency!");
        assert!(inverse == l, "BiMap inconsistency!");
        Some((l, r))
    }

    /// Removes the pairing involving `right`, returning it.
    ///
    /// # Panics
    /// Panics if the two directions disagree, which indicates corruption.
    pub fn remove_by_right<Q>(&mut self, right: &Q) -> Option<(L, R)>
    where
        R: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (r, l) = self.right.remove_entry(right)?;
        let inverse = self.left.remove(&l).expect("BiMap inconsistency!");
        assert!(inverse == r, "BiMap inconsistency!");
        Some((l, r))
    }

    pub fn iter(&self) -> Iter<'_, L, R> {
        self.into_iter()
    }

    #[cfg(test)]
    pub(crate) fn verify_bijection(&self) {
        assert!(self.left.len() == self.right.len(), "BiMap inconsistency!");
        for (l, r) in &self.left {
            assert!(self.right.get(r) == Some(l), "BiMap inconsistency!");
        }
    }
}

impl<L: Hash + Eq + Clone, R: Hash + Eq + Clone> Default for BiMap<L, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Hash + Eq + Clone, R: Hash + Eq + Clone> Clone for BiMap<L, R> {
    fn clone(&self) -> Self {
        BiMap {
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }
}

impl<L: Hash + Eq + Clone, R: Hash + Eq + Clone> FromIterator<(L, R)> for BiMap<L, R> {
    fn from_iter<I: IntoIterator<Item = (L, R)>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut map = BiMap::with_cap(iter.size_hint().0);
        for (l, r) in iter {
            map.insert(l, r);
        }
        map
    }
}

impl<L: Hash + Eq + Clone, R: Hash + Eq + Clone> Extend<(L, R)> for BiMap<L, R> {
    fn extend<I: IntoIterator<Item = (L, R)>>(&mut self, iter: I) {
        for (l, r) in iter {
            self.insert(l, r);
        }
    }
}

impl<L: Hash + Eq + Clone, R: Hash + Eq + Clone> PartialEq for BiMap<L, R> {
    fn eq(&self, other: &Self) -> bool {
        self.left == other.left
    }
}

impl<L: Hash + Eq + Clone, R: Hash + Eq + Clone> Eq for BiMap<L, R> {}

impl<L, R> Debug for BiMap<L, R>
where
    L: Hash + Eq + Clone + Debug,
    R: Hash + Eq + Clone + Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiMap")
            .field(
                "contents",
                &DebugRaw(format!(
                    "{{{}}}",
                    self.iter()
                        .map(|(l, r)| format!("{l:?} <-> {r:?}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )),
            )
            .field("len", &self.len())
            .finish()
    }
}

impl<L, R> Display for BiMap<L, R>
where
    L: Hash + Eq + Clone + Display,
    R: Hash + Eq + Clone + Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter()
                .map(|(l, r)| format!("{l} <-> {r}"))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
