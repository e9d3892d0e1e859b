use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::mem;

use super::Iter;
use crate::util::fmt::DebugRaw;

/// A set which iterates in first-insertion order.
///
/// Internally this is a [`HashSet`] for membership paired with a [`Vec`] recording the order, so
/// each element is stored twice (hence the `Clone` bound on mutation). The two halves must always
/// contain exactly the same elements; a mutation observing anything else panics, because that
/// means corruption rather than a user error.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the OrderedSet.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `contains` | `O(1)` |
/// | `insert` | `O(1)` |
/// | `update` | `O(n)` |
/// | `remove` | `O(n)` |
/// | `get_index` | `O(1)` |
///
/// `remove` (and `update`) pay an `O(n)` walk to locate and splice the ordering vector even
/// though the set half is `O(1)` - that trade-off is the price of keeping iteration order exact.
pub struct OrderedSet<T, B: BuildHasher = RandomState> {
    pub(crate) set: HashSet<T, B>,
    pub(crate) order: Vec<T>,
}

impl<T: Hash + Eq + Clone> OrderedSet<T> {
    pub fn new() -> OrderedSet<T> {
        OrderedSet {
            set: HashSet::new(),
            order: Vec::new(),
        }
    }

    pub fn with_cap(cap: usize) -> OrderedSet<T> {
        OrderedSet {
            set: HashSet::with_capacity(cap),
            order: Vec::with_capacity(cap),
        }
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher> OrderedSet<T, B> {
    pub fn with_hasher(hasher: B) -> OrderedSet<T, B> {
        OrderedSet {
            set: HashSet::with_hasher(hasher),
            order: Vec::new(),
        }
    }

    pub fn with_cap_and_hasher(cap: usize, hasher: B) -> OrderedSet<T, B> {
        OrderedSet {
            set: HashSet::with_capacity_and_hasher(cap, hasher),
            order: Vec::with_capacity(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.set.contains(item)
    }

    /// Adds `item` to the end of the set if it isn't already a member. Returns whether it was
    /// added; an existing equal member keeps both its value and its position.
    pub fn insert(&mut self, item: T) -> bool {
        if self.set.contains(&item) {
            return false;
        }
        self.set.insert(item.clone());
        self.order.push(item);
        true
    }

    /// Adds `item`, or replaces an existing equal member **in place** - the replacement takes
    /// over the old member's position rather than moving to the end. Returns the replaced
    /// member, if any.
    ///
    /// # Panics
    /// Panics if the membership set and the ordering disagree, which indicates corruption.
    pub fn update(&mut self, item: T) -> Option<T> {
        if self.set.contains(&item) {
            self.set.replace(item.clone());
            let index = self
                .order
                .iter()
                .position(|existing| *existing == item)
                .expect("OrderedSet inconsistency!");
            Some(mem::replace(&mut self.order[index], item))
        } else {
            self.set.insert(item.clone());
            self.order.push(item);
            None
        }
    }

    /// Removes and returns the member equal to `item`, splicing it out of the order.
    ///
    /// # Panics
    /// Panics if the membership set and the ordering disagree, which indicates corruption.
    pub fn remove<Q>(&mut self, item: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.set.take(item)?;
        let index = self
            .order
            .iter()
            .position(|existing| existing.borrow() == item)
            .expect("OrderedSet inconsistency!");
        Some(self.order.remove(index))
    }

    /// The member at `index` in insertion order.
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.order.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.order.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.order.last()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    pub fn is_subset<B2: BuildHasher>(&self, other: &OrderedSet<T, B2>) -> bool {
        self.iter().all(|item| other.contains(item))
    }

    pub fn is_superset<B2: BuildHasher>(&self, other: &OrderedSet<T, B2>) -> bool {
        other.is_subset(self)
    }

    #[cfg(test)]
    pub(crate) fn verify_consistency(&self) {
        assert!(self.set.len() == self.order.len(), "OrderedSet inconsistency!");
        for item in &self.order {
            assert!(self.set.contains(item), "OrderedSet inconsistency!");
        }
    }
}

impl<T: Hash + Eq + Clone> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher + Default> FromIterator<T> for OrderedSet<T, B> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut set = OrderedSet::with_cap_and_hasher(iter.size_hint().0, B::default());
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher> Extend<T> for OrderedSet<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher> Clone for OrderedSet<T, B>
where
    B: Clone,
{
    fn clone(&self) -> Self {
        OrderedSet {
            set: self.set.clone(),
            order: self.order.clone(),
        }
    }
}

// Equality is order-sensitive: two OrderedSets with the same members in a different order are
// different values.
impl<T: Hash + Eq + Clone, B: BuildHasher> PartialEq for OrderedSet<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl<T: Hash + Eq + Clone, B: BuildHasher> Eq for OrderedSet<T, B> {}

impl<T: Hash + Eq + Clone + Debug, B: BuildHasher> Debug for OrderedSet<T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedSet")
            .field(
                "contents",
                &DebugRaw(format!(
                    "#{{{}}}",
                    self.iter().map(|i| format!("{i:?}")).collect::<Vec<_>>().join(", ")
                )),
            )
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Hash + Eq + Clone + Display, B: BuildHasher> Display for OrderedSet<T, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{{{}}}",
            self.iter().map(|i| format!("{i}")).collect::<Vec<_>>().join(", ")
        )
    }
}
