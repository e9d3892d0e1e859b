use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Index, IndexMut};
use std::rc::Rc;

use super::{Iter, RawSinglyList};
use crate::util::fmt::DebugRaw;
use crate::util::result::ResultExtension;
#[doc(inline)]
pub use crate::util::error::IndexOutOfBounds;

/// A list with links in one direction and value semantics over shared chain storage.
///
/// Cloning the list is O(1): both values share the same chain until one of them is mutated, at
/// which point the mutated one quietly takes its own deep copy first (copy-on-write). Mutating
/// methods therefore require `T: Clone`, and a mutation through one value is never observable
/// through another.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the SinglyLinkedList.
/// - `i`: The index of the item in question.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `front` | `O(1)` |
/// | `back` | `O(1)` |
/// | `push_front` | `O(1)`* |
/// | `push_back` | `O(1)`* |
/// | `pop_front` | `O(1)`* |
/// | `pop_back` | `O(n)` |
/// | `get` | `O(i)` |
/// | `insert` | `O(i)` |
/// | `remove` | `O(i)` |
/// | `replace` | `O(i)` |
/// | `clone` | `O(1)` |
/// | `contains` | `O(n)` |
///
/// \* Plus a full `O(n)` chain copy when the storage is currently shared with another clone.
///
/// There is no `O(min(i, n-i))` seek here: with only forward links, every walk starts from the
/// head. See [`LinkedList`](crate::collections::linked::LinkedList) when backwards traversal
/// matters.
pub struct SinglyLinkedList<T> {
    pub(crate) buf: Rc<RawSinglyList<T>>,
}

impl<T> SinglyLinkedList<T> {
    pub fn new() -> SinglyLinkedList<T> {
        SinglyLinkedList {
            buf: Rc::new(RawSinglyList::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn front(&self) -> Option<&T> {
        Some(self.buf.contents()?.head.value())
    }

    pub fn back(&self) -> Option<&T> {
        Some(self.buf.contents()?.tail.value())
    }

    pub fn get(&self, index: usize) -> &T {
        self.buf.checked_seek(index).throw().value()
    }

    pub fn try_get(&self, index: usize) -> Option<&T> {
        Some(self.buf.checked_seek(index).ok()?.value())
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    /// Whether `self` and `other` are currently sharing one chain.
    pub(crate) fn shares_storage_with(&self, other: &SinglyLinkedList<T>) -> bool {
        Rc::ptr_eq(&self.buf, &other.buf)
    }
}

impl<T: Clone> SinglyLinkedList<T> {
    /// The copy-on-write gate: every mutation goes through here first. If the chain has exactly
    /// one owner it is reused in place; otherwise it is deep-copied so the other owners are
    /// unaffected.
    pub(crate) fn make_unique(&mut self) -> &mut RawSinglyList<T> {
        if Rc::strong_count(&self.buf) != 1 {
            self.buf = Rc::new(RawSinglyList::clone(&self.buf));
        }
        // UNWRAP: The buffer is either already unique or was just replaced with a fresh clone,
        // and no weak references are ever created.
        Rc::get_mut(&mut self.buf).unwrap()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        Some(self.make_unique().contents_mut()?.head.value_mut())
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        Some(self.make_unique().contents_mut()?.tail.value_mut())
    }

    pub fn push_front(&mut self, value: T) {
        self.make_unique().push_front(value);
    }

    pub fn push_back(&mut self, value: T) {
        self.make_unique().push_back(value);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.make_unique().pop_front()
    }

    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.make_unique().pop_back()
    }

    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.make_unique().checked_seek(index).throw().value_mut()
    }

    pub fn try_get_mut(&mut self, index: usize) -> Option<&mut T> {
        Some(self.make_unique().checked_seek(index).ok()?.value_mut())
    }

    /// Inserts `value` before the element at `index`, or at the back when `index == len`.
    ///
    /// Uniqueness is established before the predecessor is located, so the relinking always
    /// happens in wholly-owned storage.
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        self.make_unique().insert(index, value).throw();
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        self.make_unique().remove(index).throw()
    }

    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        mem::replace(
            self.make_unique().checked_seek(index).throw().value_mut(),
            new_value,
        )
    }

    pub fn clear(&mut self) {
        self.buf = Rc::new(RawSinglyList::new());
    }
}

// Clone is a cheap handle copy; see make_unique for the deferred deep copy.
impl<T> Clone for SinglyLinkedList<T> {
    fn clone(&self) -> Self {
        SinglyLinkedList {
            buf: Rc::clone(&self.buf),
        }
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for SinglyLinkedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
    }
}

impl<T: Clone> IndexMut<usize> for SinglyLinkedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index)
    }
}

impl<T: Clone> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SinglyLinkedList::new();
        for item in iter.into_iter() {
            list.push_back(item);
        }
        list
    }
}

impl<T: Clone> Extend<T> for SinglyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let buf = self.make_unique();
        for item in iter.into_iter() {
            buf.push_back(item);
        }
    }
}

impl<T: PartialEq> PartialEq for SinglyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        // Two handles over one chain are equal without a walk.
        if self.shares_storage_with(other) {
            return true;
        }
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyLinkedList<T> {}

impl<T: Hash> Hash for SinglyLinkedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for item in self {
            item.hash(state);
        }
    }
}

impl<T: Debug> Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinglyLinkedList")
            .field("contents", &DebugRaw(format!("{:?}", self.iter().collect::<Vec<_>>())))
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Debug> Display for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({})",
            self.iter()
                .map(|i| format!("{i:?}"))
                .collect::<Vec<String>>()
                .join(") -> (")
        )
    }
}
