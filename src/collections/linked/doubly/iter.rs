use std::marker::PhantomData;

use super::{Link, LinkedList};

impl<T: Clone> IntoIterator for LinkedList<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

pub struct IntoIter<T> {
    pub(crate) list: LinkedList<T>,
}

impl<T: Clone> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T: Clone> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T: Clone> ExactSizeIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            front: self.buf.contents().map(|contents| contents.head),
            back: self.buf.contents().map(|contents| contents.tail),
            remaining: self.len(),
            _phantom: PhantomData,
        }
    }
}

pub struct Iter<'a, T> {
    pub(crate) front: Link<T>,
    pub(crate) back: Link<T>,
    pub(crate) remaining: usize,
    pub(crate) _phantom: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.front.map(|ptr| {
            self.front = *ptr.next();
            self.remaining -= 1;
            ptr.value()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back.map(|ptr| {
            self.back = *ptr.prev();
            self.remaining -= 1;
            ptr.value()
        })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T: Clone> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        // Mutation through the iterator must not be visible to other clones, so the chain is
        // unshared up front.
        let buf = self.make_unique();
        IterMut {
            remaining: buf.len(),
            front: buf.contents().map(|contents| contents.head),
            back: buf.contents().map(|contents| contents.tail),
            _phantom: PhantomData,
        }
    }
}

pub struct IterMut<'a, T> {
    pub(crate) front: Link<T>,
    pub(crate) back: Link<T>,
    pub(crate) remaining: usize,
    pub(crate) _phantom: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.front.map(|mut ptr| {
            self.front = *ptr.next();
            self.remaining -= 1;
            ptr.value_mut()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back.map(|mut ptr| {
            self.back = *ptr.prev();
            self.remaining -= 1;
            ptr.value_mut()
        })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T: Clone> LinkedList<T> {
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.into_iter()
    }
}
