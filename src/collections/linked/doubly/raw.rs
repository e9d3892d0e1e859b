use std::marker::PhantomData;

use super::{Node, NodePtr};
use crate::collections::linked::length::{Length, ONE};
use crate::util::error::IndexOutOfBounds;
use crate::util::option::OptionExtension;

/// The shared chain storage behind [`LinkedList`](super::LinkedList). Owns the nodes reachable
/// from `head`; `tail` is a non-owning alias of the last of them.
pub(crate) struct RawDoublyList<T> {
    pub state: ListState<T>,
    pub _phantom: PhantomData<T>,
}

#[derive(Default)]
pub(crate) enum ListState<T> {
    #[default]
    Empty,
    Full(ListContents<T>),
}

use ListState::*;

pub(crate) struct ListContents<T> {
    pub len: Length,
    pub head: NodePtr<T>,
    pub tail: NodePtr<T>,
}

impl<T> RawDoublyList<T> {
    pub const fn new() -> RawDoublyList<T> {
        RawDoublyList {
            state: Empty,
            _phantom: PhantomData,
        }
    }

    pub const fn len(&self) -> usize {
        match self.state {
            Empty => 0,
            Full(ListContents { len, .. }) => len.get(),
        }
    }

    pub fn push_front(&mut self, value: T) {
        match &mut self.state {
            Empty => self.state = ListState::single(value),
            Full(contents) => contents.push_front(value),
        }
    }

    pub fn push_back(&mut self, value: T) {
        match &mut self.state {
            Empty => self.state = ListState::single(value),
            Full(contents) => contents.push_back(value),
        }
    }

    pub fn pop_front(&mut self) -> Option<T> {
        match &mut self.state {
            Empty => None,
            Full(ListContents { len, head, .. }) => {
                let node = head.take_node();

                match len.checked_sub(1) {
                    Some(new_len) => {
                        // SAFETY: Previous length is greater than 1, so the first element is
                        // followed by at least one more.
                        let new_head = unsafe { node.next.unreachable() };
                        *head = new_head;
                        *new_head.prev_mut() = None;
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(node.value)
            },
        }
    }

    pub fn pop_back(&mut self) -> Option<T> {
        match &mut self.state {
            Empty => None,
            Full(ListContents { len, tail, .. }) => {
                let node = tail.take_node();

                match len.checked_sub(1) {
                    Some(new_len) => {
                        // SAFETY: Previous length is greater than 1, so the last element is
                        // preceded by at least one more.
                        let new_tail = unsafe { node.prev.unreachable() };
                        *tail = new_tail;
                        *new_tail.next_mut() = None;
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(node.value)
            },
        }
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<(), IndexOutOfBounds> {
        match index {
            0 => self.push_front(value),
            val if val == self.len() => self.push_back(value),
            val if val > self.len() => {
                return Err(IndexOutOfBounds { index, len: self.len() });
            },
            val => {
                // UNWRAP: 0 < val < len, so the state is Full.
                let contents = self.contents_mut().unwrap();
                let prev_node = contents.seek(val - 1);

                let node = NodePtr::from_node(Node {
                    value,
                    prev: Some(prev_node),
                    next: *prev_node.next(),
                });

                // UNWRAP: For this branch, we aren't adding at the front or back, so the node
                // before the given index has a next node.
                *prev_node.next().unwrap().prev_mut() = Some(node);
                *prev_node.next_mut() = Some(node);

                contents.len = contents.len.checked_add(1).expect("Capacity overflow!");
            },
        }
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<T, IndexOutOfBounds> {
        self.checked_contents_for_index(index)?;
        match index {
            0 => {
                // UNWRAP: The state is already checked to be valid for the provided index.
                Ok(self.pop_front().unwrap())
            },
            val if val == self.len() - 1 => {
                // UNWRAP: The state is already checked to be valid for the provided index.
                Ok(self.pop_back().unwrap())
            },
            val => {
                // UNWRAP: The state is already checked to be valid for the provided index.
                let contents = self.contents_mut().unwrap();
                let node = contents.seek(val).take_node();

                // UNWRAP: For this branch, both prev and next must be defined. Head and tail
                // versions are handled with the pop front / back branches.
                *node.prev.unwrap().next_mut() = node.next;
                *node.next.unwrap().prev_mut() = node.prev;
                // UNWRAP: If the length was 1, we would have matched one of the previous branches.
                contents.len = contents.len.checked_sub(1).unwrap();

                Ok(node.value)
            },
        }
    }

    /// Splices `other`'s chain directly onto the end of `self` in O(1).
    pub fn append(&mut self, other: RawDoublyList<T>) {
        let mut other = other;
        match &mut self.state {
            Empty => *self = other,
            Full(self_contents) => match std::mem::take(&mut other.state) {
                Empty => {},
                Full(other_contents) => {
                    self_contents.tail.link_next(other_contents.head);
                    self_contents.tail = other_contents.tail;

                    self_contents.len = self_contents
                        .len
                        .checked_add(other_contents.len.get())
                        .expect("Capacity overflow!");
                },
            },
        }
    }

    pub fn checked_seek(&self, index: usize) -> Result<NodePtr<T>, IndexOutOfBounds> {
        Ok(self.checked_contents_for_index(index)?.seek(index))
    }

    pub const fn checked_contents_for_index(
        &self,
        index: usize,
    ) -> Result<&ListContents<T>, IndexOutOfBounds> {
        match &self.state {
            Empty => Err(IndexOutOfBounds { index, len: 0 }),
            Full(contents) => {
                let len = contents.len.get();
                if index < len {
                    Ok(contents)
                } else {
                    Err(IndexOutOfBounds { index, len })
                }
            },
        }
    }

    /// Moves the state out, leaving (and then dropping) an empty list.
    pub fn into_state(mut self) -> ListState<T> {
        std::mem::take(&mut self.state)
    }

    pub const fn contents(&self) -> Option<&ListContents<T>> {
        match &self.state {
            Empty => None,
            Full(contents) => Some(contents),
        }
    }

    pub const fn contents_mut(&mut self) -> Option<&mut ListContents<T>> {
        match &mut self.state {
            Empty => None,
            Full(contents) => Some(contents),
        }
    }

    #[cfg(test)]
    pub fn verify_double_links(&self) {
        match self.state {
            Empty => {},
            Full(ListContents { head, tail, .. }) => {
                assert!(head.prev().is_none());
                let mut curr = head;
                while let Some(next) = curr.next() {
                    assert!(next.prev().unwrap() == curr);
                    curr = *next;
                }
                assert!(tail == curr);
            },
        }
    }
}

impl<T> ListContents<T> {
    /// Seeks from whichever end is nearer, so access cost is `O(min(i, n-i))`.
    pub(crate) fn seek(&self, index: usize) -> NodePtr<T> {
        if index < self.len.get() / 2 {
            self.seek_fwd(index)
        } else {
            self.seek_bwd(index)
        }
    }

    pub(crate) fn seek_fwd(&self, index: usize) -> NodePtr<T> {
        let mut curr = self.head;
        for _ in 0..index {
            // UNWRAP: Callers only seek to indices below the length.
            curr = curr.next().unwrap();
        }
        curr
    }

    pub(crate) fn seek_bwd(&self, index: usize) -> NodePtr<T> {
        let mut curr = self.tail;
        // UNWRAP: Callers only seek to indices below the length.
        let upper = self.len.checked_sub(index).unwrap().get();
        for _ in 1..upper {
            // UNWRAP: As above, the walk stays within the chain.
            curr = curr.prev().unwrap();
        }
        curr
    }

    pub(crate) fn push_front(&mut self, value: T) {
        self.len = self.len.checked_add(1).expect("Capacity overflow!");

        let node = NodePtr::from_node(Node {
            value,
            prev: None,
            next: Some(self.head),
        });

        *self.head.prev_mut() = Some(node);
        self.head = node;
    }

    pub(crate) fn push_back(&mut self, value: T) {
        self.len = self.len.checked_add(1).expect("Capacity overflow!");

        let node = NodePtr::from_node(Node {
            value,
            prev: None,
            next: None,
        });

        self.tail.link_next(node);
        self.tail = node;
    }

    pub(crate) fn wrap_one(value: T) -> ListContents<T> {
        let node = NodePtr::from_node(Node {
            value,
            prev: None,
            next: None,
        });

        ListContents {
            len: ONE,
            head: node,
            tail: node,
        }
    }
}

impl<T> ListState<T> {
    pub(crate) fn single(value: T) -> ListState<T> {
        Full(ListContents::wrap_one(value))
    }
}

// The whole chain is copied iteratively rather than recursively so that cloning an arbitrarily
// long list can't overflow the stack. No node pointer is shared with the original.
impl<T: Clone> Clone for RawDoublyList<T> {
    fn clone(&self) -> Self {
        match &self.state {
            Empty => RawDoublyList::new(),
            Full(contents) => {
                let head = NodePtr::from_node(Node {
                    value: contents.head.value().clone(),
                    prev: None,
                    next: None,
                });

                let mut tail = head;
                let mut curr = *contents.head.next();
                while let Some(ptr) = curr {
                    let node = NodePtr::from_node(Node {
                        value: ptr.value().clone(),
                        prev: None,
                        next: None,
                    });
                    tail.link_next(node);
                    tail = node;
                    curr = *ptr.next();
                }

                RawDoublyList {
                    state: Full(ListContents {
                        len: contents.len,
                        head,
                        tail,
                    }),
                    _phantom: PhantomData,
                }
            },
        }
    }
}

impl<T> Default for RawDoublyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Nodes are destroyed one at a time with an explicit loop; a recursive destructor chain would
// blow the call stack on a long list.
impl<T> Drop for RawDoublyList<T> {
    fn drop(&mut self) {
        match self.state {
            Empty => {},
            Full(ListContents { head, .. }) => {
                let mut curr = Some(head);
                while let Some(ptr) = curr {
                    // Reboxing both drops the value and returns the node's allocation.
                    let node = ptr.take_node();
                    curr = node.next;
                }
            },
        }
    }
}
