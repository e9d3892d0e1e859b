use std::marker::PhantomData;

use super::{Node, NodePtr};
use crate::collections::linked::length::{Length, ONE};
use crate::util::error::IndexOutOfBounds;
use crate::util::option::OptionExtension;

/// The shared chain storage behind [`SinglyLinkedList`](super::SinglyLinkedList). Owns the nodes
/// reachable from `head`; `tail` is a non-owning alias of the last of them.
pub(crate) struct RawSinglyList<T> {
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

impl<T> RawSinglyList<T> {
    pub const fn new() -> RawSinglyList<T> {
        RawSinglyList {
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
            Full(contents) => {
                contents.len = contents.len.checked_add(1).expect("Capacity overflow!");

                let node = NodePtr::from_node(Node {
                    value,
                    next: Some(contents.head),
                });

                contents.head = node;
            },
        }
    }

    pub fn push_back(&mut self, value: T) {
        match &mut self.state {
            Empty => self.state = ListState::single(value),
            Full(contents) => {
                contents.len = contents.len.checked_add(1).expect("Capacity overflow!");

                let node = NodePtr::from_node(Node {
                    value,
                    next: None,
                });

                contents.tail.link_next(node);
                contents.tail = node;
            },
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
                        *head = unsafe { node.next.unreachable() };
                        *len = new_len;
                    },
                    None => self.state = Empty,
                }

                Some(node.value)
            },
        }
    }

    // Unlike the doubly linked version, this walks the whole chain to find the new tail.
    pub fn pop_back(&mut self) -> Option<T> {
        match &mut self.state {
            Empty => None,
            Full(contents) => match contents.len.checked_sub(1) {
                Some(new_len) => {
                    let penultimate = contents.seek(new_len.get() - 1);
                    // UNWRAP: The node before the tail always has a next node.
                    let node = penultimate.next().unwrap().take_node();

                    *penultimate.next_mut() = None;
                    contents.tail = penultimate;
                    contents.len = new_len;

                    Some(node.value)
                },
                None => {
                    let node = contents.head.take_node();
                    self.state = Empty;
                    Some(node.value)
                },
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
                    next: *prev_node.next(),
                });

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
                let prev_node = contents.seek(val - 1);
                // UNWRAP: For this branch, the removed node is neither head nor tail, so the node
                // before it has a next node.
                let node = prev_node.next().unwrap().take_node();

                *prev_node.next_mut() = node.next;
                // UNWRAP: If the length was 1, we would have matched one of the previous branches.
                contents.len = contents.len.checked_sub(1).unwrap();

                Ok(node.value)
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
}

impl<T> ListContents<T> {
    pub(crate) fn seek(&self, index: usize) -> NodePtr<T> {
        let mut curr = self.head;
        for _ in 0..index {
            // UNWRAP: Callers only seek to indices below the length.
            curr = curr.next().unwrap();
        }
        curr
    }

    pub(crate) fn wrap_one(value: T) -> ListContents<T> {
        let node = NodePtr::from_node(Node {
            value,
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
impl<T: Clone> Clone for RawSinglyList<T> {
    fn clone(&self) -> Self {
        match &self.state {
            Empty => RawSinglyList::new(),
            Full(contents) => {
                let head = NodePtr::from_node(Node {
                    value: contents.head.value().clone(),
                    next: None,
                });

                let mut tail = head;
                let mut curr = *contents.head.next();
                while let Some(ptr) = curr {
                    let node = NodePtr::from_node(Node {
                        value: ptr.value().clone(),
                        next: None,
                    });
                    tail.link_next(node);
                    tail = node;
                    curr = *ptr.next();
                }

                RawSinglyList {
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

impl<T> Default for RawSinglyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Nodes are destroyed one at a time with an explicit loop; a recursive destructor chain would
// blow the call stack on a long list.
impl<T> Drop for RawSinglyList<T> {
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
