use std::marker::PhantomData;
use std::mem;
use std::rc::Rc;

use derive_more::IsVariant;

use super::{LinkedList, ListContents, ListState, Node, NodePtr, RawDoublyList};

/// A type for bi-directional traversal and mutation of [`LinkedList`]s. See
/// [`LinkedList::cursor_front`] and [`LinkedList::cursor_back`] to create one.
///
/// The cursor is the cached-pointer fast path: where indexed access re-walks the chain every
/// call, a cursor remembers the node it is parked on, so stepping, reading and splicing around
/// the current position are all O(1). Creating a cursor consumes the list (copying the chain
/// first if it was shared), so all cursor mutation happens in wholly-owned storage; call
/// [`Cursor::into_list`] to get the list back.
pub struct Cursor<T> {
    pub(crate) state: CursorState<T>,
    pub(crate) _phantom: PhantomData<T>,
}

#[derive(Default, IsVariant)]
pub(crate) enum CursorState<T> {
    #[default]
    Empty,
    Full(CursorContents<T>),
}

pub(crate) struct CursorContents<T> {
    pub list: ListContents<T>,
    pub pos: CursorPosition<T>,
}

use CursorState::*;

/// Where the cursor is parked: on a node, or in the gap before the first / after the last.
#[derive(IsVariant)]
pub(crate) enum CursorPosition<T> {
    Start,
    End,
    At {
        ptr: NodePtr<T>,
        index: usize,
    },
}

use CursorPosition::*;

impl<T> Cursor<T> {
    /// Reassembles the cursor into a [`LinkedList`], forgetting the position.
    pub fn into_list(mut self) -> LinkedList<T> {
        let state = match mem::take(&mut self.state) {
            Empty => ListState::Empty,
            Full(CursorContents { list, .. }) => ListState::Full(list),
        };
        LinkedList {
            buf: Rc::new(RawDoublyList {
                state,
                _phantom: PhantomData,
            }),
        }
    }

    pub fn len(&self) -> usize {
        match &self.state {
            Empty => 0,
            Full(CursorContents { list, .. }) => list.len.get(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The index of the element the cursor is parked on, or [`None`] in an end gap.
    pub fn index(&self) -> Option<usize> {
        match &self.state {
            Empty => None,
            Full(CursorContents { pos, .. }) => match pos {
                Start | End => None,
                At { index, .. } => Some(*index),
            },
        }
    }

    pub fn read(&self) -> Option<&T> {
        match &self.state {
            Empty => None,
            Full(CursorContents { pos, .. }) => match pos {
                At { ptr, .. } => Some(ptr.value()),
                _ => None,
            },
        }
    }

    pub fn read_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            Empty => None,
            Full(CursorContents { pos, .. }) => match pos {
                At { ptr, .. } => Some(ptr.value_mut()),
                _ => None,
            },
        }
    }

    /// Steps towards the tail. Returns whether the cursor is parked on an element afterwards.
    pub fn move_next(&mut self) -> bool {
        match &mut self.state {
            Empty => false,
            Full(CursorContents { list, pos }) => {
                *pos = match pos {
                    Start => At {
                        ptr: list.head,
                        index: 0,
                    },
                    At { ptr, index } => match ptr.next() {
                        Some(next) => At {
                            ptr: *next,
                            index: *index + 1,
                        },
                        None => End,
                    },
                    End => End,
                };
                pos.is_at()
            },
        }
    }

    /// Steps towards the head. Returns whether the cursor is parked on an element afterwards.
    pub fn move_prev(&mut self) -> bool {
        match &mut self.state {
            Empty => false,
            Full(CursorContents { list, pos }) => {
                *pos = match pos {
                    End => At {
                        ptr: list.tail,
                        index: list.len.get() - 1,
                    },
                    At { ptr, index } => match ptr.prev() {
                        Some(prev) => At {
                            ptr: *prev,
                            index: *index - 1,
                        },
                        None => Start,
                    },
                    Start => Start,
                };
                pos.is_at()
            },
        }
    }

    /// Inserts `value` directly after the cursor in O(1). The cursor stays where it is, except
    /// on an empty list where it parks on the new sole element. In the end gap, the value is
    /// appended.
    pub fn insert_after(&mut self, value: T) {
        match &mut self.state {
            Empty => self.state = CursorState::single(value),
            Full(CursorContents { list, pos }) => match pos {
                Start => list.push_front(value),
                End => list.push_back(value),
                At { ptr, .. } => match ptr.next() {
                    None => list.push_back(value),
                    Some(next) => {
                        let node = NodePtr::from_node(Node {
                            value,
                            prev: Some(*ptr),
                            next: Some(*next),
                        });
                        *next.prev_mut() = Some(node);
                        *ptr.next_mut() = Some(node);
                        list.len = list.len.checked_add(1).expect("Capacity overflow!");
                    },
                },
            },
        }
    }

    /// Inserts `value` directly before the cursor in O(1). The cursor stays on its element (its
    /// index grows by one), except on an empty list where it parks on the new sole element. In
    /// the start gap, the value is prepended.
    pub fn insert_before(&mut self, value: T) {
        match &mut self.state {
            Empty => self.state = CursorState::single(value),
            Full(CursorContents { list, pos }) => match pos {
                Start => list.push_front(value),
                End => list.push_back(value),
                At { ptr, index } => {
                    match ptr.prev() {
                        None => list.push_front(value),
                        Some(prev) => {
                            let node = NodePtr::from_node(Node {
                                value,
                                prev: Some(*prev),
                                next: Some(*ptr),
                            });
                            *prev.next_mut() = Some(node);
                            *ptr.prev_mut() = Some(node);
                            list.len = list.len.checked_add(1).expect("Capacity overflow!");
                        },
                    }
                    *index += 1;
                },
            },
        }
    }

    /// Removes and returns the element under the cursor in O(1), parking the cursor on the
    /// following element (or in the end gap). Returns [`None`] from a gap.
    pub fn remove(&mut self) -> Option<T> {
        match mem::take(&mut self.state) {
            Empty => None,
            Full(CursorContents { mut list, pos }) => match pos {
                Start | End => {
                    self.state = Full(CursorContents { list, pos });
                    None
                },
                At { ptr, index } => {
                    let node = ptr.take_node();
                    match list.len.checked_sub(1) {
                        // Removing the only element empties the cursor with the list.
                        None => self.state = Empty,
                        Some(new_len) => {
                            list.len = new_len;
                            match (node.prev, node.next) {
                                (Some(prev), Some(next)) => {
                                    *prev.next_mut() = Some(next);
                                    *next.prev_mut() = Some(prev);
                                    self.state = Full(CursorContents {
                                        list,
                                        pos: At { ptr: next, index },
                                    });
                                },
                                (None, Some(next)) => {
                                    *next.prev_mut() = None;
                                    list.head = next;
                                    self.state = Full(CursorContents {
                                        list,
                                        pos: At { ptr: next, index: 0 },
                                    });
                                },
                                (Some(prev), None) => {
                                    *prev.next_mut() = None;
                                    list.tail = prev;
                                    self.state = Full(CursorContents { list, pos: End });
                                },
                                // A positive length with no neighbours means the chain and the
                                // length disagree, which is memory corruption, not user error.
                                (None, None) => unreachable!("LinkedList inconsistency!"),
                            }
                        },
                    }
                    Some(node.value)
                },
            },
        }
    }
}

impl<T> CursorState<T> {
    fn single(value: T) -> CursorState<T> {
        let list = ListContents::wrap_one(value);
        Full(CursorContents {
            pos: At {
                ptr: list.head,
                index: 0,
            },
            list,
        })
    }
}

// Without this, dropping a cursor would leak the chain it took from the list.
impl<T> Drop for Cursor<T> {
    fn drop(&mut self) {
        let state = match mem::take(&mut self.state) {
            Empty => ListState::Empty,
            Full(CursorContents { list, .. }) => ListState::Full(list),
        };
        drop(RawDoublyList {
            state,
            _phantom: PhantomData,
        });
    }
}
