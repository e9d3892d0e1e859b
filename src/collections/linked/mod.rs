//! Linked lists with value semantics over shared chain storage.
//!
//! Both list types are cheap to [`Clone`]: clones share the underlying chain
//! and the storage is only deep-copied at the moment one holder mutates while
//! others are still watching (copy-on-write). Mutating methods therefore
//! require `T: Clone`.

pub mod doubly;
pub mod singly;

pub(crate) mod length;

pub use doubly::{Cursor, LinkedList};
pub use singly::SinglyLinkedList;
