use std::ptr::NonNull;

pub(crate) type Link<T> = Option<NodePtr<T>>;

#[derive(Debug)]
pub(crate) struct NodePtr<T>(pub NonNull<Node<T>>);

impl<T> NodePtr<T> {
    pub fn value<'a>(&self) -> &'a T {
        unsafe { &(*self.0.as_ptr()).value }
    }

    pub fn value_mut<'a>(&mut self) -> &'a mut T {
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    pub fn prev<'a>(&self) -> &'a Link<T> {
        unsafe { &(*self.0.as_ptr()).prev }
    }

    #[allow(clippy::mut_from_ref)]
    pub fn prev_mut<'a>(&self) -> &'a mut Link<T> {
        unsafe { &mut (*self.0.as_ptr()).prev }
    }

    pub fn next<'a>(&self) -> &'a Link<T> {
        unsafe { &(*self.0.as_ptr()).next }
    }

    #[allow(clippy::mut_from_ref)]
    pub fn next_mut<'a>(&self) -> &'a mut Link<T> {
        unsafe { &mut (*self.0.as_ptr()).next }
    }

    /// Links `node` directly after `self`, setting both directions together.
    ///
    /// # Panics
    /// Both slots being joined must currently be empty; next and prev links are a cooperative
    /// pair and are never re-pointed through this method. Violating that is a programmer error.
    pub fn link_next(&self, node: NodePtr<T>) {
        let next = self.next_mut();
        assert!(next.is_none(), "Node is already linked!");
        assert!(node.prev().is_none(), "Node is already linked!");
        *next = Some(node);
        *node.prev_mut() = Some(*self);
    }

    pub fn from_node(node: Node<T>) -> NodePtr<T> {
        // SAFETY: Box::into_raw is guaranteed to return a non-null pointer.
        NodePtr(unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(node))) })
    }

    pub fn take_node(self) -> Node<T> {
        // SAFETY: The pointer was produced by Box::into_raw in from_node and is only reboxed once,
        // when the node is unlinked or the chain is torn down.
        unsafe { *Box::from_raw(self.0.as_ptr()) }
    }

    pub const fn as_ptr(self) -> *mut Node<T> {
        self.0.as_ptr()
    }
}

impl<T> Clone for NodePtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodePtr<T> {}

impl<T> PartialEq for NodePtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

pub(crate) struct Node<T> {
    pub value: T,
    pub prev: Link<T>,
    pub next: Link<T>,
}
