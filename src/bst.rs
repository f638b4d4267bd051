use core::cmp::Ordering;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum NodeColor {
    Red,
    Black,
}

/// Handle to a node slot inside a tree's arena.
///
/// Handles are only meaningful for the tree that produced them (through
/// [`Bst::find`] or [`Bst::root`]) and are invalidated by `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The absent-node sentinel, shared by every tree.
    pub const NIL: NodeId = NodeId(0);

    /// Returns `true` if this handle names no node.
    #[must_use]
    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }
}

#[derive(Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) color: NodeColor,
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl<K> Node<K> {
    fn new_isolated(key: K) -> Self {
        Self {
            key,
            color: NodeColor::Red,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }
}

impl<K: Default> Default for Node<K> {
    fn default() -> Self {
        Self {
            key: K::default(),
            color: NodeColor::Black,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }
}

/// A plain binary search tree over an arena of nodes.
///
/// Keys that compare equal to an existing key are routed into the left
/// subtree of that key, so duplicates accumulate and are counted by
/// [`Bst::len`]. Insertion performs no rebalancing: a sorted insertion
/// order degenerates the tree into a linked list. [`Redbud`](crate::Redbud)
/// builds on this type to keep the height logarithmic.
///
/// Slot 0 of the arena is the `NIL` sentinel. It also serves as scratch
/// space during rotation, which writes the transferred subtree's parent
/// link without checking for `NIL`.
#[derive(Debug)]
pub struct Bst<K: Ord> {
    storage: Vec<Node<K>>,
    root: NodeId,
}

impl<K: Ord> Bst<K> {
    pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
        &self.storage[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.storage[id.0]
    }

    /// Handle of the root node, `NIL` when the tree is empty.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Inserts `key` into the tree without rebalancing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] when `key` is `None`; absent keys
    /// cannot be stored.
    pub fn insert(&mut self, key: Option<K>) -> Result<(), Error> {
        let key = key.ok_or(Error::NullInput)?;
        self.attach(key);
        Ok(())
    }

    /// Descends from the root and links a new red node into the empty
    /// child slot the key's ordering selects. Returns the new node's
    /// handle so the balanced layer can repair from it.
    pub(crate) fn attach(&mut self, key: K) -> NodeId {
        let mut current = self.root;
        let mut parent = NodeId::NIL;

        while !current.is_nil() {
            parent = current;
            let node = self.node(current);

            current = match key.cmp(&node.key) {
                // equal keys accumulate in the left subtree
                Ordering::Greater => node.right,
                _ => node.left,
            };
        }

        let new_id = NodeId(self.storage.len());

        if parent.is_nil() {
            self.root = new_id;
        } else if key.cmp(&self.node(parent).key) == Ordering::Greater {
            self.node_mut(parent).right = new_id;
        } else {
            self.node_mut(parent).left = new_id;
        }

        self.storage.push(Node::new_isolated(key));
        self.storage[new_id.0].parent = parent;

        new_id
    }

    /// Returns `true` if `key` is stored at least once.
    ///
    /// An absent key is never stored, so `contains(None)` is `false`
    /// rather than an error.
    #[must_use]
    pub fn contains(&self, key: Option<&K>) -> bool {
        let Some(key) = key else {
            return false;
        };

        self.lookup(key) != NodeId::NIL
    }

    /// Handle of some node holding a key equal to `key`, if any.
    #[must_use]
    pub fn find(&self, key: &K) -> Option<NodeId> {
        let found = self.lookup(key);

        (!found.is_nil()).then_some(found)
    }

    fn lookup(&self, key: &K) -> NodeId {
        let mut current = self.root;

        while !current.is_nil() {
            let node = self.node(current);

            match key.cmp(&node.key) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return current,
                Ordering::Greater => current = node.right,
            }
        }

        NodeId::NIL
    }

    /// Number of stored keys, duplicates counted separately.
    ///
    /// Computed by a full traversal on every call.
    #[must_use]
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self.root];

        while let Some(id) = pending.pop() {
            if id.is_nil() {
                continue;
            }

            count += 1;
            let node = self.node(id);
            pending.push(node.left);
            pending.push(node.right);
        }

        count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Discards every stored key. Outstanding [`NodeId`] handles are
    /// invalidated.
    pub fn clear(&mut self) {
        self.storage.truncate(1);
        self.root = NodeId::NIL;
    }

    /// Reserves arena capacity for at least `additional` more insertions.
    pub fn reserve(&mut self, additional: usize) {
        self.storage.reserve(additional);
    }

    /// Exchanges the structural positions of a direct parent-child pair,
    /// preserving BST order.
    ///
    /// When `child` is `parent`'s left child this is a right rotation,
    /// when it is the right child a left rotation. `child` takes over
    /// `parent`'s position (becoming the root if `parent` was the root)
    /// and `parent` becomes its child; the subtree between the two keys
    /// moves over to `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] when either handle is `NIL`, and
    /// [`Error::InvalidRelation`] when the nodes are not currently in a
    /// direct parent-child relationship. Either way no link has been
    /// touched and the tree is unchanged.
    pub fn rotate(&mut self, child: NodeId, parent: NodeId) -> Result<(), Error> {
        if child.is_nil() || parent.is_nil() {
            return Err(Error::NullInput);
        }

        if self.node(parent).left == child {
            self.rotate_right(parent);
            Ok(())
        } else if self.node(parent).right == child {
            self.rotate_left(parent);
            Ok(())
        } else {
            Err(Error::InvalidRelation)
        }
    }

    /// Rotates `center`'s right child up into `center`'s position.
    /// The caller guarantees that right child exists.
    pub(crate) fn rotate_left(&mut self, center: NodeId) {
        let grandparent = self.node(center).parent;
        let pivot = self.node(center).right;

        let transfer = self.node(pivot).left;

        self.node_mut(center).right = transfer;
        self.node_mut(transfer).parent = center;

        self.node_mut(pivot).left = center;
        self.node_mut(center).parent = pivot;
        self.node_mut(pivot).parent = grandparent;

        if grandparent.is_nil() {
            self.root = pivot;
        } else if self.node(grandparent).right == center {
            self.node_mut(grandparent).right = pivot;
        } else {
            self.node_mut(grandparent).left = pivot;
        }
    }

    /// Mirror image of [`Bst::rotate_left`].
    pub(crate) fn rotate_right(&mut self, center: NodeId) {
        let grandparent = self.node(center).parent;
        let pivot = self.node(center).left;

        let transfer = self.node(pivot).right;

        self.node_mut(center).left = transfer;
        self.node_mut(transfer).parent = center;

        self.node_mut(pivot).right = center;
        self.node_mut(center).parent = pivot;
        self.node_mut(pivot).parent = grandparent;

        if grandparent.is_nil() {
            self.root = pivot;
        } else if self.node(grandparent).right == center {
            self.node_mut(grandparent).right = pivot;
        } else {
            self.node_mut(grandparent).left = pivot;
        }
    }
}

impl<K: Default + Ord> Bst<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: vec![Node::default()],
            root: NodeId::NIL,
        }
    }
}

impl<K: Default + Ord> Default for Bst<K> {
    fn default() -> Self {
        Self::new()
    }
}
