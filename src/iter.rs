use core::iter::FusedIterator;

use crate::bst::{Bst, NodeId};
use crate::error::Error;

/// Lazy ascending iterator over the keys of a tree, restricted to an
/// inclusive `[min, max]` window.
///
/// The iterator drives an in-order walk with an explicit stack of
/// pending ancestors. Descents prune below `min`: a node whose key is
/// strictly below the bound is skipped together with its whole left
/// subtree, since BST order puts every key there below the bound as
/// well. The `max` bound is checked lazily when the next key is asked
/// for, so ancestors beyond it may sit unreturned on the stack.
///
/// Duplicates live in the left subtree of an equal key, so equal keys
/// come out adjacent, and both bounds are inclusive.
#[derive(Debug)]
pub struct BoundedIter<'a, K: Ord> {
    tree: &'a Bst<K>,
    min: Option<&'a K>,
    max: Option<&'a K>,
    stack: Vec<NodeId>,
}

impl<'a, K: Ord> BoundedIter<'a, K> {
    pub(crate) fn new(tree: &'a Bst<K>, min: Option<&'a K>, max: Option<&'a K>) -> Self {
        let mut iter = Self {
            tree,
            min,
            max,
            stack: Vec::new(),
        };
        iter.descend(tree.root());

        iter
    }

    /// Pushes the in-window ancestors of the subtree under `current`,
    /// pruning left subtrees that sit entirely below `min`.
    fn descend(&mut self, mut current: NodeId) {
        while !current.is_nil() {
            let node = self.tree.node(current);

            match self.min {
                Some(min) if node.key < *min => current = node.right,
                _ => {
                    self.stack.push(current);
                    current = node.left;
                }
            }
        }
    }

    fn within_max(&self, id: NodeId) -> bool {
        match self.max {
            Some(max) => self.tree.node(id).key <= *max,
            None => true,
        }
    }

    /// Returns `true` if another key is available, i.e. the stack is
    /// non-empty and its top key does not exceed `max`.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.stack.last().is_some_and(|&top| self.within_max(top))
    }

    /// Returns the next key in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`] once the window has been walked.
    pub fn try_next(&mut self) -> Result<&'a K, Error> {
        match self.stack.last().copied() {
            Some(top) if self.within_max(top) => {
                self.stack.pop();
                self.descend(self.tree.node(top).right);

                Ok(&self.tree.node(top).key)
            }
            _ => Err(Error::Exhausted),
        }
    }
}

impl<'a, K: Ord> Iterator for BoundedIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }
}

impl<K: Ord> FusedIterator for BoundedIter<'_, K> {}
