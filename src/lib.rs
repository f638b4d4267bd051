//! Iterable red-black tree with range-bounded in-order traversal.
//!
//! [`Redbud`] keeps a multiset of keys ordered and balanced, and hands out
//! lazy ascending iterators that can be restricted to an inclusive
//! `[min, max]` window. The unbalanced arena tree it is built on,
//! [`Bst`], is exposed as well for callers that want raw binary-search
//! placement and manual [`Bst::rotate`] calls.

mod bst;
mod error;
mod iter;

pub use bst::{Bst, NodeId};
pub use error::Error;
pub use iter::BoundedIter;

use bst::NodeColor;

/// A red-black tree storing a multiset of ordered keys.
///
/// Insertion places the key exactly as [`Bst`] does (duplicates routed
/// left), then restores the red-black invariant by recoloring and
/// rotation, which bounds the height at `O(log n)`.
///
/// Iteration bounds set through [`Redbud::set_iter_min`] and
/// [`Redbud::set_iter_max`] apply to iterators created afterwards; an
/// already-created iterator keeps the bounds it was built with.
#[derive(Debug)]
pub struct Redbud<K: Ord> {
    bst: Bst<K>,
    min: Option<K>,
    max: Option<K>,
}

impl<K: Ord> Redbud<K> {
    /// Inserts `key`, then repairs the red-black invariant.
    ///
    /// The new node starts red; after repair the root is always forced
    /// back to black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullInput`] when `key` is `None`.
    pub fn insert(&mut self, key: Option<K>) -> Result<(), Error> {
        let key = key.ok_or(Error::NullInput)?;

        let new_id = self.bst.attach(key);
        self.fix_red_violation(new_id);

        let root = self.bst.root();
        self.bst.node_mut(root).color = NodeColor::Black;

        Ok(())
    }

    /// Restores the red property starting from a freshly inserted red
    /// node, or from a node turned red by a previous repair step.
    ///
    /// Runs until the current node's parent is black (the `NIL` sentinel
    /// is black, so reaching the root also terminates the loop). A red
    /// uncle costs a recoloring and moves the violation up two levels; a
    /// black or absent uncle is resolved by one or two rotations and
    /// ends the repair.
    fn fix_red_violation(&mut self, start: NodeId) {
        let mut current = start;

        while self.is_red(self.bst.node(current).parent) {
            let parent = self.bst.node(current).parent;
            let grandparent = self.bst.node(parent).parent;

            if grandparent.is_nil() {
                // red parent is the root; insert blackens it afterwards
                return;
            }

            let parent_is_right = self.bst.node(grandparent).right == parent;
            let uncle = if parent_is_right {
                self.bst.node(grandparent).left
            } else {
                self.bst.node(grandparent).right
            };

            if self.is_red(uncle) {
                self.bst.node_mut(parent).color = NodeColor::Black;
                self.bst.node_mut(uncle).color = NodeColor::Black;
                self.bst.node_mut(grandparent).color = NodeColor::Red;

                current = grandparent;
                continue;
            }

            let current_is_inner = if parent_is_right {
                self.bst.node(parent).left == current
            } else {
                self.bst.node(parent).right == current
            };

            if current_is_inner {
                // straighten the zig-zag; the old parent becomes the
                // outer child and the loop resolves it next pass
                if parent_is_right {
                    self.bst.rotate_right(parent);
                } else {
                    self.bst.rotate_left(parent);
                }

                current = parent;
                continue;
            }

            self.bst.node_mut(parent).color = NodeColor::Black;
            self.bst.node_mut(grandparent).color = NodeColor::Red;

            if parent_is_right {
                self.bst.rotate_left(grandparent);
            } else {
                self.bst.rotate_right(grandparent);
            }
        }
    }

    fn is_red(&self, id: NodeId) -> bool {
        self.bst.node(id).color == NodeColor::Red
    }

    /// Returns `true` if `key` is stored at least once; `contains(None)`
    /// is `false`.
    #[must_use]
    pub fn contains(&self, key: Option<&K>) -> bool {
        self.bst.contains(key)
    }

    /// Number of stored keys, duplicates counted separately.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bst.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bst.is_empty()
    }

    /// Discards every stored key. Iterator bounds are kept.
    pub fn clear(&mut self) {
        self.bst.clear();
    }

    /// Reserves capacity for at least `additional` more insertions.
    pub fn reserve(&mut self, additional: usize) {
        self.bst.reserve(additional);
    }

    /// Sets the inclusive lower bound used by iterators created from now
    /// on, or removes it with `None`. Existing iterators are unaffected.
    pub fn set_iter_min(&mut self, min: Option<K>) {
        self.min = min;
    }

    /// Sets the inclusive upper bound used by iterators created from now
    /// on, or removes it with `None`. Existing iterators are unaffected.
    pub fn set_iter_max(&mut self, max: Option<K>) {
        self.max = max;
    }

    /// Creates a lazy ascending iterator over the keys inside the
    /// currently configured `[min, max]` window.
    ///
    /// The bounds are captured now; later calls to the bound setters do
    /// not reach into this iterator.
    #[must_use]
    pub fn iter(&self) -> BoundedIter<'_, K> {
        BoundedIter::new(&self.bst, self.min.as_ref(), self.max.as_ref())
    }
}

impl<K: Default + Ord> Redbud<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bst: Bst::new(),
            min: None,
            max: None,
        }
    }
}

impl<K: Default + Ord> Default for Redbud<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K: Ord> IntoIterator for &'a Redbud<K> {
    type Item = &'a K;
    type IntoIter = BoundedIter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::prelude::*;

    use crate::bst::NodeColor;
    use crate::{Error, NodeId, Redbud};

    fn tree_of(keys: &[i32]) -> Redbud<i32> {
        let mut tree = Redbud::new();
        for &key in keys {
            tree.insert(Some(key)).unwrap();
        }
        tree
    }

    fn readout<K: Clone + Ord>(tree: &Redbud<K>) -> Vec<K> {
        tree.iter().cloned().collect()
    }

    /// Checks the red-black invariant: black root, no red node with a
    /// red parent, equal black count on every root-to-NIL path. Returns
    /// the tree's black height.
    fn assert_red_black<K: Ord>(tree: &Redbud<K>) -> usize {
        fn walk<K: Ord>(tree: &Redbud<K>, id: NodeId) -> usize {
            if id.is_nil() {
                return 1;
            }

            let node = tree.bst.node(id);
            if node.color == NodeColor::Red {
                assert!(!tree.is_red(node.parent), "red node has a red parent");
            }

            let left_height = walk(tree, node.left);
            let right_height = walk(tree, node.right);
            assert_eq!(left_height, right_height, "black height differs");

            left_height + usize::from(node.color == NodeColor::Black)
        }

        assert!(!tree.is_red(tree.bst.root()), "root must be black");
        walk(tree, tree.bst.root())
    }

    #[test]
    fn sorted_and_shuffled_orders_agree() {
        let sorted = tree_of(&[1, 2, 3, 4, 5, 6, 7]);
        let shuffled = tree_of(&[4, 2, 6, 1, 3, 5, 7]);

        assert_eq!(readout(&sorted), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(readout(&shuffled), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(sorted.len(), 7);
        assert_eq!(shuffled.len(), 7);

        assert_red_black(&sorted);
        assert_red_black(&shuffled);
    }

    #[test]
    fn duplicates_count_and_clear() {
        let mut tree = tree_of(&[3, 1, 4, 2, 5, 3, 6, 2]);

        assert_eq!(readout(&tree), vec![1, 2, 2, 3, 3, 4, 5, 6]);
        assert_eq!(tree.len(), 8);
        assert_red_black(&tree);

        tree.clear();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(readout(&tree), Vec::<i32>::new());
    }

    #[test]
    fn absent_key_is_rejected_on_insert_but_not_contains() {
        let mut tree = Redbud::<i32>::new();

        assert_eq!(tree.insert(None), Err(Error::NullInput));
        assert!(tree.is_empty());
        assert!(!tree.contains(None));
    }

    #[test]
    fn red_uncle_insertion_recolors() {
        let mut tree = Redbud::new();
        for key in ["M", "F", "S", "C", "I", "P", "X", "H", "J"] {
            tree.insert(Some(key.to_owned())).unwrap();
        }
        // O's parent P is red and its uncle X is red: repairing recolors
        // P and X black and pulls S red, which the root absorbs
        tree.insert(Some("O".to_owned())).unwrap();

        let root = tree.bst.root();
        let s = tree.bst.node(root).right;
        let p = tree.bst.node(s).left;
        let o = tree.bst.node(p).left;
        let x = tree.bst.node(s).right;

        assert_eq!(tree.bst.node(o).key, "O");
        assert!(tree.is_red(o));
        assert_eq!(tree.bst.node(p).key, "P");
        assert!(!tree.is_red(p));
        assert_eq!(tree.bst.node(x).key, "X");
        assert!(!tree.is_red(x));

        assert_red_black(&tree);
    }

    #[test]
    fn black_uncle_insertion_rotates() {
        let tree = tree_of(&[7, 4, 10, 2, 1]);

        // inserting 1 gives 2 a red-red chain under 4 with a black
        // uncle; repairing rotates 2 up in 4's place
        let root = tree.bst.root();
        assert_eq!(tree.bst.node(root).key, 7);
        assert!(!tree.is_red(root));

        let left = tree.bst.node(root).left;
        assert_eq!(tree.bst.node(left).key, 2);
        assert!(!tree.is_red(left));

        assert_eq!(tree.bst.node(tree.bst.node(left).left).key, 1);
        assert!(tree.is_red(tree.bst.node(left).left));
        assert_eq!(tree.bst.node(tree.bst.node(left).right).key, 4);
        assert!(tree.is_red(tree.bst.node(left).right));

        assert_red_black(&tree);
    }

    #[test]
    fn red_uncle_recoloring_reaches_the_root() {
        let tree = tree_of(&[2, 4, 1, 3]);

        // 3 lands red under red 4 with red uncle 1: recoloring blackens
        // both and pushes red to the root, which insert absorbs
        let root = tree.bst.root();
        assert_eq!(tree.bst.node(root).key, 2);
        assert!(!tree.is_red(root));

        let right = tree.bst.node(root).right;
        assert_eq!(tree.bst.node(right).key, 4);
        assert!(!tree.is_red(right));
        assert_eq!(tree.bst.node(tree.bst.node(right).left).key, 3);
        assert!(tree.is_red(tree.bst.node(right).left));

        assert_red_black(&tree);
    }

    #[test]
    fn zig_zag_insertion_straightens() {
        // 5 -> 1 -> 3 forms a left-right zig-zag; repair rotates 3 up to
        // the root with a double rotation
        let tree = tree_of(&[5, 1, 3]);

        let root = tree.bst.root();
        assert_eq!(tree.bst.node(root).key, 3);
        assert!(!tree.is_red(root));
        assert_eq!(tree.bst.node(tree.bst.node(root).left).key, 1);
        assert!(tree.is_red(tree.bst.node(root).left));
        assert_eq!(tree.bst.node(tree.bst.node(root).right).key, 5);
        assert!(tree.is_red(tree.bst.node(root).right));

        assert_red_black(&tree);
    }

    #[test]
    fn randomized_bulk_insert_keeps_invariants() {
        let mut rng = rand::thread_rng();
        let mut keys: Vec<usize> = (0..1000).map(|n| n % 400).collect();
        keys.shuffle(&mut rng);

        let mut tree = Redbud::new();
        tree.reserve(keys.len());
        for &key in &keys {
            tree.insert(Some(key)).unwrap();
        }

        assert_eq!(tree.len(), keys.len());
        assert_red_black(&tree);

        let mut expected = keys.clone();
        expected.sort_unstable();
        assert_eq!(readout(&tree), expected);

        for &key in &keys {
            assert!(tree.contains(Some(&key)));
        }
        assert!(!tree.contains(Some(&400)));
    }
}
