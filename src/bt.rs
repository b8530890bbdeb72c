// SPDX-License-Identifier: MPL-2.0

//! An unbalanced binary search tree.
//!
//! ## Properties:
//! - Ordered: every value in the left subtree of a node compares less than the node's value and
//!   every value in the right subtree compares greater, under the tree's [`Comparer`].
//! - Never empty: a tree is created from a seed value that becomes its root, and the root can
//!   never be removed.
//! - Arena-backed: nodes are stored in one vector and linked by index. A node's parent link is
//!   a plain back-reference, so there are no ownership cycles.
//!
//! ## Creation
//! Use [`BinaryTree::new`] for values with a natural order, or [`BinaryTree::with_comparer`] to
//! supply an ordering. [`BinaryTree::with_options`] additionally selects the
//! [`DuplicatePolicy`].
//!
//! ## Example
//! ```
//! use arbor::bt::{BinaryTree, TraversalOrder};
//!
//! let mut tree = BinaryTree::new(5);
//! for value in [3, 8, 1, 4] {
//!     tree.add(value).unwrap();
//! }
//! let in_order: Vec<_> = tree.iter().copied().collect();
//! assert_eq!(in_order, [1, 3, 4, 5, 8]);
//! assert_eq!(tree.traverse(TraversalOrder::PreOrder).next(), Some(&5));
//! ```

pub mod node;

use core::cmp::Ordering;
use core::fmt::Debug;
use std::io::Cursor;

use serde::{Deserialize, Serialize};

use crate::{
    codec::{CodecError, Decode, Encode, ParameterizedDecode},
    compare::{Comparer, NaturalOrder},
};
use node::{Arena, ROOT};
pub use node::NodeRef;

/// Errors triggered by binary tree operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BinaryTreeError<V> {
    /// Error when inserting a value that compares equal to one already in the tree. The rejected
    /// value is handed back.
    #[error("value already exists in the tree")]
    DuplicateValue(V),
    /// Error when attempting to remove the root node.
    #[error("root of a tree cannot be removed")]
    RootRemoval,
    /// Error when a node without a parent is spliced upward. This indicates a corrupted tree.
    #[error("node has no parent to splice into")]
    DetachedNode,
}

/// What [`BinaryTree::add`] does with a value equal to one already stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`BinaryTreeError::DuplicateValue`].
    #[default]
    Error,
    /// Leave the tree unchanged and return `Ok(false)`.
    Reject,
}

/// Configuration of a [`BinaryTree`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryTreeOptions {
    /// Handling of duplicate values on insertion.
    pub duplicate_policy: DuplicatePolicy,
}

/// Order in which [`BinaryTree::traverse`] visits nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree. Yields values in ascending order.
    #[default]
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}

/// Represents an unbalanced binary search tree ordered by `C`.
pub struct BinaryTree<V, C = NaturalOrder> {
    nodes: Arena<V>,
    comparer: C,
    policy: DuplicatePolicy,
}

impl<V: Ord> BinaryTree<V> {
    /// Creates a tree ordered by [`Ord`] whose root holds `root`.
    pub fn new(root: V) -> Self {
        Self::with_comparer(root, NaturalOrder)
    }
}

impl<V, C: Comparer<V>> BinaryTree<V, C> {
    /// Creates a tree whose root holds `root`, ordered by `comparer`.
    pub fn with_comparer(root: V, comparer: C) -> Self {
        Self::with_options(root, comparer, BinaryTreeOptions::default())
    }

    /// Creates a tree whose root holds `root`, ordered by `comparer` and configured by `options`.
    pub fn with_options(root: V, comparer: C, options: BinaryTreeOptions) -> Self {
        Self {
            nodes: Arena::with_root(root),
            comparer,
            policy: options.duplicate_policy,
        }
    }

    /// Number of values in the tree. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The comparer ordering this tree.
    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// The current duplicate handling.
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Changes the duplicate handling for subsequent insertions.
    pub fn set_duplicate_policy(&mut self, policy: DuplicatePolicy) {
        self.policy = policy;
    }

    /// Whether inserting a duplicate fails rather than returning `Ok(false)`.
    pub fn throws_on_duplicate(&self) -> bool {
        self.policy == DuplicatePolicy::Error
    }

    /// Shorthand for selecting [`DuplicatePolicy::Error`] or [`DuplicatePolicy::Reject`].
    pub fn set_throw_on_duplicate(&mut self, throw: bool) {
        self.policy = if throw {
            DuplicatePolicy::Error
        } else {
            DuplicatePolicy::Reject
        };
    }

    /// A view of the root node.
    pub fn root(&self) -> NodeRef<'_, V> {
        NodeRef::new(&self.nodes, ROOT)
    }

    /// Inserts `value` into the tree.
    ///
    /// # Returns
    /// - `Ok(true)` when a new node was added.
    /// - `Ok(false)` when an equal value exists and the policy is [`DuplicatePolicy::Reject`].
    /// - `Err(DuplicateValue(value))` when an equal value exists and the policy is
    ///   [`DuplicatePolicy::Error`].
    ///
    /// The tree is unchanged unless `Ok(true)` is returned.
    pub fn add(&mut self, value: V) -> Result<bool, BinaryTreeError<V>> {
        let mut current = ROOT;
        loop {
            let node = &self.nodes[current];
            let ordering = self.comparer.compare(&value, &node.value);
            let next = match ordering {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => {
                    return match self.policy {
                        DuplicatePolicy::Error => Err(BinaryTreeError::DuplicateValue(value)),
                        DuplicatePolicy::Reject => Ok(false),
                    };
                }
            };

            match next {
                Some(child) => current = child,
                None => {
                    let id = self.nodes.alloc(value, current);
                    let linked = if ordering == Ordering::Less {
                        self.nodes.set_left_child(current, Some(id), &self.comparer)
                    } else {
                        self.nodes.set_right_child(current, Some(id), &self.comparer)
                    };
                    debug_assert!(linked);
                    return Ok(true);
                }
            }
        }
    }

    /// Removes the node holding a value equal to `value`.
    ///
    /// # Returns
    /// - `Ok(true)` when a node was removed.
    /// - `Ok(false)` when no equal value is stored.
    /// - `Err(RootRemoval)` when `value` equals the root's value.
    pub fn remove(&mut self, value: &V) -> Result<bool, BinaryTreeError<V>> {
        if self.comparer.compare(value, &self.nodes[ROOT].value) == Ordering::Equal {
            return Err(BinaryTreeError::RootRemoval);
        }
        let Some(id) = self.locate(value) else {
            return Ok(false);
        };

        let node = &self.nodes[id];
        let excised = match (node.left, node.right) {
            (None, right) => {
                self.splice(id, right)?;
                id
            }
            (left, None) => {
                self.splice(id, left)?;
                id
            }
            (Some(_), Some(_)) => {
                let successor = self
                    .nodes
                    .set_to_min_branch_value(id)
                    .ok_or(BinaryTreeError::DetachedNode)?;
                let successor_right = self.nodes[successor].right;
                self.splice(successor, successor_right)?;
                successor
            }
        };
        self.nodes.free(excised);
        Ok(true)
    }

    /// Replaces `id` in its parent's child slot with `replacement`.
    fn splice(
        &mut self,
        id: usize,
        replacement: Option<usize>,
    ) -> Result<(), BinaryTreeError<V>> {
        let parent = self.nodes[id]
            .parent
            .ok_or(BinaryTreeError::DetachedNode)?;
        let linked = if self.nodes[parent].left == Some(id) {
            self.nodes
                .set_left_child(parent, replacement, &self.comparer)
        } else {
            self.nodes
                .set_right_child(parent, replacement, &self.comparer)
        };
        debug_assert!(linked);
        if let Some(child) = replacement {
            self.nodes.set_parent(child, Some(parent));
        }
        Ok(())
    }

    /// Removes every value matching `predicate`, except the root.
    ///
    /// Matching values are collected in order first and then removed one by one, so the
    /// predicate sees the tree as it was before any removal. Returns the number of values
    /// removed.
    pub fn remove_all<P>(&mut self, mut predicate: P) -> usize
    where
        V: Clone,
        P: FnMut(&V) -> bool,
    {
        let matched: Vec<V> = self
            .traverse(TraversalOrder::InOrder)
            .filter(|value| predicate(value))
            .cloned()
            .collect();
        matched
            .iter()
            .filter(|value| matches!(self.remove(value), Ok(true)))
            .count()
    }

    fn locate(&self, value: &V) -> Option<usize> {
        let mut current = Some(ROOT);
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match self.comparer.compare(value, &node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Returns the stored value equal to `value`, if any.
    pub fn find(&self, value: &V) -> Option<&V> {
        self.locate(value).map(|id| &self.nodes[id].value)
    }

    /// Whether a value equal to `value` is stored.
    pub fn contains(&self, value: &V) -> bool {
        self.locate(value).is_some()
    }

    /// Whether any stored value is equal to `value` according to `eq`.
    ///
    /// `eq` need not agree with the tree's ordering, so this visits every node in order rather
    /// than descending the tree.
    pub fn contains_by<F>(&self, value: &V, mut eq: F) -> bool
    where
        F: FnMut(&V, &V) -> bool,
    {
        self.iter().any(|stored| eq(value, stored))
    }

    /// The smallest stored value.
    pub fn minimum(&self) -> &V {
        let mut current = &self.nodes[ROOT];
        while let Some(left) = current.left {
            current = &self.nodes[left];
        }
        &current.value
    }

    /// The largest stored value.
    pub fn maximum(&self) -> &V {
        let mut current = &self.nodes[ROOT];
        while let Some(right) = current.right {
            current = &self.nodes[right];
        }
        &current.value
    }

    /// Depth of the deepest leaf. A tree holding only its root has depth 0.
    pub fn depth(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.is_leaf())
            .map(|node| node.depth)
            .max()
            .unwrap_or(0)
    }

    /// Returns the values in the given order.
    ///
    /// The full sequence is collected before the first value is yielded; each call walks the
    /// tree again.
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_, V> {
        let mut values = Vec::with_capacity(self.len());
        match order {
            TraversalOrder::PreOrder => {
                let mut stack = vec![ROOT];
                while let Some(id) = stack.pop() {
                    let node = &self.nodes[id];
                    values.push(&node.value);
                    stack.extend(node.right);
                    stack.extend(node.left);
                }
            }
            TraversalOrder::InOrder => {
                let mut stack = Vec::new();
                let mut current = Some(ROOT);
                while current.is_some() || !stack.is_empty() {
                    while let Some(id) = current {
                        stack.push(id);
                        current = self.nodes[id].left;
                    }
                    if let Some(id) = stack.pop() {
                        values.push(&self.nodes[id].value);
                        current = self.nodes[id].right;
                    }
                }
            }
            TraversalOrder::PostOrder => {
                // Node, right, left reversed.
                let mut stack = vec![ROOT];
                while let Some(id) = stack.pop() {
                    let node = &self.nodes[id];
                    values.push(&node.value);
                    stack.extend(node.left);
                    stack.extend(node.right);
                }
                values.reverse();
            }
        }
        Traversal {
            inner: values.into_iter(),
        }
    }

    /// Iterates over the values in ascending order.
    pub fn iter(&self) -> Traversal<'_, V> {
        self.traverse(TraversalOrder::InOrder)
    }
}

/// Iterator over the values of a [`BinaryTree`], returned by [`BinaryTree::traverse`].
pub struct Traversal<'a, V> {
    inner: std::vec::IntoIter<&'a V>,
}

impl<'a, V> Iterator for Traversal<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Traversal<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for Traversal<'_, V> {}

impl<'a, V, C: Comparer<V>> IntoIterator for &'a BinaryTree<V, C> {
    type Item = &'a V;
    type IntoIter = Traversal<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Debug, C: Comparer<V>> Debug for BinaryTree<V, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Encode for DuplicatePolicy {
    fn encode(&self, bytes: &mut Vec<u8>) -> Result<(), CodecError> {
        match self {
            Self::Error => 0u8,
            Self::Reject => 1u8,
        }
        .encode(bytes)
    }

    fn encoded_len(&self) -> Option<usize> {
        Some(1)
    }
}

impl Decode for DuplicatePolicy {
    fn decode(bytes: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        match u8::decode(bytes)? {
            0 => Ok(Self::Error),
            1 => Ok(Self::Reject),
            _ => Err(CodecError::UnexpectedValue),
        }
    }
}

/// The tree is written as its duplicate policy, a `u32` node count and the values in
/// pre-order. Re-inserting values in pre-order rebuilds the same shape.
impl<V: Encode, C: Comparer<V>> Encode for BinaryTree<V, C> {
    fn encode(&self, bytes: &mut Vec<u8>) -> Result<(), CodecError> {
        self.policy.encode(bytes)?;
        u32::try_from(self.len())
            .map_err(|_| CodecError::LengthPrefixTooBig(self.len()))?
            .encode(bytes)?;
        for value in self.traverse(TraversalOrder::PreOrder) {
            value.encode(bytes)?;
        }
        Ok(())
    }

    fn encoded_len(&self) -> Option<usize> {
        let mut len = 1 + 4;
        for value in self.iter() {
            len += value.encoded_len()?;
        }
        Some(len)
    }
}

impl<V: Decode, C: Comparer<V> + Clone> ParameterizedDecode<C> for BinaryTree<V, C> {
    fn decode_with_param(comparer: &C, bytes: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let duplicate_policy = DuplicatePolicy::decode(bytes)?;
        let len = u32::decode(bytes)?;
        if len == 0 {
            return Err(CodecError::UnexpectedValue);
        }

        let mut tree = Self::with_options(
            V::decode(bytes)?,
            comparer.clone(),
            BinaryTreeOptions { duplicate_policy },
        );
        for _ in 1..len {
            match tree.add(V::decode(bytes)?) {
                Ok(true) => {}
                _ => return Err(CodecError::UnexpectedValue),
            }
        }
        Ok(tree)
    }
}

#[cfg(feature = "test-util")]
impl<V: core::fmt::Display, C> core::fmt::Display for BinaryTree<V, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "--- Begin Tree ---")?;
        for node in self.nodes.iter() {
            writeln!(f, "{node}")?;
        }
        write!(f, "--- End Tree ---")
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use core::cmp::Ordering;

    use crate::{
        bt::{
            BinaryTree, BinaryTreeError, BinaryTreeOptions, DuplicatePolicy, NodeRef,
            TraversalOrder,
        },
        codec::{CodecError, Encode, ParameterizedDecode},
        compare::{Comparer, NaturalOrder, ReverseOrder},
    };

    fn sample_tree() -> BinaryTree<u32> {
        //        5
        //      /   \
        //     3     8
        //    / \
        //   1   4
        let mut tree = BinaryTree::new(5);
        for value in [3, 8, 1, 4] {
            assert!(tree.add(value).unwrap());
        }
        tree
    }

    fn collect<V: Copy, C: Comparer<V>>(tree: &BinaryTree<V, C>, order: TraversalOrder) -> Vec<V> {
        tree.traverse(order).copied().collect()
    }

    /// Checks ordering, parent links and depths of every node reachable from the root, and
    /// returns how many nodes were reached.
    fn verify<V, C: Comparer<V>>(tree: &BinaryTree<V, C>) -> usize {
        let mut reached = 0;
        let mut stack = vec![tree.root()];
        while let Some(node) = stack.pop() {
            reached += 1;
            let expected_depth = node.parent().map_or(0, |p| p.depth() + 1);
            assert_eq!(node.depth(), expected_depth);
            for child in [node.left_child(), node.right_child()].into_iter().flatten() {
                let parent = child.parent().unwrap();
                assert!(core::ptr::eq(parent.value(), node.value()));
                stack.push(child);
            }
            if let Some(left) = node.left_child() {
                assert_subtree(tree, left, node.value(), Ordering::Less);
            }
            if let Some(right) = node.right_child() {
                assert_subtree(tree, right, node.value(), Ordering::Greater);
            }
        }
        assert_eq!(reached, tree.len());
        reached
    }

    fn assert_subtree<V, C: Comparer<V>>(
        tree: &BinaryTree<V, C>,
        top: NodeRef<'_, V>,
        pivot: &V,
        expected: Ordering,
    ) {
        let mut stack = vec![top];
        while let Some(node) = stack.pop() {
            assert_eq!(tree.comparer().compare(node.value(), pivot), expected);
            stack.extend(node.left_child());
            stack.extend(node.right_child());
        }
    }

    #[test]
    fn root_only() {
        let tree = BinaryTree::new("seed");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.minimum(), &"seed");
        assert_eq!(tree.maximum(), &"seed");
        assert!(tree.root().is_leaf());
        assert!(tree.root().parent().is_none());
        verify(&tree);
    }

    #[test]
    fn traversal_orders() {
        let tree = sample_tree();
        assert_eq!(collect(&tree, TraversalOrder::InOrder), [1, 3, 4, 5, 8]);
        assert_eq!(collect(&tree, TraversalOrder::PreOrder), [5, 3, 1, 4, 8]);
        assert_eq!(collect(&tree, TraversalOrder::PostOrder), [1, 4, 3, 8, 5]);

        let bare: Vec<u32> = (&tree).into_iter().copied().collect();
        assert_eq!(bare, [1, 3, 4, 5, 8]);
        assert_eq!(tree.traverse(TraversalOrder::PreOrder).len(), 5);
    }

    #[test]
    fn find_and_contains() {
        let tree = sample_tree();
        assert_eq!(tree.find(&4), Some(&4));
        assert_eq!(tree.find(&7), None);
        assert!(tree.contains(&1));
        assert!(!tree.contains(&2));
        assert!(tree.contains_by(&9, |a, b| a % 4 == b % 4 && a != b));
        assert!(!tree.contains_by(&9, |a, b| a == b));
    }

    #[test]
    fn min_max_depth() {
        let mut tree = sample_tree();
        assert_eq!(tree.minimum(), &1);
        assert_eq!(tree.maximum(), &8);
        assert_eq!(tree.depth(), 2);

        tree.add(9).unwrap();
        tree.add(10).unwrap();
        assert_eq!(tree.maximum(), &10);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn duplicate_policy() {
        let mut tree = sample_tree();
        assert!(tree.throws_on_duplicate());
        assert_matches!(tree.add(3), Err(BinaryTreeError::DuplicateValue(3)));
        assert_eq!(tree.len(), 5);

        tree.set_throw_on_duplicate(false);
        assert_eq!(tree.duplicate_policy(), DuplicatePolicy::Reject);
        assert_matches!(tree.add(3), Ok(false));
        assert_eq!(tree.len(), 5);
        verify(&tree);
    }

    #[test]
    fn remove_root_fails() {
        let mut tree = sample_tree();
        assert_matches!(tree.remove(&5), Err(BinaryTreeError::RootRemoval));
        assert_eq!(tree.len(), 5);

        let mut lone = BinaryTree::new(1);
        assert_matches!(lone.remove(&1), Err(BinaryTreeError::RootRemoval));
    }

    #[test]
    fn remove_missing() {
        let mut tree = sample_tree();
        assert_matches!(tree.remove(&7), Ok(false));
        assert_eq!(tree.len(), 5);
        assert_eq!(collect(&tree, TraversalOrder::PreOrder), [5, 3, 1, 4, 8]);
    }

    #[test]
    fn remove_leaf() {
        let mut tree = sample_tree();
        assert_matches!(tree.remove(&4), Ok(true));
        assert_eq!(collect(&tree, TraversalOrder::InOrder), [1, 3, 5, 8]);
        assert_eq!(verify(&tree), 4);
    }

    #[test]
    fn remove_single_child() {
        let mut tree = sample_tree();
        tree.add(9).unwrap();
        tree.add(10).unwrap();

        // 8 has only a right child.
        assert_matches!(tree.remove(&8), Ok(true));
        assert_eq!(collect(&tree, TraversalOrder::PreOrder), [5, 3, 1, 4, 9, 10]);
        assert_eq!(tree.depth(), 2);
        verify(&tree);

        // 3 loses its right child, then has only a left child.
        tree.remove(&4).unwrap();
        assert_matches!(tree.remove(&3), Ok(true));
        assert_eq!(collect(&tree, TraversalOrder::PreOrder), [5, 1, 9, 10]);
        verify(&tree);
    }

    #[test]
    fn remove_two_children() {
        let mut tree = BinaryTree::new(50);
        for value in [30, 70, 20, 40, 35, 45, 37] {
            tree.add(value).unwrap();
        }

        // 30 is replaced by its in-order successor 35, whose right child 37 moves up.
        assert_matches!(tree.remove(&30), Ok(true));
        assert_eq!(
            collect(&tree, TraversalOrder::PreOrder),
            [50, 35, 20, 40, 37, 45, 70]
        );
        assert_eq!(
            collect(&tree, TraversalOrder::InOrder),
            [20, 35, 37, 40, 45, 50, 70]
        );
        verify(&tree);

        // The successor is the direct right child.
        assert_matches!(tree.remove(&40), Ok(true));
        assert_eq!(collect(&tree, TraversalOrder::InOrder), [20, 35, 37, 45, 50, 70]);
        verify(&tree);
    }

    #[test]
    fn remove_all() {
        let mut tree = BinaryTree::new(10);
        tree.set_throw_on_duplicate(false);
        for value in 1..20 {
            tree.add(value).unwrap();
        }
        assert_eq!(tree.len(), 19);

        // 10 matches too but is the root.
        let removed = tree.remove_all(|v| v % 2 == 0);
        assert_eq!(removed, 8);
        assert_eq!(
            collect(&tree, TraversalOrder::InOrder),
            [1, 3, 5, 7, 9, 10, 11, 13, 15, 17, 19]
        );
        verify(&tree);
    }

    #[test]
    fn custom_comparer() {
        let mut tree = BinaryTree::with_comparer(5, ReverseOrder(NaturalOrder));
        for value in [3, 8, 1] {
            tree.add(value).unwrap();
        }
        assert_eq!(collect(&tree, TraversalOrder::InOrder), [8, 5, 3, 1]);
        assert_eq!(tree.minimum(), &8);

        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        let mut words = BinaryTree::with_options(
            "four",
            by_len,
            BinaryTreeOptions {
                duplicate_policy: DuplicatePolicy::Reject,
            },
        );
        assert_matches!(words.add("a"), Ok(true));
        assert_matches!(words.add("five"), Ok(false));
        assert_eq!(words.find(&"nine"), Some(&"four"));
    }

    #[test]
    fn depth_after_removals() {
        let mut tree = BinaryTree::new(0);
        for value in 1..=6 {
            tree.add(value).unwrap();
        }
        assert_eq!(tree.depth(), 6);
        tree.remove(&1).unwrap();
        tree.remove(&3).unwrap();
        assert_eq!(tree.depth(), 4);
        verify(&tree);
    }

    #[test]
    fn codec() {
        let mut tree = BinaryTree::new(50u32);
        for value in [30, 70, 20, 40, 60, 80] {
            tree.add(value).unwrap();
        }
        tree.set_throw_on_duplicate(false);

        let bytes = tree.get_encoded().unwrap();
        assert_eq!(bytes.len(), tree.encoded_len().unwrap());

        let decoded = BinaryTree::<u32>::get_decoded_with_param(&NaturalOrder, &bytes).unwrap();
        assert_eq!(
            collect(&decoded, TraversalOrder::PreOrder),
            collect(&tree, TraversalOrder::PreOrder)
        );
        assert_eq!(decoded.duplicate_policy(), DuplicatePolicy::Reject);
        verify(&decoded);
    }

    #[test]
    fn codec_rejects_bad_input() {
        // Zero nodes.
        assert_matches!(
            BinaryTree::<u32>::get_decoded_with_param(&NaturalOrder, &[0, 0, 0, 0, 0]),
            Err(CodecError::UnexpectedValue)
        );
        // Two equal values.
        assert_matches!(
            BinaryTree::<u8>::get_decoded_with_param(&NaturalOrder, &[0, 0, 0, 0, 2, 7, 7]),
            Err(CodecError::UnexpectedValue)
        );
        // Unknown policy byte.
        assert_matches!(
            BinaryTree::<u8>::get_decoded_with_param(&NaturalOrder, &[9, 0, 0, 0, 1, 7]),
            Err(CodecError::UnexpectedValue)
        );
    }
}
