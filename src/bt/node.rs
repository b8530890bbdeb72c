// SPDX-License-Identifier: MPL-2.0

//! Nodes of a [`BinaryTree`](crate::bt::BinaryTree).
//!
//! Nodes live in a dense arena owned by the tree and refer to each other by index. The root is
//! always stored at index [`ROOT`]; freeing a node moves the last node of the arena into the
//! vacated slot and re-links its neighbours, so indices are only stable between mutations.

use core::cmp::Ordering;
use core::fmt::{self, Debug};
use core::ops::{Index, IndexMut};

use crate::compare::Comparer;

/// Arena index of the root node.
pub(crate) const ROOT: usize = 0;

/// A node of a binary search tree.
pub(crate) struct Node<V> {
    pub(crate) value: V,
    pub(crate) parent: Option<usize>,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
    pub(crate) depth: usize,
}

impl<V> Node<V> {
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Storage for the nodes of one tree.
pub(crate) struct Arena<V> {
    nodes: Vec<Node<V>>,
}

impl<V> Arena<V> {
    /// Number of nodes pre-allocated each time the arena grows.
    const NODES_CAPACITY: usize = 64;

    /// Creates an arena holding a single root node.
    pub(crate) fn with_root(value: V) -> Self {
        let mut nodes = Vec::with_capacity(Self::NODES_CAPACITY);
        nodes.push(Node {
            value,
            parent: None,
            left: None,
            right: None,
            depth: 0,
        });
        Self { nodes }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Node<V>> {
        self.nodes.iter()
    }

    /// Allocates a detached node whose depth is derived from `parent`. Linking it into the parent
    /// is left to the caller.
    pub(crate) fn alloc(&mut self, value: V, parent: usize) -> usize {
        if self.nodes.len() == self.nodes.capacity() {
            self.nodes.reserve(Self::NODES_CAPACITY);
        }
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(Node {
            value,
            parent: Some(parent),
            left: None,
            right: None,
            depth,
        });
        self.nodes.len() - 1
    }

    /// Removes a node that has already been unlinked from the tree and returns it.
    pub(crate) fn free(&mut self, id: usize) -> Node<V> {
        let last = self.nodes.len() - 1;
        let removed = self.nodes.swap_remove(id);
        if id != last {
            self.relink_moved(last, id);
        }
        removed
    }

    /// Points every link that referred to `from` at `to`.
    fn relink_moved(&mut self, from: usize, to: usize) {
        let (parent, left, right) = {
            let node = &self.nodes[to];
            (node.parent, node.left, node.right)
        };
        if let Some(p) = parent {
            let p = &mut self.nodes[p];
            if p.left == Some(from) {
                p.left = Some(to);
            } else if p.right == Some(from) {
                p.right = Some(to);
            }
        }
        for child in [left, right].into_iter().flatten() {
            self.nodes[child].parent = Some(to);
        }
    }

    /// Replaces the left link of `id`.
    ///
    /// The assignment is skipped, and `false` returned, when `child` holds a value equal to the
    /// right child of `id`: two equal children would break the ordering invariant.
    pub(crate) fn set_left_child<C: Comparer<V>>(
        &mut self,
        id: usize,
        child: Option<usize>,
        comparer: &C,
    ) -> bool {
        if self.equals_sibling(child, self.nodes[id].right, comparer) {
            return false;
        }
        self.nodes[id].left = child;
        true
    }

    /// Replaces the right link of `id`, with the same guard as [`Self::set_left_child`].
    pub(crate) fn set_right_child<C: Comparer<V>>(
        &mut self,
        id: usize,
        child: Option<usize>,
        comparer: &C,
    ) -> bool {
        if self.equals_sibling(child, self.nodes[id].left, comparer) {
            return false;
        }
        self.nodes[id].right = child;
        true
    }

    fn equals_sibling<C: Comparer<V>>(
        &self,
        child: Option<usize>,
        sibling: Option<usize>,
        comparer: &C,
    ) -> bool {
        match (child, sibling) {
            (Some(c), Some(s)) if c != s => {
                comparer.compare(&self.nodes[c].value, &self.nodes[s].value) == Ordering::Equal
            }
            _ => false,
        }
    }

    /// Replaces the parent link of `id` and rebuilds the depths of its subtree.
    pub(crate) fn set_parent(&mut self, id: usize, parent: Option<usize>) {
        self.nodes[id].parent = parent;
        self.refresh_depths(id);
    }

    /// Recomputes `depth` for `id` and all of its descendants from the parent links.
    fn refresh_depths(&mut self, id: usize) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let depth = self.nodes[current]
                .parent
                .map_or(0, |p| self.nodes[p].depth + 1);
            let node = &mut self.nodes[current];
            node.depth = depth;
            stack.extend(node.left);
            stack.extend(node.right);
        }
    }

    /// Moves the smallest value of the right subtree of `id` into `id`.
    ///
    /// The value previously held by `id` ends up in the node that held the minimum, whose index
    /// is returned so the caller can excise it. Returns `None` when `id` has no right child.
    pub(crate) fn set_to_min_branch_value(&mut self, id: usize) -> Option<usize> {
        let mut min = self.nodes[id].right?;
        while let Some(left) = self.nodes[min].left {
            min = left;
        }

        let (a, b) = if id < min {
            let (head, tail) = self.nodes.split_at_mut(min);
            (&mut head[id], &mut tail[0])
        } else {
            let (head, tail) = self.nodes.split_at_mut(id);
            (&mut tail[0], &mut head[min])
        };
        core::mem::swap(&mut a.value, &mut b.value);
        Some(min)
    }
}

impl<V> Index<usize> for Arena<V> {
    type Output = Node<V>;

    fn index(&self, id: usize) -> &Node<V> {
        &self.nodes[id]
    }
}

impl<V> IndexMut<usize> for Arena<V> {
    fn index_mut(&mut self, id: usize) -> &mut Node<V> {
        &mut self.nodes[id]
    }
}

/// A read-only view of one node of a [`BinaryTree`](crate::bt::BinaryTree).
pub struct NodeRef<'a, V> {
    arena: &'a Arena<V>,
    id: usize,
}

impl<'a, V> NodeRef<'a, V> {
    pub(crate) fn new(arena: &'a Arena<V>, id: usize) -> Self {
        Self { arena, id }
    }

    fn node(&self) -> &'a Node<V> {
        &self.arena[self.id]
    }

    fn at(&self, id: Option<usize>) -> Option<NodeRef<'a, V>> {
        id.map(|id| NodeRef::new(self.arena, id))
    }

    /// The value stored in this node.
    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    /// The parent of this node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, V>> {
        self.at(self.node().parent)
    }

    /// The child holding smaller values.
    pub fn left_child(&self) -> Option<NodeRef<'a, V>> {
        self.at(self.node().left)
    }

    /// The child holding greater values.
    pub fn right_child(&self) -> Option<NodeRef<'a, V>> {
        self.at(self.node().right)
    }

    /// Distance from the root; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.node().depth
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }
}

impl<V> Clone for NodeRef<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for NodeRef<'_, V> {}

impl<V: Debug> Debug for NodeRef<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", self.value())
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(feature = "test-util")]
impl<V: fmt::Display> fmt::Display for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} P: {:?} L: {:?} R: {:?} D: {}",
            self.value, self.parent, self.left, self.right, self.depth
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::bt::node::{Arena, ROOT};
    use crate::compare::NaturalOrder;

    fn arena_of_three() -> Arena<u32> {
        //      5
        //    /   \
        //   3     8
        let mut arena = Arena::with_root(5);
        let left = arena.alloc(3, ROOT);
        let right = arena.alloc(8, ROOT);
        assert!(arena.set_left_child(ROOT, Some(left), &NaturalOrder));
        assert!(arena.set_right_child(ROOT, Some(right), &NaturalOrder));
        arena
    }

    #[test]
    fn depth_derived_from_parent() {
        let arena = arena_of_three();
        assert_eq!(arena[ROOT].depth, 0);
        assert_eq!(arena[1].depth, 1);
        assert_eq!(arena[2].depth, 1);
        assert!(!arena[ROOT].is_leaf());
        assert!(arena[1].is_leaf());
    }

    #[test]
    fn equal_sibling_is_rejected() {
        let mut arena = arena_of_three();
        let twin = arena.alloc(8, ROOT);
        assert!(!arena.set_left_child(ROOT, Some(twin), &NaturalOrder));
        assert_eq!(arena[ROOT].left, Some(1));
    }

    #[test]
    fn min_branch_value() {
        let mut arena = arena_of_three();
        let six = arena.alloc(6, 2);
        assert!(arena.set_left_child(2, Some(six), &NaturalOrder));

        let min = arena.set_to_min_branch_value(ROOT).unwrap();
        assert_eq!(min, six);
        assert_eq!(arena[ROOT].value, 6);
        assert_eq!(arena[six].value, 5);

        assert_eq!(arena.set_to_min_branch_value(1), None);
    }

    #[test]
    fn free_relinks_moved_node() {
        let mut arena = arena_of_three();
        let seven = arena.alloc(7, 2);
        assert!(arena.set_left_child(2, Some(seven), &NaturalOrder));

        // Unlink 3 and free it; 7 moves into slot 1.
        assert!(arena.set_left_child(ROOT, None, &NaturalOrder));
        let removed = arena.free(1);
        assert_eq!(removed.value, 3);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena[1].value, 7);
        assert_eq!(arena[2].left, Some(1));
    }

    #[test]
    fn set_parent_refreshes_depths() {
        let mut arena = arena_of_three();
        let seven = arena.alloc(7, 2);
        assert!(arena.set_left_child(2, Some(seven), &NaturalOrder));
        assert_eq!(arena[seven].depth, 2);

        // Promote 8's subtree directly under a detached position.
        arena.set_parent(2, None);
        assert_eq!(arena[2].depth, 0);
        assert_eq!(arena[seven].depth, 1);
    }
}
