// SPDX-License-Identifier: MPL-2.0

//! Nodes of a [`Trie`].
//!
//! Each node is keyed by a single lower-case character and may carry content items. Children
//! are kept sorted by character so lookups are a binary search.

use core::fmt;

use super::{Trie, ROOT};

/// Lower-cases a single character. Characters whose lower-case form spans several characters
/// keep the first one.
pub(crate) fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// A node of a [`Trie`].
pub(crate) struct TrieNode<T> {
    pub(crate) character: char,
    pub(crate) parent: Option<usize>,
    /// `(character, index)` pairs in ascending character order.
    pub(crate) children: Vec<(char, usize)>,
    pub(crate) items: Vec<T>,
    pub(crate) is_word: bool,
    pub(crate) depth: usize,
}

impl<T> TrieNode<T> {
    pub(crate) fn new(character: char, parent: Option<usize>, depth: usize) -> Self {
        Self {
            character: lower(character),
            parent,
            children: Vec::new(),
            items: Vec::new(),
            is_word: false,
            depth,
        }
    }

    pub(crate) fn child(&self, character: char) -> Option<usize> {
        let character = lower(character);
        self.children
            .binary_search_by(|(c, _)| c.cmp(&character))
            .ok()
            .map(|pos| self.children[pos].1)
    }

    /// A node that is neither a word nor an inner node and carries no items can be dropped.
    pub(crate) fn is_removable(&self) -> bool {
        !self.is_word && self.children.is_empty() && self.items.is_empty()
    }
}

/// A read-only view of one node of a [`Trie`].
pub struct TrieNodeRef<'a, T> {
    trie: &'a Trie<T>,
    id: usize,
}

impl<'a, T> TrieNodeRef<'a, T> {
    pub(crate) fn new(trie: &'a Trie<T>, id: usize) -> Self {
        Self { trie, id }
    }

    fn node(&self) -> &'a TrieNode<T> {
        &self.trie.nodes[self.id]
    }

    /// The character on the edge leading to this node. The root holds `'\0'`.
    pub fn character(&self) -> char {
        self.node().character
    }

    /// Number of characters between the root and this node.
    pub fn depth(&self) -> usize {
        self.node().depth
    }

    /// Whether the path to this node spells an inserted word.
    pub fn is_word(&self) -> bool {
        self.node().is_word
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.node().children.is_empty()
    }

    /// Whether this is the trie's root.
    pub fn is_root(&self) -> bool {
        self.id == ROOT
    }

    /// The parent node, or `None` for the root.
    pub fn parent(&self) -> Option<TrieNodeRef<'a, T>> {
        self.node().parent.map(|id| TrieNodeRef::new(self.trie, id))
    }

    /// The children in ascending character order.
    pub fn children(&self) -> impl Iterator<Item = TrieNodeRef<'a, T>> + 'a {
        let trie = self.trie;
        self.node()
            .children
            .iter()
            .map(move |&(_, id)| TrieNodeRef::new(trie, id))
    }

    /// The child keyed by `character`, compared case-insensitively.
    pub fn find_child_node(&self, character: char) -> Option<TrieNodeRef<'a, T>> {
        self.node()
            .child(character)
            .map(|id| TrieNodeRef::new(self.trie, id))
    }

    /// The items attached to this node only.
    pub fn own_items(&self) -> &'a [T] {
        &self.node().items
    }

    /// The items visible from this node.
    ///
    /// When the trie's `parents_know_child_items` policy is set, this is the node's own items
    /// followed by those of every descendant in depth-first order. Otherwise it is the node's own
    /// items.
    pub fn items(&self) -> Vec<&'a T> {
        if !self.trie.parents_know_child_items {
            return self.own_items().iter().collect();
        }
        let nodes = &self.trie.nodes;
        let mut items = Vec::new();
        let mut stack = vec![self.id];
        while let Some(id) = stack.pop() {
            let node = &nodes[id];
            items.extend(node.items.iter());
            stack.extend(node.children.iter().rev().map(|&(_, child)| child));
        }
        items
    }

    /// Whether `item` is attached to this node itself.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.node().items.contains(item)
    }

    /// The string spelled by the path from the root to this node.
    pub fn path(&self) -> String {
        let nodes = &self.trie.nodes;
        let mut reversed = Vec::with_capacity(self.depth());
        let mut current = self.id;
        while current != ROOT {
            let node = &nodes[current];
            reversed.push(node.character);
            match node.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        reversed.into_iter().rev().collect()
    }
}

impl<T> Clone for TrieNodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TrieNodeRef<'_, T> {}

impl<T> fmt::Display for TrieNodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl<T: fmt::Debug> fmt::Debug for TrieNodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrieNodeRef")
            .field("path", &self.path())
            .field("is_word", &self.is_word())
            .field("items", &self.own_items())
            .finish()
    }
}

/// A view of one node of a [`Trie`] through which its items can be changed.
pub struct TrieNodeMut<'a, T> {
    trie: &'a mut Trie<T>,
    id: usize,
}

impl<'a, T> TrieNodeMut<'a, T> {
    pub(crate) fn new(trie: &'a mut Trie<T>, id: usize) -> Self {
        Self { trie, id }
    }

    /// A read-only view of the same node.
    pub fn view(&self) -> TrieNodeRef<'_, T> {
        TrieNodeRef::new(self.trie, self.id)
    }

    /// Attaches `item` to this node. Returns `false` if it is already attached here.
    pub fn add(&mut self, item: T) -> bool
    where
        T: PartialEq,
    {
        let items = &mut self.trie.nodes[self.id].items;
        if items.contains(&item) {
            return false;
        }
        items.push(item);
        true
    }

    /// Whether `item` is attached to this node itself.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.trie.nodes[self.id].items.contains(item)
    }

    /// Detaches `item` from this node or, if it is not attached here, from the first descendant
    /// holding it in depth-first order.
    ///
    /// A node left with no items, no children and no word marker is pruned together with any
    /// ancestors that become dead, so the view is consumed.
    pub fn remove(self, item: &T) -> bool
    where
        T: PartialEq,
    {
        let trie = self.trie;
        let mut stack = vec![self.id];
        while let Some(id) = stack.pop() {
            let node = &mut trie.nodes[id];
            if let Some(pos) = node.items.iter().position(|i| i == item) {
                node.items.remove(pos);
                trie.prune(id);
                return true;
            }
            stack.extend(node.children.iter().rev().map(|&(_, child)| child));
        }
        false
    }

    /// Detaches every item matching `predicate` from this node. Only when nothing matched here
    /// does the search continue into the children, each of which applies the same rule. Returns
    /// the number of items detached.
    ///
    /// Nodes left dead are pruned as in [`Self::remove`].
    pub fn remove_all<P>(self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let trie = self.trie;
        let mut removed = 0;
        let mut emptied = Vec::new();
        let mut stack = vec![self.id];
        while let Some(id) = stack.pop() {
            let node = &mut trie.nodes[id];
            let before = node.items.len();
            node.items.retain(|item| !predicate(item));
            let removed_here = before - node.items.len();
            if removed_here == 0 {
                stack.extend(node.children.iter().rev().map(|&(_, child)| child));
            } else if node.is_removable() {
                emptied.push(id);
            }
            removed += removed_here;
        }

        // Pruning moves nodes within the arena, so dead nodes are located again by path.
        let paths: Vec<String> = emptied
            .into_iter()
            .map(|id| TrieNodeRef::new(&*trie, id).path())
            .collect();
        for path in paths {
            if let Some(id) = trie.locate(&path) {
                trie.prune(id);
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use crate::trie::{node::lower, Trie};

    #[test]
    fn lower_case_characters() {
        assert_eq!(lower('A'), 'a');
        assert_eq!(lower('z'), 'z');
        assert_eq!(lower('Ä'), 'ä');
        assert_eq!(lower('7'), '7');
    }

    #[test]
    fn path_and_depth() {
        let mut trie = Trie::<u32>::new();
        trie.insert_word("Tree").unwrap();

        let node = trie.node("tre").unwrap();
        assert_eq!(node.path(), "tre");
        assert_eq!(node.to_string(), "tre");
        assert_eq!(node.depth(), 3);
        assert!(!node.is_word());
        assert_eq!(node.parent().unwrap().path(), "tr");

        let root = trie.root();
        assert!(root.is_root());
        assert_eq!(root.path(), "");
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn children_sorted() {
        let trie = Trie::<u32>::from_words(["cz", "ca", "cm", "cb"]);
        let c = trie.node("c").unwrap();
        let children: String = c.children().map(|n| n.character()).collect();
        assert_eq!(children, "abmz");
        assert_eq!(c.find_child_node('M').unwrap().path(), "cm");
        assert!(c.find_child_node('q').is_none());
    }

    #[test]
    fn items_policy() {
        let mut trie = Trie::new();
        trie.insert("car", 1).unwrap();
        trie.insert("cart", 2).unwrap();
        trie.insert("cat", 3).unwrap();

        let ca = trie.node("ca").unwrap();
        assert!(ca.items().is_empty());
        assert_eq!(trie.node("car").unwrap().items(), [&1]);

        trie.set_parents_know_child_items(true);
        let ca = trie.node("ca").unwrap();
        assert_eq!(ca.items(), [&1, &2, &3]);
        assert!(ca.own_items().is_empty());
        assert!(!ca.contains(&1));
    }

    #[test]
    fn add_and_remove_items() {
        let mut trie = Trie::new();
        trie.insert("car", 1).unwrap();
        trie.insert("cat", 2).unwrap();

        let mut ca = trie.node_mut("ca").unwrap();
        assert!(ca.add(9));
        assert!(!ca.add(9));
        assert!(ca.contains(&9));

        assert_eq!(ca.view().own_items(), [9]);

        // Not attached to "ca" itself, found in a descendant.
        assert!(trie.node_mut("ca").unwrap().remove(&2));
        assert!(!trie.node_mut("ca").unwrap().remove(&2));
        assert!(trie.node_mut("ca").unwrap().remove(&9));
        assert!(trie.node("ca").unwrap().own_items().is_empty());

        assert!(trie.node("cat").unwrap().own_items().is_empty());
        assert_eq!(trie.node("car").unwrap().own_items(), [1]);
    }

    #[test]
    fn removing_last_item_prunes_dead_nodes() {
        let mut trie = Trie::new();
        trie.insert("cat", 1).unwrap();
        trie.node_mut("ca").unwrap().add(7);
        trie.node_mut("c").unwrap().add(8);
        assert!(trie.remove("cat"));
        assert_eq!(trie.traverse().collect::<Vec<_>>(), ["ca"]);

        // "c" still holds an item, so only "ca" goes.
        assert!(trie.node_mut("ca").unwrap().remove(&7));
        assert!(trie.node("ca").is_none());
        assert_eq!(trie.traverse().collect::<Vec<_>>(), ["c"]);

        assert!(trie.node_mut("").unwrap().remove(&8));
        assert!(trie.root().is_leaf());
        assert_eq!(trie.traverse().count(), 0);
    }

    #[test]
    fn removing_all_items_prunes_dead_nodes() {
        let mut trie = Trie::new();
        for word in ["abcd", "abef", "ax"] {
            trie.insert_word(word).unwrap();
        }
        trie.node_mut("abc").unwrap().add(2);
        trie.node_mut("abe").unwrap().add(4);
        assert!(trie.remove("abcd abef"));
        assert_eq!(trie.traverse().collect::<Vec<_>>(), ["abc", "abe", "ax"]);

        assert_eq!(trie.node_mut("a").unwrap().remove_all(|i| i % 2 == 0), 2);
        assert!(trie.node("ab").is_none());
        assert_eq!(trie.traverse().collect::<Vec<_>>(), ["ax"]);
        assert_eq!(trie.word_count(), 1);
    }

    #[test]
    fn remove_all_items_cascades_only_when_nothing_matched() {
        let mut trie = Trie::new();
        trie.insert_range("ab", [1, 2]).unwrap();
        trie.insert_range("abc", [2, 4]).unwrap();
        trie.insert_range("abd", [6]).unwrap();

        // "ab" holds 2, so the children are left alone.
        assert_eq!(trie.node_mut("ab").unwrap().remove_all(|i| i % 2 == 0), 1);
        assert_eq!(trie.node("abc").unwrap().own_items(), [2, 4]);

        // Nothing even left at "ab", so both children are searched.
        assert_eq!(trie.node_mut("ab").unwrap().remove_all(|i| i % 2 == 0), 3);
        assert_eq!(trie.node("ab").unwrap().own_items(), [1]);
        assert!(trie.node("abc").unwrap().own_items().is_empty());
        assert!(trie.node("abd").unwrap().own_items().is_empty());
    }
}
