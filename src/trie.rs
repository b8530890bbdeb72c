// SPDX-License-Identifier: MPL-2.0

//! A case-insensitive word index built on a character trie.
//!
//! Keys are lower-cased and split on separator characters into words; every word is stored as a
//! chain of nodes, one per character, and its last node is marked as a word boundary. Content
//! items can be attached to a word when it is inserted and looked up through the node later.
//!
//! Removing a word unmarks its last node and prunes the chain upward while nodes are left with
//! no children, no items and no word marker, so prefixes shared with other words survive.
//!
//! ## Example
//! ```
//! use arbor::trie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.insert("Hello, World", "greeting").unwrap();
//! assert_eq!(trie.traverse().collect::<Vec<_>>(), ["hello", "world"]);
//! assert_eq!(trie.items_for("world"), ["greeting"]);
//! ```
//!
//! [`Trie`] is mutated through `&mut self`; use [`SharedTrie`] to share an index between
//! threads.

pub mod node;
pub mod shared;

use core::fmt;
use std::io::Cursor;

use serde::{Deserialize, Serialize};

use crate::codec::{decode_u32_items, encode_u32_items, CodecError, Decode, Encode};
use node::{lower, TrieNode};
pub use node::{TrieNodeMut, TrieNodeRef};
pub use shared::SharedTrie;

/// Arena index of the root sentinel.
pub(crate) const ROOT: usize = 0;

/// Characters that split keys into words unless configured otherwise.
pub const DEFAULT_SEPARATORS: [char; 14] = [
    ' ', '.', ',', ';', '(', ')', '[', ']', '{', '}', '/', '\\', '-', '_',
];

/// Errors triggered by trie operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TrieError {
    /// The key consists of separators only.
    #[error("key contains no indexable words")]
    EmptyKey,
}

/// Configuration of a [`Trie`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrieOptions {
    /// Characters on which inserted keys are split into words.
    pub separators: Vec<char>,
    /// Whether [`TrieNodeRef::items`] includes the items of descendants.
    pub parents_know_child_items: bool,
}

impl Default for TrieOptions {
    fn default() -> Self {
        Self {
            separators: DEFAULT_SEPARATORS.to_vec(),
            parents_know_child_items: false,
        }
    }
}

/// A word index whose words carry items of type `T`.
pub struct Trie<T> {
    nodes: Vec<TrieNode<T>>,
    separators: Vec<char>,
    word_count: usize,
    parents_know_child_items: bool,
}

impl<T> Trie<T> {
    /// Creates an empty trie splitting keys on [`DEFAULT_SEPARATORS`].
    pub fn new() -> Self {
        Self::with_options(TrieOptions::default())
    }

    /// Creates an empty trie splitting keys on `separators`.
    pub fn with_separators(separators: &[char]) -> Self {
        Self::with_options(TrieOptions {
            separators: separators.to_vec(),
            ..TrieOptions::default()
        })
    }

    /// Creates an empty trie configured by `options`.
    pub fn with_options(options: TrieOptions) -> Self {
        let mut separators: Vec<char> = options.separators.into_iter().map(lower).collect();
        separators.sort_unstable();
        separators.dedup();
        Self {
            nodes: vec![TrieNode::new('\0', None, 0)],
            separators,
            word_count: 0,
            parents_know_child_items: options.parents_know_child_items,
        }
    }

    /// Creates a trie splitting keys on [`DEFAULT_SEPARATORS`] and indexes every word of `words`
    /// without content. Repeated words are indexed once and keys without words are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for key in words {
            for word in trie.tokens(key.as_ref()) {
                let id = trie.grow(&word);
                trie.mark_word(id);
            }
        }
        trie
    }

    /// The configuration this trie was built with.
    pub fn options(&self) -> TrieOptions {
        TrieOptions {
            separators: self.separators.clone(),
            parents_know_child_items: self.parents_know_child_items,
        }
    }

    /// The characters on which keys are split, sorted.
    pub fn separators(&self) -> &[char] {
        &self.separators
    }

    /// Number of distinct words indexed.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Whether [`TrieNodeRef::items`] includes the items of descendants.
    pub fn parents_know_child_items(&self) -> bool {
        self.parents_know_child_items
    }

    /// Changes whether [`TrieNodeRef::items`] includes the items of descendants.
    pub fn set_parents_know_child_items(&mut self, enabled: bool) {
        self.parents_know_child_items = enabled;
    }

    /// Lower-cases `key` and splits it into its non-empty words.
    fn tokens(&self, key: &str) -> Vec<String> {
        key.to_lowercase()
            .split(|c: char| self.separators.binary_search(&c).is_ok())
            .filter(|word| !word.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Follows the chain spelling `word` as far as it exists and creates the remaining nodes.
    /// Returns the last node of the chain.
    fn grow(&mut self, word: &str) -> usize {
        let mut current = ROOT;
        for c in word.chars() {
            current = match self.nodes[current].child(c) {
                Some(child) => child,
                None => self.attach(current, c),
            };
        }
        current
    }

    fn attach(&mut self, parent: usize, c: char) -> usize {
        let id = self.nodes.len();
        let node = TrieNode::new(c, Some(parent), self.nodes[parent].depth + 1);
        let key = node.character;
        self.nodes.push(node);

        let children = &mut self.nodes[parent].children;
        let pos = children
            .binary_search_by(|(c, _)| c.cmp(&key))
            .unwrap_or_else(|pos| pos);
        children.insert(pos, (key, id));
        id
    }

    /// Marks `id` as a word boundary. Returns `true` if it was not one before.
    fn mark_word(&mut self, id: usize) -> bool {
        let node = &mut self.nodes[id];
        if node.is_word {
            return false;
        }
        node.is_word = true;
        self.word_count += 1;
        true
    }

    /// The node at the end of the path spelling `path`, which must already be lower-case.
    fn locate(&self, path: &str) -> Option<usize> {
        let mut current = ROOT;
        for c in path.chars() {
            current = self.nodes[current].child(c)?;
        }
        Some(current)
    }

    /// Removes dead nodes from `id` upward, stopping at the root or at the first node that still
    /// has a purpose.
    fn prune(&mut self, mut id: usize) {
        while id != ROOT {
            let node = &self.nodes[id];
            if !node.is_removable() {
                break;
            }
            let Some(mut parent) = node.parent else {
                break;
            };
            let key = node.character;

            let siblings = &mut self.nodes[parent].children;
            if let Ok(pos) = siblings.binary_search_by(|(c, _)| c.cmp(&key)) {
                siblings.remove(pos);
            }
            if self.free(id) == Some(parent) {
                parent = id;
            }
            id = parent;
        }
    }

    /// Removes an unlinked node from the arena. The last node moves into the vacated slot; its
    /// former index is returned so callers can update indices they hold.
    fn free(&mut self, id: usize) -> Option<usize> {
        let last = self.nodes.len() - 1;
        self.nodes.swap_remove(id);
        if id == last {
            return None;
        }

        if let Some(parent) = self.nodes[id].parent {
            for entry in self.nodes[parent].children.iter_mut() {
                if entry.1 == last {
                    entry.1 = id;
                }
            }
        }
        for i in 0..self.nodes[id].children.len() {
            let child = self.nodes[id].children[i].1;
            self.nodes[child].parent = Some(id);
        }
        Some(last)
    }

    /// Indexes the words of `key` and attaches each item to every one of them.
    ///
    /// The key is lower-cased and split on the separators. Items already attached to a word are
    /// not attached twice. Returns the number of words that were not indexed before.
    pub fn insert_range<I>(&mut self, key: &str, items: I) -> Result<usize, TrieError>
    where
        I: IntoIterator<Item = T>,
        T: Clone + PartialEq,
    {
        let words = self.tokens(key);
        if words.is_empty() {
            return Err(TrieError::EmptyKey);
        }
        let items: Vec<T> = items.into_iter().collect();

        let mut added = 0;
        for word in &words {
            let id = self.grow(word);
            if self.mark_word(id) {
                added += 1;
            }
            let attached = &mut self.nodes[id].items;
            for item in &items {
                if !attached.contains(item) {
                    attached.push(item.clone());
                }
            }
        }
        Ok(added)
    }

    /// Indexes the words of `key` and attaches `item` to each of them.
    pub fn insert(&mut self, key: &str, item: T) -> Result<usize, TrieError>
    where
        T: Clone + PartialEq,
    {
        self.insert_range(key, [item])
    }

    /// Indexes the words of `key` without attaching anything.
    pub fn insert_word(&mut self, key: &str) -> Result<usize, TrieError> {
        let words = self.tokens(key);
        if words.is_empty() {
            return Err(TrieError::EmptyKey);
        }
        let mut added = 0;
        for word in &words {
            let id = self.grow(word);
            if self.mark_word(id) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Removes every word of `word` from the index together with the items attached to it.
    ///
    /// Returns `true` if at least one word was indexed.
    pub fn remove(&mut self, word: &str) -> bool {
        let mut removed = false;
        for token in self.tokens(word) {
            let Some(id) = self.locate(&token) else {
                continue;
            };
            let node = &mut self.nodes[id];
            if !node.is_word {
                continue;
            }
            node.is_word = false;
            node.items.clear();
            self.word_count -= 1;
            self.prune(id);
            removed = true;
        }
        removed
    }

    /// Removes every word matching `predicate`.
    ///
    /// The words are collected before the first removal. Returns the number removed.
    pub fn remove_all<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&str) -> bool,
    {
        let matched: Vec<String> = self.traverse().filter(|word| predicate(word)).collect();
        matched.iter().filter(|word| self.remove(word)).count()
    }

    /// The first word, in traversal order, matching `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<String>
    where
        P: FnMut(&str) -> bool,
    {
        self.traverse().find(|word| predicate(word))
    }

    /// Every word matching `predicate`, in traversal order.
    pub fn find_all<P>(&self, mut predicate: P) -> Vec<String>
    where
        P: FnMut(&str) -> bool,
    {
        self.traverse().filter(|word| predicate(word)).collect()
    }

    /// Every word not matching `predicate`, in traversal order.
    pub fn find_except<P>(&self, mut predicate: P) -> Vec<String>
    where
        P: FnMut(&str) -> bool,
    {
        self.traverse().filter(|word| !predicate(word)).collect()
    }

    /// The last word, in traversal order, matching `predicate`.
    pub fn find_last<P>(&self, mut predicate: P) -> Option<String>
    where
        P: FnMut(&str) -> bool,
    {
        self.traverse().rev().find(|word| predicate(word))
    }

    /// Whether `word` is indexed as a whole word.
    pub fn contains_word(&self, word: &str) -> bool {
        self.locate(&word.to_lowercase())
            .is_some_and(|id| self.nodes[id].is_word)
    }

    /// Every indexed word that starts with `prefix`, in traversal order.
    pub fn starts_with(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        match self.locate(&prefix) {
            Some(id) => self.emitted(id, prefix),
            None => Vec::new(),
        }
    }

    /// The items attached to `word`, or nothing if it is not indexed.
    pub fn items_for(&self, word: &str) -> &[T] {
        match self.locate(&word.to_lowercase()) {
            Some(id) if self.nodes[id].is_word => &self.nodes[id].items,
            _ => &[],
        }
    }

    /// The root sentinel.
    pub fn root(&self) -> TrieNodeRef<'_, T> {
        TrieNodeRef::new(self, ROOT)
    }

    /// The node reached by spelling `prefix` from the root. The empty prefix is the root.
    pub fn node(&self, prefix: &str) -> Option<TrieNodeRef<'_, T>> {
        self.locate(&prefix.to_lowercase())
            .map(|id| TrieNodeRef::new(self, id))
    }

    /// Mutable access to the items of the node reached by spelling `prefix`.
    pub fn node_mut(&mut self, prefix: &str) -> Option<TrieNodeMut<'_, T>> {
        self.locate(&prefix.to_lowercase())
            .map(move |id| TrieNodeMut::new(self, id))
    }

    /// Walks the subtree under `start` depth-first, children in character order, and returns
    /// every node with the path leading to it. `path` is the path of `start`.
    fn walk(&self, start: usize, path: String) -> Vec<(usize, String)> {
        let mut visited = Vec::new();
        let mut stack = vec![(start, path)];
        while let Some((id, path)) = stack.pop() {
            for &(c, child) in self.nodes[id].children.iter().rev() {
                let mut child_path = path.clone();
                child_path.push(c);
                stack.push((child, child_path));
            }
            visited.push((id, path));
        }
        visited
    }

    /// The paths under `start` that traversal reports: word boundaries and leaves.
    fn emitted(&self, start: usize, path: String) -> Vec<String> {
        self.walk(start, path)
            .into_iter()
            .filter(|&(id, _)| {
                let node = &self.nodes[id];
                id != ROOT && (node.is_word || node.children.is_empty())
            })
            .map(|(_, path)| path)
            .collect()
    }

    /// Returns the indexed words in lexicographic order of their characters.
    ///
    /// Every leaf is reported even if it is not a word boundary; such leaves only exist while
    /// items keep an otherwise dead node alive. The full list is built before the first word is
    /// yielded.
    pub fn traverse(&self) -> std::vec::IntoIter<String> {
        self.emitted(ROOT, String::new()).into_iter()
    }

    /// Same as [`Self::traverse`].
    pub fn iter(&self) -> std::vec::IntoIter<String> {
        self.traverse()
    }
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Trie<T> {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse()
    }
}

impl<T: fmt::Debug> fmt::Debug for Trie<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (id, path) in self.walk(ROOT, String::new()) {
            if self.nodes[id].is_word {
                map.entry(&path, &self.nodes[id].items);
            }
        }
        map.finish()
    }
}

/// The trie is written as its separators, its item policy and one entry per node that is a word
/// or carries items: the node's path, its word marker and its own items.
impl<T: Encode> Encode for Trie<T> {
    fn encode(&self, bytes: &mut Vec<u8>) -> Result<(), CodecError> {
        encode_u32_items(bytes, &self.separators)?;
        self.parents_know_child_items.encode(bytes)?;

        let entries: Vec<(usize, String)> = self
            .walk(ROOT, String::new())
            .into_iter()
            .filter(|&(id, _)| {
                let node = &self.nodes[id];
                id != ROOT && (node.is_word || !node.items.is_empty())
            })
            .collect();
        u32::try_from(entries.len())
            .map_err(|_| CodecError::LengthPrefixTooBig(entries.len()))?
            .encode(bytes)?;
        for (id, path) in entries {
            let node = &self.nodes[id];
            path.encode(bytes)?;
            node.is_word.encode(bytes)?;
            encode_u32_items(bytes, &node.items)?;
        }
        Ok(())
    }
}

impl<T: Decode + PartialEq> Decode for Trie<T> {
    fn decode(bytes: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let separators = decode_u32_items::<char>(bytes)?;
        let parents_know_child_items = bool::decode(bytes)?;
        let mut trie = Self::with_options(TrieOptions {
            separators,
            parents_know_child_items,
        });

        let len = u32::decode(bytes)?;
        for _ in 0..len {
            let path = String::decode(bytes)?;
            let is_word = bool::decode(bytes)?;
            let items = decode_u32_items::<T>(bytes)?;
            if trie.tokens(&path) != [path.as_str()] {
                return Err(CodecError::UnexpectedValue);
            }

            let id = trie.grow(&path);
            if is_word {
                trie.mark_word(id);
            }
            let attached = &mut trie.nodes[id].items;
            for item in items {
                if !attached.contains(&item) {
                    attached.push(item);
                }
            }
        }
        Ok(trie)
    }
}
