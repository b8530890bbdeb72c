// SPDX-License-Identifier: MPL-2.0

//! A [`Trie`] that can be shared between threads.
//!
//! Structural changes (inserting and removing words) hold the write lock for their whole
//! duration, and lookups hold the read lock, so a reader never observes a half-built or
//! half-pruned chain of nodes.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Trie, TrieError, TrieOptions};

/// A thread-safe wrapper around a [`Trie`].
pub struct SharedTrie<T> {
    inner: RwLock<Trie<T>>,
}

impl<T> SharedTrie<T> {
    /// Creates an empty shared trie using the default separators.
    pub fn new() -> Self {
        Self::from_trie(Trie::new())
    }

    /// Creates an empty shared trie configured by `options`.
    pub fn with_options(options: TrieOptions) -> Self {
        Self::from_trie(Trie::with_options(options))
    }

    /// Wraps an existing trie.
    pub fn from_trie(trie: Trie<T>) -> Self {
        Self {
            inner: RwLock::new(trie),
        }
    }

    /// See [`Trie::insert`].
    pub fn insert(&self, key: &str, item: T) -> Result<usize, TrieError>
    where
        T: Clone + PartialEq,
    {
        self.inner.write().insert(key, item)
    }

    /// See [`Trie::insert_range`].
    pub fn insert_range<I>(&self, key: &str, items: I) -> Result<usize, TrieError>
    where
        I: IntoIterator<Item = T>,
        T: Clone + PartialEq,
    {
        self.inner.write().insert_range(key, items)
    }

    /// See [`Trie::insert_word`].
    pub fn insert_word(&self, key: &str) -> Result<usize, TrieError> {
        self.inner.write().insert_word(key)
    }

    /// See [`Trie::remove`].
    pub fn remove(&self, word: &str) -> bool {
        self.inner.write().remove(word)
    }

    /// See [`Trie::remove_all`]. The write lock is held while the predicate runs.
    pub fn remove_all<P>(&self, predicate: P) -> usize
    where
        P: FnMut(&str) -> bool,
    {
        self.inner.write().remove_all(predicate)
    }

    /// See [`Trie::find`].
    pub fn find<P>(&self, predicate: P) -> Option<String>
    where
        P: FnMut(&str) -> bool,
    {
        self.inner.read().find(predicate)
    }

    /// See [`Trie::find_all`].
    pub fn find_all<P>(&self, predicate: P) -> Vec<String>
    where
        P: FnMut(&str) -> bool,
    {
        self.inner.read().find_all(predicate)
    }

    /// See [`Trie::find_except`].
    pub fn find_except<P>(&self, predicate: P) -> Vec<String>
    where
        P: FnMut(&str) -> bool,
    {
        self.inner.read().find_except(predicate)
    }

    /// See [`Trie::find_last`].
    pub fn find_last<P>(&self, predicate: P) -> Option<String>
    where
        P: FnMut(&str) -> bool,
    {
        self.inner.read().find_last(predicate)
    }

    /// A snapshot of [`Trie::traverse`].
    pub fn traverse(&self) -> Vec<String> {
        self.inner.read().traverse().collect()
    }

    /// See [`Trie::contains_word`].
    pub fn contains_word(&self, word: &str) -> bool {
        self.inner.read().contains_word(word)
    }

    /// See [`Trie::starts_with`].
    pub fn starts_with(&self, prefix: &str) -> Vec<String> {
        self.inner.read().starts_with(prefix)
    }

    /// See [`Trie::word_count`].
    pub fn word_count(&self) -> usize {
        self.inner.read().word_count()
    }

    /// Locks the trie for reading, for access to its nodes.
    pub fn read(&self) -> RwLockReadGuard<'_, Trie<T>> {
        self.inner.read()
    }

    /// Locks the trie for writing, for access to its nodes and items.
    pub fn write(&self) -> RwLockWriteGuard<'_, Trie<T>> {
        self.inner.write()
    }

    /// Unwraps the trie.
    pub fn into_inner(self) -> Trie<T> {
        self.inner.into_inner()
    }
}

impl<T> Default for SharedTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Trie<T>> for SharedTrie<T> {
    fn from(trie: Trie<T>) -> Self {
        Self::from_trie(trie)
    }
}
