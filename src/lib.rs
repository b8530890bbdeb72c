// SPDX-License-Identifier: MPL-2.0

#![warn(missing_docs)]

//! Arbor
//!
//! Two in-memory ordered containers built on arena-allocated nodes:
//!
//! - [`bt::BinaryTree`], a binary search tree of unique values ordered by a pluggable
//!   [`compare::Comparer`], with pre-, in- and post-order traversal;
//! - [`trie::Trie`], a case-insensitive character trie that splits keys on separator characters
//!   and attaches content items to the nodes spelling each word. [`trie::SharedTrie`] wraps one
//!   for use from several threads.
//!
//! Both containers, and their options, can be serialized with the [`codec`] module.

pub mod bt;
pub mod codec;
pub mod compare;
pub mod trie;

pub use bt::{BinaryTree, BinaryTreeError, BinaryTreeOptions, DuplicatePolicy, TraversalOrder};
pub use compare::{Comparer, NaturalOrder, ReverseOrder};
pub use trie::{SharedTrie, Trie, TrieError, TrieOptions};
