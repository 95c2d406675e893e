//! This crate exposes a Binary Search Tree (BST) over values that know how to compare and update
//! themselves.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`. This tree never rebalances so its height is
//! whatever the insertion order makes it: `O(lg N)` for random input and `O(N)`
//! for sorted input.
//!
//! ## Items
//!
//! The tree doesn't require `Ord`. Anything stored in it implements [`Item`]:
//! it compares itself against a value, exposes its value, and decides what to do
//! when an equal item is inserted again (see [`Item::update`]). [`Text`], [`Int`],
//! [`Float`] and [`Generic`] cover the common cases.
//!
//! ```
//! use comparable_bst::{Int, Tree, Visit};
//!
//! let mut tree = Tree::new();
//! tree.insert(Int(2)).insert(Int(1)).insert(Int(3));
//!
//! let mut descending = Vec::new();
//! tree.visit_in_reverse(|value| {
//!     descending.push(*value);
//!     Visit::Continue
//! });
//! assert_eq!(descending, [3, 2, 1]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod item;
pub mod tree;
pub mod wrappers;

pub use item::{Generic, GenericBuilder, Item};
pub use tree::{Tree, Visit};
pub use wrappers::{Float, Int, Text};

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
