//! `bintree` is a persistent binary search tree of unique, ordered values. It backs a
//! visual demo of how such trees grow and shrink, so it keeps every shape an edit
//! produces instead of tidying it away.
//!
//! ## Versions, not mutation
//!
//! An [`ImmutableTree`] never changes. [`insert`](ImmutableTree::insert),
//! [`remove`](ImmutableTree::remove) and [`cut`](ImmutableTree::cut) hand back a new
//! version which rebuilds only the nodes on the path to the change and points at the old
//! version's nodes everywhere else. Every earlier version stays readable, and holding
//! many of them costs one path of nodes per edit. Nodes are reference counted with `Arc`,
//! so a version can be read from any number of threads without locking.
//!
//! ## No rebalancing
//!
//! Values land where plain BST descent puts them: smaller values to the left of a node,
//! larger ones to the right. Nothing rotates afterwards, so the height depends entirely
//! on arrival order. Ascending input builds a chain, while
//! [`TreeFactory::balanced`] picks medians up front to get the smallest possible height.
//! Removing a value that has two children promotes a neighbour from the bigger side,
//! which keeps long runs of removals from all leaning one way.
//!
//! ```
//! use bintree::TreeFactory;
//!
//! let chain = TreeFactory::from_sequence(1..=4);
//! assert_eq!(chain.to_string(), "(_ 1 (_ 2 (_ 3 (_ 4 _))))");
//!
//! let shorter = chain.remove(&1);
//! assert_eq!(shorter.height(), 3);
//! assert_eq!(chain.height(), 4);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod contract;
mod error;
mod factory;
mod immutable;
mod node;
mod traverse;

pub use contract::{NavigableTree, Tree};
pub use error::TreeError;
pub use factory::TreeFactory;
pub use immutable::ImmutableTree;
pub use node::Shape;
pub use traverse::{Traversal, Traverse};
