//! The operations a displayed tree needs, independent of how the tree is stored.
//!
//! Code that only draws or lists a tree can be written against [`Tree`] and
//! [`NavigableTree`] and stay unaware of [`ImmutableTree`]'s internals.
//!
//! ```
//! use bintree::{NavigableTree, TreeFactory};
//!
//! /// Lists each level of the tree left to right.
//! fn levels<T: Ord + Copy, N: NavigableTree<T>>(tree: &N) -> Vec<Vec<T>> {
//!     let mut levels = Vec::new();
//!     let mut level = vec![tree.clone()];
//!     while level.iter().any(|t| !t.is_empty()) {
//!         levels.push(level.iter().filter_map(|t| t.root().copied()).collect());
//!         level = level.iter().flat_map(|t| [t.left(), t.right()]).collect();
//!     }
//!     levels
//! }
//!
//! let tree = TreeFactory::from_sequence([5, 2, 7, 3, 1, 8, 6]);
//! assert_eq!(levels(&tree), [vec![5], vec![2, 7], vec![1, 3, 6, 8]]);
//! ```

use crate::immutable::ImmutableTree;
use crate::traverse::{Traversal, Traverse};

/// A set of ordered values where every change gives back a new tree.
pub trait Tree<T: Ord>: Clone {
    /// The iterator [`traverse`](Tree::traverse) returns.
    type Traverse<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// A tree that also holds `value`. `None` is a no-op.
    fn insert<V: Into<Option<T>>>(&self, value: V) -> Self;

    /// A tree without `value`. `None` and missing values are no-ops.
    fn remove<'a, V>(&self, value: V) -> Self
    where
        V: Into<Option<&'a T>>,
        T: 'a;

    /// The empty tree.
    fn clear(&self) -> Self;

    /// Whether the tree holds `value`. `None` is never held.
    fn contains<'a, V>(&self, value: V) -> bool
    where
        V: Into<Option<&'a T>>,
        T: 'a;

    /// The smallest value.
    fn min(&self) -> Option<&T>;

    /// The largest value.
    fn max(&self) -> Option<&T>;

    /// Every value, in the given order.
    fn traverse(&self, order: Traversal) -> Self::Traverse<'_>;

    /// Whether the tree holds no values.
    fn is_empty(&self) -> bool;
}

/// A [`Tree`] whose structure can be walked node by node.
pub trait NavigableTree<T: Ord>: Tree<T> {
    /// The left subtree.
    fn left(&self) -> Self;

    /// The right subtree.
    fn right(&self) -> Self;

    /// The value at the root.
    fn root(&self) -> Option<&T>;

    /// The number of nodes on the longest path from the root to a leaf.
    fn height(&self) -> usize;
}

impl<T: Ord> Tree<T> for ImmutableTree<T> {
    type Traverse<'a> = Traverse<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn insert<V: Into<Option<T>>>(&self, value: V) -> Self {
        ImmutableTree::insert(self, value)
    }

    fn remove<'a, V>(&self, value: V) -> Self
    where
        V: Into<Option<&'a T>>,
        T: 'a,
    {
        ImmutableTree::remove(self, value)
    }

    fn clear(&self) -> Self {
        ImmutableTree::clear(self)
    }

    fn contains<'a, V>(&self, value: V) -> bool
    where
        V: Into<Option<&'a T>>,
        T: 'a,
    {
        ImmutableTree::contains(self, value)
    }

    fn min(&self) -> Option<&T> {
        ImmutableTree::min(self)
    }

    fn max(&self) -> Option<&T> {
        ImmutableTree::max(self)
    }

    fn traverse(&self, order: Traversal) -> Self::Traverse<'_> {
        ImmutableTree::traverse(self, order)
    }

    fn is_empty(&self) -> bool {
        ImmutableTree::is_empty(self)
    }
}

impl<T: Ord> NavigableTree<T> for ImmutableTree<T> {
    fn left(&self) -> Self {
        ImmutableTree::left(self)
    }

    fn right(&self) -> Self {
        ImmutableTree::right(self)
    }

    fn root(&self) -> Option<&T> {
        ImmutableTree::root(self)
    }

    fn height(&self) -> usize {
        ImmutableTree::height(self)
    }
}
