//! Orders in which a tree's values can be walked, and the iterator that walks them.

use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::TreeError;
use crate::node::Node;

/// The order in which [`traverse`][crate::ImmutableTree::traverse] visits values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// The root value, then the left subtree, then the right subtree.
    PreOrder,
    /// The root value, then the right subtree, then the left subtree.
    ///
    /// **Note** this is not the textbook post-order (left, right, root). Displays built on
    /// this crate depend on the exact sequence, so it is kept as is.
    PostOrder,
    /// The left subtree, then the root value, then the right subtree. This lists values in
    /// ascending order.
    InOrder,
}

impl Traversal {
    /// Every traversal order.
    pub const ALL: [Traversal; 3] = [Traversal::PreOrder, Traversal::PostOrder, Traversal::InOrder];
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PreOrder => "PRE_ORDER",
            Self::PostOrder => "POST_ORDER",
            Self::InOrder => "IN_ORDER",
        })
    }
}

/// Parses `PRE_ORDER`, `post-order`, `InOrder` and the like. Case is ignored, as are `_` and
/// `-` separators.
///
/// ```
/// use bintree::Traversal;
///
/// assert_eq!("pre-order".parse(), Ok(Traversal::PreOrder));
/// assert!("level-order".parse::<Traversal>().is_err());
/// ```
impl FromStr for Traversal {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "preorder" => Ok(Self::PreOrder),
            "postorder" => Ok(Self::PostOrder),
            "inorder" => Ok(Self::InOrder),
            _ => Err(TreeError::UnsupportedTraversal(s.to_owned())),
        }
    }
}

/// A lazy walk over the values of a tree in some [`Traversal`] order.
///
/// The walk borrows the tree, so it can't outlive it, but calling
/// [`traverse`][crate::ImmutableTree::traverse] again always produces the same sequence.
pub struct Traverse<'a, T> {
    order: Traversal,
    /// Nodes still to visit. For in-order walks this is the left spine of the part of the
    /// tree not yet visited; otherwise the top is the next node to yield.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Traverse<'a, T> {
    pub(crate) fn new(root: Option<&'a Arc<Node<T>>>, order: Traversal) -> Self {
        let mut traverse = Self {
            order,
            stack: Vec::new(),
            remaining: root.map_or(0, |n| n.len()),
        };
        match order {
            Traversal::InOrder => traverse.push_left_spine(root),
            Traversal::PreOrder | Traversal::PostOrder => traverse.push(root),
        }

        traverse
    }

    fn push(&mut self, node: Option<&'a Arc<Node<T>>>) {
        if let Some(node) = node {
            self.stack.push(node);
        }
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Arc<Node<T>>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        match self.order {
            // Push the side visited second first so the other side pops next.
            Traversal::PreOrder => {
                self.push(node.right());
                self.push(node.left());
            }
            Traversal::PostOrder => {
                self.push(node.left());
                self.push(node.right());
            }
            Traversal::InOrder => self.push_left_spine(node.right()),
        }

        self.remaining -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Traverse<'_, T> {}

impl<T> FusedIterator for Traverse<'_, T> {}

impl<T> Clone for Traverse<'_, T> {
    fn clone(&self) -> Self {
        Self {
            order: self.order,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}
