//! The shapes a non-empty subtree can take.
//!
//! A [`Node`] never stores an empty child. Instead it records which children it has in
//! [`Branches`], so a node with one child can only be a left or right branch and a dual
//! branch always has two real subtrees. [`Node::replace_children`] is the one place new
//! shapes are chosen.

use std::cmp;
use std::mem;
use std::sync::Arc;

/// Which of the five shapes a tree has. The empty tree is [`Shape::Empty`]; every other
/// variant describes which children the root has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// No values at all.
    Empty,
    /// A single value with no children.
    Leaf,
    /// A value with only a left subtree.
    LeftBranch,
    /// A value with only a right subtree.
    RightBranch,
    /// A value with both subtrees.
    DualBranch,
}

/// The children of a [`Node`]. Each variant holds exactly the subtrees that exist.
enum Branches<T> {
    Leaf,
    Left(Arc<Node<T>>),
    Right(Arc<Node<T>>),
    Dual(Arc<Node<T>>, Arc<Node<T>>),
}

/// A non-empty subtree. Nodes are never mutated once built; every structural change
/// builds new nodes along the changed path and reuses the `Arc`s of everything else.
pub(crate) struct Node<T> {
    value: Arc<T>,
    branches: Branches<T>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
    /// How many values are in the subtree rooted at this node.
    len: usize,
}

impl<T> Node<T> {
    /// Construct a childless node holding `value`.
    pub(crate) fn leaf(value: T) -> Self {
        Self::with_children(Arc::new(value), None, None)
    }

    /// Build a node with the given value and children, picking the shape that matches
    /// the children actually present.
    pub(crate) fn with_children(
        value: Arc<T>,
        left: Option<Arc<Self>>,
        right: Option<Arc<Self>>,
    ) -> Self {
        let height = cmp::max(height(left.as_ref()), height(right.as_ref())) + 1;
        let len = len(left.as_ref()) + len(right.as_ref()) + 1;
        let branches = match (left, right) {
            (None, None) => Branches::Leaf,
            (Some(left), None) => Branches::Left(left),
            (None, Some(right)) => Branches::Right(right),
            (Some(left), Some(right)) => Branches::Dual(left, right),
        };

        Self {
            value,
            branches,
            height,
            len,
        }
    }

    /// Returns `this` rebuilt with new children.
    ///
    /// If both children are the very same subtrees `this` already has, `this` itself is
    /// returned so callers keep sharing it. Otherwise a new node holding the same value is
    /// built in whichever shape the new children call for.
    pub(crate) fn replace_children(
        this: &Arc<Self>,
        left: Option<Arc<Self>>,
        right: Option<Arc<Self>>,
    ) -> Arc<Self> {
        if same_subtree(this.left(), left.as_ref()) && same_subtree(this.right(), right.as_ref())
        {
            return Arc::clone(this);
        }

        Arc::new(Self::with_children(Arc::clone(&this.value), left, right))
    }

    pub(crate) fn value(&self) -> &T {
        &self.value
    }

    /// The value as a shared pointer, so it can move into a new node without cloning `T`.
    pub(crate) fn shared_value(&self) -> Arc<T> {
        Arc::clone(&self.value)
    }

    pub(crate) fn left(&self) -> Option<&Arc<Self>> {
        match &self.branches {
            Branches::Left(left) | Branches::Dual(left, _) => Some(left),
            Branches::Leaf | Branches::Right(_) => None,
        }
    }

    pub(crate) fn right(&self) -> Option<&Arc<Self>> {
        match &self.branches {
            Branches::Right(right) | Branches::Dual(_, right) => Some(right),
            Branches::Leaf | Branches::Left(_) => None,
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn shape(&self) -> Shape {
        match self.branches {
            Branches::Leaf => Shape::Leaf,
            Branches::Left(_) => Shape::LeftBranch,
            Branches::Right(_) => Shape::RightBranch,
            Branches::Dual(..) => Shape::DualBranch,
        }
    }

    /// The left-most node below (and including) this one.
    pub(crate) fn min_node(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left() {
            node = &**left;
        }
        node
    }

    /// The right-most node below (and including) this one.
    pub(crate) fn max_node(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right() {
            node = &**right;
        }
        node
    }
}

/// Unlinks children onto a heap stack instead of letting each `Arc` drop its subtree
/// recursively, so tall chains can't overflow the call stack.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_children(&mut self.branches, &mut pending);

        while let Some(child) = pending.pop() {
            // Subtrees still shared with another tree stay alive and are left alone.
            if let Some(mut node) = Arc::into_inner(child) {
                take_children(&mut node.branches, &mut pending);
            }
        }
    }
}

fn take_children<T>(branches: &mut Branches<T>, pending: &mut Vec<Arc<Node<T>>>) {
    match mem::replace(branches, Branches::Leaf) {
        Branches::Leaf => {}
        Branches::Left(child) | Branches::Right(child) => pending.push(child),
        Branches::Dual(left, right) => {
            pending.push(left);
            pending.push(right);
        }
    }
}

fn height<T>(node: Option<&Arc<Node<T>>>) -> usize {
    node.map_or(0, |n| n.height)
}

fn len<T>(node: Option<&Arc<Node<T>>>) -> usize {
    node.map_or(0, |n| n.len)
}

/// Whether two optional subtrees are the same allocation (or both empty).
pub(crate) fn same_subtree<T>(a: Option<&Arc<Node<T>>>, b: Option<&Arc<Node<T>>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: i32) -> Arc<Node<i32>> {
        Arc::new(Node::leaf(value))
    }

    #[test]
    fn test_shape_follows_children() {
        let one = leaf(1);
        let three = leaf(3);

        let cases = [
            (None, None, Shape::Leaf),
            (Some(Arc::clone(&one)), None, Shape::LeftBranch),
            (None, Some(Arc::clone(&three)), Shape::RightBranch),
            (Some(one), Some(three), Shape::DualBranch),
        ];
        for (left, right, shape) in cases {
            let node = Node::with_children(Arc::new(2), left, right);
            assert_eq!(node.shape(), shape);
        }
    }

    #[test]
    fn test_replace_children_keeps_node_when_unchanged() {
        let one = leaf(1);
        let node = Arc::new(Node::with_children(
            Arc::new(2),
            Some(Arc::clone(&one)),
            None,
        ));

        let same = Node::replace_children(&node, Some(one), None);
        assert!(Arc::ptr_eq(&node, &same));
    }

    #[test]
    fn test_replace_children_changes_shape() {
        let one = leaf(1);
        let three = leaf(3);
        let node = Arc::new(Node::with_children(
            Arc::new(2),
            Some(Arc::clone(&one)),
            Some(Arc::clone(&three)),
        ));

        let right_only = Node::replace_children(&node, None, Some(Arc::clone(&three)));
        assert_eq!(right_only.shape(), Shape::RightBranch);
        assert!(Arc::ptr_eq(right_only.right().unwrap(), &three));
        // The value is shared, not copied.
        assert!(Arc::ptr_eq(&right_only.value, &node.value));

        let bare = Node::replace_children(&node, None, None);
        assert_eq!(bare.shape(), Shape::Leaf);
        assert_eq!(bare.height(), 1);
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn test_height_and_len() {
        let chain = Node::with_children(
            Arc::new(3),
            Some(Arc::new(Node::with_children(
                Arc::new(2),
                Some(leaf(1)),
                None,
            ))),
            Some(leaf(4)),
        );

        assert_eq!(chain.height(), 3);
        assert_eq!(chain.len(), 4);
        assert_eq!(*chain.min_node().value(), 1);
        assert_eq!(*chain.max_node().value(), 4);
    }

    #[test]
    fn test_drop_deep_chain() {
        let mut chain = leaf(0);
        for value in 1..200_000 {
            chain = Arc::new(Node::with_children(Arc::new(value), Some(chain), None));
        }
        assert_eq!(chain.height(), 200_000);

        drop(chain);
    }

    #[test]
    fn test_drop_keeps_shared_subtrees() {
        let shared = Arc::new(Node::with_children(Arc::new(2), Some(leaf(1)), None));
        let node = Node::with_children(Arc::new(3), Some(Arc::clone(&shared)), Some(leaf(4)));

        drop(node);
        assert_eq!(Arc::strong_count(&shared), 1);
        assert_eq!(shared.len(), 2);
        assert_eq!(*shared.min_node().value(), 1);
    }
}
