//! A persistent Binary Search Tree. This is modeled after a BST one would see in
//! a functional language like Haskell. Any operations that one would
//! expect to modify the tree (e.g. `insert` or `remove`) instead return
//! a new tree that references every node of the original tree the operation
//! didn't touch.
//!
//! # Examples
//!
//! ```
//! use bintree::ImmutableTree;
//!
//! let tree: ImmutableTree<i32> = ImmutableTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! // This `insert` returns a new tree!
//! let new_tree = tree.insert(1);
//!
//! // The new tree has this new value but the old one doesn't.
//! assert!(new_tree.contains(&1));
//! assert!(!tree.contains(&1));
//!
//! // Add a couple more and remove the first one for good measure.
//! let newer_tree = new_tree.insert(3).insert(2);
//! let newest_tree = newer_tree.remove(&1);
//!
//! // All history is preserved.
//! assert_eq!(newest_tree.to_string(), "((_ 2 _) 3 _)");
//! assert_eq!(newer_tree.to_string(), "(_ 1 ((_ 2 _) 3 _))");
//! assert_eq!(new_tree.to_string(), "(_ 1 _)");
//! assert_eq!(tree.to_string(), "_");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::TreeError;
use crate::node::{self, Node, Shape};
use crate::traverse::{Traversal, Traverse};

/// A persistent Binary Search Tree of unique values.
///
/// An `ImmutableTree` is a handle to a root node. Cloning it is cheap and never copies
/// nodes. The empty tree holds no allocation at all, so every empty tree is the same
/// [`ImmutableTree::EMPTY`] value.
pub struct ImmutableTree<T>(Option<Arc<Node<T>>>);

impl<T> Clone for ImmutableTree<T> {
    fn clone(&self) -> Self {
        Self(self.0.as_ref().map(Arc::clone))
    }
}

impl<T> Default for ImmutableTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ImmutableTree<T> {
    /// The empty tree.
    pub const EMPTY: Self = Self(None);

    /// Generates a new, empty `ImmutableTree`.
    pub const fn new() -> Self {
        Self::EMPTY
    }

    fn from_node(node: Option<Arc<Node<T>>>) -> Self {
        Self(node)
    }

    fn node(&self) -> Option<&Arc<Node<T>>> {
        self.0.as_ref()
    }

    /// Returns the empty tree, whatever this tree holds.
    pub fn clear(&self) -> Self {
        Self::EMPTY
    }

    /// Whether this tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// How many values this tree holds.
    pub fn len(&self) -> usize {
        self.node().map_or(0, |n| n.len())
    }

    /// The number of nodes on the longest path from the root down to a leaf. The empty
    /// tree has a height of 0 and a single value has a height of 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::TreeFactory;
    ///
    /// assert_eq!(TreeFactory::from_sequence([1, 2, 3, 4, 5]).height(), 5);
    /// assert_eq!(TreeFactory::balanced([1, 2, 3, 4, 5]).height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        self.node().map_or(0, |n| n.height())
    }

    /// The value stored at the root, if any.
    pub fn root(&self) -> Option<&T> {
        self.node().map(|n| n.value())
    }

    /// The left subtree. Empty trees and nodes without a left child give the empty tree.
    pub fn left(&self) -> Self {
        Self::from_node(self.node().and_then(|n| n.left()).map(Arc::clone))
    }

    /// The right subtree. Empty trees and nodes without a right child give the empty tree.
    pub fn right(&self) -> Self {
        Self::from_node(self.node().and_then(|n| n.right()).map(Arc::clone))
    }

    /// Which children the root has.
    pub fn shape(&self) -> Shape {
        self.node().map_or(Shape::Empty, |n| n.shape())
    }

    /// The smallest value in the tree.
    pub fn min(&self) -> Option<&T> {
        self.node().map(|n| n.min_node().value())
    }

    /// The largest value in the tree.
    pub fn max(&self) -> Option<&T> {
        self.node().map(|n| n.max_node().value())
    }

    /// Whether both trees are the very same nodes in memory (or both empty). Trees derived
    /// from one another share every subtree an operation didn't touch, which this can
    /// observe.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::TreeFactory;
    ///
    /// let tree = TreeFactory::from_sequence([5, 2, 7]);
    /// let bigger = tree.insert(8);
    ///
    /// assert!(bigger.left().ptr_eq(&tree.left()));
    /// assert!(!bigger.right().ptr_eq(&tree.right()));
    /// ```
    pub fn ptr_eq(&self, other: &Self) -> bool {
        node::same_subtree(self.node(), other.node())
    }

    /// Walks the values of the tree in the given order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::{Traversal, TreeFactory};
    ///
    /// let tree = TreeFactory::from_sequence([5, 2, 7, 3, 1, 8, 6]);
    ///
    /// let in_order: Vec<_> = tree.traverse(Traversal::InOrder).copied().collect();
    /// assert_eq!(in_order, [1, 2, 3, 5, 6, 7, 8]);
    ///
    /// let pre_order: Vec<_> = tree.traverse(Traversal::PreOrder).copied().collect();
    /// assert_eq!(pre_order, [5, 2, 1, 3, 7, 6, 8]);
    ///
    /// // Root, then right, then left.
    /// let post_order: Vec<_> = tree.traverse(Traversal::PostOrder).copied().collect();
    /// assert_eq!(post_order, [5, 7, 8, 6, 2, 3, 1]);
    /// ```
    pub fn traverse(&self, order: Traversal) -> Traverse<'_, T> {
        Traverse::new(self.node(), order)
    }

    /// Walks the values in ascending order.
    pub fn iter(&self) -> Traverse<'_, T> {
        self.traverse(Traversal::InOrder)
    }
}

impl<T: Ord> ImmutableTree<T> {
    /// Builds a tree rooted at `value` with the given subtrees, checking that every value
    /// of `left` is smaller and every value of `right` is larger than `value`.
    ///
    /// The subtrees are shared, not copied, and the root takes whichever shape matches
    /// the subtrees that are non-empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::{ImmutableTree, Shape, TreeError, TreeFactory};
    ///
    /// let left = TreeFactory::from_sequence([1]);
    /// let tree = ImmutableTree::with_children(Some(2), left.clone(), ImmutableTree::new());
    /// assert_eq!(tree.as_ref().map(|t| t.shape()), Ok(Shape::LeftBranch));
    ///
    /// assert_eq!(
    ///     ImmutableTree::with_children(None, left, ImmutableTree::new()).err(),
    ///     Some(TreeError::MissingValue)
    /// );
    /// ```
    pub fn with_children(value: Option<T>, left: Self, right: Self) -> Result<Self, TreeError> {
        let value = value.ok_or(TreeError::MissingValue)?;
        if left.max().map_or(false, |max| *max >= value) {
            return Err(TreeError::LeftOrder);
        }
        if right.min().map_or(false, |min| *min <= value) {
            return Err(TreeError::RightOrder);
        }

        Ok(Self::from_node(Some(Arc::new(Node::with_children(
            Arc::new(value),
            left.0,
            right.0,
        )))))
    }

    /// Returns a new tree that also holds `value`. Inserting a value the tree already holds
    /// (or no value at all) gives back this same tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::ImmutableTree;
    ///
    /// let tree = ImmutableTree::<i32>::new().insert(2);
    /// let new_tree = tree.insert(1);
    ///
    /// assert_eq!(new_tree.to_string(), "((_ 1 _) 2 _)");
    /// assert!(new_tree.insert(1).ptr_eq(&new_tree));
    /// assert!(new_tree.insert(None).ptr_eq(&new_tree));
    ///
    /// // All history is preserved.
    /// assert_eq!(tree.to_string(), "(_ 2 _)");
    /// ```
    pub fn insert<V>(&self, value: V) -> Self
    where
        V: Into<Option<T>>,
    {
        let value = match value.into() {
            Some(value) => value,
            None => return self.clone(),
        };

        match self.node() {
            None => Self::from_node(Some(Arc::new(Node::leaf(value)))),
            Some(n) if *n.value() == value => self.clone(),
            Some(_) => self.insert_all(&Self::from_node(Some(Arc::new(Node::leaf(value))))),
        }
    }

    /// Returns a new tree holding every value of this tree and of `other`.
    ///
    /// Whenever all of `other` belongs on one side of a node it is attached there whole, so
    /// merging a tree of smaller values into one with a larger root shares `other`'s nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::{ImmutableTree, TreeFactory};
    ///
    /// let small = TreeFactory::from_sequence([2, 1, 3]);
    /// let tree = ImmutableTree::<i32>::new().insert(5).insert_all(&small);
    ///
    /// assert_eq!(tree.to_string(), "(((_ 1 _) 2 (_ 3 _)) 5 _)");
    /// assert!(tree.left().ptr_eq(&small));
    ///
    /// let mixed = TreeFactory::from_sequence([4, 7]).insert_all(&TreeFactory::from_sequence([6, 3, 8]));
    /// assert_eq!(mixed.iter().copied().collect::<Vec<_>>(), [3, 4, 6, 7, 8]);
    /// ```
    pub fn insert_all(&self, other: &Self) -> Self {
        Self::from_node(merge(self.node(), other.node()))
    }

    /// Returns a new tree without `value`. Removing a value the tree doesn't hold (or no value
    /// at all) gives back this same tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::TreeFactory;
    ///
    /// let tree = TreeFactory::from_sequence([2, 1, 3]);
    /// let smaller = tree.remove(&3);
    ///
    /// assert_eq!(smaller, TreeFactory::from_sequence([2, 1]));
    /// assert!(tree.remove(&42).ptr_eq(&tree));
    ///
    /// // All history is preserved.
    /// assert!(tree.contains(&3));
    /// ```
    pub fn remove<'a, V>(&self, value: V) -> Self
    where
        V: Into<Option<&'a T>>,
        T: 'a,
    {
        match value.into() {
            Some(value) => Self::from_node(remove(self.node(), value)),
            None => self.clone(),
        }
    }

    /// Returns a new tree without the root value.
    ///
    /// A root with one child is replaced by that child. A root with two children is
    /// replaced by the largest value of the left subtree when the left subtree holds at
    /// least as many values as the right one, and by the smallest value of the right
    /// subtree otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::TreeFactory;
    ///
    /// // The left subtree is at least as big, so its largest value moves up.
    /// let tree = TreeFactory::from_sequence([7, 5, 6, 4, 9]);
    /// assert_eq!(tree.cut().to_string(), "(((_ 4 _) 5 _) 6 (_ 9 _))");
    ///
    /// // The right subtree is bigger, so its smallest value moves up.
    /// let tree = TreeFactory::from_sequence([7, 10, 8, 12, 5]);
    /// assert_eq!(tree.cut().to_string(), "((_ 5 _) 8 (_ 10 (_ 12 _)))");
    /// ```
    pub fn cut(&self) -> Self {
        Self::from_node(self.node().and_then(cut))
    }

    /// Whether the tree holds `value`. No value at all is never held.
    ///
    /// # Examples
    ///
    /// ```
    /// use bintree::TreeFactory;
    ///
    /// let tree = TreeFactory::from_sequence([2, 1, 3]);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// assert!(!tree.contains(None));
    /// ```
    pub fn contains<'a, V>(&self, value: V) -> bool
    where
        V: Into<Option<&'a T>>,
        T: 'a,
    {
        let value = match value.into() {
            Some(value) => value,
            None => return false,
        };

        let mut cursor = self.node();
        while let Some(node) = cursor {
            cursor = match value.cmp(node.value()) {
                Ordering::Less => node.left(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right(),
            };
        }
        false
    }
}

/// Which child a walk down the tree stepped into.
enum Side {
    Left,
    Right,
}

/// Returns `tree` with every value of `other` added.
///
/// Walks down iteratively while `other` fits wholly below one side of the current node, so
/// inserting into a tall chain doesn't recurse once per level.
fn merge<T: Ord>(
    tree: Option<&Arc<Node<T>>>,
    other: Option<&Arc<Node<T>>>,
) -> Option<Arc<Node<T>>> {
    let other = match other {
        Some(other) => other,
        None => return tree.map(Arc::clone),
    };

    let mut path = Vec::new();
    let mut current = tree;
    let merged = loop {
        let node = match current {
            Some(node) => node,
            None => break Some(Arc::clone(other)),
        };

        match other.value().cmp(node.value()) {
            Ordering::Equal => {
                break Some(Node::replace_children(
                    node,
                    merge(node.left(), other.left()),
                    merge(node.right(), other.right()),
                ));
            }
            Ordering::Less if other.max_node().value() < node.value() => {
                path.push((node, Side::Left));
                current = node.left();
            }
            Ordering::Greater if other.min_node().value() > node.value() => {
                path.push((node, Side::Right));
                current = node.right();
            }
            // `other` straddles this node. Split it at its own root: the part on the root's side
            // goes in whole, the rest is merged afterwards.
            Ordering::Less => {
                let head = Node::replace_children(other, other.left().map(Arc::clone), None);
                let merged = merge(Some(node), Some(&head));
                break merge(merged.as_ref(), other.right());
            }
            Ordering::Greater => {
                let head = Node::replace_children(other, None, other.right().map(Arc::clone));
                let merged = merge(Some(node), Some(&head));
                break merge(merged.as_ref(), other.left());
            }
        }
    };

    rebuild(path, merged)
}

fn remove<T: Ord>(tree: Option<&Arc<Node<T>>>, value: &T) -> Option<Arc<Node<T>>> {
    let mut path = Vec::new();
    let mut current = tree;
    while let Some(node) = current {
        match value.cmp(node.value()) {
            Ordering::Less => {
                path.push((node, Side::Left));
                current = node.left();
            }
            Ordering::Equal => return rebuild(path, cut(node)),
            Ordering::Greater => {
                path.push((node, Side::Right));
                current = node.right();
            }
        }
    }

    // Not there, so nothing changes.
    tree.map(Arc::clone)
}

/// Rebuilds the nodes of `path` from the bottom up, with `subtree` in place of the child the
/// walk ended in. Nodes whose children come back unchanged are reused.
fn rebuild<T>(
    path: Vec<(&Arc<Node<T>>, Side)>,
    subtree: Option<Arc<Node<T>>>,
) -> Option<Arc<Node<T>>> {
    path.into_iter().rev().fold(subtree, |child, (node, side)| {
        Some(match side {
            Side::Left => Node::replace_children(node, child, node.right().map(Arc::clone)),
            Side::Right => Node::replace_children(node, node.left().map(Arc::clone), child),
        })
    })
}

/// Removes the root of `node`.
///
/// A root with one child is replaced by that child. A root with two children is replaced
/// by a value from the bigger subtree: the largest value on the left if the left subtree
/// holds at least as many values as the right, otherwise the smallest value on the right.
/// This keeps repeated removals from piling all values on one side but does not bound the
/// height; nothing is rotated.
fn cut<T: Ord>(node: &Arc<Node<T>>) -> Option<Arc<Node<T>>> {
    match (node.left(), node.right()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(Arc::clone(child)),
        (Some(left), Some(right)) => {
            let promoted = if left.len() >= right.len() {
                log::trace!(
                    "cut: promoting predecessor ({} values left, {} right)",
                    left.len(),
                    right.len()
                );
                let predecessor = left.max_node().shared_value();
                let new_left = remove(Some(left), &predecessor);
                Node::with_children(predecessor, new_left, Some(Arc::clone(right)))
            } else {
                log::trace!(
                    "cut: promoting successor ({} values left, {} right)",
                    left.len(),
                    right.len()
                );
                let successor = right.min_node().shared_value();
                let new_right = remove(Some(right), &successor);
                Node::with_children(successor, Some(Arc::clone(left)), new_right)
            };

            Some(Arc::new(promoted))
        }
    }
}

/// Two trees are equal when they hold equal values in the same shape. Where they share
/// nodes the comparison stops early.
impl<T: PartialEq> PartialEq for ImmutableTree<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self.node(), other.node())];
        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) if Arc::ptr_eq(a, b) => {}
                (Some(a), Some(b)) if a.value() == b.value() => {
                    pending.push((a.right(), b.right()));
                    pending.push((a.left(), b.left()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T: Eq> Eq for ImmutableTree<T> {}

/// Writes the tree as `(left value right)` with `_` for an empty tree, e.g.
/// `((_ 1 _) 2 (_ 3 _))`.
impl<T: fmt::Display> fmt::Display for ImmutableTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Step<'a, T> {
            Subtree(Option<&'a Arc<Node<T>>>),
            Value(&'a T),
            Close,
        }

        let mut steps = vec![Step::Subtree(self.node())];
        while let Some(step) = steps.pop() {
            match step {
                Step::Subtree(None) => f.write_str("_")?,
                Step::Subtree(Some(n)) => {
                    f.write_str("(")?;
                    steps.push(Step::Close);
                    steps.push(Step::Subtree(n.right()));
                    steps.push(Step::Value(n.value()));
                    steps.push(Step::Subtree(n.left()));
                }
                Step::Value(value) => write!(f, " {} ", value)?,
                Step::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for ImmutableTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Collecting inserts the values in the order they come, like
/// [`TreeFactory::from_sequence`][crate::TreeFactory::from_sequence].
impl<T: Ord> FromIterator<T> for ImmutableTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for ImmutableTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            *self = self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a ImmutableTree<T> {
    type Item = &'a T;
    type IntoIter = Traverse<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
