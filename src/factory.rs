//! Entry points for building trees.

use crate::immutable::ImmutableTree;

/// Builds new [`ImmutableTree`]s.
///
/// # Examples
///
/// ```
/// use bintree::TreeFactory;
///
/// // Values go in the order given, so the shape depends on that order.
/// let chain = TreeFactory::from_sequence(1..=5);
/// assert_eq!(chain.height(), 5);
///
/// // Balanced trees are always rooted at the median.
/// let balanced = TreeFactory::balanced([5, 4, 3, 2, 1, 6, 7, 8, 9]);
/// assert_eq!(
///     balanced.to_string(),
///     "((((_ 1 _) 2 _) 3 (_ 4 _)) 5 (((_ 6 _) 7 _) 8 (_ 9 _)))"
/// );
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeFactory;

impl TreeFactory {
    /// The empty tree.
    pub fn empty<T>() -> ImmutableTree<T> {
        ImmutableTree::EMPTY
    }

    /// Inserts every value into an empty tree, in order. Nothing rebalances the result,
    /// so ascending input builds a chain as tall as the number of values.
    pub fn from_sequence<T, I>(values: I) -> ImmutableTree<T>
    where
        T: Ord,
        I: IntoIterator<Item = T>,
    {
        values
            .into_iter()
            .fold(Self::empty::<T>(), |tree, value| tree.insert(value))
    }

    /// Builds a tree of the given values whose height is as small as possible:
    /// `ceil(log2(n + 1))` for `n` distinct values, whatever order they come in.
    ///
    /// The values are sorted, then the middle one becomes the root and the two halves are
    /// built the same way and merged in below it.
    pub fn balanced<T, I>(values: I) -> ImmutableTree<T>
    where
        T: Ord,
        I: IntoIterator<Item = T>,
    {
        let mut values: Vec<T> = values.into_iter().collect();
        values.sort();
        values.dedup();

        log::trace!("balanced: building a tree of {} values", values.len());
        fill_balanced_tree(values)
    }
}

/// Recursive helper for [`TreeFactory::balanced`]. `values` must be sorted.
fn fill_balanced_tree<T: Ord>(mut values: Vec<T>) -> ImmutableTree<T> {
    if values.is_empty() {
        return ImmutableTree::EMPTY;
    }

    let mid = values.len() / 2;
    let right = values.split_off(mid + 1);
    let root = values.pop();
    let left = values;

    ImmutableTree::<T>::new()
        .insert(root)
        .insert_all(&fill_balanced_tree(left))
        .insert_all(&fill_balanced_tree(right))
}
