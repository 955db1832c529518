use bintree::{ImmutableTree, Shape, Traversal, TreeFactory};

use std::collections::BTreeSet;

use crate::Op;

fn in_order<T: Copy>(tree: &ImmutableTree<T>) -> Vec<T> {
    tree.traverse(Traversal::InOrder).copied().collect()
}

/// Checks the BST invariant on every subtree along with the shape each root reports.
fn is_valid<T: Ord + Copy>(tree: &ImmutableTree<T>) -> bool {
    if tree.is_empty() {
        return tree.shape() == Shape::Empty && tree.height() == 0;
    }

    let (left, right) = (tree.left(), tree.right());
    let root = tree.root();
    let shape = match (left.is_empty(), right.is_empty()) {
        (true, true) => Shape::Leaf,
        (false, true) => Shape::LeftBranch,
        (true, false) => Shape::RightBranch,
        (false, false) => Shape::DualBranch,
    };

    tree.shape() == shape
        && left.max() < root
        && right.min().map_or(true, |min| Some(min) > root)
        && tree.height() == left.height().max(right.height()) + 1
        && tree.len() == left.len() + right.len() + 1
        && is_valid(&left)
        && is_valid(&right)
}

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same values in both.
fn do_ops<T>(ops: &[Op<T>], mut tree: ImmutableTree<T>, set: &mut BTreeSet<T>) -> Option<ImmutableTree<T>>
where
    T: Ord + Copy,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree = tree.insert(*x);
                set.insert(*x);
            }
            Op::Remove(x) => {
                tree = tree.remove(x);
                set.remove(x);
            }
            Op::Cut => {
                if let Some(root) = tree.root() {
                    set.remove(root);
                }
                tree = tree.cut();
            }
            Op::Iter => {
                if !in_order(&tree).into_iter().eq(set.iter().copied()) {
                    return None;
                }
            }
        }
    }

    Some(tree)
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut set = BTreeSet::new();

    match do_ops(&ops, ImmutableTree::new(), &mut set) {
        Some(tree) => is_valid(&tree) && in_order(&tree).into_iter().eq(set.into_iter()),
        None => false,
    }
}

#[quickcheck]
fn history_is_preserved(xs: Vec<i8>, ops: Vec<Op<i8>>) -> bool {
    let tree = TreeFactory::from_sequence(xs);
    let before = in_order(&tree);
    let shape = tree.to_string();

    let mut set = BTreeSet::new();
    let _ = do_ops(&ops, tree.clone(), &mut set);

    in_order(&tree) == before && tree.to_string() == shape
}

#[quickcheck]
fn in_order_is_sorted_and_unique(xs: Vec<i8>) -> bool {
    let tree = TreeFactory::from_sequence(xs.iter().copied());
    let expected: Vec<_> = xs.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

    in_order(&tree) == expected && tree.len() == expected.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = TreeFactory::from_sequence(xs.iter().copied());

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = TreeFactory::from_sequence(xs.iter().copied());
    let added: BTreeSet<_> = xs.into_iter().collect();
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn insert_is_idempotent(xs: Vec<i8>, x: i8) -> bool {
    let tree = TreeFactory::from_sequence(xs);
    let once = tree.insert(x);
    let twice = once.insert(x);

    once == twice && once.ptr_eq(&twice)
}

#[quickcheck]
fn removing_a_missing_value_is_identity(xs: Vec<i8>, x: i8) -> bool {
    let tree = TreeFactory::from_sequence(xs.into_iter().filter(|y| *y != x));

    tree.remove(&x).ptr_eq(&tree)
}

#[quickcheck]
fn remove_then_insert_restores_values(xs: Vec<i8>, x: i8) -> bool {
    let tree = TreeFactory::from_sequence(xs);
    let restored = tree.remove(&x).insert(x);

    in_order(&restored) == in_order(&tree.insert(x)) && is_valid(&restored)
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removals: Vec<i8>) -> bool {
    let mut tree = TreeFactory::from_sequence(xs.iter().copied());
    for x in &removals {
        tree = tree.remove(x);
    }

    let mut still_present = xs.iter().filter(|x| !removals.contains(x));

    is_valid(&tree)
        && removals.iter().all(|x| !tree.contains(x))
        && still_present.all(|x| tree.contains(x))
}

#[quickcheck]
fn cut_promotes_from_the_bigger_side(xs: Vec<i8>) -> bool {
    let tree = TreeFactory::from_sequence(xs);
    if tree.shape() != Shape::DualBranch {
        return true;
    }

    let (left, right) = (tree.left(), tree.right());
    let expected = if left.len() >= right.len() {
        left.max()
    } else {
        right.min()
    };
    let cut = tree.cut();

    cut.root() == expected && cut.len() + 1 == tree.len() && is_valid(&cut)
}

#[quickcheck]
fn ascending_sequence_is_a_chain(xs: Vec<i8>) -> bool {
    let sorted: BTreeSet<_> = xs.into_iter().collect();
    let tree = TreeFactory::from_sequence(sorted.iter().copied());

    tree.height() == sorted.len()
}

#[quickcheck]
fn balanced_height_is_minimal(xs: Vec<i8>) -> bool {
    let distinct = xs.iter().collect::<BTreeSet<_>>().len();
    let tree = TreeFactory::balanced(xs);
    let min_height = (usize::BITS - distinct.leading_zeros()) as usize;

    tree.height() == min_height && tree.len() == distinct && is_valid(&tree)
}

#[quickcheck]
fn parent_first_orders_rebuild_the_same_tree(xs: Vec<i8>) -> bool {
    let tree = TreeFactory::from_sequence(xs);

    [Traversal::PreOrder, Traversal::PostOrder].iter().all(|order| {
        let rebuilt = TreeFactory::from_sequence(tree.traverse(*order).copied());
        rebuilt == tree
    })
}

#[quickcheck]
fn insert_all_holds_both_trees(xs: Vec<i8>, ys: Vec<i8>) -> bool {
    let a = TreeFactory::from_sequence(xs.iter().copied());
    let b = TreeFactory::from_sequence(ys.iter().copied());
    let merged = a.insert_all(&b);

    let expected: BTreeSet<_> = xs.into_iter().chain(ys).collect();

    is_valid(&merged) && in_order(&merged).into_iter().eq(expected.into_iter())
}
