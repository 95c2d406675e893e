use comparable_bst::{Float, Int, Text, Tree, Visit};
use quickcheck_macros::quickcheck;

use std::collections::HashSet;

use crate::Op;

fn in_order(tree: &Tree<Int>) -> Vec<i64> {
    let mut values = Vec::new();
    tree.visit_in_order(|value| {
        values.push(*value);
        Visit::Continue
    });
    values
}

/// Applies a set of operations to a tree and a hashset.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops(ops: &[Op<i8>], bst: &mut Tree<Int>, set: &mut HashSet<i64>) {
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst.insert(Int(i64::from(*k)));
                set.insert(i64::from(*k));
            }
            Op::Remove(k) => {
                bst.remove(&Int(i64::from(*k)));
                set.remove(&i64::from(*k));
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = HashSet::new();

    do_ops(&ops, &mut tree, &mut set);

    let values = in_order(&tree);
    values.len() == set.len()
        && values.windows(2).all(|pair| pair[0] < pair[1])
        && set.iter().all(|key| tree.get(&Int(*key)) == Some(key))
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(Int(i64::from(*x)));
    }

    xs.iter().all(|x| tree.contains(&Int(i64::from(*x))))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(Int(i64::from(*x)));
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.get(&Int(i64::from(*x))).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(Int(i64::from(*x)));
    }
    for delete in &deletes {
        tree.remove(&Int(i64::from(*delete)));
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| !tree.contains(&Int(i64::from(*x))))
        && still_present
            .iter()
            .all(|x| tree.contains(&Int(i64::from(*x))))
}

#[quickcheck]
fn inserting_twice_is_idempotent(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(Int(i64::from(*x)));
    }
    let before = in_order(&tree);

    for x in &xs {
        tree.insert(Int(i64::from(*x)));
    }

    in_order(&tree) == before
}

#[quickcheck]
fn first_done_stops_traversal(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(Int(i64::from(*x)));
    }

    let mut visited = 0;
    tree.visit_in_order(|_| {
        visited += 1;
        Visit::Done
    });

    visited == usize::from(!xs.is_empty())
}

#[quickcheck]
fn floats_stay_sorted(xs: Vec<f64>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(Float(*x));
    }

    let mut values = Vec::new();
    tree.visit_in_order(|value| {
        values.push(*value);
        Visit::Continue
    });

    values.windows(2).all(|pair| pair[0].total_cmp(&pair[1]).is_lt())
}

#[quickcheck]
fn case_insensitive_probe_finds_stored_text(xs: Vec<String>) -> bool {
    // Case mapping only round trips for ASCII.
    let xs: Vec<_> = xs.into_iter().filter(|x| x.is_ascii()).collect();

    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(Text::new(x.to_lowercase(), false));
    }

    xs.iter()
        .all(|x| tree.contains(&Text::new(x.to_uppercase(), true)))
}
