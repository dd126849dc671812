use std::collections::BTreeSet;

use proptest::prelude::*;
use stepwise_avl::AvlTree;

fn keys_strategy() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-500i32..500, 0..120)
}

proptest! {
    #[test]
    fn interleaved_rebalance_keeps_avl_invariants(keys in keys_strategy()) {
        let mut tree = AvlTree::new();
        let mut expected = BTreeSet::new();

        for k in keys {
            let fresh = expected.insert(k);
            prop_assert_eq!(tree.insert(k), fresh);

            let trail = tree.rebalance_trail();
            prop_assert!(trail.len() <= 1);
            if !fresh {
                prop_assert!(trail.is_empty());
            }

            prop_assert_eq!(tree.assert_valid(), Ok(()));
            let in_order: Vec<i32> = tree.iter().copied().collect();
            let want: Vec<i32> = expected.iter().copied().collect();
            prop_assert_eq!(in_order, want);
        }
        prop_assert_eq!(tree.len(), expected.len());
    }

    #[test]
    fn second_rebalance_is_a_noop(keys in keys_strategy()) {
        let mut tree = AvlTree::new();
        for k in keys {
            tree.insert(k);
            tree.rebalance();
        }
        let shape = tree.snapshot();
        prop_assert_eq!(tree.rebalance(), None);
        prop_assert_eq!(tree.snapshot(), shape);
    }

    #[test]
    fn bulk_rebalance_keeps_order_and_heights(keys in keys_strategy()) {
        let mut tree = AvlTree::new();
        for &k in &keys {
            tree.insert(k);
        }
        let trail = tree.rebalance_trail();

        prop_assert_eq!(tree.assert_consistent(), Ok(()));
        let expected: Vec<i32> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        let in_order: Vec<i32> = tree.iter().copied().collect();
        prop_assert_eq!(in_order, expected);

        for rotation in &trail {
            prop_assert!(tree.contains(&rotation.pivot));
        }
    }

    #[test]
    fn snapshot_mirrors_links(keys in keys_strategy()) {
        let mut tree = AvlTree::new();
        for k in keys {
            tree.insert(k);
            tree.rebalance();
        }
        let snapshot = tree.snapshot();
        prop_assert_eq!(snapshot.len(), tree.len());
        prop_assert_eq!(snapshot.root, tree.root().map(|r| *tree.key(r)));
        for node in &snapshot.nodes {
            if let Some(l) = node.left {
                prop_assert!(l < node.key);
            }
            if let Some(r) = node.right {
                prop_assert!(r > node.key);
            }
            let child_height = |k: Option<i32>| k.and_then(|k| snapshot.node(&k)).map_or(0, |n| n.height);
            prop_assert_eq!(
                node.height,
                1 + child_height(node.left).max(child_height(node.right))
            );
        }
    }
}
