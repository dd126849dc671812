use serde_json::json;
use stepwise_avl::{AvlTree, NodeSnapshot};

#[test]
fn snapshot_is_pre_order_with_child_keys() {
    let mut tree = AvlTree::new();
    for k in [30, 20, 10] {
        tree.insert(k);
    }
    tree.rebalance();

    let snapshot = tree.snapshot();
    assert_eq!(snapshot.root, Some(20));
    assert_eq!(
        snapshot.nodes,
        vec![
            NodeSnapshot { key: 20, left: Some(10), right: Some(30), height: 2 },
            NodeSnapshot { key: 10, left: None, right: None, height: 1 },
            NodeSnapshot { key: 30, left: None, right: None, height: 1 },
        ]
    );
    assert_eq!(
        serde_json::to_value(&snapshot).unwrap(),
        json!({
            "root": 20,
            "nodes": [
                { "key": 20, "left": 10, "right": 30, "height": 2 },
                { "key": 10, "left": null, "right": null, "height": 1 },
                { "key": 30, "left": null, "right": null, "height": 1 },
            ]
        })
    );
}

#[test]
fn snapshot_shows_naive_position_before_rebalance() {
    let mut tree = AvlTree::new();
    for k in [30, 20, 10] {
        tree.insert(k);
    }
    let snapshot = tree.snapshot();
    assert_eq!(snapshot.root, Some(30));
    assert_eq!(snapshot.node(&20).unwrap().left, Some(10));
    assert!(snapshot.nodes.iter().all(|n| n.height == 1));
}

#[test]
fn print_balanced_tree() {
    let mut tree = AvlTree::new();
    for k in [30, 20, 10] {
        tree.insert(k);
    }
    tree.rebalance();
    assert_eq!(
        tree.print(),
        "20 [h=2 bf=0]\n├─ ← 10 [h=1 bf=0]\n└─ → 30 [h=1 bf=0]"
    );
}

#[test]
fn print_naive_chain_with_stale_heights() {
    let mut tree = AvlTree::new();
    for k in [30, 20, 10] {
        tree.insert(k);
    }
    let expected = [
        "30 [h=1 bf=1]",
        "├─ ← 20 [h=1 bf=1]",
        "│  ├─ ← 10 [h=1 bf=0]",
        "│  └─ → ∅",
        "└─ → ∅",
    ]
    .join("\n");
    assert_eq!(tree.print(), expected);
}

#[test]
fn print_single_right_child() {
    let mut tree = AvlTree::new();
    tree.insert(10);
    tree.insert(20);
    assert_eq!(tree.rebalance(), None);
    assert_eq!(
        tree.print(),
        "10 [h=2 bf=-1]\n├─ ← ∅\n└─ → 20 [h=1 bf=0]"
    );
}

#[test]
fn print_long_chain() {
    const N: i32 = 3_000;
    let mut tree = AvlTree::new();
    for k in 0..N {
        tree.insert(k);
    }
    let out = tree.print();
    assert_eq!(out.lines().count(), 2 * N as usize - 1);
    assert!(out.starts_with("0 [h=1 bf=-1]\n├─ ← ∅\n└─ → 1 [h=1 bf=-1]"));
    assert!(out.ends_with(&format!("└─ → {} [h=1 bf=0]", N - 1)));
}
