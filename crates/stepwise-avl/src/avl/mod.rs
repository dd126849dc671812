//! AVL tree with a separate rebalance step.

#[path = "AvlTree.rs"]
pub mod avl_tree;
pub mod types;
pub mod util;

pub use avl_tree::AvlTree;
pub use types::{AvlNode, AvlNodeLike};
pub use util::{
    assert_avl_tree, balance_factor, height, print, rebalance, rotate_left, rotate_right, AvlError,
};
