//! Two-phase AVL tree.
//!
//! Insertion and balancing are separate calls: [`AvlTree::insert`] places a
//! key where a plain binary search tree would, and [`AvlTree::rebalance`]
//! walks the tree bottom-up, fixes any height imbalance with one of the four
//! AVL rotations and reports the rotation it applied. Callers that draw or
//! log the tree can observe the unbalanced shape between the two steps.
//!
//! Nodes live in a `Vec` arena owned by the tree; links are `Option<u32>`
//! indices, and rotations splice indices.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] and [`KeyNode`] traits |
//! [`util`] | link helpers, BST descent, in-order stepping |
//! [`avl`] | [`AvlTree`], rotations, rebalance pass, validator, printer |
//! [`rotation`] | [`Rotation`] report and [`RotationKind`] |
//! [`snapshot`] | [`TreeSnapshot`] for layout code |
//! [`cli`] | `avl-steps` session logic |

pub mod avl;
pub mod cli;
pub mod rotation;
pub mod snapshot;
pub mod types;
pub mod util;

pub use avl::{AvlError, AvlNode, AvlTree};
pub use rotation::{Rotation, RotationKind};
pub use snapshot::{NodeSnapshot, TreeSnapshot};
pub use types::{KeyNode, Node};
