//! Rotation report produced by a rebalance pass.

use std::fmt;

use serde::Serialize;

/// Which of the four AVL corrections was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RotationKind {
    /// Single right rotation (left-left case).
    Right,
    /// Single left rotation (right-right case).
    Left,
    /// Left rotation of the left child, then right rotation of the pivot.
    LeftRight,
    /// Right rotation of the right child, then left rotation of the pivot.
    RightLeft,
}

impl fmt::Display for RotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RotationKind::Right => "Right",
            RotationKind::Left => "Left",
            RotationKind::LeftRight => "LeftRight",
            RotationKind::RightLeft => "RightLeft",
        };
        f.write_str(name)
    }
}

/// A rotation together with the key of the node it was anchored at.
///
/// `pivot` is the node whose balance factor was out of range once its own
/// subtrees had been rebalanced.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Rotation<K> {
    pub kind: RotationKind,
    pub pivot: K,
}

impl<K> Rotation<K> {
    pub fn new(kind: RotationKind, pivot: K) -> Self {
        Self { kind, pivot }
    }
}

impl<K: fmt::Display> fmt::Display for Rotation<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rotation at {}", self.kind, self.pivot)
    }
}
