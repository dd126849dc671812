//! Node trait definitions.
//!
//! Nodes are plain structs stored in a [`Vec`]-backed arena owned by the
//! tree. Every link is an `Option<u32>` index into that arena, and all
//! tree-manipulation functions take the arena slice and work with indices.

/// Structural links (`p`, `l`, `r`).
///
/// `p` is a back-reference only: a node is owned by exactly one parent slot
/// (or by the tree's root slot), never by its children.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Node carrying an ordered key.
pub trait KeyNode<K>: Node {
    fn key(&self) -> &K;
}
