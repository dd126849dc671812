//! Link helpers and in-order stepping over an index arena.
//!
//! Key-based helpers take the comparator as a closure so the same functions
//! serve natural-order trees and trees built with a custom comparator.

use std::cmp::Ordering;

use crate::types::{KeyNode, Node};

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Finds a node by key.
pub fn find<K, N, C>(arena: &[N], root: Option<u32>, key: &K, comparator: &C) -> Option<u32>
where
    N: KeyNode<K>,
    C: Fn(&K, &K) -> Ordering,
{
    let mut curr = root;
    while let Some(i) = curr {
        curr = match comparator(key, arena[i as usize].key()) {
            Ordering::Equal => return Some(i),
            Ordering::Less => get_l(arena, i),
            Ordering::Greater => get_r(arena, i),
        };
    }
    None
}

/// Where a key lands in a plain BST descent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertPosition {
    /// The tree is empty; the key becomes the root.
    Root,
    /// A node with an equal key already exists at this index.
    Occupied(u32),
    /// Free left slot of the node at this index.
    Left(u32),
    /// Free right slot of the node at this index.
    Right(u32),
}

/// Descends from `root` to the slot where `key` would be attached.
pub fn insert_position<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    comparator: &C,
) -> InsertPosition
where
    N: KeyNode<K>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(mut curr) = root else {
        return InsertPosition::Root;
    };

    loop {
        let (next, slot) = match comparator(key, arena[curr as usize].key()) {
            Ordering::Equal => return InsertPosition::Occupied(curr),
            Ordering::Less => (get_l(arena, curr), InsertPosition::Left(curr)),
            Ordering::Greater => (get_r(arena, curr), InsertPosition::Right(curr)),
        };
        match next {
            Some(next) => curr = next,
            None => return slot,
        }
    }
}

/// Attaches the detached `node` as the left child of `parent`.
pub fn attach_left<N: Node>(arena: &mut [N], node: u32, parent: u32) {
    set_l(arena, parent, Some(node));
    set_p(arena, node, Some(parent));
}

/// Attaches the detached `node` as the right child of `parent`.
pub fn attach_right<N: Node>(arena: &mut [N], node: u32, parent: u32) {
    set_r(arena, parent, Some(node));
    set_p(arena, node, Some(parent));
}
