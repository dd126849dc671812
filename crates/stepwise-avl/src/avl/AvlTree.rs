use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use tracing::trace;

use crate::rotation::Rotation;
use crate::snapshot::{snapshot, TreeSnapshot};
use crate::util::{attach_left, attach_right, find, first, insert_position, next, InsertPosition};

use super::types::AvlNode;
use super::util::{assert_avl_tree, print, rebalance, AvlError};

fn natural_order<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}

/// Two-phase AVL tree.
///
/// [`insert`](Self::insert) attaches a key where a plain BST would put it and
/// leaves heights alone; [`rebalance`](Self::rebalance) then restores the AVL
/// invariant in one post-order pass and reports the rotation it applied.
/// Splitting the two lets a caller observe the unbalanced shape in between.
pub struct AvlTree<K, C = fn(&K, &K) -> Ordering>
where
    C: Fn(&K, &K) -> Ordering,
{
    root: Option<u32>,
    comparator: C,
    arena: Vec<AvlNode<K>>,
    last_inserted: Option<K>,
}

impl<K> AvlTree<K, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(natural_order::<K>)
    }
}

impl<K> Default for AvlTree<K, fn(&K, &K) -> Ordering>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> AvlTree<K, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    /// `comparator` must be a total order over every key ever inserted.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator,
            arena: Vec::new(),
            last_inserted: None,
        }
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    /// Nodes are never removed, so this is also the arena length.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Cached height of the root, `0` when empty.
    pub fn height(&self) -> u32 {
        self.root.map_or(0, |r| self.arena[r as usize].height)
    }

    pub fn contains(&self, key: &K) -> bool {
        find(&self.arena, self.root, key, &self.comparator).is_some()
    }

    /// Key of the most recent [`insert`](Self::insert) call, duplicates
    /// included.
    pub fn last_inserted(&self) -> Option<&K> {
        self.last_inserted.as_ref()
    }

    /// # Panics
    ///
    /// If `idx` is not an index handed out by this tree.
    pub fn node(&self, idx: u32) -> &AvlNode<K> {
        &self.arena[idx as usize]
    }

    /// # Panics
    ///
    /// If `idx` is not an index handed out by this tree.
    pub fn key(&self, idx: u32) -> &K {
        &self.arena[idx as usize].k
    }

    pub fn first(&self) -> Option<u32> {
        first(&self.arena, self.root)
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        next(&self.arena, curr)
    }

    /// Node indices in key order.
    pub fn entries(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::successors(self.first(), move |&i| self.next(i))
    }

    /// Keys in order.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries().map(move |i| self.key(i))
    }

    pub fn snapshot(&self) -> TreeSnapshot<K>
    where
        K: Clone,
    {
        snapshot(&self.arena, self.root)
    }

    pub fn print(&self) -> String
    where
        K: Display,
    {
        print(&self.arena, self.root, "")
    }

    /// Full check, including the balance of every node. Holds after each
    /// rebalance when at most one key was inserted since the previous one.
    pub fn assert_valid(&self) -> Result<(), AvlError>
    where
        K: Debug,
    {
        assert_avl_tree(&self.arena, self.root, &self.comparator, true)
    }

    /// Links, key order and cached heights, without the balance check.
    /// Holds after any rebalance pass.
    pub fn assert_consistent(&self) -> Result<(), AvlError>
    where
        K: Debug,
    {
        assert_avl_tree(&self.arena, self.root, &self.comparator, false)
    }

    fn push_node(&mut self, key: K) -> u32 {
        self.arena.push(AvlNode::new(key));
        (self.arena.len() - 1) as u32
    }
}

impl<K, C> AvlTree<K, C>
where
    K: Clone,
    C: Fn(&K, &K) -> Ordering,
{
    /// Plain BST insert. An equal key is dropped and `false` returned.
    pub fn insert(&mut self, key: K) -> bool {
        self.last_inserted = Some(key.clone());
        let position = insert_position(&self.arena, self.root, &key, &self.comparator);
        let node = match position {
            InsertPosition::Occupied(_) => {
                trace!("duplicate key dropped");
                return false;
            }
            InsertPosition::Root => {
                let node = self.push_node(key);
                self.root = Some(node);
                node
            }
            InsertPosition::Left(parent) => {
                let node = self.push_node(key);
                attach_left(&mut self.arena, node, parent);
                node
            }
            InsertPosition::Right(parent) => {
                let node = self.push_node(key);
                attach_right(&mut self.arena, node, parent);
                node
            }
        };
        trace!(node, len = self.arena.len(), "key inserted");
        true
    }

    /// Rebalances the tree and returns the last rotation applied, if any.
    pub fn rebalance(&mut self) -> Option<Rotation<K>> {
        self.rebalance_trail().pop()
    }

    /// Like [`rebalance`](Self::rebalance), but returns every rotation of the
    /// pass in post-order.
    pub fn rebalance_trail(&mut self) -> Vec<Rotation<K>> {
        let (root, trail) = rebalance(&mut self.arena, self.root);
        self.root = root;
        trail
    }
}

impl<K, C> Debug for AvlTree<K, C>
where
    K: Debug,
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvlTree")
            .field("root", &self.root)
            .field("arena", &self.arena)
            .field("last_inserted", &self.last_inserted)
            .finish()
    }
}
