use crate::types::{KeyNode, Node};

/// Arena node of an [`AvlTree`](super::AvlTree).
#[derive(Clone, Debug)]
pub struct AvlNode<K> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    /// Cached subtree height, `1 + max(height(l), height(r))`. May be stale
    /// between an insert and the next rebalance.
    pub height: u32,
}

impl<K> AvlNode<K> {
    pub fn new(k: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            height: 1,
        }
    }
}

impl<K> Node for AvlNode<K> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K> KeyNode<K> for AvlNode<K> {
    fn key(&self) -> &K {
        &self.k
    }
}

/// AVL-specific node behavior.
pub trait AvlNodeLike<K>: KeyNode<K> {
    fn height(&self) -> u32;
    fn set_height(&mut self, height: u32);
}

impl<K> AvlNodeLike<K> for AvlNode<K> {
    fn height(&self) -> u32 {
        self.height
    }

    fn set_height(&mut self, height: u32) {
        self.height = height;
    }
}
