//! Read-only view of a tree's shape for layout and display code.

use serde::Serialize;

use crate::avl::AvlNodeLike;
use crate::util::{get_l, get_r};

/// One node with the keys of its children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot<K> {
    pub key: K,
    pub left: Option<K>,
    pub right: Option<K>,
    /// Cached height; stale for nodes above a pending insert.
    pub height: u32,
}

/// Every node of a tree, in pre-order (root first).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot<K> {
    pub root: Option<K>,
    pub nodes: Vec<NodeSnapshot<K>>,
}

impl<K> TreeSnapshot<K> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, key: &K) -> Option<&NodeSnapshot<K>>
    where
        K: PartialEq,
    {
        self.nodes.iter().find(|n| &n.key == key)
    }
}

pub fn snapshot<K, N>(arena: &[N], root: Option<u32>) -> TreeSnapshot<K>
where
    K: Clone,
    N: AvlNodeLike<K>,
{
    let key_of = |i: u32| arena[i as usize].key().clone();
    let mut nodes = Vec::new();
    let mut stack: Vec<u32> = root.into_iter().collect();
    while let Some(i) = stack.pop() {
        let (l, r) = (get_l(arena, i), get_r(arena, i));
        nodes.push(NodeSnapshot {
            key: key_of(i),
            left: l.map(key_of),
            right: r.map(key_of),
            height: arena[i as usize].height(),
        });
        stack.extend(r);
        stack.extend(l);
    }

    TreeSnapshot {
        root: root.map(key_of),
        nodes,
    }
}
