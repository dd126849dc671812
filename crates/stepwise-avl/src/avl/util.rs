use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use tracing::{debug, trace};

use crate::rotation::{Rotation, RotationKind};
use crate::types::Node;
use crate::util::{first, get_l, get_p, get_r, next, set_l, set_p, set_r};

use super::types::AvlNodeLike;

/// Cached height of `node`, `0` for an absent child.
#[inline]
pub fn height<K, N>(arena: &[N], node: Option<u32>) -> u32
where
    N: AvlNodeLike<K>,
{
    node.map_or(0, |i| arena[i as usize].height())
}

/// `height(left) - height(right)` from the children's cached heights, `0` for
/// an absent node.
#[inline]
pub fn balance_factor<K, N>(arena: &[N], node: Option<u32>) -> i32
where
    N: AvlNodeLike<K>,
{
    let Some(i) = node else {
        return 0;
    };
    height(arena, get_l(arena, i)) as i32 - height(arena, get_r(arena, i)) as i32
}

#[inline]
fn update_height<K, N>(arena: &mut [N], node: u32)
where
    N: AvlNodeLike<K>,
{
    let h = 1 + height(arena, get_l(arena, node)).max(height(arena, get_r(arena, node)));
    arena[node as usize].set_height(h);
}

/// Right rotation at `y`. Returns the new subtree root (`y`'s former left
/// child), which inherits `y`'s parent back-link. The caller relinks the
/// returned index into the slot that held `y`.
pub fn rotate_right<K, N>(arena: &mut [N], y: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let Some(x) = get_l(arena, y) else {
        return y;
    };
    let p = get_p(arena, y);
    let t = get_r(arena, x);

    set_l(arena, y, t);
    if let Some(t) = t {
        set_p(arena, t, Some(y));
    }
    set_r(arena, x, Some(y));
    set_p(arena, y, Some(x));
    set_p(arena, x, p);

    update_height(arena, y);
    update_height(arena, x);
    x
}

/// Left rotation at `x`, the mirror of [`rotate_right`].
pub fn rotate_left<K, N>(arena: &mut [N], x: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let Some(y) = get_r(arena, x) else {
        return x;
    };
    let p = get_p(arena, x);
    let t = get_l(arena, y);

    set_r(arena, x, t);
    if let Some(t) = t {
        set_p(arena, t, Some(x));
    }
    set_l(arena, y, Some(x));
    set_p(arena, x, Some(y));
    set_p(arena, y, p);

    update_height(arena, x);
    update_height(arena, y);
    y
}

/// Rebalances the whole tree in one post-order pass.
///
/// Returns the new root and every rotation applied, in post-order. Under the
/// insert-then-rebalance discipline the trail holds at most one entry.
///
/// The walk keeps its own stack, so a chain left by bulk inserts costs heap
/// memory proportional to its length rather than call-stack depth.
pub fn rebalance<K, N>(arena: &mut [N], root: Option<u32>) -> (Option<u32>, Vec<Rotation<K>>)
where
    K: Clone,
    N: AvlNodeLike<K>,
{
    let mut trail = Vec::new();
    let Some(mut top) = root else {
        return (None, trail);
    };

    // `(node, children_done)` entries; right is pushed before left so the
    // left subtree finishes first.
    let mut stack: Vec<(u32, bool)> = vec![(top, false)];
    while let Some((n, children_done)) = stack.pop() {
        if !children_done {
            stack.push((n, true));
            stack.extend(get_r(arena, n).map(|r| (r, false)));
            stack.extend(get_l(arena, n).map(|l| (l, false)));
            continue;
        }

        let parent = get_p(arena, n);
        let subtree = balance_node(arena, n, &mut trail);
        if subtree == n {
            continue;
        }
        match parent {
            Some(p) if get_l(arena, p) == Some(n) => set_l(arena, p, Some(subtree)),
            Some(p) => set_r(arena, p, Some(subtree)),
            None => top = subtree,
        }
    }

    set_p(arena, top, None);
    trace!(rotations = trail.len(), "rebalance pass done");
    (Some(top), trail)
}

/// Fixes `n` once both of its subtrees are final. Returns the root of the
/// subtree that now stands in `n`'s slot; it inherits `n`'s parent link, but
/// the parent's child slot is left for the caller.
fn balance_node<K, N>(arena: &mut [N], n: u32, trail: &mut Vec<Rotation<K>>) -> u32
where
    K: Clone,
    N: AvlNodeLike<K>,
{
    update_height(arena, n);
    let balance = balance_factor(arena, Some(n));
    let l = get_l(arena, n);
    let r = get_r(arena, n);

    // Priority order matters: the first matching case wins.
    let (kind, root) = if balance > 1 && balance_factor(arena, l) >= 0 {
        (RotationKind::Right, rotate_right(arena, n))
    } else if balance < -1 && balance_factor(arena, r) <= 0 {
        (RotationKind::Left, rotate_left(arena, n))
    } else if balance > 1 && balance_factor(arena, l) < 0 {
        if let Some(l) = l {
            let l = rotate_left(arena, l);
            set_l(arena, n, Some(l));
        }
        (RotationKind::LeftRight, rotate_right(arena, n))
    } else if balance < -1 && balance_factor(arena, r) > 0 {
        if let Some(r) = r {
            let r = rotate_right(arena, r);
            set_r(arena, n, Some(r));
        }
        (RotationKind::RightLeft, rotate_left(arena, n))
    } else {
        return n;
    };

    debug!(?kind, balance, "rotation applied");
    trail.push(Rotation::new(kind, arena[n as usize].key().clone()));
    root
}

/// First structural violation found by [`assert_avl_tree`].
///
/// Keys are rendered with their `Debug` representation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AvlError {
    #[error("root {key} has a parent link")]
    RootHasParent { key: String },
    #[error("child of {key} does not link back to it")]
    BrokenParentLink { key: String },
    #[error("cached height of {key} is {cached}, actual height is {actual}")]
    HeightMismatch { key: String, cached: u32, actual: u32 },
    #[error("balance factor of {key} is {bf}")]
    Unbalanced { key: String, bf: i32 },
    #[error("key order violated: {prev} is not less than {next}")]
    OrderViolated { prev: String, next: String },
}

/// Validates links, cached heights and key order, and, if `check_balance`,
/// the AVL balance of every node.
///
/// Cached heights are only guaranteed after a rebalance pass, so this reports
/// a [`AvlError::HeightMismatch`] for a tree with pending inserts.
pub fn assert_avl_tree<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
    check_balance: bool,
) -> Result<(), AvlError>
where
    K: Debug,
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err(AvlError::RootHasParent {
            key: format!("{:?}", arena[root as usize].key()),
        });
    }

    let key_of = |i: u32| format!("{:?}", arena[i as usize].key());

    // Post-order walk with `(node, parent, children_done)` entries; `actual`
    // holds the recomputed height of every finished node.
    let mut actual = vec![0u32; arena.len()];
    let mut stack: Vec<(u32, Option<u32>, bool)> = vec![(root, None, false)];
    while let Some((n, parent, children_done)) = stack.pop() {
        if !children_done {
            if let Some(p) = parent {
                if get_p(arena, n) != Some(p) {
                    return Err(AvlError::BrokenParentLink { key: key_of(p) });
                }
            }
            stack.push((n, parent, true));
            stack.extend(get_r(arena, n).map(|r| (r, Some(n), false)));
            stack.extend(get_l(arena, n).map(|l| (l, Some(n), false)));
            continue;
        }

        let lh = get_l(arena, n).map_or(0, |l| actual[l as usize]);
        let rh = get_r(arena, n).map_or(0, |r| actual[r as usize]);
        let h = 1 + lh.max(rh);
        let cached = arena[n as usize].height();
        if cached != h {
            return Err(AvlError::HeightMismatch {
                key: key_of(n),
                cached,
                actual: h,
            });
        }

        let bf = lh as i32 - rh as i32;
        if check_balance && !(-1..=1).contains(&bf) {
            return Err(AvlError::Unbalanced { key: key_of(n), bf });
        }
        actual[n as usize] = h;
    }

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            let (a, b) = (arena[prev as usize].key(), arena[i as usize].key());
            if comparator(a, b) != Ordering::Less {
                return Err(AvlError::OrderViolated {
                    prev: format!("{a:?}"),
                    next: format!("{b:?}"),
                });
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// `(node, parent's tab, is last sibling, arrow)`, popped in pre-order.
type PrintFrame = (Option<u32>, String, bool, &'static str);

fn push_print_children<N: Node>(arena: &[N], stack: &mut Vec<PrintFrame>, i: u32, tab: String) {
    let (l, r) = (get_l(arena, i), get_r(arena, i));
    if l.is_some() || r.is_some() {
        stack.push((r, tab.clone(), true, "→"));
        stack.push((l, tab, false, "←"));
    }
}

fn print_label<K, N>(arena: &[N], node: Option<u32>) -> String
where
    K: Display,
    N: AvlNodeLike<K>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            format!(
                "{} [h={} bf={}]",
                n.key(),
                n.height(),
                balance_factor(arena, Some(i))
            )
        }
    }
}

/// Debug printer in `tree-dump` style: one line per node with cached height
/// and balance factor, `←`/`→` for the side and `∅` for a missing sibling.
///
/// Lines below `node` are indented starting from `tab`.
pub fn print<K, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Display,
    N: AvlNodeLike<K>,
{
    let mut out = print_label(arena, node);

    let mut stack: Vec<PrintFrame> = Vec::new();
    if let Some(i) = node {
        push_print_children(arena, &mut stack, i, tab.to_string());
    }

    while let Some((child, tab, is_last, arrow)) = stack.pop() {
        let branch = if is_last { "└─" } else { "├─" };
        out.push('\n');
        out.push_str(&tab);
        out.push_str(branch);
        out.push(' ');
        out.push_str(arrow);
        out.push(' ');
        out.push_str(&print_label(arena, child));
        if let Some(i) = child {
            let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
            push_print_children(arena, &mut stack, i, child_tab);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlNode;
    use crate::util::{attach_left, attach_right};

    fn cmp(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn rotate_right_moves_inner_subtree() {
        // 30 <- 20 <- 10, with 25 as the right child of 20.
        let mut arena = vec![
            AvlNode::new(30),
            AvlNode::new(20),
            AvlNode::new(10),
            AvlNode::new(25),
        ];
        attach_left(&mut arena, 1, 0);
        attach_left(&mut arena, 2, 1);
        attach_right(&mut arena, 3, 1);

        let root = rotate_right(&mut arena, 0);
        assert_eq!(root, 1);
        assert_eq!(arena[1].p, None);
        assert_eq!(arena[1].r, Some(0));
        assert_eq!(arena[0].p, Some(1));
        assert_eq!(arena[0].l, Some(3));
        assert_eq!(arena[3].p, Some(0));
        assert_eq!(arena[0].height, 2);
        assert_eq!(arena[1].height, 3);
    }

    #[test]
    fn rotate_without_child_is_noop() {
        let mut arena = vec![AvlNode::new(1)];
        assert_eq!(rotate_left(&mut arena, 0), 0);
        assert_eq!(rotate_right(&mut arena, 0), 0);
    }

    #[test]
    fn rebalance_of_empty_tree() {
        let mut arena: Vec<AvlNode<i32>> = Vec::new();
        let (root, trail) = rebalance(&mut arena, None);
        assert_eq!(root, None);
        assert!(trail.is_empty());
    }

    #[test]
    fn validator_reports_order_violation() {
        let mut arena = vec![AvlNode::new(1), AvlNode::new(2)];
        attach_left(&mut arena, 1, 0);
        arena[0].height = 2;
        assert_eq!(
            assert_avl_tree(&arena, Some(0), &cmp, true),
            Err(AvlError::OrderViolated {
                prev: "2".to_string(),
                next: "1".to_string()
            })
        );
    }

    #[test]
    fn validator_reports_root_parent_and_broken_link() {
        let mut arena = vec![AvlNode::new(2), AvlNode::new(1)];
        arena[0].p = Some(1);
        assert_eq!(
            assert_avl_tree(&arena, Some(0), &cmp, true),
            Err(AvlError::RootHasParent {
                key: "2".to_string()
            })
        );

        arena[0].p = None;
        arena[0].l = Some(1);
        arena[0].height = 2;
        assert_eq!(
            assert_avl_tree(&arena, Some(0), &cmp, true),
            Err(AvlError::BrokenParentLink {
                key: "2".to_string()
            })
        );
    }
}
