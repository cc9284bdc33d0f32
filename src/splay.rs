//! The top-down restructuring pass shared by every keyed store.
//!
//! `splay` brings the node whose key is nearest `key` to the root in a single
//! downward walk. Two accumulator chains collect the nodes peeled off to each
//! side: the left track holds everything known to be smaller than `key`, the
//! right track everything larger. A same-direction descent (zig-zig) rotates
//! before linking, which is what halves the depth of the accessed path and
//! gives the amortized logarithmic bound; the opposite-direction case
//! (zig-zag) falls out of link-then-continue without a second rotation. There
//! is no separate rebalancing pass and no parent links.

use crate::arena::{NodeArena, NodeIdx};
use std::cmp::Ordering;

/// Restructure the tree rooted at `t` so the node nearest `key` is the root.
///
/// Returns the new root. On an empty tree this is `NIL`; if `key` is absent
/// the root ends up at the in-order neighbor where `key` would sit, which is
/// exactly what insert-or-find needs to decide attachment direction. The node
/// set and the search-tree order are preserved.
pub(crate) fn splay<K, V, A>(arena: &mut A, mut t: NodeIdx, key: &K) -> NodeIdx
where
    K: Ord,
    A: NodeArena<K, V>,
{
    if t.is_nil() {
        return t;
    }

    // Roots and tails of the two accumulator tracks. A linked node keeps its
    // stale child pointer until the final splice overwrites it.
    let mut left_root = NodeIdx::NIL;
    let mut left_tail = NodeIdx::NIL;
    let mut right_root = NodeIdx::NIL;
    let mut right_tail = NodeIdx::NIL;

    loop {
        match key.cmp(&arena.node(t).key) {
            Ordering::Equal => break,
            Ordering::Less => {
                let mut child = arena.node(t).left;
                if child.is_nil() {
                    break;
                }
                if *key < arena.node(child).key {
                    // Zig-zig: rotate right around t before linking.
                    let child_right = arena.node(child).right;
                    arena.node_mut(t).left = child_right;
                    arena.node_mut(child).right = t;
                    t = child;
                    child = arena.node(t).left;
                    if child.is_nil() {
                        break;
                    }
                }
                // Everything from t rightward is larger than key.
                if right_tail.is_nil() {
                    right_root = t;
                } else {
                    arena.node_mut(right_tail).left = t;
                }
                right_tail = t;
                t = child;
            }
            Ordering::Greater => {
                let mut child = arena.node(t).right;
                if child.is_nil() {
                    break;
                }
                if *key > arena.node(child).key {
                    // Zag-zag: rotate left around t before linking.
                    let child_left = arena.node(child).left;
                    arena.node_mut(t).right = child_left;
                    arena.node_mut(child).left = t;
                    t = child;
                    child = arena.node(t).right;
                    if child.is_nil() {
                        break;
                    }
                }
                if left_tail.is_nil() {
                    left_root = t;
                } else {
                    arena.node_mut(left_tail).right = t;
                }
                left_tail = t;
                t = child;
            }
        }
    }

    // Splice both tracks onto the stopping node's vacated child slots.
    let (t_left, t_right) = {
        let node = arena.node(t);
        (node.left, node.right)
    };
    if left_tail.is_nil() {
        left_root = t_left;
    } else {
        arena.node_mut(left_tail).right = t_left;
    }
    if right_tail.is_nil() {
        right_root = t_right;
    } else {
        arena.node_mut(right_tail).left = t_right;
    }
    let node = arena.node_mut(t);
    node.left = left_root;
    node.right = right_root;
    t
}

/// Walk to the smallest key without restructuring anything.
pub(crate) fn leftmost<K, V, A>(arena: &A, mut t: NodeIdx) -> NodeIdx
where
    A: NodeArena<K, V>,
{
    if t.is_nil() {
        return t;
    }
    loop {
        let left = arena.node(t).left;
        if left.is_nil() {
            return t;
        }
        t = left;
    }
}
