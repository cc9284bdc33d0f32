//! Iterative in-order traversal.
//!
//! All traversal here is stack-driven: a splay tree can be temporarily
//! near-linear, and its depth is input-controlled, so recursive walks are
//! banned everywhere in this crate. The iterator stack holds the path of
//! pending right-spines; the top of the stack is always the next in-order
//! node. Iteration is one-shot and ascending.

use crate::arena::{NodeArena, NodeIdx};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::marker::PhantomData;

type Spine = SmallVec<[NodeIdx; 32]>;

/// Borrowing in-order iterator over a tree.
///
/// Holds the tree immutably for its whole lifetime, so mutating the tree
/// mid-iteration is rejected at compile time.
pub struct TreeIter<'a, K, V, A: NodeArena<K, V>> {
    arena: &'a A,
    stack: Spine,
    _marker: PhantomData<&'a (K, V)>,
}

impl<'a, K, V, A: NodeArena<K, V>> TreeIter<'a, K, V, A> {
    pub(crate) fn new(arena: &'a A, root: NodeIdx) -> Self {
        let mut iter = TreeIter {
            arena,
            stack: Spine::new(),
            _marker: PhantomData,
        };
        iter.push_left_spine(root);
        iter
    }

    /// Start at the first key `>= limit` instead of the minimum.
    ///
    /// Descends right past smaller keys without visiting them; at an exact
    /// match the match itself is pushed and its left subtree is skipped, so
    /// the sequence is the match plus everything to its right.
    pub(crate) fn with_limit(arena: &'a A, root: NodeIdx, limit: &K) -> Self
    where
        K: Ord,
    {
        let mut iter = TreeIter {
            arena,
            stack: Spine::new(),
            _marker: PhantomData,
        };
        let mut t = root;
        while !t.is_nil() {
            let node = arena.node(t);
            match node.key.cmp(limit) {
                Ordering::Less => t = node.right,
                Ordering::Greater => {
                    iter.stack.push(t);
                    t = node.left;
                }
                Ordering::Equal => {
                    iter.stack.push(t);
                    break;
                }
            }
        }
        iter
    }

    fn push_left_spine(&mut self, mut t: NodeIdx) {
        while !t.is_nil() {
            self.stack.push(t);
            t = self.arena.node(t).left;
        }
    }
}

impl<'a, K, V, A: NodeArena<K, V>> Iterator for TreeIter<'a, K, V, A> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let arena: &'a A = self.arena;
        let node = arena.node(idx);
        self.push_left_spine(node.right);
        Some((&node.key, &node.value))
    }
}

/// Consuming in-order drain: takes the arena, frees each node as it is
/// visited, and yields the owned pairs. Used for bulk moves (merge) and
/// anywhere a tree's contents must change ownership wholesale.
pub struct TreeDrain<K, V, A: NodeArena<K, V>> {
    arena: A,
    stack: Spine,
    _marker: PhantomData<(K, V)>,
}

impl<K, V, A: NodeArena<K, V>> TreeDrain<K, V, A> {
    pub(crate) fn new(arena: A, root: NodeIdx) -> Self {
        let mut drain = TreeDrain {
            arena,
            stack: Spine::new(),
            _marker: PhantomData,
        };
        drain.push_left_spine(root);
        drain
    }

    fn push_left_spine(&mut self, mut t: NodeIdx) {
        while !t.is_nil() {
            self.stack.push(t);
            t = self.arena.node(t).left;
        }
    }
}

impl<K, V, A: NodeArena<K, V>> Iterator for TreeDrain<K, V, A> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.arena.free(idx);
        self.push_left_spine(node.right);
        Some((node.key, node.value))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{int_tree, keys_of};

    #[test]
    fn full_traversal_is_ascending() {
        let tree = int_tree(&[5, 3, 8, 1, 4]);
        assert_eq!(keys_of(&tree), vec![1, 3, 4, 5, 8]);
    }

    #[test]
    fn traversal_of_empty_tree_is_empty() {
        let tree = int_tree(&[]);
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn limited_traversal_starts_at_first_key_at_or_above_limit() {
        let tree = int_tree(&[10, 20, 30, 40, 50]);
        let keys: Vec<i64> = tree.iter_from(&25).map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![30, 40, 50]);
    }

    #[test]
    fn limited_traversal_includes_exact_match_and_right_side() {
        let tree = int_tree(&[10, 20, 30, 40, 50]);
        let keys: Vec<i64> = tree.iter_from(&30).map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![30, 40, 50]);
    }

    #[test]
    fn limited_traversal_past_maximum_is_empty() {
        let tree = int_tree(&[10, 20, 30]);
        assert_eq!(tree.iter_from(&31).next(), None);
    }

    #[test]
    fn limited_traversal_below_minimum_is_full() {
        let tree = int_tree(&[10, 20, 30]);
        let keys: Vec<i64> = tree.iter_from(&-5).map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![10, 20, 30]);
    }

    #[test]
    fn drain_yields_owned_pairs_in_order() {
        let tree = int_tree(&[2, 9, 4, 7]);
        let keys: Vec<i64> = tree.into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![2, 4, 7, 9]);
    }

    #[test]
    fn deep_monotone_tree_traverses_without_recursion() {
        // Monotone inserts leave the tree a left spine; a recursive walk
        // would overflow here.
        let keys: Vec<i64> = (0..10_000).collect();
        let tree = int_tree(&keys);
        assert_eq!(tree.iter().count(), 10_000);
        let drained: Vec<i64> = tree.into_iter().map(|(k, _)| k).collect();
        assert_eq!(drained.len(), 10_000);
        assert!(drained.windows(2).all(|w| w[0] < w[1]));
    }
}
