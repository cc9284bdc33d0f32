//! The keyed map operations every store in this crate is built from.
//!
//! A [`SplayTree`] owns its root index and its node arena, so there is no
//! way to hold a stale root across a mutation: every restructuring operation
//! goes through `&mut self`, and cross-tree moves consume the source tree.
//! Lookups that restructure (`find`, `insert_or_find`, `extract`) take the
//! tree mutably; `probe` and `first` are read-only and leave the shape alone.

use crate::arena::{ArenaFull, Node, NodeArena, NodeIdx, SlabArena};
use crate::iter::{TreeDrain, TreeIter};
use crate::splay::{leftmost, splay};
use crate::trace::trace;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::marker::PhantomData;

/// Result of [`SplayTree::insert_or_find`].
#[derive(Debug)]
pub enum InsertOutcome<'a, V> {
    /// The key was absent; a new node now holds the offered value.
    Inserted(&'a mut V),
    /// The key was present. The stored value is borrowed and the offered
    /// value is handed back untouched, so callers decide whether to keep,
    /// swap, or drop it.
    Found { existing: &'a mut V, rejected: V },
}

impl<'a, V> InsertOutcome<'a, V> {
    /// Whether this outcome created a new entry.
    pub fn is_new(&self) -> bool {
        matches!(self, InsertOutcome::Inserted(_))
    }
}

/// A self-adjusting ordered map from `K` to `V`.
///
/// Keys are unique under `K: Ord`; inserting a present key returns the
/// existing entry instead of creating a duplicate. Every keyed access
/// restructures the tree toward the accessed key, which is what gives the
/// amortized logarithmic bound without any stored balance data.
///
/// Trees are single-owner and single-threaded; exclusive access during
/// mutation is the `&mut self` borrow, nothing more.
#[derive(Debug, Clone)]
pub struct SplayTree<K, V, A = SlabArena<K, V>> {
    root: NodeIdx,
    arena: A,
    marker: PhantomData<(K, V)>,
}

impl<K, V> SplayTree<K, V, SlabArena<K, V>> {
    /// Create an empty tree over an unbounded slab arena.
    pub fn new() -> Self {
        Self::with_arena(SlabArena::new())
    }

    /// Create an empty tree whose arena refuses to hold more than `limit`
    /// live nodes.
    pub fn bounded(limit: usize) -> Self {
        Self::with_arena(SlabArena::bounded(limit))
    }
}

impl<K, V> Default for SplayTree<K, V, SlabArena<K, V>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, A: NodeArena<K, V>> SplayTree<K, V, A> {
    /// Create an empty tree over an injected arena.
    pub fn with_arena(arena: A) -> Self {
        SplayTree {
            root: NodeIdx::NIL,
            arena,
            marker: PhantomData,
        }
    }

    /// The node arena, for allocation accounting.
    pub fn arena(&self) -> &A {
        &self.arena
    }

    /// O(1): whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Number of entries, by full traversal. The base engine maintains no
    /// size field, so this is O(n); use `is_empty` for the common check.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Borrowing in-order iterator over all entries, ascending by key.
    pub fn iter(&self) -> TreeIter<'_, K, V, A> {
        TreeIter::new(&self.arena, self.root)
    }

    /// Free every node and leave the tree empty. Iterative; safe on
    /// adversarially deep trees.
    pub fn clear(&mut self) {
        let mut stack: SmallVec<[NodeIdx; 32]> = SmallVec::new();
        if !self.root.is_nil() {
            stack.push(self.root);
        }
        let mut freed = 0u64;
        while let Some(idx) = stack.pop() {
            let node = self.arena.free(idx);
            if !node.left.is_nil() {
                stack.push(node.left);
            }
            if !node.right.is_nil() {
                stack.push(node.right);
            }
            freed += 1;
        }
        self.root = NodeIdx::NIL;
        trace!(freed, "tree cleared");
    }

    /// Smallest entry, found by walking left without restructuring.
    pub fn first(&self) -> Option<(&K, &V)> {
        let idx = leftmost(&self.arena, self.root);
        if idx.is_nil() {
            return None;
        }
        let node = self.arena.node(idx);
        Some((&node.key, &node.value))
    }
}

impl<K: Ord, V, A: NodeArena<K, V>> SplayTree<K, V, A> {
    /// Insert `value` under `key`, or find the entry already there.
    ///
    /// The accessed entry ends up at the root either way. On a hit the
    /// offered value is returned inside [`InsertOutcome::Found`] rather than
    /// silently dropped.
    pub fn insert_or_find(
        &mut self,
        key: K,
        value: V,
    ) -> Result<InsertOutcome<'_, V>, ArenaFull> {
        if self.root.is_nil() {
            let idx = self.arena.alloc(key, value)?;
            self.root = idx;
            return Ok(InsertOutcome::Inserted(&mut self.arena.node_mut(idx).value));
        }
        self.root = splay(&mut self.arena, self.root, &key);
        match key.cmp(&self.arena.node(self.root).key) {
            Ordering::Equal => {
                let existing = &mut self.arena.node_mut(self.root).value;
                Ok(InsertOutcome::Found {
                    existing,
                    rejected: value,
                })
            }
            Ordering::Less => {
                // The splayed root is key's successor: it becomes the new
                // root's right child and cedes its left subtree.
                let old_root = self.root;
                let old_left = self.arena.node(old_root).left;
                let idx = self.arena.alloc(key, value)?;
                {
                    let node = self.arena.node_mut(idx);
                    node.left = old_left;
                    node.right = old_root;
                }
                self.arena.node_mut(old_root).left = NodeIdx::NIL;
                self.root = idx;
                Ok(InsertOutcome::Inserted(&mut self.arena.node_mut(idx).value))
            }
            Ordering::Greater => {
                let old_root = self.root;
                let old_right = self.arena.node(old_root).right;
                let idx = self.arena.alloc(key, value)?;
                {
                    let node = self.arena.node_mut(idx);
                    node.right = old_right;
                    node.left = old_root;
                }
                self.arena.node_mut(old_root).right = NodeIdx::NIL;
                self.root = idx;
                Ok(InsertOutcome::Inserted(&mut self.arena.node_mut(idx).value))
            }
        }
    }

    /// Splaying lookup: on a hit the entry is now the root.
    pub fn find(&mut self, key: &K) -> Option<&V> {
        if self.root.is_nil() {
            return None;
        }
        self.root = splay(&mut self.arena, self.root, key);
        let node = self.arena.node(self.root);
        if node.key == *key {
            Some(&node.value)
        } else {
            None
        }
    }

    /// Splaying lookup with mutable access to the value.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        if self.root.is_nil() {
            return None;
        }
        self.root = splay(&mut self.arena, self.root, key);
        let node = self.arena.node_mut(self.root);
        if node.key == *key {
            Some(&mut node.value)
        } else {
            None
        }
    }

    /// Membership probe by plain binary search. Never restructures, so it is
    /// the right lookup when only membership matters and the tree's shape
    /// should not be disturbed.
    pub fn probe(&self, key: &K) -> Option<&V> {
        let mut t = self.root;
        while !t.is_nil() {
            let node = self.arena.node(t);
            match key.cmp(&node.key) {
                Ordering::Less => t = node.left,
                Ordering::Greater => t = node.right,
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Detach the entry under `key` and hand it to the caller.
    ///
    /// The remaining subtrees are rejoined by splaying the left subtree on
    /// the departed key, which leaves its maximum at the root with a vacant
    /// right slot for the right subtree; this second splay is what keeps
    /// extraction amortized rather than remove-and-rebuild.
    pub fn extract(&mut self, key: &K) -> Option<(K, V)> {
        if self.root.is_nil() {
            return None;
        }
        self.root = splay(&mut self.arena, self.root, key);
        if self.arena.node(self.root).key != *key {
            return None;
        }
        let detached = self.detach_root();
        Some(detached)
    }

    /// Detach whatever entry currently sits at the root; used for bulk
    /// draining when the caller does not care which key comes out.
    pub fn extract_root(&mut self) -> Option<(K, V)> {
        if self.root.is_nil() {
            return None;
        }
        Some(self.detach_root())
    }

    /// Remove the entry under `key`, dropping it. Returns whether anything
    /// was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.extract(key).is_some()
    }

    /// Iterator over entries with keys `>= limit`, ascending. Smaller keys
    /// are skipped structurally, not filtered.
    pub fn iter_from(&self, limit: &K) -> TreeIter<'_, K, V, A> {
        TreeIter::with_limit(&self.arena, self.root, limit)
    }

    fn detach_root(&mut self) -> (K, V) {
        let Node {
            key,
            value,
            left,
            right,
        } = self.arena.free(self.root);
        self.root = if left.is_nil() {
            right
        } else {
            let joined = splay(&mut self.arena, left, &key);
            debug_assert!(
                self.arena.node(joined).right.is_nil(),
                "left subtree splayed on its upper bound must have a vacant right slot"
            );
            self.arena.node_mut(joined).right = right;
            joined
        };
        (key, value)
    }
}

impl<K, V, A: NodeArena<K, V>> IntoIterator for SplayTree<K, V, A> {
    type Item = (K, V);
    type IntoIter = TreeDrain<K, V, A>;

    fn into_iter(self) -> Self::IntoIter {
        let SplayTree { root, arena, .. } = self;
        TreeDrain::new(arena, root)
    }
}

impl<'a, K, V, A: NodeArena<K, V>> IntoIterator for &'a SplayTree<K, V, A> {
    type Item = (&'a K, &'a V);
    type IntoIter = TreeIter<'a, K, V, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
