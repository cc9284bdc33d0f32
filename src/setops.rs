//! Set algebra over whole trees, layered on the map operations.
//!
//! Nothing here touches node links directly: union, intersection, and the
//! shared-element probe are written in terms of insert-or-find, probe, find,
//! extract-root, and the iterative traversals, so their correctness reduces
//! to the correctness of those primitives.

use crate::arena::{ArenaFull, NodeArena};
use crate::trace::debug;
use crate::tree::SplayTree;

impl<K: Ord, V, A: NodeArena<K, V>> SplayTree<K, V, A> {
    /// Destructive union: move every entry of `other` into `self`.
    ///
    /// `other` is consumed and drained through the iterative traversal;
    /// entries whose keys already exist in `self` are dropped. Returns
    /// whether `self` gained at least one new key.
    pub fn merge(&mut self, other: Self) -> Result<bool, ArenaFull> {
        let mut gained = false;
        for (key, value) in other {
            if self.insert_or_find(key, value)?.is_new() {
                gained = true;
            }
        }
        debug!(gained, "merge complete");
        Ok(gained)
    }

    /// Build a new tree of the entries whose keys occur in both trees.
    ///
    /// Traverses `other` and probes `self` by plain binary search, so
    /// `self`'s shape is left exactly as it was; the entries cloned into the
    /// result are `other`'s.
    pub fn intersection(&self, other: &Self) -> Result<Self, ArenaFull>
    where
        K: Clone,
        V: Clone,
        A: Default,
    {
        let mut result = Self::with_arena(A::default());
        for (key, value) in other.iter() {
            if self.probe(key).is_some() {
                result.insert_or_find(key.clone(), value.clone())?;
            }
        }
        Ok(result)
    }

    /// Keep only the entries whose keys `other` also holds, draining and
    /// rebuilding `self` in the process. Returns how many entries were
    /// discarded. `other` is probed with splaying finds, so its shape moves.
    pub fn destructive_intersect(&mut self, other: &mut Self) -> Result<usize, ArenaFull>
    where
        A: Default,
    {
        let mut kept = Self::with_arena(A::default());
        let mut discarded = 0;
        while let Some((key, value)) = self.extract_root() {
            if other.find(&key).is_some() {
                kept.insert_or_find(key, value)?;
            } else {
                discarded += 1;
            }
        }
        debug_assert!(self.is_empty());
        *self = kept;
        debug!(discarded, "destructive intersection complete");
        Ok(discarded)
    }

    /// Whether the two trees share at least one key. Early-exits on the
    /// first hit. Probes `self` with splaying finds: finding the shared key
    /// moves it to `self`'s root, a deliberate side effect that speeds up
    /// the accesses that typically follow a successful probe.
    pub fn shared_element(&mut self, other: &Self) -> bool {
        for (key, _) in other.iter() {
            if self.find(key).is_some() {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{int_tree, keys_of};
    use crate::tree::SplayTree;

    #[test]
    fn merge_moves_everything_and_reports_gain() {
        let mut a = int_tree(&[1, 3, 5]);
        let b = int_tree(&[2, 3, 6]);
        let gained = a.merge(b).unwrap();
        assert!(gained);
        assert_eq!(keys_of(&a), vec![1, 2, 3, 5, 6]);
    }

    #[test]
    fn merge_of_subset_reports_no_gain() {
        let mut a = int_tree(&[1, 2, 3]);
        let b = int_tree(&[2, 3]);
        let gained = a.merge(b).unwrap();
        assert!(!gained, "no new keys arrived");
        assert_eq!(keys_of(&a), vec![1, 2, 3]);
    }

    #[test]
    fn merge_into_empty_tree() {
        let mut a = int_tree(&[]);
        let b = int_tree(&[4, 2]);
        assert!(a.merge(b).unwrap());
        assert_eq!(keys_of(&a), vec![2, 4]);
    }

    #[test]
    fn intersection_leaves_first_tree_untouched() {
        let a = int_tree(&[1, 2, 3]);
        let b = int_tree(&[2, 3, 4]);
        let both = a.intersection(&b).unwrap();
        assert_eq!(keys_of(&both), vec![2, 3]);
        assert_eq!(keys_of(&a), vec![1, 2, 3]);
        assert_eq!(keys_of(&b), vec![2, 3, 4]);
    }

    #[test]
    fn intersection_with_disjoint_tree_is_empty() {
        let a = int_tree(&[1, 3]);
        let b = int_tree(&[2, 4]);
        assert!(a.intersection(&b).unwrap().is_empty());
    }

    #[test]
    fn intersection_count_bounded_by_smaller_side() {
        let a = int_tree(&[1, 2, 3, 4, 5]);
        let b = int_tree(&[4, 5, 6]);
        let both = a.intersection(&b).unwrap();
        assert!(both.count() <= a.count().min(b.count()));
    }

    #[test]
    fn destructive_intersect_drains_self_and_counts_discards() {
        let mut a = int_tree(&[1, 2, 3, 5, 8]);
        let mut b = int_tree(&[2, 3, 13]);
        let expected = a.intersection(&b).unwrap();
        let discarded = a.destructive_intersect(&mut b).unwrap();
        assert_eq!(discarded, 3, "1, 5, and 8 had no partner");
        assert_eq!(keys_of(&a), keys_of(&expected));
    }

    #[test]
    fn destructive_intersect_with_empty_other_empties_self() {
        let mut a = int_tree(&[1, 2, 3]);
        let mut b = int_tree(&[]);
        let discarded = a.destructive_intersect(&mut b).unwrap();
        assert_eq!(discarded, 3);
        assert!(a.is_empty());
    }

    #[test]
    fn shared_element_finds_common_key() {
        let mut a = int_tree(&[10, 20, 30]);
        let b = int_tree(&[5, 20, 25]);
        assert!(a.shared_element(&b));
        assert_eq!(keys_of(&a), vec![10, 20, 30], "probing must not lose entries");
    }

    #[test]
    fn shared_element_on_disjoint_trees_is_false() {
        let mut a = int_tree(&[1, 2]);
        let b = int_tree(&[3, 4]);
        assert!(!a.shared_element(&b));
    }

    #[test]
    fn merge_carries_values() {
        let mut a: SplayTree<i64, &str> = SplayTree::new();
        a.insert_or_find(1, "one").unwrap();
        let mut b: SplayTree<i64, &str> = SplayTree::new();
        b.insert_or_find(2, "two").unwrap();
        b.insert_or_find(1, "dup").unwrap();
        a.merge(b).unwrap();
        assert_eq!(a.find(&1), Some(&"one"), "existing entry wins on collision");
        assert_eq!(a.find(&2), Some(&"two"));
    }
}
