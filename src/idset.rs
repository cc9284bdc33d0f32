//! Identity-keyed sets.
//!
//! Subsumption and variable-constraint bookkeeping track *which* objects are
//! in play, keyed by object identity (a `Copy + Ord` id), with no payload.
//! This is the thinnest instantiation of the engine: payload `()`, plus the
//! whole set-algebra surface.

use crate::arena::ArenaFull;
use crate::tree::SplayTree;

/// A set of ids over the self-adjusting tree engine.
#[derive(Debug)]
pub struct IdSet<K: Ord + Copy> {
    tree: SplayTree<K, ()>,
}

impl<K: Ord + Copy> Default for IdSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> IdSet<K> {
    pub fn new() -> Self {
        IdSet {
            tree: SplayTree::new(),
        }
    }

    /// Add `id`. Returns whether it was newly added.
    pub fn insert(&mut self, id: K) -> Result<bool, ArenaFull> {
        Ok(self.tree.insert_or_find(id, ())?.is_new())
    }

    /// Membership by non-restructuring binary search.
    pub fn contains(&self, id: K) -> bool {
        self.tree.probe(&id).is_some()
    }

    /// Membership by splaying lookup; a hit moves `id` to the root, which
    /// pays off when the same id is tested again soon.
    pub fn lookup(&mut self, id: K) -> bool {
        self.tree.find(&id).is_some()
    }

    /// Remove `id`. Returns whether it was present.
    pub fn remove(&mut self, id: K) -> bool {
        self.tree.remove(&id)
    }

    /// Remove and return an arbitrary member; used for bulk draining.
    pub fn pop(&mut self) -> Option<K> {
        self.tree.extract_root().map(|(id, ())| id)
    }

    /// Destructive union; returns whether any new id arrived.
    pub fn merge(&mut self, other: Self) -> Result<bool, ArenaFull> {
        self.tree.merge(other.tree)
    }

    /// New set of the ids present in both; neither input moves.
    pub fn intersection(&self, other: &Self) -> Result<Self, ArenaFull> {
        Ok(IdSet {
            tree: self.tree.intersection(&other.tree)?,
        })
    }

    /// Keep only ids also in `other`, draining and rebuilding this set.
    /// Returns the number discarded.
    pub fn destructive_intersect(&mut self, other: &mut Self) -> Result<usize, ArenaFull> {
        self.tree.destructive_intersect(&mut other.tree)
    }

    /// Whether the two sets share an id; early-exits on the first hit.
    pub fn shared_element(&mut self, other: &Self) -> bool {
        self.tree.shared_element(&other.tree)
    }

    /// Ascending iterator over the ids.
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.tree.iter().map(|(id, _)| *id)
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of members, by traversal.
    pub fn count(&self) -> usize {
        self.tree.count()
    }

    pub fn clear(&mut self) {
        self.tree.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stand-in for a clause/object id as the rest of the prover uses them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    struct ObjId(u32);

    #[test]
    fn insert_is_idempotent() {
        let mut set = IdSet::new();
        assert!(set.insert(ObjId(7)).unwrap());
        assert!(!set.insert(ObjId(7)).unwrap());
        assert_eq!(set.count(), 1);
    }

    #[test]
    fn contains_and_lookup_agree() {
        let mut set = IdSet::new();
        set.insert(ObjId(1)).unwrap();
        set.insert(ObjId(2)).unwrap();
        assert!(set.contains(ObjId(1)));
        assert!(set.lookup(ObjId(2)));
        assert!(!set.contains(ObjId(3)));
        assert!(!set.lookup(ObjId(3)));
    }

    #[test]
    fn merge_unions_and_reports_gain() {
        let mut a = IdSet::new();
        let mut b = IdSet::new();
        for id in [1, 2, 3] {
            a.insert(ObjId(id)).unwrap();
        }
        for id in [3, 4] {
            b.insert(ObjId(id)).unwrap();
        }
        assert!(a.merge(b).unwrap());
        let ids: Vec<ObjId> = a.iter().collect();
        assert_eq!(ids, vec![ObjId(1), ObjId(2), ObjId(3), ObjId(4)]);
    }

    #[test]
    fn intersection_and_destructive_agree() {
        let mut a = IdSet::new();
        let mut b = IdSet::new();
        for id in [1, 2, 3, 5] {
            a.insert(ObjId(id)).unwrap();
        }
        for id in [2, 5, 9] {
            b.insert(ObjId(id)).unwrap();
        }
        let plain: Vec<ObjId> = a.intersection(&b).unwrap().iter().collect();
        let discarded = a.destructive_intersect(&mut b).unwrap();
        let destructive: Vec<ObjId> = a.iter().collect();
        assert_eq!(plain, destructive);
        assert_eq!(discarded, 2, "1 and 3 had no partner");
    }

    #[test]
    fn shared_element_early_exit() {
        let mut a = IdSet::new();
        let mut b = IdSet::new();
        a.insert(ObjId(10)).unwrap();
        b.insert(ObjId(10)).unwrap();
        assert!(a.shared_element(&b));
        b.clear();
        b.insert(ObjId(11)).unwrap();
        assert!(!a.shared_element(&b));
    }

    #[test]
    fn pop_drains_the_set() {
        let mut set = IdSet::new();
        for id in [5, 1, 9] {
            set.insert(ObjId(id)).unwrap();
        }
        let mut popped = Vec::new();
        while let Some(id) = set.pop() {
            popped.push(id);
        }
        assert!(set.is_empty());
        popped.sort();
        assert_eq!(popped, vec![ObjId(1), ObjId(5), ObjId(9)]);
    }
}
