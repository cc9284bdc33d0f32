//! Integer-keyed record maps.
//!
//! Symbol tables (function code -> properties) and descriptor-to-handle
//! maps share one shape: a signed 64-bit key and two auxiliary words the
//! container never interprets. `NumTree` is that instantiation.

use crate::arena::ArenaFull;
use crate::tree::{InsertOutcome, SplayTree};

/// Two uninterpreted payload words carried by every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumRecord {
    pub val1: u64,
    pub val2: u64,
}

impl NumRecord {
    pub fn new(val1: u64, val2: u64) -> Self {
        NumRecord { val1, val2 }
    }
}

/// Map from `i64` keys to [`NumRecord`]s over the splay-tree engine.
#[derive(Debug, Default)]
pub struct NumTree {
    tree: SplayTree<i64, NumRecord>,
}

impl NumTree {
    pub fn new() -> Self {
        NumTree {
            tree: SplayTree::new(),
        }
    }

    /// Insert or overwrite the record under `key`; returns the previous
    /// record if one was displaced.
    pub fn store(&mut self, key: i64, record: NumRecord) -> Result<Option<NumRecord>, ArenaFull> {
        match self.tree.insert_or_find(key, record)? {
            InsertOutcome::Inserted(_) => Ok(None),
            InsertOutcome::Found { existing, rejected } => {
                Ok(Some(std::mem::replace(existing, rejected)))
            }
        }
    }

    /// Insert only if absent; returns whether the record landed.
    pub fn store_new(&mut self, key: i64, record: NumRecord) -> Result<bool, ArenaFull> {
        Ok(self.tree.insert_or_find(key, record)?.is_new())
    }

    /// Splaying lookup; repeated access to hot keys stays cheap.
    pub fn assoc(&mut self, key: i64) -> Option<NumRecord> {
        self.tree.find(&key).copied()
    }

    /// Mutable access to the record under `key`.
    pub fn assoc_mut(&mut self, key: i64) -> Option<&mut NumRecord> {
        self.tree.find_mut(&key)
    }

    /// Non-restructuring lookup.
    pub fn get(&self, key: i64) -> Option<NumRecord> {
        self.tree.probe(&key).copied()
    }

    /// Detach and return the record under `key`.
    pub fn extract(&mut self, key: i64) -> Option<NumRecord> {
        self.tree.extract(&key).map(|(_, record)| record)
    }

    /// Remove the record under `key`; returns whether one existed.
    pub fn remove(&mut self, key: i64) -> bool {
        self.tree.remove(&key)
    }

    /// Ascending iterator over `(key, record)`.
    pub fn iter(&self) -> impl Iterator<Item = (i64, NumRecord)> + '_ {
        self.tree.iter().map(|(key, record)| (*key, *record))
    }

    /// Ascending iterator starting at the first key `>= limit`.
    pub fn iter_from(&self, limit: i64) -> impl Iterator<Item = (i64, NumRecord)> + '_ {
        self.tree.iter_from(&limit).map(|(key, record)| (*key, *record))
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of records, by traversal.
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

    #[test]
    fn store_then_assoc_round_trips() {
        let mut map = NumTree::new();
        assert_eq!(map.store(42, NumRecord::new(7, 9)).unwrap(), None);
        assert_eq!(map.assoc(42), Some(NumRecord::new(7, 9)));
        assert_eq!(map.assoc(41), None);
    }

    #[test]
    fn store_displaces_and_returns_previous() {
        let mut map = NumTree::new();
        map.store(1, NumRecord::new(10, 20)).unwrap();
        let previous = map.store(1, NumRecord::new(30, 40)).unwrap();
        assert_eq!(previous, Some(NumRecord::new(10, 20)));
        assert_eq!(map.assoc(1), Some(NumRecord::new(30, 40)));
        assert_eq!(map.count(), 1);
    }

    #[test]
    fn store_new_refuses_present_key() {
        let mut map = NumTree::new();
        assert!(map.store_new(5, NumRecord::new(1, 1)).unwrap());
        assert!(!map.store_new(5, NumRecord::new(2, 2)).unwrap());
        assert_eq!(map.assoc(5), Some(NumRecord::new(1, 1)));
    }

    #[test]
    fn negative_keys_order_correctly() {
        let mut map = NumTree::new();
        for key in [0, -5, 3, -1] {
            map.store(key, NumRecord::default()).unwrap();
        }
        let keys: Vec<i64> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![-5, -1, 0, 3]);
    }

    #[test]
    fn descriptor_table_shape() {
        // Descriptor -> (handle word, state word), the process-table usage.
        let mut table = NumTree::new();
        table.store(3, NumRecord::new(0x1000, 1)).unwrap();
        table.store(4, NumRecord::new(0x2000, 1)).unwrap();
        assert_eq!(table.extract(3), Some(NumRecord::new(0x1000, 1)));
        assert_eq!(table.extract(3), None);
        assert_eq!(table.count(), 1);
    }

    #[test]
    fn assoc_mut_edits_one_word() {
        let mut map = NumTree::new();
        map.store(9, NumRecord::new(1, 2)).unwrap();
        map.assoc_mut(9).unwrap().val2 = 99;
        assert_eq!(map.assoc(9), Some(NumRecord::new(1, 99)));
    }

    #[test]
    fn bounded_iteration_skips_low_keys() {
        let mut map = NumTree::new();
        for key in [10, 20, 30, 40] {
            map.store(key, NumRecord::default()).unwrap();
        }
        let keys: Vec<i64> = map.iter_from(20).map(|(k, _)| k).collect();
        assert_eq!(keys, vec![20, 30, 40]);
    }
}
