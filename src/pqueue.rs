//! The clause-selection ready-queue: a splay tree keyed by a composite
//! priority with a guaranteed-unique tie-break.
//!
//! Selection order is lowest priority class first, then lowest heuristic
//! score, then arrival order. The arrival sequence number makes the key
//! order strict-total, which the underlying tree requires (duplicate keys
//! are never stored), and doubles as the FIFO fairness guarantee: two
//! entries with identical class and score leave the queue in the order they
//! arrived.

use crate::arena::ArenaFull;
use crate::tree::{InsertOutcome, SplayTree};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Process-wide arrival counter. Keys minted anywhere in the process are
/// mutually comparable, so entries can migrate between queues without
/// colliding.
static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Composite selection key: `(class, heuristic, sequence)`.
///
/// `class` is the coarse urgency band, `heuristic` the evaluation score
/// within the band, and `sequence` the arrival tie-break assigned at
/// creation time. The heuristic leg compares with `f64::total_cmp`, so the
/// order is lawful even for non-finite scores.
#[derive(Debug, Clone, Copy)]
pub struct PriorityKey {
    pub class: u32,
    pub heuristic: f64,
    seq: u64,
}

impl PriorityKey {
    /// Mint a key with the next arrival sequence number.
    pub fn new(class: u32, heuristic: f64) -> Self {
        PriorityKey {
            class,
            heuristic,
            seq: NEXT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }

    /// The arrival sequence number this key was minted with.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl PartialEq for PriorityKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityKey {}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.class
            .cmp(&other.class)
            .then_with(|| self.heuristic.total_cmp(&other.heuristic))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A deterministic fair priority queue over the splay-tree engine.
///
/// `peek_min` walks left without restructuring, so the saturation loop can
/// inspect the next candidate repeatedly before committing to removal.
#[derive(Debug)]
pub struct PriorityQueue<V> {
    tree: SplayTree<PriorityKey, V>,
}

impl<V> Default for PriorityQueue<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PriorityQueue<V> {
    pub fn new() -> Self {
        PriorityQueue {
            tree: SplayTree::new(),
        }
    }

    /// Enqueue `value`, minting its selection key. The returned key is the
    /// handle for targeted removal later.
    pub fn insert(&mut self, class: u32, heuristic: f64, value: V) -> Result<PriorityKey, ArenaFull> {
        let key = PriorityKey::new(class, heuristic);
        match self.tree.insert_or_find(key, value)? {
            InsertOutcome::Inserted(_) => Ok(key),
            InsertOutcome::Found { .. } => unreachable!("arrival sequence numbers are unique"),
        }
    }

    /// The most urgent entry, without disturbing the tree shape.
    pub fn peek_min(&self) -> Option<(&PriorityKey, &V)> {
        self.tree.first()
    }

    /// Remove and return the most urgent entry.
    pub fn pop_min(&mut self) -> Option<(PriorityKey, V)> {
        let key = *self.peek_min()?.0;
        self.tree.extract(&key)
    }

    /// Remove a specific entry by its key.
    pub fn remove(&mut self, key: &PriorityKey) -> Option<V> {
        self.tree.extract(key).map(|(_, value)| value)
    }

    /// Splaying lookup of a specific entry.
    pub fn get(&mut self, key: &PriorityKey) -> Option<&V> {
        self.tree.find(key)
    }

    /// Ascending iterator over the queued entries, most urgent first.
    pub fn iter(&self) -> impl Iterator<Item = (&PriorityKey, &V)> + '_ {
        self.tree.iter()
    }

    /// O(1): whether the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of queued entries, by traversal.
    pub fn count(&self) -> usize {
        self.tree.count()
    }
}
