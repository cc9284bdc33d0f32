use std::fmt;

/// Identifier of a node slot inside a [`NodeArena`].
///
/// Indices are plain `u32`s with a reserved `NIL` sentinel standing in for
/// an absent child or an empty tree. Slots do not own each other, so child
/// links cannot form an ownership cycle.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIdx(u32);

impl NodeIdx {
    /// The absent-child / empty-tree sentinel.
    pub const NIL: NodeIdx = NodeIdx(u32::MAX);

    pub(crate) fn new(raw: usize) -> Self {
        debug_assert!(raw < u32::MAX as usize, "node arena index space exhausted");
        NodeIdx(raw as u32)
    }

    /// Whether this index is the `NIL` sentinel.
    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }

    /// Build an index from a raw slot number; for arena implementations
    /// outside this crate.
    pub fn from_raw(raw: u32) -> Self {
        NodeIdx(raw)
    }

    /// The raw slot number behind this index.
    pub fn raw(self) -> u32 {
        self.0
    }

    pub(crate) fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "NodeIdx(NIL)")
        } else {
            write!(f, "NodeIdx({})", self.0)
        }
    }
}

/// A single tree node: key, uninterpreted payload, and two child links.
///
/// There is no parent link; the top-down restructuring pass never needs one.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub left: NodeIdx,
    pub right: NodeIdx,
}

/// Error returned when a bounded arena cannot allocate another node.
///
/// The default unbounded arena never reports this; callers that inject a
/// bounded arena see it surface from every allocating tree operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaFull {
    /// The slot capacity that was exhausted.
    pub capacity: usize,
}

impl fmt::Display for ArenaFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node arena at capacity ({} slots)", self.capacity)
    }
}

impl std::error::Error for ArenaFull {}

/// Allocation counters kept by [`SlabArena`] for memory accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Nodes handed out over the arena's lifetime.
    pub allocated: u64,
    /// Nodes returned over the arena's lifetime.
    pub freed: u64,
    /// Nodes currently live.
    pub in_use: u64,
    /// High-water mark of live nodes.
    pub peak: u64,
}

/// Node allocation seam for the tree engine.
///
/// All node creation and destruction goes through this trait, so pooling or
/// accounting schemes can be swapped without touching tree logic. `node` and
/// `node_mut` panic on a vacant or out-of-range index: handing the arena a
/// stale index is a programmer error, not a recoverable condition.
pub trait NodeArena<K, V> {
    /// Allocate a fresh leaf node holding `key` and `value`.
    fn alloc(&mut self, key: K, value: V) -> Result<NodeIdx, ArenaFull>;

    /// Release a node slot, returning the node it held.
    fn free(&mut self, idx: NodeIdx) -> Node<K, V>;

    fn node(&self, idx: NodeIdx) -> &Node<K, V>;

    fn node_mut(&mut self, idx: NodeIdx) -> &mut Node<K, V>;
}

#[derive(Debug, Clone)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant { next_free: NodeIdx },
}

/// The default arena: a slab of slots with an intrusive free list.
///
/// Freed slots are threaded into a list through their `Vacant` entries and
/// reused before the slab grows, so long-lived trees with churn stay compact.
/// `bounded` arenas additionally refuse to grow past a slot limit, which is
/// what makes [`ArenaFull`] reachable.
#[derive(Debug, Clone)]
pub struct SlabArena<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: NodeIdx,
    limit: Option<usize>,
    stats: ArenaStats,
}

impl<K, V> SlabArena<K, V> {
    /// Create an unbounded arena.
    pub fn new() -> Self {
        SlabArena {
            slots: Vec::new(),
            free_head: NodeIdx::NIL,
            limit: None,
            stats: ArenaStats::default(),
        }
    }

    /// Create an arena that will never hold more than `limit` live nodes.
    pub fn bounded(limit: usize) -> Self {
        SlabArena {
            slots: Vec::new(),
            free_head: NodeIdx::NIL,
            limit: Some(limit),
            stats: ArenaStats::default(),
        }
    }

    /// Allocation counters for memory accounting.
    pub fn stats(&self) -> ArenaStats {
        self.stats
    }
}

impl<K, V> Default for SlabArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> NodeArena<K, V> for SlabArena<K, V> {
    fn alloc(&mut self, key: K, value: V) -> Result<NodeIdx, ArenaFull> {
        let node = Node {
            key,
            value,
            left: NodeIdx::NIL,
            right: NodeIdx::NIL,
        };
        let idx = if !self.free_head.is_nil() {
            let idx = self.free_head;
            let next_free = match &self.slots[idx.slot()] {
                Slot::Vacant { next_free } => *next_free,
                Slot::Occupied(_) => panic!("free list points at an occupied slot"),
            };
            self.free_head = next_free;
            self.slots[idx.slot()] = Slot::Occupied(node);
            idx
        } else {
            if let Some(limit) = self.limit {
                if self.slots.len() >= limit {
                    return Err(ArenaFull { capacity: limit });
                }
            }
            let idx = NodeIdx::new(self.slots.len());
            self.slots.push(Slot::Occupied(node));
            idx
        };
        self.stats.allocated += 1;
        self.stats.in_use += 1;
        if self.stats.in_use > self.stats.peak {
            self.stats.peak = self.stats.in_use;
        }
        Ok(idx)
    }

    fn free(&mut self, idx: NodeIdx) -> Node<K, V> {
        let slot = std::mem::replace(
            &mut self.slots[idx.slot()],
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        match slot {
            Slot::Occupied(node) => {
                self.free_head = idx;
                self.stats.freed += 1;
                self.stats.in_use -= 1;
                node
            }
            Slot::Vacant { .. } => panic!("double free of node slot {:?}", idx),
        }
    }

    fn node(&self, idx: NodeIdx) -> &Node<K, V> {
        match &self.slots[idx.slot()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("stale node index {:?}", idx),
        }
    }

    fn node_mut(&mut self, idx: NodeIdx) -> &mut Node<K, V> {
        match &mut self.slots[idx.slot()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("stale node index {:?}", idx),
        }
    }
}
