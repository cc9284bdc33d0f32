//! Self-adjusting keyed stores for saturation provers.
//!
//! Everything here is built on one engine: a top-down splay tree over
//! arena-allocated nodes, giving amortized-logarithmic keyed access with no
//! stored balance data. The engine is instantiated several ways across a
//! prover: identity-keyed sets for subsumption bookkeeping ([`IdSet`]),
//! integer-keyed record maps for symbol and descriptor tables ([`NumTree`]),
//! a deterministic fair ready-queue for clause selection
//! ([`PriorityQueue`]), and a bucketed hybrid for values clustered by key
//! range ([`BucketTree`]). [`SplayTree`] is the engine itself, for payload
//! shapes the wrappers do not cover.
//!
//! Trees are single-owner and single-threaded: mutation takes `&mut self`,
//! cross-tree moves consume the source, and traversal borrows the tree for
//! its whole lifetime, so stale-handle and iterate-while-mutating bugs are
//! compile errors rather than silent corruption.

pub mod arena;
pub mod buckettree;
pub mod idset;
pub mod iter;
pub mod numtree;
pub mod pqueue;
mod setops;
mod splay;
pub mod trace;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_utils;

pub use arena::{ArenaFull, ArenaStats, Node, NodeArena, NodeIdx, SlabArena};
pub use buckettree::BucketTree;
pub use idset::IdSet;
pub use iter::{TreeDrain, TreeIter};
pub use numtree::{NumRecord, NumTree};
pub use pqueue::{PriorityKey, PriorityQueue};
pub use tree::{InsertOutcome, SplayTree};
