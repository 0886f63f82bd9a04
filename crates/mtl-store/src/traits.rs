//! The [`HashStore`] trait defining the record store interface.

use crate::error::StoreResult;
use crate::record::Node;

/// Append-only positional store for the two record sequences of a Merkle
/// tree ledger: leaf hashes and internal node entries.
///
/// All implementations must satisfy these invariants:
/// - Positions are 1-based and assigned monotonically: a successful write
///   lands at `count + 1` and advances the count by exactly one.
/// - Records are immutable once written; a read at a position returns the
///   same value no matter what was written afterwards, to either sequence.
/// - A failed write changes nothing: no partial record, no skipped position.
/// - Reads of unwritten positions are errors, never default data.
/// - The leaf and node sequences are independent instances of the same
///   storage pattern; no operation spans both.
///
/// The store provides no internal coordination between logical writers:
/// callers racing on the next free position must serialize their writes
/// themselves.
pub trait HashStore: Send + Sync {
    /// Append one leaf hash. Returns the assigned 1-based position.
    ///
    /// Fails without writing if `hash` does not encode to the store's
    /// configured leaf record size.
    fn write_leaf(&self, hash: &[u8]) -> StoreResult<u64>;

    /// Append one node entry. Returns the assigned 1-based position.
    ///
    /// Fails without writing if `node` does not encode to the store's
    /// configured node record size.
    fn write_node(&self, node: &Node) -> StoreResult<u64>;

    /// Read the leaf previously written at `pos` (1-based).
    fn read_leaf(&self, pos: u64) -> StoreResult<Vec<u8>>;

    /// Read the node previously written at `pos` (1-based).
    fn read_node(&self, pos: u64) -> StoreResult<Node>;

    /// Number of leaves written so far.
    fn leaf_count(&self) -> StoreResult<u64>;

    /// Number of nodes written so far.
    fn node_count(&self) -> StoreResult<u64>;

    /// Iterate over the leaves at positions `[start, end)`.
    ///
    /// The end bound is exclusive, unlike the single-item accessors which
    /// address positions exactly. The iterator is lazy and restartable:
    /// each element computes its own placement from its position alone, and
    /// calling this again replays the same sequence. `start == end` yields
    /// nothing. Positions without a record yield `Err` items.
    fn read_leaves<'a>(
        &'a self,
        start: u64,
        end: u64,
    ) -> Box<dyn Iterator<Item = StoreResult<Vec<u8>>> + 'a> {
        Box::new((start..end).map(move |pos| self.read_leaf(pos)))
    }

    /// Iterate over the nodes at positions `[start, end)`.
    ///
    /// Same bounds and laziness as [`HashStore::read_leaves`].
    fn read_nodes<'a>(
        &'a self,
        start: u64,
        end: u64,
    ) -> Box<dyn Iterator<Item = StoreResult<Node>> + 'a> {
        Box::new((start..end).map(move |pos| self.read_node(pos)))
    }
}
