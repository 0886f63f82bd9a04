use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::record::{Node, RecordKind};
use crate::traits::HashStore;

/// In-memory reference store.
///
/// Two growable vectors, one per record kind, with index 0 holding
/// position 1. Performs no record-size validation: this variant exercises
/// ordering and positional semantics and stands in for the durable store in
/// tests and non-durable embedding.
pub struct MemoryHashStore {
    leaves: RwLock<Vec<Vec<u8>>>,
    nodes: RwLock<Vec<Node>>,
}

impl MemoryHashStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            leaves: RwLock::new(Vec::new()),
            nodes: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryHashStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a 1-based position onto a vector index, bounds-checked.
fn slot(kind: RecordKind, pos: u64, count: usize) -> StoreResult<usize> {
    if pos == 0 || pos > count as u64 {
        return Err(StoreError::OutOfRange {
            kind,
            pos,
            count: count as u64,
        });
    }
    Ok((pos - 1) as usize)
}

impl HashStore for MemoryHashStore {
    fn write_leaf(&self, hash: &[u8]) -> StoreResult<u64> {
        let mut leaves = self.leaves.write().expect("lock poisoned");
        leaves.push(hash.to_vec());
        Ok(leaves.len() as u64)
    }

    fn write_node(&self, node: &Node) -> StoreResult<u64> {
        let mut nodes = self.nodes.write().expect("lock poisoned");
        nodes.push(node.clone());
        Ok(nodes.len() as u64)
    }

    fn read_leaf(&self, pos: u64) -> StoreResult<Vec<u8>> {
        let leaves = self.leaves.read().expect("lock poisoned");
        let idx = slot(RecordKind::Leaf, pos, leaves.len())?;
        Ok(leaves[idx].clone())
    }

    fn read_node(&self, pos: u64) -> StoreResult<Node> {
        let nodes = self.nodes.read().expect("lock poisoned");
        let idx = slot(RecordKind::Node, pos, nodes.len())?;
        Ok(nodes[idx].clone())
    }

    fn leaf_count(&self) -> StoreResult<u64> {
        Ok(self.leaves.read().expect("lock poisoned").len() as u64)
    }

    fn node_count(&self) -> StoreResult<u64> {
        Ok(self.nodes.read().expect("lock poisoned").len() as u64)
    }
}

impl std::fmt::Debug for MemoryHashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHashStore")
            .field("leaves", &self.leaves.read().expect("lock poisoned").len())
            .field("nodes", &self.nodes.read().expect("lock poisoned").len())
            .finish()
    }
}
