//! Record value types and their fixed-width codecs.
//!
//! On-disk format, one record per slot, no header and no padding:
//! ```text
//! leaf slot:  [leaf_size bytes: hash]
//! node slot:  [4 bytes: seq (big-endian u32)]
//!             [1 byte:  level]
//!             [node_size - 5 bytes: hash]
//! ```
//! Position `i` (1-based) occupies bytes `[(i - 1) * record_size,
//! i * record_size)` of its slot file. Other components reading these files
//! must use the same integer layout.

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Bytes occupied by the integer fields at the front of a node record.
pub const NODE_PREFIX_SIZE: usize = 5;

/// Digest width produced by the ledger's default hasher.
pub const DEFAULT_HASH_SIZE: usize = 32;

/// The kind of record a sequence holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A bare content hash.
    Leaf,
    /// An internal tree entry: two counters plus a subtree hash.
    Node,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf => write!(f, "leaf"),
            Self::Node => write!(f, "node"),
        }
    }
}

/// An internal tree entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Wide sequence counter locating the entry's subtree.
    pub seq: u32,
    /// Tree level of the entry.
    pub level: u8,
    /// Digest of the subtree under this entry. Same width as a leaf hash.
    pub hash: Vec<u8>,
}

impl Node {
    /// Create a new node entry.
    pub fn new(seq: u32, level: u8, hash: impl Into<Vec<u8>>) -> Self {
        Self {
            seq,
            level,
            hash: hash.into(),
        }
    }
}

/// Record sizes for one store instance, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Exact byte length of every leaf record.
    pub leaf_size: usize,
    /// Exact byte length of every node record (integer prefix + hash).
    pub node_size: usize,
}

impl StoreConfig {
    /// Sizes for a ledger hashing with `hash_size`-byte digests.
    pub const fn for_hash_size(hash_size: usize) -> Self {
        Self {
            leaf_size: hash_size,
            node_size: NODE_PREFIX_SIZE + hash_size,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::for_hash_size(DEFAULT_HASH_SIZE)
    }
}

/// Converts one record kind to and from its fixed-width slot bytes.
///
/// `encode` produces exactly `record_size()` bytes or fails with a size
/// mismatch, touching nothing; `decode` is its exact inverse, so
/// `decode(encode(x)) == x` for every valid record.
pub trait RecordCodec {
    /// The decoded record value.
    type Record;

    /// Fixed byte length of every encoded record.
    fn record_size(&self) -> usize;

    /// The record kind, for error values and log fields.
    fn kind(&self) -> RecordKind;

    /// Encode a record into its slot bytes.
    fn encode(&self, record: &Self::Record) -> StoreResult<Vec<u8>>;

    /// Decode slot bytes back into a record.
    fn decode(&self, buf: &[u8]) -> StoreResult<Self::Record>;
}

/// Codec for leaf records. A leaf's slot bytes are the hash itself.
#[derive(Clone, Copy, Debug)]
pub struct LeafCodec {
    leaf_size: usize,
}

impl LeafCodec {
    /// Create a codec for `leaf_size`-byte hashes.
    pub fn new(leaf_size: usize) -> StoreResult<Self> {
        if leaf_size == 0 {
            return Err(StoreError::InvalidRecordSize {
                kind: RecordKind::Leaf,
                size: leaf_size,
            });
        }
        Ok(Self { leaf_size })
    }
}

impl RecordCodec for LeafCodec {
    type Record = Vec<u8>;

    fn record_size(&self) -> usize {
        self.leaf_size
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Leaf
    }

    fn encode(&self, record: &Self::Record) -> StoreResult<Vec<u8>> {
        if record.len() != self.leaf_size {
            return Err(StoreError::SizeMismatch {
                kind: RecordKind::Leaf,
                expected: self.leaf_size,
                actual: record.len(),
            });
        }
        Ok(record.clone())
    }

    fn decode(&self, buf: &[u8]) -> StoreResult<Self::Record> {
        if buf.len() != self.leaf_size {
            return Err(StoreError::SizeMismatch {
                kind: RecordKind::Leaf,
                expected: self.leaf_size,
                actual: buf.len(),
            });
        }
        Ok(buf.to_vec())
    }
}

/// Codec for node records: `seq` big-endian u32, `level` byte, hash.
#[derive(Clone, Copy, Debug)]
pub struct NodeCodec {
    node_size: usize,
}

impl NodeCodec {
    /// Create a codec for `node_size`-byte records.
    ///
    /// Fails unless `node_size` leaves room for a hash after the 5-byte
    /// integer prefix.
    pub fn new(node_size: usize) -> StoreResult<Self> {
        if node_size <= NODE_PREFIX_SIZE {
            return Err(StoreError::InvalidRecordSize {
                kind: RecordKind::Node,
                size: node_size,
            });
        }
        Ok(Self { node_size })
    }
}

impl RecordCodec for NodeCodec {
    type Record = Node;

    fn record_size(&self) -> usize {
        self.node_size
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Node
    }

    fn encode(&self, record: &Self::Record) -> StoreResult<Vec<u8>> {
        let encoded_len = NODE_PREFIX_SIZE + record.hash.len();
        if encoded_len != self.node_size {
            return Err(StoreError::SizeMismatch {
                kind: RecordKind::Node,
                expected: self.node_size,
                actual: encoded_len,
            });
        }
        let mut buf = Vec::with_capacity(self.node_size);
        buf.extend_from_slice(&record.seq.to_be_bytes());
        buf.push(record.level);
        buf.extend_from_slice(&record.hash);
        Ok(buf)
    }

    fn decode(&self, buf: &[u8]) -> StoreResult<Self::Record> {
        if buf.len() != self.node_size {
            return Err(StoreError::SizeMismatch {
                kind: RecordKind::Node,
                expected: self.node_size,
                actual: buf.len(),
            });
        }
        let seq = u32::from_be_bytes(buf[0..4].try_into().unwrap());
        let level = buf[4];
        let hash = buf[NODE_PREFIX_SIZE..].to_vec();
        Ok(Node { seq, level, hash })
    }
}
