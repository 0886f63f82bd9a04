//! Fixed-slot record storage for the MTL Merkle tree ledger.
//!
//! The ledger persists two parallel append-only sequences: "leaves" (raw
//! content hashes) and "nodes" (internal tree entries pairing two counters
//! with a subtree hash). Every record is a fixed-size binary slot addressed
//! by its 1-based position, so retrieving any prior record is a single seek
//! and read at `(position - 1) * record_size`.
//!
//! # Components
//!
//! - [`HashStore`] -- the capability contract implemented by every backend
//! - [`MemoryHashStore`] -- growable in-memory sequences for tests and
//!   non-durable embedding
//! - [`FileHashStore`] -- two flat slot files in a directory; survives
//!   process restarts
//! - [`LeafCodec`] / [`NodeCodec`] -- fixed-width record codecs shared by
//!   the backends
//!
//! # Design Rules
//!
//! 1. Writes append; position assignment is monotonic and gap-free.
//! 2. Records are immutable once written and byte-for-byte reproducible by
//!    any later read, regardless of intervening writes.
//! 3. Every read seeks to an offset computed from the position alone; no
//!    operation trusts the file cursor left by a previous one.
//! 4. A failed write changes nothing: size validation runs before any I/O.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod memory;
pub mod record;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use file::FileHashStore;
pub use memory::MemoryHashStore;
pub use record::{LeafCodec, Node, NodeCodec, RecordCodec, RecordKind, StoreConfig};
pub use traits::HashStore;
