use std::io;
use std::path::PathBuf;

use crate::record::RecordKind;

/// Errors from record store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write's encoded payload does not match the configured record size.
    /// Rejected before any I/O; the store is unchanged.
    #[error("{kind} record must encode to {expected} bytes, got {actual}")]
    SizeMismatch {
        kind: RecordKind,
        expected: usize,
        actual: usize,
    },

    /// A read targeted a position with no written record.
    #[error("no {kind} record at position {pos}: {count} written")]
    OutOfRange { kind: RecordKind, pos: u64, count: u64 },

    /// An existing slot file's length is not a whole number of slots for
    /// the configured record size. Raised at open time, before any read.
    #[error("slot file {path:?} has length {file_len}, not a multiple of record size {record_size}")]
    MisalignedSlotFile {
        path: PathBuf,
        file_len: u64,
        record_size: usize,
    },

    /// A configured record size too small to hold its record shape.
    #[error("record size {size} cannot hold a {kind} record")]
    InvalidRecordSize { kind: RecordKind, size: usize },

    /// I/O error from the underlying slot file.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
