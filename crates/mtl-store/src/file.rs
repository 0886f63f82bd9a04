use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::record::{LeafCodec, Node, NodeCodec, RecordCodec, StoreConfig};
use crate::traits::HashStore;

/// File name of the leaf slot file inside the store directory.
const LEAVES_FILE: &str = "leaves.bin";
/// File name of the node slot file inside the store directory.
const NODES_FILE: &str = "nodes.bin";

/// One flat file of fixed-size record slots.
///
/// The slot for position `i` starts at byte `(i - 1) * record_size`. The
/// handle and the record count share one mutex; every operation seeks to
/// the offset it computed from the position, never trusting the cursor
/// left by a previous read or write on the same handle.
struct SlotFile<C> {
    codec: C,
    inner: Mutex<SlotFileInner>,
}

struct SlotFileInner {
    file: File,
    /// Records written so far; the next append lands at slot `count`.
    count: u64,
}

impl<C: RecordCodec> SlotFile<C> {
    /// Open (or create) a slot file, deriving the record count from the
    /// file length. An existing file whose length is not a whole number of
    /// slots fails here, before anything is read through it.
    fn open(path: PathBuf, codec: C) -> StoreResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&path)?;

        let record_size = codec.record_size() as u64;
        let file_len = file.metadata()?.len();
        if file_len % record_size != 0 {
            return Err(StoreError::MisalignedSlotFile {
                path,
                file_len,
                record_size: codec.record_size(),
            });
        }

        Ok(Self {
            codec,
            inner: Mutex::new(SlotFileInner {
                file,
                count: file_len / record_size,
            }),
        })
    }

    /// Append one record to the next free slot. Returns its 1-based
    /// position.
    fn append(&self, record: &C::Record) -> StoreResult<u64> {
        // Encode before touching the file: a size mismatch must leave both
        // the file and the count unchanged.
        let buf = self.codec.encode(record)?;

        let mut inner = self.inner.lock().expect("lock poisoned");
        let offset = inner.count * self.codec.record_size() as u64;
        inner.file.seek(SeekFrom::Start(offset))?;
        inner.file.write_all(&buf)?;
        inner.count += 1;
        Ok(inner.count)
    }

    /// Read the record at 1-based `pos`.
    fn read(&self, pos: u64) -> StoreResult<C::Record> {
        let record_size = self.codec.record_size();
        let mut inner = self.inner.lock().expect("lock poisoned");
        if pos == 0 || pos > inner.count {
            return Err(StoreError::OutOfRange {
                kind: self.codec.kind(),
                pos,
                count: inner.count,
            });
        }

        inner.file.seek(SeekFrom::Start((pos - 1) * record_size as u64))?;
        let mut buf = vec![0u8; record_size];
        inner.file.read_exact(&mut buf)?;
        self.codec.decode(&buf)
    }

    fn count(&self) -> u64 {
        self.inner.lock().expect("lock poisoned").count
    }
}

/// Durable record store: two flat slot files in one directory.
///
/// `leaves.bin` holds `leaf_size`-byte slots and `nodes.bin` holds
/// `node_size`-byte slots. Neither file carries a header; the record counts
/// are the file lengths divided by the record sizes, so reopening an
/// existing directory resumes with every previously written record intact.
/// The file handles are owned exclusively by the store and released when it
/// is dropped.
pub struct FileHashStore {
    dir: PathBuf,
    leaves: SlotFile<LeafCodec>,
    nodes: SlotFile<NodeCodec>,
}

impl FileHashStore {
    /// Open (or create) a store in `dir` with the default record sizes.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(dir, StoreConfig::default())
    }

    /// Open (or create) a store in `dir` with explicit record sizes.
    ///
    /// The sizes are fixed for the store's lifetime and must match the
    /// sizes the directory was originally written with.
    pub fn open_with(dir: impl AsRef<Path>, config: StoreConfig) -> StoreResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let leaves = SlotFile::open(dir.join(LEAVES_FILE), LeafCodec::new(config.leaf_size)?)?;
        let nodes = SlotFile::open(dir.join(NODES_FILE), NodeCodec::new(config.node_size)?)?;

        debug!(
            dir = %dir.display(),
            leaves = leaves.count(),
            nodes = nodes.count(),
            "hash store opened"
        );
        Ok(Self {
            dir: dir.to_path_buf(),
            leaves,
            nodes,
        })
    }

    /// Directory holding the two slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// First bytes of a hash as hex, for log fields.
fn short_hex(hash: &[u8]) -> String {
    hex::encode(&hash[..hash.len().min(4)])
}

impl HashStore for FileHashStore {
    fn write_leaf(&self, hash: &[u8]) -> StoreResult<u64> {
        let pos = self.leaves.append(&hash.to_vec())?;
        debug!(pos, hash = %short_hex(hash), "leaf appended");
        Ok(pos)
    }

    fn write_node(&self, node: &Node) -> StoreResult<u64> {
        let pos = self.nodes.append(node)?;
        debug!(
            pos,
            seq = node.seq,
            level = node.level,
            hash = %short_hex(&node.hash),
            "node appended"
        );
        Ok(pos)
    }

    fn read_leaf(&self, pos: u64) -> StoreResult<Vec<u8>> {
        self.leaves.read(pos)
    }

    fn read_node(&self, pos: u64) -> StoreResult<Node> {
        self.nodes.read(pos)
    }

    fn leaf_count(&self) -> StoreResult<u64> {
        Ok(self.leaves.count())
    }

    fn node_count(&self) -> StoreResult<u64> {
        Ok(self.nodes.count())
    }
}

impl std::fmt::Debug for FileHashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileHashStore")
            .field("dir", &self.dir)
            .field("leaves", &self.leaves.count())
            .field("nodes", &self.nodes.count())
            .finish()
    }
}
