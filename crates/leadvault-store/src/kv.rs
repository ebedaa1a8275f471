//! String-keyed value stores backing the local fallback.
//!
//! A [`KvStore`] is deliberately primitive: string keys mapping to string
//! values, synchronous, with whole-value reads and writes. It models the
//! browser-storage style of persistence the local fallback was designed
//! around. [`KvDocumentStore`](crate::local::KvDocumentStore) layers the
//! document-store interface on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};

/// Minimal string-keyed store.
pub trait KvStore: Send + Sync {
    /// Read the value at `key`. Returns `Ok(None)` if the key is unset.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Set `key` to `value`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Returns `true` if it was set.
    fn remove(&self, key: &str) -> StoreResult<bool>;
}

/// In-memory [`KvStore`] for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKv {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))?;
        Ok(entries.remove(key).is_some())
    }
}

/// File-backed [`KvStore`]: one JSON object per store file.
///
/// Every operation re-reads the file and every write rewrites it in full.
/// That keeps the store durable across processes with zero bookkeeping, at
/// the cost of O(file size) per operation. A missing file reads as empty and
/// is created on first write.
#[derive(Debug)]
pub struct FileKv {
    path: PathBuf,
}

impl FileKv {
    /// Open (or lazily create) the store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<HashMap<String, String>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn save(&self, entries: &HashMap<String, String>) -> StoreResult<()> {
        let bytes =
            serde_json::to_vec(entries).map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut entries = self.load()?;
        let existed = entries.remove(key).is_some();
        if existed {
            self.save(&entries)?;
        }
        Ok(existed)
    }
}
