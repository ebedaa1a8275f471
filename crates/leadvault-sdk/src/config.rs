use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use leadvault_store::{DocumentStore, FileKv, KvDocumentStore, MemoryDocumentStore};

/// Startup configuration for a [`LeadVault`](crate::LeadVault).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VaultConfig {
    pub backend: BackendConfig,
}

/// Which persistence backend to run against.
///
/// Chosen once at startup; no operation branches on the backend afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendConfig {
    /// In-memory document store. Data is lost on process exit.
    #[default]
    Memory,
    /// Local fallback: one JSON file holding every collection.
    LocalFile { path: PathBuf },
}

impl BackendConfig {
    /// Build the configured backend.
    pub fn build(&self) -> Arc<dyn DocumentStore> {
        match self {
            Self::Memory => Arc::new(MemoryDocumentStore::new()),
            Self::LocalFile { path } => Arc::new(KvDocumentStore::new(FileKv::new(path))),
        }
    }
}
