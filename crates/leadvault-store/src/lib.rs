//! Persistence backends for LeadVault.
//!
//! Every durable read and write in LeadVault goes through the
//! [`DocumentStore`] trait: a document-oriented store addressed by
//! `(collection, document id)`. The higher layers never branch on which
//! backend is in use; the backend is chosen once at startup.
//!
//! # Backends
//!
//! - [`MemoryDocumentStore`] — document-per-record store behind a `RwLock`,
//!   the in-process stand-in for a remote document database. Used for tests
//!   and embedding.
//! - [`KvDocumentStore`] — local fallback that serializes each collection as
//!   one JSON array under a string key in a [`KvStore`]
//!   ([`MemoryKv`] or the file-backed [`FileKv`]).
//!
//! # Design Rules
//!
//! 1. Reads always hit the backend; there is no caching layer.
//! 2. Missing documents are `Ok(None)` / `Ok(false)`, never errors.
//! 3. Backend failures are propagated as [`StoreError`]; the caller decides
//!    whether to swallow or surface them.
//! 4. No transactions, no retries, no cross-operation locking.

pub mod error;
pub mod kv;
pub mod local;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use kv::{FileKv, KvStore, MemoryKv};
pub use local::KvDocumentStore;
pub use memory::MemoryDocumentStore;
pub use traits::{Document, DocumentStore};
