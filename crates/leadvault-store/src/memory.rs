//! In-memory document store for testing and embedding.
//!
//! [`MemoryDocumentStore`] keeps one map of documents per collection behind
//! a `RwLock`. It is the in-process stand-in for the remote document
//! database: per-record operations, backend-generated ids, no
//! blob-per-collection encoding.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::traits::{Document, DocumentStore};

type Collections = HashMap<String, HashMap<String, Document>>;

/// Document-per-record store backed by a `RwLock<HashMap>`.
///
/// Data is lost when the store is dropped. Generated ids are UUID v7
/// strings, so insertion order is roughly recoverable from the id alone.
pub struct MemoryDocumentStore {
    collections: RwLock<Collections>,
}

impl MemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Number of documents currently held in `collection`.
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map_or(0, HashMap::len))
            .unwrap_or(0)
    }

    /// Returns `true` if `collection` holds no documents.
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Remove every document from every collection.
    pub fn clear(&self) {
        if let Ok(mut collections) = self.collections.write() {
            collections.clear();
        }
    }

    fn read_lock(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))
    }

    fn write_lock(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<String> {
        let id = uuid::Uuid::now_v7().to_string();
        let mut collections = self.write_lock()?;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), document);
        Ok(id)
    }

    async fn put(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        let mut collections = self.write_lock()?;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let collections = self.read_lock()?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn merge(&self, collection: &str, id: &str, fields: Document) -> StoreResult<bool> {
        let mut collections = self.write_lock()?;
        let Some(existing) = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
        else {
            return Ok(false);
        };
        existing.extend(fields);
        Ok(true)
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let mut collections = self.write_lock()?;
        Ok(collections
            .get_mut(collection)
            .is_some_and(|docs| docs.remove(id).is_some()))
    }

    async fn scan(&self, collection: &str) -> StoreResult<Vec<(String, Document)>> {
        let collections = self.read_lock()?;
        let mut docs: Vec<(String, Document)> = collections
            .get(collection)
            .map(|docs| docs.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default();
        docs.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(docs)
    }
}

impl std::fmt::Debug for MemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .collections
            .read()
            .map(|c| c.values().map(HashMap::len).sum::<usize>())
            .unwrap_or(0);
        f.debug_struct("MemoryDocumentStore")
            .field("document_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(pairs: &[(&str, &str)]) -> Document {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn insert_and_get() {
        let store = MemoryDocumentStore::new();
        let id = store.insert("c", doc(&[("name", "a")])).await.unwrap();
        let read_back = store.get("c", &id).await.unwrap().expect("should exist");
        assert_eq!(read_back, doc(&[("name", "a")]));
    }

    #[tokio::test]
    async fn insert_generates_unique_ids() {
        let store = MemoryDocumentStore::new();
        let id1 = store.insert("c", doc(&[])).await.unwrap();
        let id2 = store.insert("c", doc(&[])).await.unwrap();
        assert_ne!(id1, id2);
        assert_eq!(store.len("c"), 2);
    }

    #[tokio::test]
    async fn put_creates_then_replaces() {
        let store = MemoryDocumentStore::new();
        store.put("c", "k", doc(&[("a", "1"), ("b", "2")])).await.unwrap();
        store.put("c", "k", doc(&[("a", "3")])).await.unwrap();
        // Replace, not merge: "b" is gone.
        let read_back = store.get("c", "k").await.unwrap().unwrap();
        assert_eq!(read_back, doc(&[("a", "3")]));
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = MemoryDocumentStore::new();
        assert!(store.get("c", "nope").await.unwrap().is_none());
    }

    // -----------------------------------------------------------------------
    // Merge semantics
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn merge_keeps_unmentioned_fields() {
        let store = MemoryDocumentStore::new();
        store.put("c", "k", doc(&[("a", "1"), ("b", "2")])).await.unwrap();
        let existed = store.merge("c", "k", doc(&[("b", "9")])).await.unwrap();
        assert!(existed);
        let read_back = store.get("c", "k").await.unwrap().unwrap();
        assert_eq!(read_back, doc(&[("a", "1"), ("b", "9")]));
    }

    #[tokio::test]
    async fn merge_missing_is_noop() {
        let store = MemoryDocumentStore::new();
        let existed = store.merge("c", "ghost", doc(&[("a", "1")])).await.unwrap();
        assert!(!existed);
        assert!(store.get("c", "ghost").await.unwrap().is_none());
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_present_then_absent() {
        let store = MemoryDocumentStore::new();
        let id = store.insert("c", doc(&[])).await.unwrap();
        assert!(store.delete("c", &id).await.unwrap());
        assert!(!store.delete("c", &id).await.unwrap());
        assert!(store.get("c", &id).await.unwrap().is_none());
    }

    // -----------------------------------------------------------------------
    // Scan
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn scan_returns_all_documents() {
        let store = MemoryDocumentStore::new();
        let id1 = store.insert("c", doc(&[("n", "1")])).await.unwrap();
        let id2 = store.insert("c", doc(&[("n", "2")])).await.unwrap();
        let docs = store.scan("c").await.unwrap();
        assert_eq!(docs.len(), 2);
        let ids: Vec<&str> = docs.iter().map(|(id, _)| id.as_str()).collect();
        assert!(ids.contains(&id1.as_str()));
        assert!(ids.contains(&id2.as_str()));
    }

    #[tokio::test]
    async fn scan_unknown_collection_is_empty() {
        let store = MemoryDocumentStore::new();
        assert!(store.scan("nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store.insert("left", doc(&[("n", "1")])).await.unwrap();
        assert!(store.scan("right").await.unwrap().is_empty());
        assert_eq!(store.len("left"), 1);
        assert_eq!(store.len("right"), 0);
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn clear_removes_all() {
        let store = MemoryDocumentStore::new();
        store.insert("c", doc(&[])).await.unwrap();
        assert!(!store.is_empty("c"));
        store.clear();
        assert!(store.is_empty("c"));
    }

    #[tokio::test]
    async fn debug_format() {
        let store = MemoryDocumentStore::new();
        store.insert("c", doc(&[])).await.unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("MemoryDocumentStore"));
        assert!(debug.contains("document_count"));
    }
}
