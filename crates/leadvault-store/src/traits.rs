use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreResult;

/// A stored document: the caller-visible field map, without its id.
///
/// The document id is issued and addressed separately by the backend; it is
/// never one of the document's own fields.
pub type Document = Map<String, Value>;

/// Document-oriented persistence backend, addressed by
/// `(collection, document id)`.
///
/// All implementations must satisfy these invariants:
/// - Missing documents are reported as `Ok(None)` / `Ok(false)`, never as
///   errors.
/// - `merge` is a field-level merge: fields absent from the patch are kept
///   unchanged in the stored document.
/// - The store never interprets field values; collections are schemaless.
/// - Backend failures are propagated as errors, never silently ignored.
///
/// No operation spans more than one document atomically. Concurrent writes
/// to the same document race with last-write-wins semantics.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document with a backend-generated id and return the id.
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<String>;

    /// Create or replace the document at a known id.
    async fn put(&self, collection: &str, id: &str, document: Document) -> StoreResult<()>;

    /// Point read. Returns `Ok(None)` if the document does not exist.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Merge `fields` into the existing document. Returns `true` if the
    /// document existed; a missing document is left missing.
    async fn merge(&self, collection: &str, id: &str, fields: Document) -> StoreResult<bool>;

    /// Delete a document. Returns `true` if it existed.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// Full-collection scan, returning `(id, document)` pairs.
    ///
    /// An unknown collection is an empty result, not an error. Order is
    /// backend-defined; callers impose their own ordering.
    async fn scan(&self, collection: &str) -> StoreResult<Vec<(String, Document)>>;
}
