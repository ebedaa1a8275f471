//! Local blob-per-collection fallback backend.
//!
//! [`KvDocumentStore`] implements [`DocumentStore`] over any [`KvStore`] by
//! serializing each collection as one JSON array under the collection name.
//! Every mutation is read-decode-mutate-encode-write over that single entry.
//!
//! # Known limitation
//!
//! Because a mutation re-reads and rewrites the whole collection entry in
//! separate steps, two concurrent writers against the same collection can
//! interleave as read-old / write-new and lose one write entirely. The
//! fallback is meant for a single-process deployment where requests arrive
//! one at a time; it does not attempt per-record atomicity.

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::kv::KvStore;
use crate::traits::{Document, DocumentStore};

/// [`DocumentStore`] over a [`KvStore`], one serialized array per collection.
///
/// Each stored record carries its id inline under an `"id"` field inside the
/// array entry; the trait surface still treats ids as separate from document
/// fields, so the id is stripped again on the way out.
#[derive(Debug)]
pub struct KvDocumentStore<K: KvStore> {
    kv: K,
}

impl<K: KvStore> KvDocumentStore<K> {
    /// Wrap a key-value store.
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// The underlying key-value store.
    pub fn kv(&self) -> &K {
        &self.kv
    }

    fn read_collection(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let Some(raw) = self.kv.get(collection)? else {
            return Ok(Vec::new());
        };
        let records: Vec<Value> = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut documents = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match record {
                Value::Object(map) => documents.push(map),
                // Records may carry visitor contact details; log only the
                // shape of the bad entry, never its content.
                other => {
                    warn!(collection, index, kind = Self::value_kind(&other), "skipping non-object record");
                }
            }
        }
        Ok(documents)
    }

    fn write_collection(&self, collection: &str, documents: &[Document]) -> StoreResult<()> {
        let raw = serde_json::to_string(documents)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.kv.set(collection, &raw)
    }

    fn value_kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    fn record_id(document: &Document) -> Option<&str> {
        document.get("id").and_then(Value::as_str)
    }

    fn with_inline_id(id: &str, mut document: Document) -> Document {
        document.insert("id".to_string(), Value::String(id.to_string()));
        document
    }

    fn without_inline_id(mut document: Document) -> Document {
        document.remove("id");
        document
    }
}

#[async_trait]
impl<K: KvStore> DocumentStore for KvDocumentStore<K> {
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<String> {
        let id = uuid::Uuid::now_v7().to_string();
        let mut documents = self.read_collection(collection)?;
        documents.push(Self::with_inline_id(&id, document));
        self.write_collection(collection, &documents)?;
        Ok(id)
    }

    async fn put(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        let mut documents = self.read_collection(collection)?;
        let document = Self::with_inline_id(id, document);
        match documents.iter_mut().find(|d| Self::record_id(d) == Some(id)) {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }
        self.write_collection(collection, &documents)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let documents = self.read_collection(collection)?;
        Ok(documents
            .into_iter()
            .find(|d| Self::record_id(d) == Some(id))
            .map(Self::without_inline_id))
    }

    async fn merge(&self, collection: &str, id: &str, fields: Document) -> StoreResult<bool> {
        let mut documents = self.read_collection(collection)?;
        let Some(existing) = documents
            .iter_mut()
            .find(|d| Self::record_id(d) == Some(id))
        else {
            return Ok(false);
        };
        existing.extend(fields);
        // The inline id must survive a patch that happens to carry one.
        existing.insert("id".to_string(), Value::String(id.to_string()));
        self.write_collection(collection, &documents)?;
        Ok(true)
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let mut documents = self.read_collection(collection)?;
        let before = documents.len();
        documents.retain(|d| Self::record_id(d) != Some(id));
        if documents.len() == before {
            return Ok(false);
        }
        self.write_collection(collection, &documents)?;
        Ok(true)
    }

    async fn scan(&self, collection: &str) -> StoreResult<Vec<(String, Document)>> {
        let documents = self.read_collection(collection)?;
        Ok(documents
            .into_iter()
            .filter_map(|d| {
                let id = Self::record_id(&d)?.to_string();
                Some((id, Self::without_inline_id(d)))
            })
            .collect())
    }
}
