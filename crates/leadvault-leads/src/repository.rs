use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use leadvault_store::{Document, DocumentStore};
use leadvault_types::{
    now_iso, Language, Lead, LeadId, FIELD_CREATED_AT, FIELD_LANGUAGE, FIELD_STATUS,
    FIELD_UPDATED_AT, STATUS_NEW,
};

use crate::error::LeadResult;

/// CRUD surface over one language's lead collection.
///
/// Every operation re-fetches authoritative state from the backend; the
/// repository holds no cache. Leads never move between collections: a
/// repository only ever addresses the collection its language maps to.
pub struct LeadRepository {
    store: Arc<dyn DocumentStore>,
    language: Language,
}

impl LeadRepository {
    /// Repository over `language`'s collection.
    pub fn new(store: Arc<dyn DocumentStore>, language: Language) -> Self {
        Self { store, language }
    }

    /// The language this repository is scoped to.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Store a new lead and return its backend-issued id.
    ///
    /// The caller payload is merged with the system fields: both timestamps
    /// set to now, `status` set to `"new"`, and the repository's language.
    /// System fields win over caller keys of the same name. Backend errors
    /// PROPAGATE — this is the capture path, and dropping a lead silently is
    /// worse than a visible failure.
    pub async fn save(&self, payload: Document) -> LeadResult<LeadId> {
        let now = now_iso();
        let mut document = payload;
        document.insert(FIELD_CREATED_AT.to_string(), Value::String(now.clone()));
        document.insert(FIELD_UPDATED_AT.to_string(), Value::String(now));
        document.insert(FIELD_STATUS.to_string(), Value::String(STATUS_NEW.to_string()));
        document.insert(
            FIELD_LANGUAGE.to_string(),
            Value::String(self.language.as_str().to_string()),
        );

        let id = self.store.insert(self.language.collection(), document).await?;
        debug!(language = %self.language, %id, "lead saved");
        Ok(LeadId::from(id))
    }

    /// All leads in this collection, newest first (descending `createdAt`).
    ///
    /// Backend failure degrades to an empty list — a read with no side
    /// effects to lose. Records that no longer decode are skipped with a
    /// warning rather than poisoning the whole listing.
    pub async fn list(&self) -> Vec<Lead> {
        let records = match self.store.scan(self.language.collection()).await {
            Ok(records) => records,
            Err(e) => {
                warn!(language = %self.language, error = %e, "failed to list leads");
                return Vec::new();
            }
        };

        let mut leads = Vec::with_capacity(records.len());
        for (id, document) in records {
            match Lead::from_document(id.as_str(), document) {
                Ok(lead) => leads.push(lead),
                Err(e) => {
                    warn!(language = %self.language, %id, error = %e, "skipping undecodable lead");
                }
            }
        }
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        leads
    }

    /// Merge `fields` into an existing lead, refreshing `updatedAt`.
    ///
    /// Fields absent from the patch keep their stored values. An unknown id
    /// is a silent no-op; backend errors propagate.
    pub async fn update(&self, id: &LeadId, fields: Document) -> LeadResult<()> {
        let mut patch = fields;
        patch.insert(FIELD_UPDATED_AT.to_string(), Value::String(now_iso()));

        let existed = self
            .store
            .merge(self.language.collection(), id.as_str(), patch)
            .await?;
        if !existed {
            debug!(language = %self.language, %id, "update on unknown lead skipped");
        }
        Ok(())
    }

    /// Remove a lead. An unknown id is a no-op; backend errors propagate.
    pub async fn delete(&self, id: &LeadId) -> LeadResult<()> {
        let existed = self
            .store
            .delete(self.language.collection(), id.as_str())
            .await?;
        if !existed {
            debug!(language = %self.language, %id, "delete on unknown lead skipped");
        }
        Ok(())
    }
}

impl std::fmt::Debug for LeadRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadRepository")
            .field("language", &self.language)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use leadvault_store::{MemoryDocumentStore, StoreError, StoreResult};
    use serde_json::json;

    fn payload(pairs: &[(&str, &str)]) -> Document {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    fn repo(language: Language) -> (Arc<MemoryDocumentStore>, LeadRepository) {
        let store = Arc::new(MemoryDocumentStore::new());
        let repo = LeadRepository::new(store.clone(), language);
        (store, repo)
    }

    /// Seed a lead directly at a chosen `createdAt`, bypassing `save`.
    async fn seed_at(store: &MemoryDocumentStore, language: Language, id: &str, created_at: &str) {
        let Value::Object(document) = json!({
            "name": id,
            "createdAt": created_at,
            "updatedAt": created_at,
            "status": "new",
            "language": language.as_str(),
        }) else {
            unreachable!()
        };
        store.put(language.collection(), id, document).await.unwrap();
    }

    // -----------------------------------------------------------------------
    // Save
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn save_then_list_shows_one_new_lead() {
        let (_, repo) = repo(Language::English);
        let id = repo
            .save(payload(&[("name", "Ravi"), ("phone", "12345")]))
            .await
            .unwrap();

        let leads = repo.list().await;
        assert_eq!(leads.len(), 1);
        let lead = &leads[0];
        assert_eq!(lead.id, id);
        assert_eq!(lead.status, STATUS_NEW);
        assert_eq!(lead.language, Language::English);
        assert_eq!(lead.fields["name"], json!("Ravi"));
        assert_eq!(lead.fields["phone"], json!("12345"));
        assert_eq!(lead.created_at, lead.updated_at);
    }

    #[tokio::test]
    async fn save_system_fields_win_over_payload() {
        let (_, repo) = repo(Language::English);
        repo.save(payload(&[("status", "forged"), ("language", "marathi")]))
            .await
            .unwrap();

        let leads = repo.list().await;
        assert_eq!(leads[0].status, STATUS_NEW);
        assert_eq!(leads[0].language, Language::English);
    }

    // -----------------------------------------------------------------------
    // List ordering
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn list_orders_newest_first() {
        let (store, repo) = repo(Language::English);
        seed_at(&store, Language::English, "t1", "2024-01-01T00:00:00.000Z").await;
        seed_at(&store, Language::English, "t3", "2024-03-01T00:00:00.000Z").await;
        seed_at(&store, Language::English, "t2", "2024-02-01T00:00:00.000Z").await;

        let leads = repo.list().await;
        let ids: Vec<&str> = leads.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["t3", "t2", "t1"]);
    }

    #[tokio::test]
    async fn list_empty_collection() {
        let (_, repo) = repo(Language::Marathi);
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn list_skips_undecodable_records() {
        let (store, repo) = repo(Language::English);
        seed_at(&store, Language::English, "good", "2024-01-01T00:00:00.000Z").await;
        let mut junk = Document::new();
        junk.insert("name".into(), json!("no system fields"));
        store.put(Language::English.collection(), "bad", junk).await.unwrap();

        let leads = repo.list().await;
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id.as_str(), "good");
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn update_merges_and_refreshes_updated_at() {
        let (_, repo) = repo(Language::English);
        let id = repo.save(payload(&[("name", "Ravi")])).await.unwrap();
        let before = repo.list().await.remove(0);

        repo.update(&id, payload(&[("status", "contacted")])).await.unwrap();

        let after = repo.list().await.remove(0);
        assert_eq!(after.status, "contacted");
        assert_eq!(after.fields["name"], json!("Ravi")); // untouched field kept
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn update_unknown_id_is_noop() {
        let (_, repo) = repo(Language::English);
        repo.save(payload(&[("name", "only")])).await.unwrap();

        repo.update(&LeadId::from("ghost"), payload(&[("status", "x")]))
            .await
            .unwrap();

        let leads = repo.list().await;
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].status, STATUS_NEW);
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_removes_lead() {
        let (_, repo) = repo(Language::English);
        let id = repo.save(payload(&[("name", "gone")])).await.unwrap();
        repo.delete(&id).await.unwrap();
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_id_is_noop() {
        let (_, repo) = repo(Language::English);
        repo.save(payload(&[("name", "stays")])).await.unwrap();
        repo.delete(&LeadId::from("ghost")).await.unwrap();
        assert_eq!(repo.list().await.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Collection isolation
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn languages_are_isolated() {
        let store = Arc::new(MemoryDocumentStore::new());
        let english = LeadRepository::new(store.clone(), Language::English);
        let marathi = LeadRepository::new(store.clone(), Language::Marathi);

        english.save(payload(&[("name", "en")])).await.unwrap();
        let marathi_id = marathi.save(payload(&[("name", "mr")])).await.unwrap();

        let english_leads = english.list().await;
        assert_eq!(english_leads.len(), 1);
        assert_eq!(english_leads[0].fields["name"], json!("en"));
        assert!(english_leads.iter().all(|l| l.id != marathi_id));

        let marathi_leads = marathi.list().await;
        assert_eq!(marathi_leads.len(), 1);
        assert_eq!(marathi_leads[0].language, Language::Marathi);
    }

    // -----------------------------------------------------------------------
    // Failure policy
    // -----------------------------------------------------------------------

    /// Backend that fails every operation.
    struct FailingStore;

    #[async_trait]
    impl DocumentStore for FailingStore {
        async fn insert(&self, _: &str, _: Document) -> StoreResult<String> {
            Err(StoreError::Backend("unavailable".into()))
        }
        async fn put(&self, _: &str, _: &str, _: Document) -> StoreResult<()> {
            Err(StoreError::Backend("unavailable".into()))
        }
        async fn get(&self, _: &str, _: &str) -> StoreResult<Option<Document>> {
            Err(StoreError::Backend("unavailable".into()))
        }
        async fn merge(&self, _: &str, _: &str, _: Document) -> StoreResult<bool> {
            Err(StoreError::Backend("unavailable".into()))
        }
        async fn delete(&self, _: &str, _: &str) -> StoreResult<bool> {
            Err(StoreError::Backend("unavailable".into()))
        }
        async fn scan(&self, _: &str) -> StoreResult<Vec<(String, Document)>> {
            Err(StoreError::Backend("unavailable".into()))
        }
    }

    #[tokio::test]
    async fn save_propagates_backend_failure() {
        let repo = LeadRepository::new(Arc::new(FailingStore), Language::English);
        assert!(repo.save(payload(&[("name", "lost?")])).await.is_err());
    }

    #[tokio::test]
    async fn update_and_delete_propagate_backend_failure() {
        let repo = LeadRepository::new(Arc::new(FailingStore), Language::English);
        let id = LeadId::from("any");
        assert!(repo.update(&id, payload(&[])).await.is_err());
        assert!(repo.delete(&id).await.is_err());
    }

    #[tokio::test]
    async fn list_swallows_backend_failure() {
        let repo = LeadRepository::new(Arc::new(FailingStore), Language::English);
        assert!(repo.list().await.is_empty());
    }
}
