use std::sync::Arc;

use leadvault_auth::{CredentialStore, PasswordChange};
use leadvault_leads::LeadRepository;
use leadvault_store::{Document, DocumentStore};
use leadvault_types::{Language, Lead, LeadId};

use crate::config::VaultConfig;
use crate::error::VaultResult;

/// The facade the landing pages and the admin dashboard call.
///
/// One credential store and one lead repository per language, all sharing
/// the backend chosen at construction time. Strictly request/response: each
/// call performs its reads/writes against the backend and returns.
pub struct LeadVault {
    credentials: CredentialStore,
    english: LeadRepository,
    marathi: LeadRepository,
}

impl LeadVault {
    /// Open a vault against the configured backend.
    pub fn open(config: &VaultConfig) -> Self {
        Self::with_store(config.backend.build())
    }

    /// Vault over a fresh in-memory backend (tests, embedding).
    pub fn in_memory() -> Self {
        Self::open(&VaultConfig::default())
    }

    /// Vault over an injected backend.
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            credentials: CredentialStore::new(store.clone()),
            english: LeadRepository::new(store.clone(), Language::English),
            marathi: LeadRepository::new(store, Language::Marathi),
        }
    }

    fn leads(&self, language: Language) -> &LeadRepository {
        match language {
            Language::English => &self.english,
            Language::Marathi => &self.marathi,
        }
    }

    // ---- Admin authentication ----

    /// Whether the admin password has been set up. Never fails; backend
    /// trouble reads as "not set up".
    pub async fn is_admin_setup(&self) -> bool {
        self.credentials.is_setup().await
    }

    /// Set the admin password. Overwrites any existing credential; returns
    /// `false` on backend failure.
    pub async fn setup_admin_password(&self, password: &str) -> bool {
        self.credentials.setup(password).await
    }

    /// Verify the admin password, marking this session logged in on success.
    pub async fn verify_admin_password(&self, password: &str) -> bool {
        self.credentials.verify(password).await
    }

    /// Change the admin password after re-verifying the current one.
    pub async fn change_admin_password(&self, current: &str, next: &str) -> PasswordChange {
        self.credentials.change_password(current, next).await
    }

    /// Whether this session is logged in (process-local flag, not persisted).
    pub fn is_admin_logged_in(&self) -> bool {
        self.credentials.is_logged_in()
    }

    /// Log out. Idempotent.
    pub fn admin_logout(&self) {
        self.credentials.logout();
    }

    // ---- Lead management ----

    /// Capture a lead into `language`'s collection. Backend errors propagate.
    pub async fn save_lead(&self, payload: Document, language: Language) -> VaultResult<LeadId> {
        Ok(self.leads(language).save(payload).await?)
    }

    /// All leads for `language`, newest first. Backend trouble reads as an
    /// empty list.
    pub async fn get_leads(&self, language: Language) -> Vec<Lead> {
        self.leads(language).list().await
    }

    /// Merge fields into an existing lead. Unknown ids are a silent no-op;
    /// backend errors propagate.
    pub async fn update_lead(
        &self,
        id: &LeadId,
        fields: Document,
        language: Language,
    ) -> VaultResult<()> {
        Ok(self.leads(language).update(id, fields).await?)
    }

    /// Delete a lead. Unknown ids are a no-op; backend errors propagate.
    pub async fn delete_lead(&self, id: &LeadId, language: Language) -> VaultResult<()> {
        Ok(self.leads(language).delete(id).await?)
    }

    // ---- Accessors ----

    /// The underlying credential store (strict auth paths live here).
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }
}

impl std::fmt::Debug for LeadVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadVault")
            .field("logged_in", &self.is_admin_logged_in())
            .finish()
    }
}
