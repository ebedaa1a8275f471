//! The credential store: setup, verify, change, and the login flag.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use leadvault_store::{Document, DocumentStore};
use leadvault_types::{now_iso, AdminCredential, ADMIN_DOC_ID, ADMIN_SETTINGS};

use crate::error::{AuthError, AuthResult};
use crate::password::PasswordScheme;
use crate::session::Session;

const MSG_CURRENT_INCORRECT: &str = "Current password is incorrect";
const MSG_CHANGED: &str = "Password changed successfully";
const MSG_CHANGE_ERROR: &str = "Error changing password";

/// Outcome of a password change, in the shape the dashboard renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordChange {
    pub success: bool,
    pub message: String,
}

impl PasswordChange {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

/// Manages the single admin credential and the process-local login flag.
///
/// The credential record lives at (`admin_settings`, `credentials`) in the
/// backend. The boolean operations (`is_setup`, `setup`, `verify`) swallow
/// backend failures and return the safe default; `authenticate` is the
/// strict variant for callers that need the distinction.
pub struct CredentialStore {
    store: Arc<dyn DocumentStore>,
    scheme: PasswordScheme,
    session: Session,
}

impl CredentialStore {
    /// Credential store with the default hashing work factor.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_scheme(store, PasswordScheme::DEFAULT)
    }

    /// Credential store with an explicit hashing scheme.
    pub fn with_scheme(store: Arc<dyn DocumentStore>, scheme: PasswordScheme) -> Self {
        Self {
            store,
            scheme,
            session: Session::new(),
        }
    }

    /// Whether an admin credential exists.
    ///
    /// A backend failure reads as "not set up": the conservative default for
    /// a gate that decides whether to show the first-run setup screen.
    pub async fn is_setup(&self) -> bool {
        match self.load().await {
            Ok(_) => true,
            Err(AuthError::NotConfigured) => false,
            Err(e) => {
                warn!(error = %e, "failed to check admin setup");
                false
            }
        }
    }

    /// Set the admin password, writing a fresh credential record.
    ///
    /// Any existing credential is overwritten without re-authentication;
    /// this is the recovery path when the old password is lost. Returns
    /// `false` on backend failure.
    pub async fn setup(&self, password: &str) -> bool {
        let now = now_iso();
        let credential = AdminCredential {
            password_hash: self.scheme.hash(password),
            created_at: now.clone(),
            updated_at: now,
        };
        let document = match encode(&credential) {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "failed to encode admin credential");
                return false;
            }
        };
        match self.store.put(ADMIN_SETTINGS, ADMIN_DOC_ID, document).await {
            Ok(()) => {
                debug!("admin credential stored");
                true
            }
            Err(e) => {
                warn!(error = %e, "failed to store admin credential");
                false
            }
        }
    }

    /// Verify a password and, on success, mark the session as logged in.
    ///
    /// A missing credential, a mismatch, and a backend failure all read as
    /// `false`.
    pub async fn verify(&self, password: &str) -> bool {
        match self.authenticate(password).await {
            Ok(()) => true,
            Err(AuthError::NotConfigured | AuthError::AuthenticationFailed) => false,
            Err(e) => {
                warn!(error = %e, "failed to verify admin password");
                false
            }
        }
    }

    /// Strict verification: surfaces why authentication did not succeed.
    ///
    /// Marks the session as logged in on success.
    pub async fn authenticate(&self, password: &str) -> AuthResult<()> {
        let credential = self.load().await?;
        if !self.scheme.verify(password, &credential.password_hash) {
            return Err(AuthError::AuthenticationFailed);
        }
        self.session.mark_logged_in();
        Ok(())
    }

    /// Change the password after re-verifying the current one.
    ///
    /// Only `passwordHash` and `updatedAt` are touched; `createdAt` is
    /// preserved by the field merge.
    pub async fn change_password(&self, current: &str, next: &str) -> PasswordChange {
        let credential = match self.load().await {
            Ok(credential) => credential,
            Err(AuthError::NotConfigured) => return PasswordChange::failed(MSG_CURRENT_INCORRECT),
            Err(e) => {
                warn!(error = %e, "failed to load credential for password change");
                return PasswordChange::failed(MSG_CHANGE_ERROR);
            }
        };
        if !self.scheme.verify(current, &credential.password_hash) {
            return PasswordChange::failed(MSG_CURRENT_INCORRECT);
        }

        let mut patch = Document::new();
        patch.insert(
            "passwordHash".to_string(),
            Value::String(self.scheme.hash(next)),
        );
        patch.insert("updatedAt".to_string(), Value::String(now_iso()));

        match self.store.merge(ADMIN_SETTINGS, ADMIN_DOC_ID, patch).await {
            Ok(_) => {
                debug!("admin password changed");
                PasswordChange::ok(MSG_CHANGED)
            }
            Err(e) => {
                warn!(error = %e, "failed to update admin credential");
                PasswordChange::failed(MSG_CHANGE_ERROR)
            }
        }
    }

    /// Whether the current session is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Clear the login flag. Idempotent.
    pub fn logout(&self) {
        self.session.clear();
    }

    /// The session object holding the login flag.
    pub fn session(&self) -> &Session {
        &self.session
    }

    async fn load(&self) -> AuthResult<AdminCredential> {
        let document = self
            .store
            .get(ADMIN_SETTINGS, ADMIN_DOC_ID)
            .await?
            .ok_or(AuthError::NotConfigured)?;
        serde_json::from_value(Value::Object(document))
            .map_err(|e| AuthError::Corrupt(e.to_string()))
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("scheme", &self.scheme)
            .field("logged_in", &self.session.is_logged_in())
            .finish()
    }
}

fn encode(credential: &AdminCredential) -> AuthResult<Document> {
    match serde_json::to_value(credential) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(AuthError::Corrupt("credential is not an object".into())),
        Err(e) => Err(AuthError::Corrupt(e.to_string())),
    }
}
