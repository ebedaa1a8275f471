use thiserror::Error;

use leadvault_auth::AuthError;
use leadvault_leads::LeadError;
use leadvault_store::StoreError;

/// The closed error taxonomy callers of the facade see.
///
/// Every lower-layer failure maps into one of these four. The swallowing
/// operations (`is_admin_setup`, `verify_admin_password`, ...) never return
/// this type at all; only the propagating lead mutations do.
#[derive(Debug, Error)]
pub enum VaultError {
    /// No admin credential has been set up yet.
    #[error("admin credential not configured")]
    NotConfigured,

    /// The supplied password does not match the stored credential.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The addressed record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The persistence backend failed or returned undecodable data.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

/// Result alias for facade operations.
pub type VaultResult<T> = Result<T, VaultError>;

impl From<StoreError> for VaultError {
    fn from(e: StoreError) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}

impl From<AuthError> for VaultError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::NotConfigured => Self::NotConfigured,
            AuthError::AuthenticationFailed => Self::AuthenticationFailed,
            AuthError::Corrupt(msg) => Self::StorageUnavailable(msg),
            AuthError::Store(e) => e.into(),
        }
    }
}

impl From<LeadError> for VaultError {
    fn from(e: LeadError) -> Self {
        match e {
            LeadError::Store(e) => e.into(),
        }
    }
}
