use thiserror::Error;

use leadvault_store::StoreError;

/// Errors from credential operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No admin credential has been set up yet.
    #[error("admin credential not configured")]
    NotConfigured,

    /// The supplied password does not match the stored credential.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The stored credential record could not be decoded.
    #[error("corrupt credential record: {0}")]
    Corrupt(String),

    /// The persistence backend failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for credential operations.
pub type AuthResult<T> = Result<T, AuthError>;
