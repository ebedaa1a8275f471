use thiserror::Error;

use leadvault_store::StoreError;

/// Errors from lead repository operations.
#[derive(Debug, Error)]
pub enum LeadError {
    /// The persistence backend failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result alias for lead operations.
pub type LeadResult<T> = Result<T, LeadError>;
