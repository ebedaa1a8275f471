//! High-level LeadVault API.
//!
//! [`LeadVault`] is the single integration boundary the UI layer calls: the
//! admin credential lifecycle on one side and language-scoped lead CRUD on
//! the other, over a backend chosen once at startup via [`VaultConfig`].
//!
//! ```no_run
//! use leadvault_sdk::{Language, LeadVault};
//!
//! # async fn demo() {
//! let vault = LeadVault::in_memory();
//!
//! if !vault.is_admin_setup().await {
//!     vault.setup_admin_password("a strong passphrase").await;
//! }
//!
//! let mut payload = leadvault_sdk::Document::new();
//! payload.insert("name".into(), "Asha Patil".into());
//! let id = vault.save_lead(payload, Language::Marathi).await.unwrap();
//!
//! let leads = vault.get_leads(Language::Marathi).await;
//! assert_eq!(leads[0].id, id);
//! # }
//! ```

pub mod config;
pub mod error;
pub mod vault;

pub use config::{BackendConfig, VaultConfig};
pub use error::{VaultError, VaultResult};
pub use vault::LeadVault;

// The types callers hold when talking to the facade.
pub use leadvault_auth::PasswordChange;
pub use leadvault_store::Document;
pub use leadvault_types::{Language, Lead, LeadId};
