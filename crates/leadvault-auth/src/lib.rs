//! Admin credential lifecycle for LeadVault.
//!
//! A single shared admin password gates the dashboard. This crate manages
//! its lifecycle — set up once, verify on login, change with
//! re-authentication — on top of any [`DocumentStore`] backend.
//!
//! # Components
//!
//! - [`PasswordScheme`] — salted, iterated SHA-256 password hashing with a
//!   self-describing encoded form
//! - [`Session`] — the explicit process-local "logged in" flag
//! - [`CredentialStore`] — the lifecycle operations themselves
//!
//! The caller-visible contract is forgiving by design: setup and
//! verification never raise, they log and fall back to a safe default.
//! Strict variants that surface [`AuthError`] exist for callers that need
//! to distinguish the failure modes.
//!
//! [`DocumentStore`]: leadvault_store::DocumentStore

pub mod credentials;
pub mod error;
pub mod password;
pub mod session;

pub use credentials::{CredentialStore, PasswordChange};
pub use error::{AuthError, AuthResult};
pub use password::PasswordScheme;
pub use session::Session;
