//! Foundation types for LeadVault.
//!
//! This crate provides the core types shared by every other LeadVault crate:
//! the language selector that routes leads into their collection, the lead
//! record itself, and the singleton admin credential record.
//!
//! # Key Types
//!
//! - [`Language`] — Closed set of supported landing-page languages, each
//!   mapped to a fixed collection name
//! - [`Lead`] — One visitor submission: system fields plus an arbitrary
//!   caller-supplied payload
//! - [`LeadId`] — Backend-issued identifier, unique within its collection
//! - [`AdminCredential`] — The single admin password record

pub mod credential;
pub mod error;
pub mod language;
pub mod lead;

pub use credential::{AdminCredential, ADMIN_DOC_ID, ADMIN_SETTINGS};
pub use error::TypeError;
pub use language::Language;
pub use lead::{now_iso, Lead, LeadId, FIELD_CREATED_AT, FIELD_LANGUAGE, FIELD_STATUS, FIELD_UPDATED_AT, STATUS_NEW};
