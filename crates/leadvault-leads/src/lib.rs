//! Language-scoped lead repository for LeadVault.
//!
//! A [`LeadRepository`] owns the CRUD surface over one language's lead
//! collection. The failure policy is split by blast radius: the capture path
//! (`save`) and the mutating paths (`update`, `delete`) propagate backend
//! errors, because silently losing a lead is the costliest failure in the
//! system; the read path (`list`) degrades to an empty list so the dashboard
//! still renders.

pub mod error;
pub mod repository;

pub use error::{LeadError, LeadResult};
pub use repository::LeadRepository;
