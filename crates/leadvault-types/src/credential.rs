use serde::{Deserialize, Serialize};

/// Collection holding admin settings.
pub const ADMIN_SETTINGS: &str = "admin_settings";

/// Fixed document key of the singleton credential record.
pub const ADMIN_DOC_ID: &str = "credentials";

/// The single admin password record.
///
/// At most one exists per deployment, stored at
/// ([`ADMIN_SETTINGS`], [`ADMIN_DOC_ID`]). It is created on first setup and
/// never deleted; only `passwordHash` and `updatedAt` change afterwards,
/// through an explicit password change. Timestamps are ISO-8601 strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredential {
    pub password_hash: String,
    pub created_at: String,
    pub updated_at: String,
}
