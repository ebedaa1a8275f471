use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TypeError;
use crate::language::Language;

/// Initial value of a lead's `status` field.
///
/// After creation any string is accepted via update; there is no enforced
/// transition graph. Status vocabulary is owned by the calling application.
pub const STATUS_NEW: &str = "new";

/// Wire name of the creation timestamp field.
pub const FIELD_CREATED_AT: &str = "createdAt";
/// Wire name of the last-update timestamp field.
pub const FIELD_UPDATED_AT: &str = "updatedAt";
/// Wire name of the status field.
pub const FIELD_STATUS: &str = "status";
/// Wire name of the language field.
pub const FIELD_LANGUAGE: &str = "language";

/// Current wall-clock time as an ISO-8601 string with millisecond precision
/// and `Z` suffix, the format every stored timestamp uses.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Backend-issued lead identifier, unique within its collection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(String);

impl LeadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LeadId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for LeadId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One visitor submission.
///
/// System fields (`id`, timestamps, `status`, `language`) sit alongside an
/// arbitrary caller-supplied payload, which is carried flattened so the
/// stored document keeps the caller's own key names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub status: String,
    pub language: Language,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Lead {
    /// Decode a stored document into a typed lead.
    ///
    /// The document holds everything except the id, which the backend issues
    /// separately (it is the document's key, not one of its fields).
    pub fn from_document(id: impl Into<LeadId>, mut document: Map<String, Value>) -> Result<Self, TypeError> {
        let id: LeadId = id.into();
        document.insert("id".to_string(), Value::String(id.0));
        serde_json::from_value(Value::Object(document)).map_err(|e| TypeError::Decode(e.to_string()))
    }
}
