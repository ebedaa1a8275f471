use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Landing-page language for a lead submission.
///
/// The set is closed: every language maps to exactly one lead collection,
/// and a lead never moves between collections after creation. Updates are
/// addressed to the collection the lead was created in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Marathi,
}

impl Language {
    /// All supported languages, in declaration order.
    pub const ALL: [Self; 2] = [Self::English, Self::Marathi];

    /// The fixed collection name leads for this language are stored under.
    pub const fn collection(self) -> &'static str {
        match self {
            Self::English => "leads_english",
            Self::Marathi => "leads_marathi",
        }
    }

    /// The lowercase wire name (`"english"` / `"marathi"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Marathi => "marathi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "english" => Ok(Self::English),
            "marathi" => Ok(Self::Marathi),
            other => Err(TypeError::UnknownLanguage(other.to_string())),
        }
    }
}
