use thiserror::Error;

/// Errors from constructing or decoding foundation types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The language string is not one of the supported values.
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// A stored document could not be decoded into a typed record.
    #[error("decode error: {0}")]
    Decode(String),
}
