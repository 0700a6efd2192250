//! Error types for the inverted index core.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("property '{property}': value does not match declared type ({reason})")]
    SchemaMismatch { property: String, reason: String },

    #[error("property '{property}' has no backing bucket")]
    MissingBucket { property: String },

    #[error("corrupt row for property '{property}', term {term}: {reason}")]
    CorruptRow {
        property: String,
        term: String,
        reason: String,
    },

    #[error("cannot encode value: {reason}")]
    EncodeError { reason: String },

    #[error("store error: {0}")]
    StoreError(String),
}

/// Render term bytes for an error message: UTF-8 if valid, hex otherwise.
pub(crate) fn describe_term(term: &[u8]) -> String {
    use std::fmt::Write;

    match std::str::from_utf8(term) {
        Ok(s) if s.chars().all(|c| !c.is_control()) => format!("\"{}\"", s),
        _ => {
            let mut hex = String::with_capacity(2 + term.len() * 2);
            hex.push_str("0x");
            for byte in term {
                let _ = write!(hex, "{:02x}", byte);
            }
            hex
        }
    }
}
