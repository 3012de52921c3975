//! # Stratum Core Registry Errors
//!
//! Defines [`RegistryError`], raised for conflicting or malformed
//! registrations and for failed lazy payload resolution. Lookup misses are
//! deliberately *not* errors; see the module docs of
//! [`registry`](crate::registry).

use crate::loader::error::LoaderError;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("slot '{slot}' already has an entry for key '{key}'")]
    DuplicateEntry { slot: String, key: String },

    #[error(
        "slot '{slot}' is single-valued per component: cannot register '{key}' alongside '{existing}'"
    )]
    CardinalityViolation {
        slot: String,
        key: String,
        existing: String,
    },

    #[error("malformed entry for slot '{slot}': {reason}")]
    MalformedEntry { slot: String, reason: String },

    #[error("invalid extension key '{raw}': expected 'component/identity'")]
    InvalidKey { raw: String },

    #[error("slot '{slot}' is already installed")]
    DuplicateSlot { slot: String },

    #[error(transparent)]
    Loader(#[from] LoaderError),
}
