//! # Stratum Core Loader Errors
//!
//! Defines [`LoaderError`], the error type surfaced by module resolution.
//! The variants are `Clone` (with `Arc`-wrapped sources) because a failed
//! load is delivered to every caller awaiting the same shared resolution.

use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoaderError {
    #[error("no module named '{name}'")]
    NotFound { name: String },

    #[error("i/o error while loading module '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("failed to parse module '{name}': {source}")]
    Parse {
        name: String,
        #[source]
        source: Arc<serde_json::Error>,
    },

    #[error("load failed for '{key}': {message}")]
    Failed { key: String, message: String },
}

impl LoaderError {
    /// Convenience constructor for loader functions that fail with a plain message.
    pub fn failed(key: impl Into<String>, message: impl Into<String>) -> Self {
        LoaderError::Failed {
            key: key.into(),
            message: message.into(),
        }
    }
}
