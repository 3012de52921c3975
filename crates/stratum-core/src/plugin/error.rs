//! # Stratum Core Plugin System Errors
//!
//! Defines [`PluginSystemError`], the error type for manifest handling and
//! bootstrap-time plugin registration. Registry-level conflicts bubble
//! through transparently via the `Registry` variant.

use std::path::PathBuf;

use crate::plugin::version::VersionError;
use crate::registry::error::RegistryError;

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("plugin registration failed for '{plugin_id}': {message}")]
    RegistrationError { plugin_id: String, message: String },

    #[error("plugin '{plugin_id}' is linked more than once")]
    DuplicatePlugin { plugin_id: String },

    #[error("plugin '{plugin_id}' is not compatible with host API version {host_api}")]
    IncompatibleApiVersion { plugin_id: String, host_api: String },

    #[error("manifest lists plugin '{plugin_id}', but no such plugin is linked")]
    MissingPlugin { plugin_id: String },

    #[error(
        "plugin '{plugin_id}' version '{found}' does not satisfy manifest constraint '{constraint}'"
    )]
    VersionMismatch {
        plugin_id: String,
        found: String,
        constraint: String,
    },

    #[error("manifest error for '{path}': {message}", path = .path.display())]
    ManifestError {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("version parsing error: {0}")]
    VersionParsing(#[from] VersionError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
