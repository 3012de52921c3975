use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use crate::host::{ExtensionHost, SlotOverview, API_VERSION};
use crate::plugin::error::PluginSystemError;
use crate::plugin::manifest::HostManifest;
use crate::plugin::traits::Plugin;
use crate::plugin::version::{ApiVersion, VersionError};

/// Bootstrap routine: runs the linked plugins in manifest order against a
/// host, then signals "registries ready".
///
/// Validation happens before any plugin registers: duplicate links, manifest
/// rows without a linked plugin, version-constraint mismatches and API
/// incompatibilities all fail the bootstrap as a whole. A plugin that is
/// linked but absent from the manifest is skipped with a warning: the
/// manifest, not the link line, decides what runs.
pub struct Bootstrap {
    manifest: HostManifest,
    plugins: Vec<Arc<dyn Plugin>>,
    api_version: ApiVersion,
}

impl Bootstrap {
    /// Bootstrap against the host's own API version.
    pub fn new(manifest: HostManifest) -> Result<Self, PluginSystemError> {
        let api_version = ApiVersion::from_str(API_VERSION)?;
        Ok(Self::with_api_version(manifest, api_version))
    }

    /// Bootstrap against an explicit API version (used by tests and embedders).
    pub fn with_api_version(manifest: HostManifest, api_version: ApiVersion) -> Self {
        Self {
            manifest,
            plugins: Vec::new(),
            api_version,
        }
    }

    /// Link a plugin into this bootstrap.
    pub fn add_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    pub fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Validate, register every manifest plugin in order, and mark the host
    /// ready.
    pub fn run(self, host: &mut ExtensionHost) -> Result<BootstrapReport, PluginSystemError> {
        let mut linked: HashMap<String, Arc<dyn Plugin>> = HashMap::new();
        for plugin in self.plugins {
            let id = plugin.id().to_string();
            if linked.insert(id.clone(), plugin).is_some() {
                return Err(PluginSystemError::DuplicatePlugin { plugin_id: id });
            }
        }

        let host_semver = self.api_version.as_semver();
        let mut registered = Vec::new();

        for row in &self.manifest.plugins {
            let plugin = linked
                .remove(&row.id)
                .ok_or_else(|| PluginSystemError::MissingPlugin {
                    plugin_id: row.id.clone(),
                })?;

            if let Some(required) = &row.version_req {
                let found = semver::Version::parse(plugin.version()).map_err(|e| {
                    PluginSystemError::VersionParsing(VersionError::ParseError(format!(
                        "plugin '{}' version '{}': {}",
                        row.id,
                        plugin.version(),
                        e
                    )))
                })?;
                if !required.includes(&found) {
                    return Err(PluginSystemError::VersionMismatch {
                        plugin_id: row.id.clone(),
                        found: plugin.version().to_string(),
                        constraint: required.constraint_string().to_string(),
                    });
                }
            }

            let compatible = plugin
                .compatible_api_versions()
                .iter()
                .any(|range| range.includes(&host_semver));
            if !compatible {
                return Err(PluginSystemError::IncompatibleApiVersion {
                    plugin_id: row.id.clone(),
                    host_api: self.api_version.to_string(),
                });
            }

            log::info!("registering plugin '{}' v{}", row.id, plugin.version());
            plugin.register(host)?;
            registered.push(row.id.clone());
        }

        let mut skipped: Vec<String> = linked.into_keys().collect();
        skipped.sort();
        for id in &skipped {
            log::warn!("plugin '{}' is linked but not listed in the manifest; skipping", id);
        }

        host.mark_ready();
        log::info!(
            "bootstrap complete: {} plugin(s) registered, registries ready",
            registered.len()
        );

        Ok(BootstrapReport {
            plugins: registered,
            skipped,
            slots: host.overview(),
        })
    }
}

/// What a completed bootstrap did.
#[derive(Debug, Clone)]
pub struct BootstrapReport {
    /// Plugin ids in registration order.
    pub plugins: Vec<String>,
    /// Linked plugins the manifest did not list.
    pub skipped: Vec<String>,
    /// Slot summaries captured right after the host became ready.
    pub slots: Vec<SlotOverview>,
}
