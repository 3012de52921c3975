use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::fs;

use crate::plugin::error::PluginSystemError;
use crate::plugin::version::VersionRange;

// --- Intermediate structs for deserialization ---

#[derive(Deserialize, Debug)]
struct RawHostManifest {
    #[serde(default)]
    plugin: Vec<RawPluginManifest>,
}

#[derive(Deserialize, Debug)]
struct RawPluginManifest {
    id: String,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    slots: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

// --- End intermediate structs ---

/// One manifest row: a plugin the host expects, in load order.
#[derive(Debug, Clone)]
pub struct PluginManifest {
    /// Plugin identifier; must match [`Plugin::id`](crate::plugin::Plugin::id).
    pub id: String,

    /// Version constraint the linked plugin must satisfy (optional).
    pub version_req: Option<VersionRange>,

    /// Slots this plugin declares contributions to. Informational: used for
    /// diagnostics and host introspection, not enforced entry by entry.
    pub slots: Vec<String>,

    /// Human-readable description.
    pub description: Option<String>,
}

impl PluginManifest {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            version_req: None,
            slots: Vec::new(),
            description: None,
        }
    }

    pub fn with_version_req(mut self, range: VersionRange) -> Self {
        self.version_req = Some(range);
        self
    }

    pub fn with_slot(mut self, slot: &str) -> Self {
        self.slots.push(slot.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// The host's static plugin manifest.
///
/// An explicit, ordered list of the plugins bootstrap will run, replacing
/// implicit "tag a module as a plugin" discovery. The order
/// of rows is the registration order.
#[derive(Debug, Clone, Default)]
pub struct HostManifest {
    pub plugins: Vec<PluginManifest>,
}

impl HostManifest {
    pub fn new(plugins: Vec<PluginManifest>) -> Self {
        Self { plugins }
    }

    pub fn plugin_ids(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&PluginManifest> {
        self.plugins.iter().find(|p| p.id == id)
    }

    /// Parse a manifest from TOML text.
    #[cfg(feature = "toml-manifest")]
    pub fn from_toml_str(text: &str) -> Result<Self, PluginSystemError> {
        let raw: RawHostManifest =
            toml::from_str(text).map_err(|e| manifest_error(inline_path(), "invalid TOML", e))?;
        Self::from_raw(raw, inline_path())
    }

    /// Parse a manifest from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, PluginSystemError> {
        let raw: RawHostManifest = serde_json::from_str(text)
            .map_err(|e| manifest_error(inline_path(), "invalid JSON", e))?;
        Self::from_raw(raw, inline_path())
    }

    /// Parse a manifest from YAML text.
    #[cfg(feature = "yaml-manifest")]
    pub fn from_yaml_str(text: &str) -> Result<Self, PluginSystemError> {
        let raw: RawHostManifest = serde_yaml::from_str(text)
            .map_err(|e| manifest_error(inline_path(), "invalid YAML", e))?;
        Self::from_raw(raw, inline_path())
    }

    /// Load a manifest file, picking the format from the file extension.
    pub async fn load(path: &Path) -> Result<Self, PluginSystemError> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| manifest_error(path.to_path_buf(), "failed to read manifest", e))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let raw: RawHostManifest = match extension.as_str() {
            #[cfg(feature = "toml-manifest")]
            "toml" => toml::from_str(&text)
                .map_err(|e| manifest_error(path.to_path_buf(), "invalid TOML", e))?,
            "json" => serde_json::from_str(&text)
                .map_err(|e| manifest_error(path.to_path_buf(), "invalid JSON", e))?,
            #[cfg(feature = "yaml-manifest")]
            "yaml" | "yml" => serde_yaml::from_str(&text)
                .map_err(|e| manifest_error(path.to_path_buf(), "invalid YAML", e))?,
            other => {
                return Err(PluginSystemError::ManifestError {
                    path: path.to_path_buf(),
                    message: format!("unsupported manifest format '{}'", other),
                    source: None,
                })
            }
        };

        Self::from_raw(raw, path.to_path_buf())
    }

    fn from_raw(raw: RawHostManifest, origin: PathBuf) -> Result<Self, PluginSystemError> {
        let mut plugins = Vec::with_capacity(raw.plugin.len());
        let mut seen: Vec<&str> = Vec::new();

        for row in &raw.plugin {
            if row.id.is_empty() {
                return Err(PluginSystemError::ManifestError {
                    path: origin,
                    message: "plugin row with empty id".to_string(),
                    source: None,
                });
            }
            if seen.contains(&row.id.as_str()) {
                return Err(PluginSystemError::ManifestError {
                    path: origin,
                    message: format!("plugin '{}' listed more than once", row.id),
                    source: None,
                });
            }
            seen.push(&row.id);

            let version_req = match &row.version {
                Some(constraint) => Some(VersionRange::from_constraint(constraint)?),
                None => None,
            };

            plugins.push(PluginManifest {
                id: row.id.clone(),
                version_req,
                slots: row.slots.clone(),
                description: row.description.clone(),
            });
        }

        Ok(Self { plugins })
    }
}

fn inline_path() -> PathBuf {
    PathBuf::from("<inline manifest>")
}

fn manifest_error(
    path: PathBuf,
    message: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> PluginSystemError {
    PluginSystemError::ManifestError {
        path,
        message: message.to_string(),
        source: Some(Box::new(source)),
    }
}
