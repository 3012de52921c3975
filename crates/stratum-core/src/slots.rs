//! # Standard Slots
//!
//! Slot names and entry value types for the host application's built-in
//! extension points. Feature plugins register into these; consumer code
//! queries them through [`ExtensionHost`].

use serde::{Deserialize, Serialize};

use crate::host::ExtensionHost;
use crate::registry::error::RegistryError;
use crate::registry::registry::Cardinality;

/// Panels shown in the web-map viewer sidebar.
pub const WEBMAP_PANEL: &str = "webmap.panel";

/// Row actions offered on a resource.
pub const RESOURCE_ACTION: &str = "resource.action";

/// The editor widget embedded in a resource's edit page. Single-valued:
/// at most one widget per component key.
pub const RESOURCE_EDITOR_WIDGET: &str = "resource.editor-widget";

/// Client-side entrypoint modules loaded at page startup.
pub const JSREALM_ENTRYPOINT: &str = "jsrealm.entrypoint";

/// A contribution to the web-map panel slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelContribution {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A row action on a resource, optionally gated on a permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAction {
    pub label: String,
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
}

/// An editor widget: a caption plus the module that renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorWidget {
    pub caption: String,
    pub module: String,
}

/// A client entrypoint module reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrypoint {
    pub module: String,
}

/// Build a host with the standard slots installed.
pub fn standard_host() -> Result<ExtensionHost, RegistryError> {
    let mut host = ExtensionHost::new();
    host.add_slot::<PanelContribution>(WEBMAP_PANEL, Cardinality::Multi)?;
    host.add_slot::<ResourceAction>(RESOURCE_ACTION, Cardinality::Multi)?;
    host.add_slot::<EditorWidget>(RESOURCE_EDITOR_WIDGET, Cardinality::Single)?;
    host.add_slot::<Entrypoint>(JSREALM_ENTRYPOINT, Cardinality::Multi)?;
    Ok(host)
}
