//! Web-map feature plugin: contributes the viewer's sidebar panels, the
//! resource display widget and the client entrypoint.
//!
//! The display widget's payload is deferred: registration only records the
//! key, and the widget description is resolved when something actually
//! opens the display tab.

use std::sync::Arc;

use log::info;
use stratum_core::host::ExtensionHost;
use stratum_core::plugin::error::PluginSystemError;
use stratum_core::plugin::traits::Plugin;
use stratum_core::plugin::version::VersionRange;
use stratum_core::registry::entry::ExtensionEntry;
use stratum_core::registry::key::ExtensionKey;
use stratum_core::slots::{
    self, EditorWidget, Entrypoint, PanelContribution,
};

pub const PLUGIN_ID: &str = "webmap";

#[derive(Default)]
pub struct WebmapPlugin;

impl Plugin for WebmapPlugin {
    fn id(&self) -> &str {
        PLUGIN_ID
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        const COMPATIBLE_API_REQ: &str = "^0.1";
        match COMPATIBLE_API_REQ.parse::<VersionRange>() {
            Ok(vr) => vec![vr],
            Err(e) => {
                log::error!(
                    "failed to parse API version requirement ('{}'): {}",
                    COMPATIBLE_API_REQ,
                    e
                );
                vec![]
            }
        }
    }

    fn register(&self, host: &mut ExtensionHost) -> Result<(), PluginSystemError> {
        info!("registering webmap contributions v{}", self.version());

        let panels = host
            .slot_mut::<PanelContribution>(slots::WEBMAP_PANEL)
            .ok_or_else(|| missing_slot(slots::WEBMAP_PANEL))?;
        panels.register(
            ExtensionEntry::value(
                ExtensionKey::new(PLUGIN_ID, "layers"),
                PanelContribution {
                    title: "Layers".to_string(),
                    icon: Some("layers".to_string()),
                },
            )
            .with_order(10)
            .with_label("Layers"),
        )?;
        panels.register(
            ExtensionEntry::value(
                ExtensionKey::new(PLUGIN_ID, "search"),
                PanelContribution {
                    title: "Search".to_string(),
                    icon: Some("search".to_string()),
                },
            )
            .with_order(20)
            .with_label("Search"),
        )?;

        let widgets = host
            .slot_mut::<EditorWidget>(slots::RESOURCE_EDITOR_WIDGET)
            .ok_or_else(|| missing_slot(slots::RESOURCE_EDITOR_WIDGET))?;
        widgets.register(
            ExtensionEntry::deferred(ExtensionKey::new(PLUGIN_ID, "display"), || async {
                // Stands in for fetching the widget's module bundle.
                Ok(Arc::new(EditorWidget {
                    caption: "Display".to_string(),
                    module: "webmap/display".to_string(),
                }))
            })
            .with_label("Display"),
        )?;

        let entrypoints = host
            .slot_mut::<Entrypoint>(slots::JSREALM_ENTRYPOINT)
            .ok_or_else(|| missing_slot(slots::JSREALM_ENTRYPOINT))?;
        entrypoints.register_value(
            ExtensionKey::new(PLUGIN_ID, "viewer"),
            Entrypoint {
                module: "webmap/viewer".to_string(),
            },
        )?;

        Ok(())
    }
}

fn missing_slot(slot: &str) -> PluginSystemError {
    PluginSystemError::RegistrationError {
        plugin_id: PLUGIN_ID.to_string(),
        message: format!("slot '{}' is not installed", slot),
    }
}
