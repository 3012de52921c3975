use std::sync::Arc;

use crate::host::bootstrap::Bootstrap;
use crate::host::ExtensionHost;
use crate::plugin::error::PluginSystemError;
use crate::plugin::manifest::{HostManifest, PluginManifest};
use crate::plugin::traits::Plugin;
use crate::plugin::version::VersionRange;
use crate::registry::context::FactoryContext;
use crate::registry::entry::{ExtensionEntry, Outcome};
use crate::registry::key::ExtensionKey;
use crate::slots::{self, PanelContribution, ResourceAction};

/// Plugin contributing one panel with a fixed order and label.
struct PanelPlugin {
    id: &'static str,
    order: i64,
    label: &'static str,
}

impl Plugin for PanelPlugin {
    fn id(&self) -> &str {
        self.id
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        vec![">=0.1.0".parse().unwrap()]
    }

    fn register(&self, host: &mut ExtensionHost) -> Result<(), PluginSystemError> {
        let slot = host
            .slot_mut::<PanelContribution>(slots::WEBMAP_PANEL)
            .ok_or_else(|| PluginSystemError::RegistrationError {
                plugin_id: self.id.to_string(),
                message: format!("slot '{}' is not installed", slots::WEBMAP_PANEL),
            })?;
        slot.register(
            ExtensionEntry::value(
                ExtensionKey::new(self.id, "panel"),
                PanelContribution {
                    title: self.label.to_string(),
                    icon: None,
                },
            )
            .with_order(self.order)
            .with_label(self.label),
        )?;
        Ok(())
    }
}

fn manifest(ids: &[&str]) -> HostManifest {
    HostManifest::new(ids.iter().map(|id| PluginManifest::new(id)).collect())
}

#[tokio::test]
async fn panels_query_in_order_across_plugins() {
    let mut host = slots::standard_host().unwrap();

    Bootstrap::new(manifest(&["gamma", "alpha", "beta"]))
        .unwrap()
        .add_plugin(Arc::new(PanelPlugin { id: "gamma", order: 50, label: "C" }))
        .add_plugin(Arc::new(PanelPlugin { id: "alpha", order: 10, label: "A" }))
        .add_plugin(Arc::new(PanelPlugin { id: "beta", order: 30, label: "B" }))
        .run(&mut host)
        .unwrap();

    let panels = host
        .slot::<PanelContribution>(slots::WEBMAP_PANEL)
        .unwrap()
        .snapshot();
    let labels: Vec<&str> = panels.iter().filter_map(|e| e.label()).collect();
    assert_eq!(labels, vec!["A", "B", "C"]);
}

#[test]
fn factory_skip_chains_to_next_entry() {
    let mut host = slots::standard_host().unwrap();
    let actions = host
        .slot_mut::<ResourceAction>(slots::RESOURCE_ACTION)
        .unwrap();

    actions
        .register(
            ExtensionEntry::factory(ExtensionKey::new("admin", "purge"), |ctx| {
                if ctx.arg("permission") == Some("admin") {
                    Outcome::Produced(ResourceAction {
                        label: "Purge".to_string(),
                        operation: "purge".to_string(),
                        permission: Some("admin".to_string()),
                    })
                } else {
                    Outcome::Skip
                }
            })
            .with_order(10),
        )
        .unwrap();
    actions
        .register(
            ExtensionEntry::factory(ExtensionKey::new("everyone", "view"), |_| {
                Outcome::Produced(ResourceAction {
                    label: "View".to_string(),
                    operation: "view".to_string(),
                    permission: None,
                })
            })
            .with_order(20),
        )
        .unwrap();

    let actions = host.slot_mut::<ResourceAction>(slots::RESOURCE_ACTION).unwrap();

    let anonymous = actions.produce(&FactoryContext::new(), |_| true).unwrap();
    assert_eq!(anonymous.operation, "view");

    let mut ctx = FactoryContext::new();
    ctx.set_arg("permission", "admin");
    let admin = actions.produce(&ctx, |_| true).unwrap();
    assert_eq!(admin.operation, "purge");
}

#[test]
fn registration_conflict_surfaces_through_bootstrap() {
    struct Clashing(&'static str);

    impl Plugin for Clashing {
        fn id(&self) -> &str {
            self.0
        }
        fn version(&self) -> &str {
            "1.0.0"
        }
        fn compatible_api_versions(&self) -> Vec<VersionRange> {
            vec![">=0.1.0".parse().unwrap()]
        }
        fn register(&self, host: &mut ExtensionHost) -> Result<(), PluginSystemError> {
            let slot = host
                .slot_mut::<PanelContribution>(slots::WEBMAP_PANEL)
                .expect("standard slot");
            slot.register_value(
                ExtensionKey::new("shared", "panel"),
                PanelContribution {
                    title: self.0.to_string(),
                    icon: None,
                },
            )?;
            Ok(())
        }
    }

    let mut host = slots::standard_host().unwrap();
    let err = Bootstrap::new(manifest(&["first", "second"]))
        .unwrap()
        .add_plugin(Arc::new(Clashing("first")))
        .add_plugin(Arc::new(Clashing("second")))
        .run(&mut host)
        .unwrap_err();

    assert!(matches!(err, PluginSystemError::Registry(_)));
    assert!(!host.is_ready());
}
