//! Resource-actions feature plugin: the standard row actions on a resource.
//!
//! Edit, delete and export are plain entries with orders and a declarative
//! permission attribute. The "manage" action is a factory instead: it only
//! materializes when the query context carries the admin permission, and
//! skips otherwise so the query falls through to whatever comes next.

use log::info;
use stratum_core::host::ExtensionHost;
use stratum_core::plugin::error::PluginSystemError;
use stratum_core::plugin::traits::Plugin;
use stratum_core::plugin::version::VersionRange;
use stratum_core::registry::entry::{ExtensionEntry, Outcome};
use stratum_core::registry::key::ExtensionKey;
use stratum_core::slots::{self, ResourceAction};

pub const PLUGIN_ID: &str = "resource-actions";

/// Permission the factory-produced manage action requires in the context.
pub const MANAGE_PERMISSION: &str = "resource.manage";

#[derive(Default)]
pub struct ResourceActionsPlugin;

impl Plugin for ResourceActionsPlugin {
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
        info!("registering resource actions v{}", self.version());

        let actions = host
            .slot_mut::<ResourceAction>(slots::RESOURCE_ACTION)
            .ok_or_else(|| PluginSystemError::RegistrationError {
                plugin_id: PLUGIN_ID.to_string(),
                message: format!("slot '{}' is not installed", slots::RESOURCE_ACTION),
            })?;

        actions.register(
            ExtensionEntry::value(
                ExtensionKey::new(PLUGIN_ID, "edit"),
                ResourceAction {
                    label: "Edit".to_string(),
                    operation: "edit".to_string(),
                    permission: Some("resource.update".to_string()),
                },
            )
            .with_order(10)
            .with_label("Edit")
            .with_attribute("permission:resource.update"),
        )?;
        actions.register(
            ExtensionEntry::value(
                ExtensionKey::new(PLUGIN_ID, "delete"),
                ResourceAction {
                    label: "Delete".to_string(),
                    operation: "delete".to_string(),
                    permission: Some("resource.delete".to_string()),
                },
            )
            .with_order(30)
            .with_label("Delete")
            .with_attribute("permission:resource.delete"),
        )?;
        actions.register(
            ExtensionEntry::value(
                ExtensionKey::new(PLUGIN_ID, "export"),
                ResourceAction {
                    label: "Export".to_string(),
                    operation: "export".to_string(),
                    permission: None,
                },
            )
            .with_order(20)
            .with_label("Export"),
        )?;
        actions.register(
            ExtensionEntry::factory(ExtensionKey::new(PLUGIN_ID, "manage"), |ctx| {
                if ctx.arg("permission") == Some(MANAGE_PERMISSION) {
                    Outcome::Produced(ResourceAction {
                        label: "Manage".to_string(),
                        operation: "manage".to_string(),
                        permission: Some(MANAGE_PERMISSION.to_string()),
                    })
                } else {
                    Outcome::Skip
                }
            })
            .with_order(40)
            .with_label("Manage"),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratum_core::registry::context::FactoryContext;
    use stratum_core::registry::registry::ExtensionRegistry;

    fn actions() -> ExtensionHost {
        let mut host = slots::standard_host().unwrap();
        ResourceActionsPlugin.register(&mut host).unwrap();
        host
    }

    #[test]
    fn actions_query_by_order_not_registration() {
        let mut host = actions();
        let slot: &mut ExtensionRegistry<ResourceAction> =
            host.slot_mut(slots::RESOURCE_ACTION).unwrap();
        let snapshot = slot.snapshot();
        let labels: Vec<Option<&str>> = snapshot.iter().map(|e| e.label()).collect();
        assert_eq!(
            labels,
            vec![Some("Edit"), Some("Export"), Some("Delete"), Some("Manage")]
        );
    }

    #[test]
    fn delete_action_carries_permission_attribute() {
        let mut host = actions();
        let slot: &mut ExtensionRegistry<ResourceAction> =
            host.slot_mut(slots::RESOURCE_ACTION).unwrap();
        let delete = slot
            .get(&ExtensionKey::new(PLUGIN_ID, "delete"))
            .unwrap();
        assert!(delete.has_attribute("permission:resource.delete"));
    }

    #[test]
    fn manage_action_requires_the_permission() {
        let mut host = actions();
        let slot: &mut ExtensionRegistry<ResourceAction> =
            host.slot_mut(slots::RESOURCE_ACTION).unwrap();

        assert!(slot.produce(&FactoryContext::new(), |_| true).is_none());

        let mut ctx = FactoryContext::new();
        ctx.set_arg("permission", MANAGE_PERMISSION);
        let manage = slot.produce(&ctx, |_| true).unwrap();
        assert_eq!(manage.operation, "manage");
    }
}
