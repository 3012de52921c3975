//! # Stratum Core Host
//!
//! Registry ownership and bootstrap. An [`ExtensionHost`] is an explicit,
//! dependency-injected container of per-slot registries, constructed once
//! at startup and passed by reference to registration-side and query-side
//! code alike, instead of module-level shared state. [`Bootstrap`] runs the
//! statically linked plugins in manifest order and flips the host to
//! "ready"; a query before that point is answered (the store is just
//! partial) but logged loudly, since partial results are the classic latent
//! bug of plugin registries.

pub mod bootstrap;

pub use bootstrap::{Bootstrap, BootstrapReport};

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use crate::registry::error::RegistryError;
use crate::registry::registry::{Cardinality, ExtensionRegistry};

/// Host application name.
pub const HOST_NAME: &str = "stratum";
/// Version of the extension API plugins register against.
pub const API_VERSION: &str = "0.1.0";

/// Type-erased handle to one slot's registry.
trait SlotHandle: Any + Send + Sync {
    fn name(&self) -> &str;
    fn cardinality(&self) -> Cardinality;
    fn entry_count(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<V: Send + Sync + 'static> SlotHandle for ExtensionRegistry<V> {
    fn name(&self) -> &str {
        self.slot()
    }

    fn cardinality(&self) -> Cardinality {
        ExtensionRegistry::cardinality(self)
    }

    fn entry_count(&self) -> usize {
        self.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Summary of one installed slot, for introspection and diagnostics.
#[derive(Debug, Clone)]
pub struct SlotOverview {
    pub name: String,
    pub cardinality: Cardinality,
    pub entries: usize,
}

/// Container of all extension-point registries of one host instance.
///
/// Slots are stored type-erased and recovered through typed accessors, so
/// each extension point keeps its own closed entry type while the host
/// stays a single flat namespace.
pub struct ExtensionHost {
    slots: HashMap<String, Box<dyn SlotHandle>>,
    ready: bool,
}

impl ExtensionHost {
    /// Create a host with no slots installed.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            ready: false,
        }
    }

    /// Install a slot holding entries of type `V`.
    pub fn add_slot<V: Send + Sync + 'static>(
        &mut self,
        name: &str,
        cardinality: Cardinality,
    ) -> Result<&mut ExtensionRegistry<V>, RegistryError> {
        if self.slots.contains_key(name) {
            return Err(RegistryError::DuplicateSlot {
                slot: name.to_string(),
            });
        }
        self.slots.insert(
            name.to_string(),
            Box::new(ExtensionRegistry::<V>::new(name, cardinality)),
        );
        log::debug!("installed slot '{}' ({})", name, cardinality);

        let registry = self
            .slots
            .get_mut(name)
            .and_then(|s| s.as_any_mut().downcast_mut::<ExtensionRegistry<V>>())
            .expect("slot was just installed with this entry type");
        Ok(registry)
    }

    /// Query-side access to a slot's registry.
    ///
    /// `None` means the slot is not installed or `V` is not its entry type.
    pub fn slot<V: Send + Sync + 'static>(&self, name: &str) -> Option<&ExtensionRegistry<V>> {
        if !self.ready {
            log::warn!(
                "slot '{}' queried before bootstrap completed; results may be partial",
                name
            );
        }
        let handle = self.slots.get(name)?;
        let registry = handle.as_any().downcast_ref::<ExtensionRegistry<V>>();
        if registry.is_none() {
            log::warn!("slot '{}' exists but holds a different entry type", name);
        }
        registry
    }

    /// Registration-side access to a slot's registry.
    pub fn slot_mut<V: Send + Sync + 'static>(
        &mut self,
        name: &str,
    ) -> Option<&mut ExtensionRegistry<V>> {
        self.slots
            .get_mut(name)?
            .as_any_mut()
            .downcast_mut::<ExtensionRegistry<V>>()
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Names of all installed slots, sorted.
    pub fn slot_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.slots.keys().cloned().collect();
        names.sort();
        names
    }

    /// Per-slot summaries, sorted by slot name.
    pub fn overview(&self) -> Vec<SlotOverview> {
        let mut slots: Vec<SlotOverview> = self
            .slots
            .values()
            .map(|s| SlotOverview {
                name: s.name().to_string(),
                cardinality: s.cardinality(),
                entries: s.entry_count(),
            })
            .collect();
        slots.sort_by(|a, b| a.name.cmp(&b.name));
        slots
    }

    /// Whether bootstrap has completed and every manifest plugin has
    /// registered.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub(crate) fn mark_ready(&mut self) {
        self.ready = true;
    }
}

impl Default for ExtensionHost {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ExtensionHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionHost")
            .field("slots", &self.slot_names())
            .field("ready", &self.ready)
            .finish()
    }
}

#[cfg(test)]
mod tests;
