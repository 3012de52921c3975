//! # Stratum Core
//!
//! Extension-registry framework for the Stratum host application: feature
//! plugins contribute entries into named slots at bootstrap time, and
//! consumer code queries the slots and resolves heavy payloads lazily
//! through a memoizing async loader.

pub mod host;
pub mod loader;
pub mod plugin;
pub mod registry;
pub mod slots;

// Re-export key public types for easier use by the binary and plugins
pub use host::{Bootstrap, BootstrapReport, ExtensionHost};
pub use loader::LoaderCache;
pub use plugin::{HostManifest, Plugin, PluginManifest};
pub use registry::{Cardinality, ExtensionEntry, ExtensionKey, ExtensionRegistry};

#[cfg(test)]
mod tests;
