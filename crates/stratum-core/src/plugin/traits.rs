use crate::host::ExtensionHost;
use crate::plugin::error::PluginSystemError;
use crate::plugin::version::VersionRange;

/// A feature plugin of the host application.
///
/// A plugin's observable effect is what it registers: `register` runs
/// exactly once, synchronously, during bootstrap, in the order fixed by the
/// host manifest. Heavy payloads must not be built here; register deferred
/// entries instead and let them load on first use.
pub trait Plugin: Send + Sync {
    /// Stable plugin identifier, matching the manifest entry.
    fn id(&self) -> &str;

    /// Plugin version string (semver).
    fn version(&self) -> &str;

    /// Host API ranges this plugin can run against.
    fn compatible_api_versions(&self) -> Vec<VersionRange>;

    /// Contribute entries to the host's registries.
    fn register(&self, host: &mut ExtensionHost) -> Result<(), PluginSystemError>;
}
