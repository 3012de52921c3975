use std::fmt;
use std::str::FromStr;

use crate::registry::error::RegistryError;

/// Scoped registration key: the contributing component plus a discriminator
/// within that component.
///
/// A "component" is an installable feature unit of the host application
/// (e.g. `webmap`), not a UI widget. The rendered form `component/identity`
/// is also the memoization key used when the entry's payload is resolved
/// through the loader cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionKey {
    component: String,
    identity: String,
}

impl ExtensionKey {
    pub fn new(component: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            identity: identity.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl fmt::Display for ExtensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.component, self.identity)
    }
}

impl FromStr for ExtensionKey {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((component, identity)) if !component.is_empty() && !identity.is_empty() => {
                Ok(ExtensionKey::new(component, identity))
            }
            _ => Err(RegistryError::InvalidKey { raw: s.to_string() }),
        }
    }
}
